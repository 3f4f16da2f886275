use crate::api::service::{actions, api_service, by_statement, perform_action};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldEntityType {
    LineItem,
    Order,
    Creative,
    Proposal,
    ProposalLineItem,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldDataType {
    #[serde(rename = "STRING")]
    Text,
    Number,
    Toggle,
    DropDown,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldVisibility {
    Hidden,
    ReadOnly,
    Editable,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub entity_type: Option<CustomFieldEntityType>,
    pub data_type: Option<CustomFieldDataType>,
    pub visibility: Option<CustomFieldVisibility>,
}

actions!(
    CustomFieldAction,
    "customFieldAction" {
        Activate => "ActivateCustomFields",
        Deactivate => "DeactivateCustomFields",
    }
);

api_service!(
    /// Custom fields attached to orders, line items and creatives
    CustomFieldService,
    super::VERSION,
    "CustomFieldService"
);

by_statement!(CustomFieldService, get_custom_fields_by_statement, "getCustomFieldsByStatement", "filterStatement", CustomField);
perform_action!(CustomFieldService, perform_custom_field_action, "performCustomFieldAction", CustomFieldAction);
