use crate::api::client::NoArgs;
use crate::api::error::Result;
use crate::api::service::api_service;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: i64,
    pub display_name: Option<String>,
    pub network_code: Option<String>,
    pub property_code: Option<String>,
    pub time_zone: Option<String>,
    pub currency_code: Option<String>,
    #[serde(default)]
    pub secondary_currency_codes: Vec<String>,
    pub effective_root_ad_unit_id: Option<String>,
    pub is_test: Option<bool>,
    /// Publishers managed by this network
    #[serde(default)]
    pub child_publishers: Vec<ChildPublisher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPublisher {
    pub child_network_code: Option<String>,
    pub approved_delegation_type: Option<DelegationType>,
    pub seller_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelegationType {
    ManageAccount,
    ManageInventory,
    #[serde(other)]
    Unknown,
}

api_service!(
    /// Networks the authenticated user can access
    NetworkService,
    super::VERSION,
    "NetworkService"
);

impl NetworkService {
    pub async fn get_current_network(&self) -> Result<Network> {
        self.client
            .call_rval(&NoArgs {
                method: "getCurrentNetwork",
            })
            .await
    }

    pub async fn get_all_networks(&self) -> Result<Vec<Network>> {
        self.client
            .call_list(&NoArgs {
                method: "getAllNetworks",
            })
            .await
    }
}
