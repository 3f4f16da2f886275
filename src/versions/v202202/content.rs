use super::common::DateTime;
use crate::api::service::{api_service, by_statement};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Active,
    Inactive,
    Deleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatusDefinedBy {
    Cms,
    User,
    #[serde(other)]
    Unknown,
}

/// Video content ingested from a CMS
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<ContentStatus>,
    pub status_defined_by: Option<ContentStatusDefinedBy>,
    pub duration: Option<i64>,
    pub last_modified_date_time: Option<DateTime>,
    #[serde(default)]
    pub user_defined_custom_targeting_value_ids: Vec<i64>,
    #[serde(default)]
    pub mapping_rule_defined_custom_targeting_value_ids: Vec<i64>,
}

api_service!(
    /// Read-only access to ingested video content
    ContentService,
    super::VERSION,
    "ContentService"
);

by_statement!(ContentService, get_content_by_statement, "getContentByStatement", "statement", Content);
