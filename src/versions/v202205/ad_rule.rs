use super::common::DateTime;
use crate::api::service::{actions, api_service, by_statement, perform_action};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdRuleStatus {
    Active,
    Inactive,
    Deleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyCapBehavior {
    TurnOn,
    TurnOff,
    Defer,
    #[serde(other)]
    Unknown,
}

/// Ad rule; targeting and slot definitions are not decoded
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRule {
    pub ad_rule_id: Option<i64>,
    pub name: Option<String>,
    pub priority: Option<i32>,
    pub start_date_time: Option<DateTime>,
    pub end_date_time: Option<DateTime>,
    pub unlimited_end_date_time: Option<bool>,
    pub status: Option<AdRuleStatus>,
    pub frequency_cap_behavior: Option<FrequencyCapBehavior>,
    pub max_impressions_per_line_item_per_stream: Option<i32>,
    pub max_impressions_per_line_item_per_pod: Option<i32>,
}

actions!(
    AdRuleAction,
    "adRuleAction" {
        Activate => "ActivateAdRules",
        Deactivate => "DeactivateAdRules",
        Delete => "DeleteAdRules",
    }
);

api_service!(
    /// Video ad rules
    AdRuleService,
    super::VERSION,
    "AdRuleService"
);

by_statement!(AdRuleService, get_ad_rules_by_statement, "getAdRulesByStatement", "statement", AdRule);
perform_action!(AdRuleService, perform_ad_rule_action, "performAdRuleAction", AdRuleAction);
