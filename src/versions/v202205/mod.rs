//! API version v202205

pub mod ad_rule;
pub mod common;
pub mod content;
pub mod custom_field;
pub mod network;
pub mod user;

pub use ad_rule::{AdRule, AdRuleAction, AdRuleService, AdRuleStatus};
pub use common::{Date, DateTime};
pub use content::{Content, ContentService, ContentStatus, ContentStatusDefinedBy};
pub use custom_field::{CustomField, CustomFieldAction, CustomFieldDataType, CustomFieldEntityType, CustomFieldService, CustomFieldVisibility};
pub use network::{ChildPublisher, DelegationType, Network, NetworkService};
pub use user::{User, UserAction, UserService};

use crate::api::registry::VersionSchema;

pub const VERSION: &str = "v202205";

pub fn schema() -> VersionSchema {
    VersionSchema::new(VERSION)
        .with::<AdRuleService>()
        .with::<ContentService>()
        .with::<CustomFieldService>()
        .with::<NetworkService>()
        .with::<UserService>()
}
