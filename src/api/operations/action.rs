//! Bulk actions applied to the entities a statement selects

use crate::api::soap::xml::XmlWriter;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

/// A closed set of payload-free commands for one entity family
///
/// Implemented by one enum per family, so a service only accepts the
/// actions declared for it.
pub trait Action: Copy + fmt::Debug + Send + Sync + 'static {
    /// Parameter element name, e.g. `adRuleAction`
    const PARAMETER: &'static str;

    /// Wire type of this variant, e.g. `ActivateAdRules`
    fn type_name(&self) -> &'static str;

    fn write_xml(&self, w: &mut XmlWriter) {
        w.empty_with(Self::PARAMETER, &[("xsi:type", self.type_name())]);
    }
}

/// Outcome of a bulk action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// Entities the action changed
    pub num_changes: u32,
    /// Matched entities the caller may not modify
    pub failed_entity_ids: BTreeSet<i64>,
}

impl ActionResult {
    pub fn is_complete(&self) -> bool {
        self.failed_entity_ids.is_empty()
    }
}

/// `UpdateResult` as it appears in `rval`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateResult {
    #[serde(default)]
    num_changes: u32,
    #[serde(default)]
    failed_entity_ids: Vec<i64>,
}

impl From<UpdateResult> for ActionResult {
    fn from(result: UpdateResult) -> Self {
        Self {
            num_changes: result.num_changes,
            failed_entity_ids: result.failed_entity_ids.into_iter().collect(),
        }
    }
}
