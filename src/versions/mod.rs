//! Per-version schema modules
//!
//! Each version declares its own entity types, enums and services. Nothing
//! is shared between versions, even where the shapes coincide, because the
//! server adds and removes enum members from one version to the next.

pub mod v202202;
pub mod v202205;

use crate::api::registry::VersionSchema;

/// Schemas of every version compiled in
pub fn schemas() -> Vec<VersionSchema> {
    vec![v202202::schema(), v202205::schema()]
}
