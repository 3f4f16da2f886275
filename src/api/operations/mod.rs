//! Bulk action module
//!
//! Action families and the result of applying one through a service's
//! `perform...Action` call.

pub mod action;

pub use action::{Action, ActionResult};
pub(crate) use action::UpdateResult;
