//! Typed resource clients for the Trellis API.
//!
//! Each submodule covers one resource family: its data transfer types,
//! its patch model (the fields legal in partial updates, declared as
//! [`Field`](crate::api::Field) constants), its list parameters, and a
//! borrowed client struct exposing the route mappings. Obtain the
//! clients through the accessor methods on
//! [`ApiClient`](crate::api::ApiClient).
//!
//! The modules are deliberately uniform: a `list`/`get`/`create`/`delete`
//! set where the API supports it, an `update(id)` returning a
//! [`PatchBuilder`](crate::api::PatchBuilder), and bulk actions where the
//! API offers them.

pub mod dns_record;
pub mod dns_zone;
pub mod enrolment_key;
pub mod organisation;
pub mod policy;
pub mod system;
pub mod tag;
pub mod trust_requirement;

use serde::Deserialize;

/// Result of a bulk enable/disable/revoke action.
///
/// Bulk endpoints accept an array of ids and report how many items the
/// action touched; ids that did not match anything are skipped, not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResult {
    /// Number of items the action was applied to.
    pub items_updated: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_action_result_deserializes_from_wire_shape() {
        let result: BulkActionResult =
            serde_json::from_value(serde_json::json!({"itemsUpdated": 3})).unwrap();
        assert_eq!(result.items_updated, 3);
    }
}
