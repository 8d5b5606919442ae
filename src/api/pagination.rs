//! Pagination envelope for list operations.
//!
//! Every Trellis list endpoint returns its items wrapped in a common
//! envelope carrying page metadata. [`PaginatedResponse<T>`] decodes that
//! envelope and implements `Deref<Target = [T]>` so the items can be used
//! like a slice directly.
//!
//! # Example
//!
//! ```rust,ignore
//! let policies = client.policies().list(None).await?;
//!
//! for policy in policies.iter() {
//!     println!("{}", policy.description);
//! }
//!
//! if let Some(next) = policies.next_page() {
//!     let params = PolicyListParams { page: Some(next), ..Default::default() };
//!     let more = client.policies().list(Some(params)).await?;
//! }
//! ```

use std::ops::Deref;

use serde::Deserialize;

/// Page metadata returned alongside list items.
///
/// Page numbers are zero-based. `prev_page`/`next_page` are `None` at the
/// corresponding end of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Total number of items across all pages.
    pub total: u64,
    /// The first page number (always 0).
    pub first_page: u32,
    /// The previous page number, if there is one.
    pub prev_page: Option<u32>,
    /// The next page number, if there is one.
    pub next_page: Option<u32>,
    /// The last page number.
    pub last_page: u32,
}

/// A page of results from a Trellis list endpoint.
///
/// Wraps the decoded items together with the page metadata. Implements
/// `Deref<Target = [T]>` for transparent slice access.
///
/// # Example
///
/// ```rust
/// use trellis_api::api::PaginatedResponse;
///
/// let page: PaginatedResponse<String> = serde_json::from_value(serde_json::json!({
///     "items": ["a", "b"],
///     "metadata": {
///         "total": 5,
///         "firstPage": 0,
///         "prevPage": null,
///         "nextPage": 1,
///         "lastPage": 2
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page[0], "a");
/// assert!(page.has_next_page());
/// assert_eq!(page.total(), Some(5));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    items: Vec<T>,
    metadata: Option<PaginationMetadata>,
}

impl<T> PaginatedResponse<T> {
    /// Creates a response from items and optional metadata.
    #[must_use]
    pub const fn new(items: Vec<T>, metadata: Option<PaginationMetadata>) -> Self {
        Self { items, metadata }
    }

    /// Consumes the response and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the page metadata, if the endpoint provided it.
    #[must_use]
    pub const fn metadata(&self) -> Option<&PaginationMetadata> {
        self.metadata.as_ref()
    }

    /// Returns the total item count across all pages, if known.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.metadata.map(|m| m.total)
    }

    /// Returns `true` if there is a next page of results.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.metadata.is_some_and(|m| m.next_page.is_some())
    }

    /// Returns `true` if there is a previous page of results.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.metadata.is_some_and(|m| m.prev_page.is_some())
    }

    /// Returns the next page number, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.metadata.and_then(|m| m.next_page)
    }

    /// Returns the previous page number, if there is one.
    #[must_use]
    pub fn prev_page(&self) -> Option<u32> {
        self.metadata.and_then(|m| m.prev_page)
    }
}

/// Provides transparent slice access to the items.
impl<T> Deref for PaginatedResponse<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a PaginatedResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Verify PaginatedResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PaginatedResponse<String>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_envelope_with_metadata() {
        let page: PaginatedResponse<u32> = serde_json::from_value(json!({
            "items": [1, 2, 3],
            "metadata": {
                "total": 12,
                "firstPage": 0,
                "prevPage": null,
                "nextPage": 1,
                "lastPage": 3
            }
        }))
        .unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page.total(), Some(12));
        assert!(page.has_next_page());
        assert!(!page.has_prev_page());
        assert_eq!(page.next_page(), Some(1));
    }

    #[test]
    fn test_deserializes_envelope_without_metadata() {
        let page: PaginatedResponse<u32> =
            serde_json::from_value(json!({"items": [7]})).unwrap();

        assert_eq!(page.len(), 1);
        assert!(page.metadata().is_none());
        assert!(page.total().is_none());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_deref_allows_slice_access() {
        let page = PaginatedResponse::new(vec!["a", "b", "c"], None);

        assert_eq!(page.len(), 3);
        assert_eq!(page[1], "b");
        assert_eq!(page.first(), Some(&"a"));
        assert!(!page.is_empty());
    }

    #[test]
    fn test_into_items_returns_owned_vec() {
        let page = PaginatedResponse::new(vec![1, 2, 3], None);
        assert_eq!(page.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn test_iteration_by_reference() {
        let page = PaginatedResponse::new(vec![10, 20], None);
        let doubled: Vec<i32> = (&page).into_iter().map(|n| n * 2).collect();
        assert_eq!(doubled, vec![20, 40]);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: PaginatedResponse<u32> = serde_json::from_value(json!({
            "items": [9],
            "metadata": {
                "total": 31,
                "firstPage": 0,
                "prevPage": 2,
                "nextPage": null,
                "lastPage": 3
            }
        }))
        .unwrap();

        assert!(!page.has_next_page());
        assert!(page.has_prev_page());
        assert_eq!(page.prev_page(), Some(2));
    }
}
