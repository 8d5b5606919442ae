//! Fluent partial updates over HTTP PATCH.
//!
//! This module provides the building blocks for sparse updates: a
//! [`PatchDocument`] accumulating pending field assignments, typed
//! [`Field`] selectors declared once per patchable model, and the generic
//! [`PatchBuilder`] that validates assignments, sends a single PATCH
//! request and decodes the typed result.
//!
//! # How It Works
//!
//! Every mutable resource declares a patch model: a marker type carrying
//! one [`Field`] constant per wire field. A resource client hands out a
//! `PatchBuilder` bound to one resource instance's route; the caller sets
//! any number of fields and applies the patch:
//!
//! ```rust,ignore
//! use trellis_api::resources::policy::PolicyPatch;
//!
//! let policy = client
//!     .policies()
//!     .update(7)
//!     .set(PolicyPatch::DESCRIPTION, "Allow builds".to_string())?
//!     .set(PolicyPatch::IS_ENABLED, true)?
//!     .apply()
//!     .await?;
//! ```
//!
//! Only fields that were set are serialised; the request body for the
//! example above is exactly `{"description":"Allow builds","isEnabled":true}`.
//! Fields are never emitted as `null` — a value whose serialisation is
//! `null` is rejected at the `set` call site.
//!
//! Because selectors are constants declared next to the model, a
//! misspelled field name cannot reach the wire: the reference simply does
//! not compile.
//!
//! # Builder Reuse
//!
//! The pending document is drained at the start of every [`PatchBuilder::apply`]
//! call, before the request goes out. Success or failure, the builder is
//! left empty and immediately reusable; after a failed send the caller
//! must re-set any fields before retrying. This trades "retry with the
//! same fields" ergonomics for the guarantee that a failed call can never
//! leak stale fields into the next patch.

use std::any::type_name;
use std::marker::PhantomData;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::ApiClient;
use crate::clients::{HttpError, HttpResponseError};

/// Errors surfaced by [`PatchBuilder::set`] and [`PatchBuilder::apply`].
///
/// The variants fall into three groups: caller errors raised synchronously
/// by `set` before any network activity (`NullValue`, `Serialize`),
/// transport failures from the PATCH round trip (`Http`), and contract
/// violations where a 2xx response carries no usable representation
/// (`EmptyResponse`, `InvalidResponse`).
#[derive(Debug, Error)]
pub enum PatchError {
    /// A value serialising to `null` was passed to `set`.
    ///
    /// Sparse updates never emit `null`; to leave a field unchanged, omit
    /// the `set` call entirely.
    #[error("Field '{field}' cannot be set to null; omit the field to leave it unchanged")]
    NullValue {
        /// The wire name of the offending field.
        field: &'static str,
    },

    /// The value for a field could not be serialised to JSON.
    #[error("Failed to serialize value for field '{field}': {source}")]
    Serialize {
        /// The wire name of the offending field.
        field: &'static str,
        /// The underlying serialisation error.
        source: serde_json::Error,
    },

    /// The PATCH request failed at the transport level or returned a
    /// non-2xx status. The status code and raw body are available for
    /// diagnostics; the SDK does not interpret failure bodies.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The API returned 2xx with an empty or `null` body.
    ///
    /// A successful partial update always returns the full post-update
    /// representation, so this indicates a server fault or a
    /// client/server version mismatch, never a legitimate empty result.
    #[error("Trellis API returned an empty body where a {expected} representation was expected")]
    EmptyResponse {
        /// The expected response model type.
        expected: &'static str,
    },

    /// The API returned 2xx with a body that does not deserialise into
    /// the expected response model.
    #[error("Failed to deserialize response as {expected}: {source}")]
    InvalidResponse {
        /// The expected response model type.
        expected: &'static str,
        /// The underlying deserialisation error.
        source: serde_json::Error,
    },
}

/// Marker trait for patch model types.
///
/// A patch model is a type-level description of the fields a resource
/// accepts in partial updates; it has no runtime behaviour. Implementing
/// this trait is what makes a type usable as the `M` parameter of
/// [`PatchBuilder`] and [`Field`].
pub trait PatchModel: Send + Sync {}

/// A typed reference to one field of a patch model.
///
/// A `Field<M, V>` pairs a wire field name with the value type the field
/// accepts. Selectors carry no runtime state beyond the name; their job
/// is to let the compiler check, at the call site, that a field exists on
/// the model and that the supplied value has the right type.
///
/// Selector constants are declared once, next to the patch model:
///
/// ```rust
/// use trellis_api::api::{Field, PatchModel};
///
/// pub struct RelayPatch;
/// impl PatchModel for RelayPatch {}
///
/// impl RelayPatch {
///     pub const DESCRIPTION: Field<Self, String> = Field::new("description");
///     pub const IS_ENABLED: Field<Self, bool> = Field::new("isEnabled");
/// }
///
/// assert_eq!(RelayPatch::DESCRIPTION.name(), "description");
/// ```
pub struct Field<M, V> {
    name: &'static str,
    _marker: PhantomData<fn(M) -> V>,
}

impl<M, V> Field<M, V> {
    /// Creates a field selector for the given wire name.
    ///
    /// Intended for `const` declarations on patch model types. An empty
    /// name is rejected during constant evaluation, so a malformed
    /// selector fails the build rather than a request.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        assert!(!name.is_empty(), "field selector name must not be empty");
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the wire name of this field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derives would bound M and V unnecessarily.
impl<M, V> Clone for Field<M, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, V> Copy for Field<M, V> {}

impl<M, V> std::fmt::Debug for Field<M, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// An in-progress, unsent partial-update document.
///
/// Holds zero or more pending field assignments as a flat name → value
/// mapping. Setting a field that is already present overwrites the
/// earlier entry (last write wins); a field therefore appears at most
/// once in the serialised document.
///
/// Validation is deliberately not done here — the document is a dumb
/// accumulator, and [`PatchBuilder::set`] owns the argument checks.
#[derive(Debug, Clone, Default)]
pub struct PatchDocument {
    fields: Map<String, Value>,
}

impl PatchDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a field assignment.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the current mapping and resets the document to empty.
    ///
    /// The returned map is a fresh object: later `set_field` calls on
    /// this document can never mutate it.
    #[must_use]
    pub fn drain(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.fields)
    }

    /// Returns `true` if no fields are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of pending field assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns a view of the pending assignments.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A fluent builder for one logical partial-update operation.
///
/// Generic over `M`, the patch model naming the legal fields, and `R`,
/// the response model returned by the API after a successful update. A
/// builder is bound to a single resource instance's route; construct it
/// through the owning resource client's `update` method (or directly via
/// [`ApiClient::patch_builder`]).
///
/// # State
///
/// A builder cycles between empty and accumulating: `set` calls add
/// pending fields, [`apply`](Self::apply) consumes them — exactly once
/// per call, before the request is issued — and returns the builder to
/// its empty state whether or not the request succeeded. Applying with
/// no pending fields is legal and sends `{}`.
///
/// # Concurrency
///
/// A builder assumes a single logical caller; it is not meant to be
/// shared. Construct a fresh builder per patch operation rather than
/// storing one.
///
/// # Example
///
/// ```rust,ignore
/// let zone = client
///     .dns_zones()
///     .update(123)
///     .set(DnsZonePatch::NAME, "internal".to_string())?
///     .apply()
///     .await?;
/// assert_eq!(zone.name, "internal");
/// ```
#[derive(Debug)]
pub struct PatchBuilder<'c, M, R> {
    client: &'c ApiClient,
    route: String,
    document: PatchDocument,
    timeout: Option<Duration>,
    _models: PhantomData<fn() -> (M, R)>,
}

impl<'c, M, R> PatchBuilder<'c, M, R>
where
    M: PatchModel,
    R: DeserializeOwned,
{
    /// Creates a builder bound to the given route.
    pub(crate) fn new(client: &'c ApiClient, route: impl Into<String>) -> Self {
        Self {
            client,
            route: route.into(),
            document: PatchDocument::new(),
            timeout: None,
            _models: PhantomData,
        }
    }

    /// Returns the route this builder patches.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns a view of the fields accumulated so far.
    #[must_use]
    pub const fn pending_fields(&self) -> &Map<String, Value> {
        self.document.fields()
    }

    /// Sets a timeout for the PATCH round trip, overriding the client
    /// default. Dropping the `apply` future also abandons the request;
    /// either way the pending document has already been consumed.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stages a field assignment.
    ///
    /// The value is serialised eagerly so that argument errors surface
    /// here, synchronously, rather than at send time. Setting the same
    /// field again before [`apply`](Self::apply) overwrites the staged
    /// value.
    ///
    /// Returns the builder for chaining:
    ///
    /// ```rust,ignore
    /// builder
    ///     .set(PolicyPatch::DESCRIPTION, "CI agents".to_string())?
    ///     .set(PolicyPatch::IS_ENABLED, false)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::NullValue`] if the value serialises to
    /// `null` (for example `Option::None` or `serde_json::Value::Null`),
    /// and [`PatchError::Serialize`] if serialisation itself fails. Both
    /// indicate a caller bug; nothing is staged in either case.
    pub fn set<V: Serialize>(
        &mut self,
        field: Field<M, V>,
        value: V,
    ) -> Result<&mut Self, PatchError> {
        let value = serde_json::to_value(value).map_err(|source| PatchError::Serialize {
            field: field.name(),
            source,
        })?;
        if value.is_null() {
            return Err(PatchError::NullValue {
                field: field.name(),
            });
        }
        self.document.set_field(field.name(), value);
        Ok(self)
    }

    /// Sends the accumulated document as a single PATCH request and
    /// decodes the full post-update representation.
    ///
    /// The document is drained before the request is issued, so the
    /// builder is back to a clean slate regardless of the outcome — a
    /// failed send cannot leak stale fields into a later patch, and a
    /// retry must re-set its fields. An empty document is sent as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Http`] for network failures and non-2xx
    /// statuses (the status code and raw body are preserved), and
    /// [`PatchError::EmptyResponse`] / [`PatchError::InvalidResponse`]
    /// when a 2xx body is missing or does not match the response model.
    pub async fn apply(&mut self) -> Result<R, PatchError> {
        let document = self.document.drain();
        let body = Value::Object(document);

        let response = self
            .client
            .patch(&self.route, body, self.timeout)
            .await?;

        if !response.is_ok() {
            let request_id = response.request_id().map(ToString::to_string);
            return Err(PatchError::Http(HttpError::Response(HttpResponseError {
                code: response.code,
                message: response.body.to_string(),
                request_id,
            })));
        }

        if response.body.is_null() {
            return Err(PatchError::EmptyResponse {
                expected: type_name::<R>(),
            });
        }

        serde_json::from_value(response.body).map_err(|source| PatchError::InvalidResponse {
            expected: type_name::<R>(),
            source,
        })
    }
}

// Verify patch types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PatchDocument>();
    assert_send_sync::<PatchError>();
};
