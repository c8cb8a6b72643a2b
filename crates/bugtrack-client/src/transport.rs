//! Transport trait

use crate::error::ApiError;
use crate::request::ApiRequest;
use async_trait::async_trait;
use serde_json::Value;

/// Performs API requests against a configured base address
///
/// Implementations can be direct (hitting the network) or scripted for
/// tests. A 2xx reply resolves to its JSON body (`Value::Null` when the body
/// is empty); anything else is an [`ApiError`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the store can share one
/// transport across every in-flight request.
///
/// # Example
///
/// ```rust,ignore
/// use bugtrack_client::{ApiRequest, Transport};
///
/// async fn list_bugs(transport: &dyn Transport) -> Result<serde_json::Value, ApiError> {
///     transport.request(&ApiRequest::get("/bugs")).await
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a request and return the response body
    async fn request(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}
