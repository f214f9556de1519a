//! Outbound request execution.
//!
//! The tools never touch the network themselves. They assemble a
//! [`RequestSpec`] and hand it to a [`RequestExecutor`], which performs the
//! round trip and returns a normalized [`ResponseData`] or an
//! [`ExecutorError`]. The trait seam keeps tool logic testable with a stub
//! executor.

mod error;
pub mod http;
mod request;

pub use error::{ExecutorError, ExecutorResult};
pub use http::HttpExecutor;
pub use request::{HttpMethod, RequestSpec, ResponseData};

use async_trait::async_trait;

/// Performs a single HTTP round trip.
///
/// `auth_token` is the full `Authorization` header value resolved from the
/// configured credentials. Implementations must honor
/// `spec.without_authorization` by attaching no credentials at all.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        spec: RequestSpec,
        auth_token: Option<String>,
    ) -> ExecutorResult<ResponseData>;
}
