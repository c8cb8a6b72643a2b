//! Network transport for the bugtrack store
//!
//! The store only depends on a success/failure contract: a request either
//! yields a JSON body (2xx) or an [`ApiError`] carrying a human-readable
//! message. This crate defines that contract as the [`Transport`] trait and
//! ships two implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                Transport trait                   │
//! │  - request(&ApiRequest) -> Result<Value, ApiError>│
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ HttpTransport   │         │ MockTransport       │
//! │ (reqwest)       │         │ (scripted replies)  │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bugtrack_client::{ApiRequest, HttpTransport, Transport};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), bugtrack_client::ApiError> {
//! let transport = HttpTransport::new("http://localhost:9001/api", Duration::from_secs(30))?;
//! let bugs = transport.request(&ApiRequest::get("/bugs")).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http_transport;
pub mod mock_transport;
pub mod request;
pub mod transport;

pub use error::{ApiError, ApiErrorKind};
pub use http_transport::HttpTransport;
pub use mock_transport::{MockGate, MockReply, MockTransport};
pub use request::{ApiRequest, HttpMethod};
pub use transport::Transport;

/// Re-exported so consumers can build request bodies without a direct dependency
pub use serde_json::{json, Value};
