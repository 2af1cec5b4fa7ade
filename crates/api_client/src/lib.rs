//! HTTP boundary.
//!
//! [`ApiClient`] is the single request path used for submissions and
//! lookups. Responses come back as an [`ApiBody`]; every failure is an
//! [`ApiError`], with timeouts, HTTP status errors and transport failures kept
//! apart.

pub mod body;
pub mod client;
pub mod errors;

pub use body::ApiBody;
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use errors::ApiError;
pub use reqwest::multipart;
