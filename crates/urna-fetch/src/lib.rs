//! HTTP side of the ballot-unit pipeline.
//!
//! # Architecture
//!
//! - [`data`] - Request options, timeouts and the routing token
//! - [`endpoint`] - URL construction for both remote endpoints
//! - [`http`] - The [`HttpClient`] seam and its reqwest implementation
//! - [`HashResolver`] / [`ArtifactFetcher`] - one request per call, every
//!   failure tagged with the identifier it belongs to
//!
//! Nothing here retries. Callers decide what a failed item means.

pub mod data;
pub mod endpoint;
mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

mod artifact;
mod resolve;

pub use artifact::ArtifactFetcher;
pub use data::{FetchOptions, RoutingToken, Timeouts};
pub use endpoint::{DEFAULT_BASE_URL, Endpoints};
pub use error::{FetchError, Result};
pub use http::{HttpClient, HttpResponse};
pub use resolve::{HashResolver, parse_hash_manifest};

#[cfg(feature = "reqwest")]
pub use http::{ClientBuildError, ReqwestClient};
