use std::future::Future;

use bytes::Bytes;

/// Status and full body of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP client abstraction.
///
/// One client is shared by every request of a run so connections are reused.
/// Implementations own their timeout configuration; an `Err` always means the
/// exchange did not complete (connect failure, timeout, reset, body read).
/// Non-success statuses are returned as `Ok` and judged by the caller.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - `MockHttpClient` (feature `mock`): canned routes for tests
pub trait HttpClient: Send + Sync {
    /// Transport-level error.
    type Error: std::error::Error + Send + 'static;

    /// GET `url` and read the whole body.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::FetchOptions;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ClientBuildError {
        #[error("failed to build HTTP client: {0}")]
        Build(#[from] reqwest::Error),
    }

    /// Production HTTP client using reqwest's pooled connections.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new(options: &FetchOptions) -> Result<Self, ClientBuildError> {
            let client = reqwest::Client::builder()
                .timeout(options.timeouts.request)
                .connect_timeout(options.timeouts.connect)
                .user_agent(options.user_agent.clone())
                .build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, Self::Error> {
            let mut request = self.client.get(url);

            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientBuildError, ReqwestClient};
