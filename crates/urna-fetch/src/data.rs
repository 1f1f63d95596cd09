//! Immutable request configuration and value types.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Accept header the service's own frontend sends for hash lookups.
pub const HASH_ACCEPT: &str = "application/json, text/plain, */*";

/// Opaque token the service returns for one ballot unit.
///
/// Only used to address the artifact; never checked against its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingToken(String);

impl RoutingToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request time limits.
///
/// A request that exceeds either limit fails as a network error for its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Whole request, from send to the last body byte.
    pub request: Duration,
    /// TCP and TLS connection establishment.
    pub connect: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            connect: Duration::from_secs(10),
        }
    }
}

/// Configuration for the HTTP client and the requests made through it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use urna_fetch::FetchOptions;
///
/// let options = FetchOptions::default()
///     .request_timeout(Duration::from_secs(5))
///     .user_agent("urna-test/0.1");
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeouts: Timeouts,

    /// `User-Agent` sent with every request.
    ///
    /// Default: `urna/<crate version>`
    pub user_agent: String,

    /// Headers sent with hash lookups.
    ///
    /// Default: the JSON `Accept` header
    pub hash_headers: Arc<[(String, String)]>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeouts: Timeouts::default(),
            user_agent: format!("urna/{}", env!("CARGO_PKG_VERSION")),
            hash_headers: Arc::from(vec![("Accept".to_string(), HASH_ACCEPT.to_string())]),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request = timeout;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header to hash lookups.
    #[must_use]
    pub fn hash_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.hash_headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.hash_headers = Arc::from(headers);
        self
    }
}
