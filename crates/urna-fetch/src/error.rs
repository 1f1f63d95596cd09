//! Error types for urna-fetch.

use std::error::Error as StdError;

use thiserror::Error;
use urna_catalog::Identifier;

/// A failed request, tagged with the identifier it was made for.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("network error for {id}: {message}")]
    Network { id: Identifier, message: String },

    #[error("HTTP {status} for {id} ({url})")]
    HttpStatus {
        id: Identifier,
        status: u16,
        url: String,
    },

    #[error("unreadable hash response for {id}: {message}")]
    Parse { id: Identifier, message: String },
}

impl FetchError {
    pub fn id(&self) -> &Identifier {
        match self {
            FetchError::Network { id, .. }
            | FetchError::HttpStatus { id, .. }
            | FetchError::Parse { id, .. } => id,
        }
    }

    pub(crate) fn network(id: &Identifier, err: &(dyn StdError + 'static)) -> Self {
        FetchError::Network {
            id: id.clone(),
            message: error_chain(err),
        }
    }
}

/// Render an error with its sources, `outer: inner: root`.
///
/// Transport errors keep the useful part (timeout, DNS, reset) in the source
/// chain rather than in their own message.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] Reset);

    #[test]
    fn chain_includes_sources() {
        assert_eq!(
            error_chain(&Outer(Reset)),
            "error sending request: connection reset"
        );
    }

    #[test]
    fn id_is_exposed_for_every_variant() {
        let id = Identifier::new("rr", "03018", "0001", "0001");
        let err = FetchError::HttpStatus {
            id: id.clone(),
            status: 404,
            url: "http://x".into(),
        };
        assert_eq!(err.id(), &id);
        assert_eq!(err.to_string(), "HTTP 404 for rr/03018/0001/0001 (http://x)");
    }
}
