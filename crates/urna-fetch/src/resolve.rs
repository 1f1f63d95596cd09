//! Phase one: identifier to routing token.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use urna_catalog::Identifier;

use crate::data::{FetchOptions, RoutingToken};
use crate::endpoint::Endpoints;
use crate::error::{FetchError, Result};
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct HashManifest {
    hashes: Vec<HashRecord>,
}

#[derive(Debug, Deserialize)]
struct HashRecord {
    hash: String,
}

/// Extract the first hash record's token from a hash-endpoint body.
///
/// Returns a description of what is wrong with the body on failure.
pub fn parse_hash_manifest(body: &[u8]) -> std::result::Result<RoutingToken, String> {
    let manifest: HashManifest = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    manifest
        .hashes
        .into_iter()
        .next()
        .map(|record| RoutingToken::new(record.hash))
        .ok_or_else(|| "empty hash list".to_string())
}

/// Looks up the routing token of one ballot unit per call.
pub struct HashResolver<C: HttpClient> {
    client: Arc<C>,
    endpoints: Endpoints,
    options: FetchOptions,
}

impl<C: HttpClient> HashResolver<C> {
    pub fn new(client: Arc<C>, endpoints: Endpoints, options: FetchOptions) -> Self {
        Self {
            client,
            endpoints,
            options,
        }
    }

    pub async fn resolve(&self, id: Identifier) -> Result<(Identifier, RoutingToken)> {
        let url = self.endpoints.hash_url(&id);
        debug!(%id, %url, "resolving hash");

        let response = match self.client.get(&url, &self.options.hash_headers).await {
            Ok(response) => response,
            Err(e) => return Err(FetchError::network(&id, &e)),
        };

        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                id,
                status: response.status,
                url,
            });
        }

        match parse_hash_manifest(&response.body) {
            Ok(token) => Ok((id, token)),
            Err(message) => Err(FetchError::Parse { id, message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockHttpClient, MockRoute};

    fn id() -> Identifier {
        Identifier::new("rr", "03018", "0001", "0001")
    }

    fn resolver(client: MockHttpClient) -> HashResolver<MockHttpClient> {
        HashResolver::new(Arc::new(client), Endpoints::default(), FetchOptions::default())
    }

    #[test]
    fn manifest_takes_first_hash() {
        let body = br#"{"ds":"x","hashes":[{"hash":"aaa","st":"Totalizado"},{"hash":"bbb"}]}"#;
        assert_eq!(parse_hash_manifest(body).unwrap(), RoutingToken::new("aaa"));
    }

    #[test]
    fn manifest_without_hashes_fails() {
        assert!(parse_hash_manifest(br#"{"hashes":[]}"#).is_err());
        assert!(parse_hash_manifest(br#"{"other":1}"#).is_err());
        assert!(parse_hash_manifest(br#"{"hashes":[{"hash":7}]}"#).is_err());
        assert!(parse_hash_manifest(b"<html>").is_err());
    }

    #[tokio::test]
    async fn resolve_returns_token() {
        let url = Endpoints::default().hash_url(&id());
        let client = MockHttpClient::new().route(url, MockRoute::json(r#"{"hashes":[{"hash":"abc"}]}"#));

        let (got, token) = resolver(client).resolve(id()).await.unwrap();
        assert_eq!(got, id());
        assert_eq!(token.as_str(), "abc");
    }

    #[tokio::test]
    async fn resolve_sends_accept_header() {
        let url = Endpoints::default().hash_url(&id());
        let client = Arc::new(
            MockHttpClient::new().route(url, MockRoute::json(r#"{"hashes":[{"hash":"abc"}]}"#)),
        );
        let resolver =
            HashResolver::new(Arc::clone(&client), Endpoints::default(), FetchOptions::default());

        resolver.resolve(id()).await.unwrap();

        let headers = client.last_headers().unwrap();
        assert!(headers.iter().any(|(k, _)| k == "Accept"));
    }

    #[tokio::test]
    async fn resolve_maps_status() {
        let client = MockHttpClient::new();
        match resolver(client).resolve(id()).await {
            Err(FetchError::HttpStatus { id: got, status, .. }) => {
                assert_eq!(got, id());
                assert_eq!(status, 404);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_maps_transport_failure() {
        let url = Endpoints::default().hash_url(&id());
        let client = MockHttpClient::new().route(url, MockRoute::transport_error("timed out"));
        let err = resolver(client).resolve(id()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { ref message, .. } if message.contains("timed out")));
    }

    #[tokio::test]
    async fn resolve_maps_bad_body() {
        let url = Endpoints::default().hash_url(&id());
        let client = MockHttpClient::new().route(url, MockRoute::json("{}"));
        let err = resolver(client).resolve(id()).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
        assert_eq!(err.id(), &id());
    }
}
