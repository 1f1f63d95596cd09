//! Phase two: routing token to artifact bytes.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;
use urna_catalog::Identifier;

use crate::data::RoutingToken;
use crate::endpoint::Endpoints;
use crate::error::{FetchError, Result};
use crate::http::HttpClient;

/// Downloads one ballot-unit artifact per call.
pub struct ArtifactFetcher<C: HttpClient> {
    client: Arc<C>,
    endpoints: Endpoints,
}

impl<C: HttpClient> ArtifactFetcher<C> {
    pub fn new(client: Arc<C>, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub async fn fetch(&self, id: Identifier, token: RoutingToken) -> Result<(Identifier, Bytes)> {
        let url = self.endpoints.artifact_url(&id, &token);
        debug!(%id, %url, "fetching artifact");

        let response = match self.client.get(&url, &[]).await {
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

        Ok((id, response.body))
    }
}
