//! URL construction for the hash and artifact endpoints.

use url::Url;
use urna_catalog::Identifier;

use crate::data::RoutingToken;

/// Published location of the 2022 first-round ballot units.
pub const DEFAULT_BASE_URL: &str =
    "https://resultados.tse.jus.br/oficial/ele2022/arquivo-urna/407/dados";

/// Both endpoints hang off one base: `{base}/{region}/{council}/{zone}/{section}/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Validate `base` as an absolute http(s) URL.
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(url::ParseError::RelativeUrlWithoutBase);
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn unit_dir(&self, id: &Identifier) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base, id.region, id.council, id.zone, id.section
        )
    }

    pub fn hash_url(&self, id: &Identifier) -> String {
        format!(
            "{}/p000407-{}-m{}-z{}-s{}-aux.json",
            self.unit_dir(id),
            id.region,
            id.council,
            id.zone,
            id.section
        )
    }

    pub fn artifact_url(&self, id: &Identifier, token: &RoutingToken) -> String {
        format!(
            "{}/{}/{}",
            self.unit_dir(id),
            token,
            id.artifact_file_name()
        )
    }
}
