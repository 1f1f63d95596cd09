use std::fmt;

use serde::{Deserialize, Serialize};

/// One ballot unit, addressed by four opaque codes.
///
/// The codes are kept as strings: leading zeros are significant and the
/// remote service expects them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    pub region: String,
    pub council: String,
    pub zone: String,
    pub section: String,
}

impl Identifier {
    pub fn new(
        region: impl Into<String>,
        council: impl Into<String>,
        zone: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            council: council.into(),
            zone: zone.into(),
            section: section.into(),
        }
    }

    /// Name under which this unit's artifact is published and stored.
    pub fn artifact_file_name(&self) -> String {
        format!("o00407-{}{}{}.bu", self.council, self.zone, self.section)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.region, self.council, self.zone, self.section
        )
    }
}
