//! Release manifest as reported by `oc adm release info -o json`.

use serde::Deserialize;

use crate::domain::error::ReleaseError;

/// Ordered list of component names in a release payload.
///
/// Order and duplicates are kept exactly as the release reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseManifest {
    pub components: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ReleaseInfo {
    references: References,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct References {
    spec: ReferencesSpec,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ReferencesSpec {
    tags: Vec<Tag>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Tag {
    name: String,
}

impl ReleaseManifest {
    /// Parse the JSON document printed by the release inspection command.
    ///
    /// Absent `references`, `spec`, or `tags` keys yield an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidJson`] if the bytes are not valid JSON
    /// of the expected shape.
    pub fn parse(json: &[u8]) -> Result<Self, ReleaseError> {
        let info: ReleaseInfo = serde_json::from_slice(json)?;
        Ok(Self {
            components: info
                .references
                .spec
                .tags
                .into_iter()
                .map(|tag| tag.name)
                .collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
