//! Image metadata as reported by `oc image info -o json`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Label carrying the source repository URL.
pub const VCS_URL_LABEL: &str = "vcs-url";

/// Label carrying the branch the image was built from.
pub const COMMIT_REF_LABEL: &str = "io.openshift.build.commit.ref";

/// Build history and labels of one component image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Valid `created` timestamps from the image history, sorted ascending.
    pub build_history: Vec<DateTime<Utc>>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ImageInfo {
    config: Option<ImageConfig>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ImageConfig {
    history: Option<Vec<HistoryEntry>>,
    container_config: Option<ContainerConfig>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HistoryEntry {
    created: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ContainerConfig {
    #[serde(rename = "Labels")]
    labels: Option<BTreeMap<String, String>>,
}

impl ImageMetadata {
    /// Parse the JSON document printed by the image inspection command.
    ///
    /// History entries whose `created` field is missing, empty, or not
    /// RFC 3339 are dropped without error.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the bytes are not valid JSON of the
    /// expected shape.
    pub fn parse(json: &[u8]) -> Result<Self, serde_json::Error> {
        let info: ImageInfo = serde_json::from_slice(json)?;
        let config = info.config.unwrap_or_default();
        let mut build_history: Vec<DateTime<Utc>> = config
            .history
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| parse_created(entry.created.as_deref()?))
            .collect();
        build_history.sort_unstable();

        Ok(Self {
            build_history,
            labels: config
                .container_config
                .and_then(|c| c.labels)
                .unwrap_or_default(),
        })
    }

    /// Value of `key`, or `""` when the label is absent.
    #[must_use]
    pub fn label(&self, key: &str) -> &str {
        self.labels.get(key).map_or("", String::as_str)
    }

    #[must_use]
    pub fn vcs_url(&self) -> &str {
        self.label(VCS_URL_LABEL)
    }

    #[must_use]
    pub fn commit_ref(&self) -> &str {
        self.label(COMMIT_REF_LABEL)
    }
}

fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
