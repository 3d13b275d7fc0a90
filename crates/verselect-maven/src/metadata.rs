//! maven-metadata.xml parsing for version discovery.

use quick_xml::events::Event;
use quick_xml::Reader;
use verselect_core::status::{INTEGRATION, RELEASE};
use verselect_core::versioned::{Candidate, ModuleId};

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default)]
pub struct MavenMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
}

impl MavenMetadata {
    pub fn module_id(&self) -> Option<ModuleId> {
        Some(ModuleId::new(
            self.group_id.as_deref()?,
            self.artifact_id.as_deref()?,
        ))
    }

    /// Listed versions as candidates, in document order.
    ///
    /// Maven only distinguishes snapshots from releases: `-SNAPSHOT` versions
    /// get the `integration` status, everything else `release`.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.versions
            .iter()
            .map(|v| Candidate::with_status(v.as_str(), status_for(v)))
            .collect()
    }
}

/// Publication status implied by a Maven version string.
pub fn status_for(version: &str) -> &'static str {
    if version.ends_with(SNAPSHOT_SUFFIX) {
        INTEGRATION
    } else {
        RELEASE
    }
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(xml: &str) -> miette::Result<MavenMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = MavenMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                match path.join(">").as_str() {
                    "metadata>groupId" => meta.group_id = Some(text_buf.clone()),
                    "metadata>artifactId" => meta.artifact_id = Some(text_buf.clone()),
                    "metadata>versioning>latest" => meta.latest = Some(text_buf.clone()),
                    "metadata>versioning>release" => meta.release = Some(text_buf.clone()),
                    "metadata>versioning>versions>version" if !text_buf.is_empty() => {
                        meta.versions.push(text_buf.clone());
                    }
                    _ => {}
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(verselect_util::errors::VerselectError::Metadata {
                    message: format!(
                        "Failed to parse maven-metadata.xml at byte {}: {e}",
                        reader.error_position()
                    ),
                }
                .into());
            }
            _ => {}
        }
    }

    tracing::debug!(
        "Parsed maven-metadata.xml for {} with {} versions",
        meta.module_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<unknown module>".to_string()),
        meta.versions.len()
    );
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COROUTINES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.jetbrains.kotlinx</groupId>
  <artifactId>kotlinx-coroutines-core</artifactId>
  <versioning>
    <latest>1.9.0-SNAPSHOT</latest>
    <release>1.8.0</release>
    <versions>
      <version>1.6.0</version>
      <version>1.7.0</version>
      <version>1.8.0-RC</version>
      <version>1.8.0</version>
      <version>1.9.0-SNAPSHOT</version>
    </versions>
    <lastUpdated>20240101120000</lastUpdated>
  </versioning>
</metadata>"#;

    #[test]
    fn parse_artifact_metadata() {
        let meta = parse_metadata(COROUTINES).unwrap();
        assert_eq!(meta.group_id.as_deref(), Some("org.jetbrains.kotlinx"));
        assert_eq!(meta.artifact_id.as_deref(), Some("kotlinx-coroutines-core"));
        assert_eq!(meta.latest.as_deref(), Some("1.9.0-SNAPSHOT"));
        assert_eq!(meta.release.as_deref(), Some("1.8.0"));
        assert_eq!(meta.versions.len(), 5);
        assert_eq!(meta.versions[0], "1.6.0");
        assert_eq!(meta.versions[4], "1.9.0-SNAPSHOT");
    }

    #[test]
    fn module_id_from_metadata() {
        let meta = parse_metadata(COROUTINES).unwrap();
        assert_eq!(
            meta.module_id().unwrap().to_string(),
            "org.jetbrains.kotlinx:kotlinx-coroutines-core"
        );
        assert!(MavenMetadata::default().module_id().is_none());
    }

    #[test]
    fn candidates_carry_status() {
        let meta = parse_metadata(COROUTINES).unwrap();
        let candidates = meta.candidates();
        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[3], Candidate::with_status("1.8.0", "release"));
        assert_eq!(
            candidates[4],
            Candidate::with_status("1.9.0-SNAPSHOT", "integration")
        );
    }

    #[test]
    fn status_for_versions() {
        assert_eq!(status_for("2.0-SNAPSHOT"), "integration");
        assert_eq!(status_for("2.0-RC1"), "release");
    }

    #[test]
    fn empty_versions_block() {
        let meta = parse_metadata(
            "<metadata><groupId>g</groupId><artifactId>a</artifactId><versioning><versions/></versioning></metadata>",
        )
        .unwrap();
        assert!(meta.versions.is_empty());
        assert!(meta.candidates().is_empty());
    }

    #[test]
    fn malformed_xml_is_error() {
        let err = parse_metadata("<metadata><groupId>g</artifactId></metadata>").unwrap_err();
        assert!(err.to_string().contains("Metadata error"), "got: {err}");
    }
}
