//! Publication status schemes used by `latest.<status>` selectors.

use std::fmt;
use std::sync::Arc;

use verselect_util::errors::VerselectError;

/// Status given to snapshot or otherwise unpublished builds.
pub const INTEGRATION: &str = "integration";

/// Status given to pre-release milestones.
pub const MILESTONE: &str = "milestone";

/// Status given to published releases.
pub const RELEASE: &str = "release";

/// An ordered list of status names, least mature first.
///
/// Cloning is cheap and the scheme is never mutated, so one instance can be
/// shared by every selector and every resolution thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScheme {
    statuses: Arc<[String]>,
}

impl StatusScheme {
    /// Build a scheme from status names in ascending order.
    pub fn new<I, S>(statuses: I) -> miette::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statuses: Vec<String> = statuses.into_iter().map(Into::into).collect();
        if statuses.is_empty() {
            return Err(VerselectError::Config {
                message: "status scheme must name at least one status".to_string(),
            }
            .into());
        }
        for (i, status) in statuses.iter().enumerate() {
            if status.trim().is_empty() {
                return Err(VerselectError::Config {
                    message: "status scheme contains an empty status".to_string(),
                }
                .into());
            }
            if statuses[..i].contains(status) {
                return Err(VerselectError::Config {
                    message: format!("status '{status}' appears more than once in the scheme"),
                }
                .into());
            }
        }
        Ok(Self {
            statuses: statuses.into(),
        })
    }

    /// Position of `status` in the scheme, or `None` if it is not part of it.
    pub fn rank(&self, status: &str) -> Option<usize> {
        self.statuses.iter().position(|s| s == status)
    }

    pub fn contains(&self, status: &str) -> bool {
        self.rank(status).is_some()
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }
}

impl Default for StatusScheme {
    fn default() -> Self {
        Self {
            statuses: vec![
                INTEGRATION.to_string(),
                MILESTONE.to_string(),
                RELEASE.to_string(),
            ]
            .into(),
        }
    }
}

impl fmt::Display for StatusScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statuses.join(" < "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_order() {
        let scheme = StatusScheme::default();
        assert_eq!(scheme.rank(INTEGRATION), Some(0));
        assert_eq!(scheme.rank(MILESTONE), Some(1));
        assert_eq!(scheme.rank(RELEASE), Some(2));
        assert_eq!(scheme.rank("nightly"), None);
        assert_eq!(scheme.to_string(), "integration < milestone < release");
    }

    #[test]
    fn custom_scheme() {
        let scheme = StatusScheme::new(["nightly", "beta", "stable"]).unwrap();
        assert!(scheme.contains("beta"));
        assert!(!scheme.contains(RELEASE));
        assert_eq!(scheme.statuses().len(), 3);
    }

    #[test]
    fn rejects_empty_scheme() {
        assert!(StatusScheme::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn rejects_duplicate_status() {
        let err = StatusScheme::new(["release", "integration", "release"]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_blank_status() {
        assert!(StatusScheme::new(["integration", " "]).is_err());
    }
}
