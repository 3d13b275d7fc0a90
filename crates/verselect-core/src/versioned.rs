use std::fmt;

use serde::{Deserialize, Serialize};

/// Anything exposing a raw version string.
///
/// Identity (group, module name, ...) lives with the implementor; the version
/// engine only ever reads the version.
pub trait Versioned {
    fn version(&self) -> &str;
}

impl Versioned for str {
    fn version(&self) -> &str {
        self
    }
}

impl Versioned for String {
    fn version(&self) -> &str {
        self.as_str()
    }
}

impl<T: Versioned + ?Sized> Versioned for &T {
    fn version(&self) -> &str {
        (**self).version()
    }
}

/// A version advertised by a repository, with the status it was published
/// under when the repository knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub version: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Candidate {
    /// A candidate with no status metadata.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            status: None,
        }
    }

    pub fn with_status(version: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            status: Some(status.into()),
        }
    }
}

impl Versioned for Candidate {
    fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} ({status})", self.version),
            None => f.write_str(&self.version),
        }
    }
}

/// Module coordinates without a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub group: String,
    pub name: String,
}

impl ModuleId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Parse `"group:name"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, name) = s.split_once(':')?;
        if group.is_empty() || name.is_empty() || name.contains(':') {
            return None;
        }
        Some(Self::new(group, name))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}
