use std::fmt;
use std::str::FromStr;

use snafu::{OptionExt, Snafu, ensure};

/// An absolute path inside the emulated namespace, already split into
/// segments. The bare separator `/` parses to zero segments and denotes
/// the root itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits into base name and container segments. `None` for the root,
    /// which has no base name.
    pub fn split_last(&self) -> Option<(&str, &[String])> {
        self.segments
            .split_last()
            .map(|(name, container)| (name.as_str(), container))
    }
}

impl FromStr for NodePath {
    type Err = InvalidPathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let rest = path.strip_prefix('/').context(NotAbsoluteSnafu { path })?;
        if rest.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
            });
        }

        let segments = rest
            .split('/')
            .map(|segment| {
                ensure!(!segment.is_empty(), EmptySegmentSnafu { path });
                Ok(segment.to_owned())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum InvalidPathError {
    #[snafu(display("Path '{}' does not start with '/'", path))]
    NotAbsoluteError { path: String },
    #[snafu(display("Path '{}' contains an empty segment", path))]
    EmptySegmentError { path: String },
}
