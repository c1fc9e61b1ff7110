//! Channel identifier allow-list
//!
//! A line-delimited file of tvg-ids, loaded once before aggregation begins.
//! Membership gates every channel and programme that reaches the output.

use std::collections::HashSet;
use std::path::Path;

use crate::errors::AppError;

/// Immutable set of allowed channel identifiers
#[derive(Debug, Clone)]
pub struct ChannelAllowList {
    ids: HashSet<String>,
}

impl ChannelAllowList {
    /// Load the allow-list from a line-delimited UTF-8 file
    ///
    /// A failure here is fatal: without the allow-list there is nothing
    /// meaningful to aggregate.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::AllowListLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_lines(&content))
    }

    /// Build the allow-list from line-delimited text
    ///
    /// Each line is trimmed and inserted; duplicates collapse. Blank lines
    /// become an empty-string member, matching how these files have always
    /// been consumed.
    pub fn from_lines(content: &str) -> Self {
        let ids = content.lines().map(|line| line.trim().to_string()).collect();
        Self { ids }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
