//! Info file reader
//!
//! An info file names the chain columns, one `lab<N>=<label>` entry per line
//! where `N` is the 0-based column index. Blank lines, `#` comments and any
//! other lines are ignored.

use crate::error::{ChainError, ChainResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default label of the posterior weight column
pub const POSTERIOR_LABEL: &str = "Posterior";

/// Default label of the chi-squared column
pub const CHI_SQ_LABEL: &str = r"\chi^2";

/// Column labels parsed from an info file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoFile {
    labels: BTreeMap<usize, String>,
}

impl InfoFile {
    /// Parse info file contents
    pub fn parse(contents: &str) -> ChainResult<Self> {
        let mut labels = BTreeMap::new();

        for (i, line) in contents.lines().enumerate() {
            let line = line.trim();
            let Some(rest) = line.strip_prefix("lab") else {
                continue;
            };
            let Some((index, label)) = rest.split_once('=') else {
                continue;
            };

            let index: usize = index.trim().parse().map_err(|_| ChainError::InvalidFormat {
                line: i as u64 + 1,
                message: format!("bad column index in label entry \"{}\"", line),
            })?;
            labels.insert(index, label.trim().to_string());
        }

        tracing::debug!(labels = labels.len(), "parsed info file");
        Ok(Self { labels })
    }

    /// Read and parse an info file
    pub fn open<P: AsRef<Path>>(path: P) -> ChainResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChainError::FileNotFound(path.display().to_string()));
        }
        let contents =
            fs::read_to_string(path).map_err(|e| ChainError::OpenFailed(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Label for a column, if the info file names it
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    /// Label for a column, falling back to the default naming
    pub fn label_or_default(&self, index: usize) -> String {
        match self.label(index) {
            Some(label) => label.to_string(),
            None => default_label(index),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Label used for columns an info file does not name
pub fn default_label(index: usize) -> String {
    match index {
        0 => POSTERIOR_LABEL.to_string(),
        1 => CHI_SQ_LABEL.to_string(),
        n => format!("x{}", n),
    }
}
