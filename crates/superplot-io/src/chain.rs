//! Chain file reader
//!
//! A chain is a text file with one sample per line and whitespace-separated
//! numeric columns: posterior weight, chi-squared, then one column per
//! parameter. Blank lines and lines whose first token starts with `#` are
//! skipped, wherever the `#` sits on the line.

use crate::error::{ChainError, ChainResult};
use crate::info::{default_label, InfoFile};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Column index of the posterior weight
pub const POSTERIOR_COLUMN: usize = 0;

/// Column index of the chi-squared
pub const CHI_SQ_COLUMN: usize = 1;

/// Index of the first parameter column
pub const FIRST_PARAMETER_COLUMN: usize = 2;

/// An MCMC chain held column-wise
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    columns: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Chain {
    /// Open a chain file
    pub fn open<P: AsRef<Path>>(path: P) -> ChainResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChainError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path).map_err(|e| ChainError::OpenFailed(e.to_string()))?;
        let chain = Self::from_reader(BufReader::new(file))?;

        tracing::info!(
            path = %path.display(),
            samples = chain.num_samples(),
            columns = chain.num_columns(),
            "loaded chain"
        );
        Ok(chain)
    }

    /// Open a chain file and label its columns from an info file
    pub fn open_with_info<P: AsRef<Path>, Q: AsRef<Path>>(path: P, info: Q) -> ChainResult<Self> {
        let info = InfoFile::open(info)?;
        Ok(Self::open(path)?.with_info(&info))
    }

    /// Parse a chain from any reader
    pub fn from_reader<R: Read>(reader: R) -> ChainResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .quoting(false)
            .from_reader(reader);

        let mut columns: Vec<Vec<f64>> = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| ChainError::InvalidFormat {
                line: e.position().map_or(0, |p| p.line()),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, |p| p.line());

            // Repeated spaces yield empty fields and tabs stay inside one
            // field, so split every field again on whitespace.
            let mut tokens = record.iter().flat_map(str::split_whitespace).peekable();
            if tokens.peek().map_or(true, |t| t.starts_with('#')) {
                continue;
            }

            let values = tokens
                .map(|token| {
                    token.parse::<f64>().map_err(|_| ChainError::InvalidFormat {
                        line,
                        message: format!("not a number: \"{}\"", token),
                    })
                })
                .collect::<ChainResult<Vec<f64>>>()?;

            if columns.is_empty() {
                columns = vec![Vec::new(); values.len()];
            }
            if values.len() != columns.len() {
                return Err(ChainError::RaggedRow {
                    line,
                    expected: columns.len(),
                    actual: values.len(),
                });
            }

            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value);
            }
        }

        if columns.len() <= FIRST_PARAMETER_COLUMN {
            return Err(ChainError::TooFewColumns(columns.len()));
        }

        let labels = (0..columns.len()).map(default_label).collect();
        Ok(Self { columns, labels })
    }

    /// Replace column labels with those named in an info file
    pub fn with_info(mut self, info: &InfoFile) -> Self {
        for (index, label) in self.labels.iter_mut().enumerate() {
            if let Some(named) = info.label(index) {
                *label = named.to_string();
            }
        }
        self
    }

    /// Number of samples (rows)
    pub fn num_samples(&self) -> usize {
        self.columns[POSTERIOR_COLUMN].len()
    }

    /// Number of columns, including weight and chi-squared
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Posterior weight column
    pub fn posterior_weight(&self) -> &[f64] {
        &self.columns[POSTERIOR_COLUMN]
    }

    /// Chi-squared column
    pub fn chi_sq(&self) -> &[f64] {
        &self.columns[CHI_SQ_COLUMN]
    }

    /// Column by index
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Column by label
    pub fn column_by_label(&self, label: &str) -> ChainResult<&[f64]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| ChainError::ColumnNotFound(label.to_string()))
    }

    /// Label of a column
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Parameter columns with their labels, in column order
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.labels
            .iter()
            .zip(&self.columns)
            .skip(FIRST_PARAMETER_COLUMN)
            .map(|(label, column)| (label.as_str(), column.as_slice()))
    }
}
