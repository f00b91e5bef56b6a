//! Galaxy tables
//!
//! Every dataset is a CSV file with one row per galaxy and a `galname`
//! column. Files are read once at startup, from disk or over HTTP, and
//! parsed into a header-indexed `Table`. Everything downstream works on the
//! in-memory table only.

pub mod sed;
pub mod truevspred;
pub mod uncertainty;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Name of the entity key column in every dataset
pub const NAME_COLUMN: &str = "galname";

/// Errors raised while loading a dataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed CSV in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("{origin} has no '{column}' column")]
    MissingColumn { origin: String, column: String },

    #[error("{origin} contains no rows")]
    Empty { origin: String },
}

/// Where a dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a config or CLI value: `http(s)://` is a URL, anything else
    /// a path
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Read the raw text of this source
    pub async fn fetch(&self) -> Result<String, DataError> {
        match self {
            Self::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| DataError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            Self::Url(url) => {
                let http = |source| DataError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::get(url).await.map_err(http)?;
                let response = response.error_for_status().map_err(http)?;
                response.text().await.map_err(http)
            }
        }
    }

    /// Fetch and parse in one step
    pub async fn load(&self) -> Result<Table, DataError> {
        let text = self.fetch().await?;
        let table = Table::parse(&text, &self.to_string())?;
        tracing::info!(
            "Loaded {} row(s), {} column(s) from {}",
            table.len(),
            table.headers().len(),
            self
        );
        Ok(table)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// A parsed CSV table with header lookup
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self, DataError> {
        let csv_err = |source| DataError::Csv {
            origin: origin.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(DataError::Empty {
                origin: origin.to_string(),
            });
        }

        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Ok(Self {
            headers,
            index,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Fail with `MissingColumn` unless every listed column exists
    pub fn require(&self, columns: &[&str], origin: &str) -> Result<(), DataError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(DataError::MissingColumn {
                origin: origin.to_string(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Raw cell text; `None` for unknown columns, short rows or empty cells
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = *self.index.get(column)?;
        self.rows
            .get(row)?
            .get(col)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Numeric cell; `None` when missing or unparsable
    pub fn number(&self, row: usize, column: &str) -> Option<f64> {
        self.get(row, column).and_then(parse_number)
    }
}

/// Lenient float parsing: empty, unparsable and non-finite values are missing
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "galname,a,b\nG1,1.5,\nG2, 2 ,x\n";

    #[test]
    fn parses_headers_and_cells() {
        let t = Table::parse(CSV, "test").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.headers(), &["galname", "a", "b"]);
        assert_eq!(t.get(0, "galname"), Some("G1"));
        assert_eq!(t.number(1, "a"), Some(2.0));
        assert_eq!(t.get(0, "b"), None);
        assert_eq!(t.number(1, "b"), None);
        assert_eq!(t.get(0, "missing"), None);
        assert_eq!(t.get(9, "a"), None);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let t = Table::parse("galname,a,b\nG1,1\n", "test").unwrap();
        assert_eq!(t.number(0, "a"), Some(1.0));
        assert_eq!(t.get(0, "b"), None);
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = Table::parse("galname,a\n", "empty.csv").unwrap_err();
        assert!(matches!(err, DataError::Empty { .. }));
    }

    #[test]
    fn require_reports_first_missing_column() {
        let t = Table::parse(CSV, "test").unwrap();
        assert!(t.require(&["galname", "a"], "test").is_ok());
        let err = t.require(&["galname", "zzz"], "test").unwrap_err();
        assert_eq!(err.to_string(), "test has no 'zzz' column");
    }

    #[test]
    fn source_parsing() {
        assert_eq!(
            DataSource::parse("https://example.org/seds.csv"),
            DataSource::Url("https://example.org/seds.csv".into())
        );
        assert_eq!(
            DataSource::parse("./data/seds.csv"),
            DataSource::Path(PathBuf::from("./data/seds.csv"))
        );
    }

    #[test]
    fn number_rejects_nan() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-0.25"), Some(-0.25));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, CSV).unwrap();

        let table = DataSource::Path(path).load().await.unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = DataSource::Path(PathBuf::from("/definitely/not/here.csv"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
