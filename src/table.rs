// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ChartError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// One measured sample.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub size: u64,
    /// Seconds.
    pub time: f64,
    /// Method name for long tables, timing column name for wide tables.
    pub variant: String,
    pub threads: Option<u32>,
}

impl ResultRow {
    pub fn new(size: u64, time: f64, variant: impl Into<String>, threads: Option<u32>) -> Self {
        Self {
            size,
            time,
            variant: variant.into(),
            threads,
        }
    }
}

/// How the columns of a results file map onto rows.
#[derive(Clone, Copy, Debug)]
pub enum Layout {
    /// One sample per line, e.g. `n,method,time`.
    Long {
        size: &'static str,
        variant: &'static str,
        time: &'static str,
        threads: Option<&'static str>,
    },
    /// One line per size with a timing column per variant, e.g.
    /// `Size,Normal,Optimized,Parallel`.
    Wide {
        size: &'static str,
        variants: &'static [&'static str],
        threads: Option<&'static str>,
    },
}

/// Rows of a results file, in file order.
#[derive(Clone, Debug)]
pub struct ResultTable {
    source: PathBuf,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(source: impl Into<PathBuf>, rows: Vec<ResultRow>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }

    /// Load `path`. A missing file is reported together with the program
    /// expected to produce it.
    pub fn load(path: &Path, layout: Layout, producer: &'static str) -> Result<Self, ChartError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ChartError::MissingInputFile {
                    file: path.to_path_buf(),
                    producer,
                });
            }
            Err(e) => {
                return Err(ChartError::Csv {
                    file: path.to_path_buf(),
                    source: e.into(),
                });
            }
        };
        let table = Self::from_reader(path, file, layout)?;
        debug!("loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(source: &Path, reader: R, layout: Layout) -> Result<Self, ChartError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| ChartError::Csv {
                file: source.to_path_buf(),
                source: e,
            })?
            .clone();
        let columns = Columns::resolve(source, &headers, layout)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ChartError::Csv {
                file: source.to_path_buf(),
                source: e,
            })?;
            columns.extend(source, &record, &mut rows)?;
        }

        if rows.is_empty() {
            return Err(ChartError::EmptyTable {
                file: source.to_path_buf(),
            });
        }

        Ok(Self::new(source, rows))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Thread count recorded on the first row.
    pub fn first_threads(&self) -> Option<u32> {
        self.rows.first().and_then(|row| row.threads)
    }

    pub fn max_threads(&self) -> Option<u32> {
        self.rows.iter().filter_map(|row| row.threads).max()
    }
}

/// Column indices resolved against a header row.
enum Columns {
    Long {
        size: (usize, &'static str),
        variant: (usize, &'static str),
        time: (usize, &'static str),
        threads: Option<(usize, &'static str)>,
    },
    Wide {
        size: (usize, &'static str),
        variants: Vec<(usize, &'static str)>,
        threads: Option<(usize, &'static str)>,
    },
}

impl Columns {
    fn resolve(
        source: &Path,
        headers: &csv::StringRecord,
        layout: Layout,
    ) -> Result<Self, ChartError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header == name)
                .map(|idx| (idx, name))
                .ok_or_else(|| ChartError::MissingColumn {
                    file: source.to_path_buf(),
                    column: name.to_string(),
                })
        };

        match layout {
            Layout::Long {
                size,
                variant,
                time,
                threads,
            } => Ok(Columns::Long {
                size: find(size)?,
                variant: find(variant)?,
                time: find(time)?,
                threads: threads.map(find).transpose()?,
            }),
            Layout::Wide {
                size,
                variants,
                threads,
            } => Ok(Columns::Wide {
                size: find(size)?,
                variants: variants
                    .iter()
                    .map(|name| find(*name))
                    .collect::<Result<_, _>>()?,
                threads: threads.map(find).transpose()?,
            }),
        }
    }

    fn extend(
        &self,
        source: &Path,
        record: &csv::StringRecord,
        rows: &mut Vec<ResultRow>,
    ) -> Result<(), ChartError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |column: (usize, &'static str)| record.get(column.0).unwrap_or("");
        let parse = |column: (usize, &'static str)| Cell {
            source,
            line,
            column: column.1,
            value: cell(column),
        };

        match self {
            Columns::Long {
                size,
                variant,
                time,
                threads,
            } => {
                rows.push(ResultRow {
                    size: parse(*size).parse()?,
                    time: parse(*time).parse()?,
                    variant: cell(*variant).to_string(),
                    threads: threads.map(|t| parse(t).threads()).transpose()?,
                });
            }
            Columns::Wide {
                size,
                variants,
                threads,
            } => {
                let size = parse(*size).parse()?;
                let threads = threads.map(|t| parse(t).threads()).transpose()?;
                for variant in variants {
                    rows.push(ResultRow {
                        size,
                        time: parse(*variant).parse()?,
                        variant: variant.1.to_string(),
                        threads,
                    });
                }
            }
        }
        Ok(())
    }
}

struct Cell<'a> {
    source: &'a Path,
    line: u64,
    column: &'static str,
    value: &'a str,
}

impl Cell<'_> {
    fn parse<T: std::str::FromStr>(&self) -> Result<T, ChartError> {
        self.value.parse().map_err(|_| self.invalid())
    }

    /// Thread counts start at one.
    fn threads(&self) -> Result<u32, ChartError> {
        match self.parse::<u32>()? {
            0 => Err(self.invalid()),
            threads => Ok(threads),
        }
    }

    fn invalid(&self) -> ChartError {
        ChartError::InvalidValue {
            file: self.source.to_path_buf(),
            line: self.line,
            column: self.column.to_string(),
            value: self.value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MERGE: Layout = Layout::Long {
        size: "n",
        variant: "method",
        time: "time",
        threads: None,
    };

    const BUBBLE: Layout = Layout::Wide {
        size: "Size",
        variants: &["Normal", "Optimized", "Parallel"],
        threads: None,
    };

    fn load(content: &str, layout: Layout) -> Result<ResultTable, ChartError> {
        ResultTable::from_reader(Path::new("results.csv"), content.as_bytes(), layout)
    }

    #[test]
    fn long_layout() {
        let table = load(
            "n,method,time\n1000,recursive,0.000120\n1000,iterative,0.000100\n",
            MERGE,
        )
        .unwrap();
        assert_eq!(
            table.rows(),
            &[
                ResultRow::new(1000, 0.00012, "recursive", None),
                ResultRow::new(1000, 0.0001, "iterative", None),
            ]
        );
        assert_eq!(table.max_threads(), None);
    }

    #[test]
    fn wide_layout_expands_columns() {
        let table = load(
            "Size,Normal,Optimized,Parallel\n100,0.01,0.005,0.003\n",
            BUBBLE,
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        let variants: Vec<_> = table.rows().iter().map(|r| r.variant.as_str()).collect();
        assert_eq!(variants, ["Normal", "Optimized", "Parallel"]);
        assert!(table.rows().iter().all(|r| r.size == 100));
    }

    #[test]
    fn threads() {
        let layout = Layout::Wide {
            size: "Size",
            variants: &["Sequential"],
            threads: Some("Threads"),
        };
        let table = load(
            "Size,Sequential,Threads\n10000000,0.02,8\n20000000,0.04,6\n",
            layout,
        )
        .unwrap();
        assert_eq!(table.first_threads(), Some(8));
        assert_eq!(table.max_threads(), Some(8));
    }

    #[test]
    fn zero_threads_rejected() {
        let layout = Layout::Long {
            size: "n",
            variant: "method",
            time: "time",
            threads: Some("threads"),
        };
        match load("n,method,threads,time\n10,recursive,0,0.5\n", layout) {
            Err(ChartError::InvalidValue {
                line, column, value, ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "threads");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn whitespace_is_trimmed() {
        let table = load("n, method, time\n 10 , recursive , 0.5\n", MERGE).unwrap();
        assert_eq!(table.rows()[0], ResultRow::new(10, 0.5, "recursive", None));
    }

    #[test]
    fn missing_column() {
        match load("n,time\n10,0.5\n", MERGE) {
            Err(ChartError::MissingColumn { column, .. }) => assert_eq!(column, "method"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_value() {
        match load("n,method,time\n10,recursive,0.5\nten,recursive,0.5\n", MERGE) {
            Err(ChartError::InvalidValue {
                line, column, value, ..
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "n");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(
            load("n,method,time\n", MERGE),
            Err(ChartError::EmptyTable { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-file.csv");
        match ResultTable::load(&path, MERGE, "C merge sort benchmark") {
            Err(e @ ChartError::MissingInputFile { .. }) => {
                let message = e.to_string();
                assert!(message.contains("no-such-file.csv"));
                assert!(message.contains("C merge sort benchmark"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
