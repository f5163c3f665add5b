// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a chart from being produced.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("'{}' not found. Run the {producer} first.", .file.display())]
    MissingInputFile { file: PathBuf, producer: &'static str },

    #[error("'{}' has no '{column}' column", .file.display())]
    MissingColumn { file: PathBuf, column: String },

    #[error("'{}' line {line}: invalid value {value:?} in column '{column}'", .file.display())]
    InvalidValue {
        file: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("'{}' contains no results", .file.display())]
    EmptyTable { file: PathBuf },

    #[error("failed to read '{}': {source}", .file.display())]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to draw chart: {0}")]
    Drawing(String),

    #[error("failed to load config '{file}': {reason}")]
    Config { file: String, reason: String },

    #[error("{0}")]
    Usage(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}
