// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ChartError;
use log::LevelFilter;
use serde_derive::*;

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    general: General,
    #[serde(default, rename = "bubble-sort")]
    bubble_sort: Overrides,
    #[serde(default, rename = "merge-sort")]
    merge_sort: Overrides,
    #[serde(default, rename = "merge-sort-threads")]
    merge_sort_threads: Overrides,
    #[serde(default, rename = "vector-addition")]
    vector_addition: Overrides,
}

impl ConfigFile {
    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn bubble_sort(&self) -> &Overrides {
        &self.bubble_sort
    }

    pub fn merge_sort(&self) -> &Overrides {
        &self.merge_sort
    }

    pub fn merge_sort_threads(&self) -> &Overrides {
        &self.merge_sort_threads
    }

    pub fn vector_addition(&self) -> &Overrides {
        &self.vector_addition
    }

    pub fn load_from_file(filename: &str) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(filename).map_err(|e| ChartError::Config {
            file: filename.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(filename, &content)
    }

    pub fn parse(filename: &str, content: &str) -> Result<Self, ChartError> {
        toml::from_str(content).map_err(|e| ChartError::Config {
            file: filename.to_string(),
            reason: e.to_string(),
        })
    }
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for Level {
    fn default() -> Self {
        Level::Info
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default)]
    show: bool,
    #[serde(default)]
    logging: Level,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Default for General {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            show: false,
            logging: Level::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl General {
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn show(&self) -> bool {
        self.show
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Per-chart file name overrides.
#[derive(Deserialize, Default, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    input: Option<String>,
    output: Option<String>,
}

impl Overrides {
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}
