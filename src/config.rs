// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::benchmark::Benchmark;
use crate::config_file::{ConfigFile, Overrides};
use crate::ChartError;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use strum::IntoEnumIterator;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

const CHARTS: &[&str] = &[
    "all",
    "bubble-sort",
    "merge-sort",
    "merge-sort-threads",
    "vector-addition",
];

const LEVELS: &[LevelFilter] = &[
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Runtime configuration: the config file merged with the command line.
#[derive(Clone, Debug)]
pub struct Config {
    directory: PathBuf,
    show: bool,
    logging: LevelFilter,
    size: (u32, u32),
    charts: Vec<Benchmark>,
    file: ConfigFile,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_file(ConfigFile::default())
    }
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .about("Render benchmark results as line charts")
        .arg(
            Arg::with_name("chart")
                .value_name("CHART")
                .help("Chart to render, or 'all'")
                .possible_values(CHARTS)
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("directory")
                .short("C")
                .long("directory")
                .value_name("DIR")
                .help("Directory holding the result files and the charts")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("show")
                .long("show")
                .help("Open each chart in the default image viewer"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`, exiting on bad usage
    pub fn new() -> Result<Self, ChartError> {
        Self::from_matches(&app().get_matches())
    }

    /// Parse an explicit argument list. The first item is the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|e| ChartError::Usage(e.message))?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, ChartError> {
        let file = match matches.value_of("config") {
            Some(file) => ConfigFile::load_from_file(file)?,
            None => ConfigFile::default(),
        };
        let mut config = Self::with_file(file);

        if let Some(directory) = matches.value_of("directory") {
            config.directory = PathBuf::from(directory);
        }

        if matches.is_present("show") {
            config.show = true;
        }

        config.logging = raise(config.logging, matches.occurrences_of("verbose"));

        if let Some(charts) = matches.values_of("chart") {
            let charts: Vec<&str> = charts.collect();
            if !charts.contains(&"all") {
                config.charts.clear();
                for chart in charts {
                    let benchmark = Benchmark::from_str(chart)
                        .map_err(|_| ChartError::Usage(format!("unknown chart '{}'", chart)))?;
                    if !config.charts.contains(&benchmark) {
                        config.charts.push(benchmark);
                    }
                }
            }
        }

        Ok(config)
    }

    fn with_file(file: ConfigFile) -> Self {
        let general = file.general();
        Self {
            directory: PathBuf::from(general.directory()),
            show: general.show(),
            logging: general.logging().into(),
            size: (general.width(), general.height()),
            charts: Benchmark::iter().collect(),
            file,
        }
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn set_show(&mut self, show: bool) {
        self.show = show;
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn show(&self) -> bool {
        self.show
    }

    pub fn logging(&self) -> LevelFilter {
        self.logging
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Charts to render, in order.
    pub fn charts(&self) -> &[Benchmark] {
        &self.charts
    }

    fn overrides(&self, benchmark: Benchmark) -> &Overrides {
        match benchmark {
            Benchmark::BubbleSort => self.file.bubble_sort(),
            Benchmark::MergeSort => self.file.merge_sort(),
            Benchmark::MergeSortThreads => self.file.merge_sort_threads(),
            Benchmark::VectorAddition => self.file.vector_addition(),
        }
    }

    pub fn input(&self, benchmark: Benchmark) -> PathBuf {
        let name = self
            .overrides(benchmark)
            .input()
            .unwrap_or_else(|| benchmark.input());
        self.directory.join(name)
    }

    pub fn output(&self, benchmark: Benchmark) -> PathBuf {
        let name = self
            .overrides(benchmark)
            .output()
            .unwrap_or_else(|| benchmark.output());
        self.directory.join(name)
    }

    pub fn print(&self) {
        info!("-----");
        info!("Directory: {}", self.directory.display());
        let charts: Vec<String> = self.charts.iter().map(|c| c.to_string()).collect();
        info!("Charts: {}", charts.join(", "));
        info!("Image size: {}x{}", self.size.0, self.size.1);
        info!("Show: {}", self.show);
        info!("-----");
    }
}

/// Raise `level` by `steps` levels, saturating at trace.
fn raise(level: LevelFilter, steps: u64) -> LevelFilter {
    let current = LEVELS.iter().position(|l| *l == level).unwrap_or(0);
    let target = (current as u64 + steps).min(LEVELS.len() as u64 - 1);
    LEVELS[target as usize]
}
