// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Line charts for sorting and vector addition benchmark results.
//!
//! Each [`Benchmark`] knows the results file its producer writes, how to
//! reshape the rows into series, and how the chart should look:
//!
//! ```no_run
//! use perf_charts::{Benchmark, Config};
//!
//! let config = Config::default();
//! let rendered = Benchmark::VectorAddition.render(&config)?;
//! println!("{}", rendered);
//! # Ok::<(), perf_charts::ChartError>(())
//! ```

#[macro_use]
extern crate log;

mod benchmark;
mod config;
mod config_file;
mod error;
mod logger;
mod viewer;

pub mod chart;
pub mod reshape;
pub mod table;

pub use crate::benchmark::{Benchmark, Rendered};
pub use crate::config::{Config, NAME, VERSION};
pub use crate::config_file::{ConfigFile, General, Level, Overrides};
pub use crate::error::ChartError;
pub use crate::logger::Logger;
