// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::*;
use crate::config::Config;
use crate::reshape::{average, Mode, SeriesGroup, Selector};
use crate::table::{Layout, ResultTable};
use crate::{viewer, ChartError};

use strum_macros::{AsRefStr, EnumIter, EnumString};

use std::fmt;
use std::path::{Path, PathBuf};

/// The benchmark programs whose results can be charted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, EnumString)]
pub enum Benchmark {
    /// Normal, flag-optimized and odd-even parallel bubble sort.
    #[strum(serialize = "bubble-sort")]
    BubbleSort,
    /// Recursive vs. iterative merge sort, several runs per size.
    #[strum(serialize = "merge-sort")]
    MergeSort,
    /// Recursive vs. iterative merge sort, serial and parallel.
    #[strum(serialize = "merge-sort-threads")]
    MergeSortThreads,
    /// Sequential, chunked and interleaved vector addition.
    #[strum(serialize = "vector-addition")]
    VectorAddition,
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A chart written to disk.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub benchmark: Benchmark,
    pub output: PathBuf,
    pub threads: Option<u32>,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.output.strip_prefix(".").unwrap_or(&self.output);
        write!(f, "Plot saved as {}", output.display())?;
        if let Some(threads) = self.threads {
            write!(f, " (Threads detected: {})", threads)?;
        }
        Ok(())
    }
}

impl Benchmark {
    /// Default results file name.
    pub fn input(self) -> &'static str {
        match self {
            Benchmark::BubbleSort => "benchmark_results.csv",
            Benchmark::MergeSort => "results.csv",
            Benchmark::MergeSortThreads => "parallel_results.csv",
            Benchmark::VectorAddition => "vector_results.csv",
        }
    }

    /// Default image file name.
    pub fn output(self) -> &'static str {
        match self {
            Benchmark::BubbleSort => "sort_performance_analysis.png",
            Benchmark::MergeSort => "mergesort_performance.png",
            Benchmark::MergeSortThreads => "mergesort_serial_vs_parallel.png",
            Benchmark::VectorAddition => "vector_performance.png",
        }
    }

    /// The program expected to write the results file.
    pub fn producer(self) -> &'static str {
        match self {
            Benchmark::BubbleSort => "C++ bubble sort benchmark",
            Benchmark::MergeSort => "C merge sort benchmark",
            Benchmark::MergeSortThreads => "C parallel merge sort benchmark",
            Benchmark::VectorAddition => "C vector addition benchmark",
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Benchmark::BubbleSort => Layout::Wide {
                size: "Size",
                variants: &["Normal", "Optimized", "Parallel"],
                threads: None,
            },
            Benchmark::MergeSort => Layout::Long {
                size: "n",
                variant: "method",
                time: "time",
                threads: None,
            },
            Benchmark::MergeSortThreads => Layout::Long {
                size: "n",
                variant: "method",
                time: "time",
                threads: Some("threads"),
            },
            Benchmark::VectorAddition => Layout::Wide {
                size: "Size",
                variants: &["Sequential", "Parallel_Chunked", "Parallel_Interleaved"],
                threads: Some("Threads"),
            },
        }
    }

    pub fn load(self, config: &Config) -> Result<ResultTable, ChartError> {
        ResultTable::load(&config.input(self), self.layout(), self.producer())
    }

    /// Load, plan and draw this chart, then open it if asked to.
    pub fn render(self, config: &Config) -> Result<Rendered, ChartError> {
        let table = self.load(config)?;
        let threads = self.threads(&table);
        if let Some(threads) = threads {
            debug!("{}: threads detected: {}", self, threads);
        }

        let plot = self.plan(&table).size(config.size());
        if plot.get_series().is_empty() {
            return Err(ChartError::EmptyTable {
                file: table.source().to_path_buf(),
            });
        }

        let output = config.output(self);
        plot.render(&output)?;

        let rendered = Rendered {
            benchmark: self,
            output,
            threads,
        };
        if config.show() {
            show(&rendered.output);
        }

        Ok(rendered)
    }

    /// Thread count reported alongside the chart, if this benchmark has one.
    pub fn threads(self, table: &ResultTable) -> Option<u32> {
        match self {
            Benchmark::VectorAddition => table.first_threads(),
            Benchmark::MergeSortThreads => table.max_threads(),
            _ => None,
        }
    }

    /// Build the chart for a loaded table.
    pub fn plan(self, table: &ResultTable) -> Plot {
        let rows = average(table.rows());
        trace!(
            "{}: {} rows averaged into {}",
            self,
            table.len(),
            rows.len()
        );
        let select = |name: &str, selector: Selector| SeriesGroup::select(name, &rows, &selector);

        match self {
            Benchmark::BubbleSort => Plot::new(Scale::Linear)
                .caption("Bubble Sort Performance Benchmark")
                .x_desc("Array Size (N)")
                .y_desc("Time (Seconds)")
                .x_format(TickFormat::Abbreviated)
                .series(
                    select("Normal Bubble Sort", Selector::variant("Normal")),
                    SeriesStyle::palette(0, Marker::Circle).dashed(),
                )
                .series(
                    select("Optimized (Flag) Sort", Selector::variant("Optimized")),
                    SeriesStyle::palette(1, Marker::Square),
                )
                .series(
                    select("Parallel Odd-Even Sort", Selector::variant("Parallel")),
                    SeriesStyle::palette(2, Marker::Triangle).width(3),
                ),
            Benchmark::MergeSort => Plot::new(Scale::Log)
                .caption("Merge Sort Time Complexity (Sequential)")
                .x_desc("Number of elements (n)")
                .y_desc("Time (seconds)")
                .x_format(TickFormat::Abbreviated)
                .y_format(TickFormat::Seconds)
                .series(
                    select("Recursive", Selector::variant("recursive")),
                    SeriesStyle::palette(0, Marker::Circle),
                )
                .series(
                    select("Iterative", Selector::variant("iterative")),
                    SeriesStyle::palette(1, Marker::Square),
                ),
            Benchmark::MergeSortThreads => {
                let threads = self.threads(table).unwrap_or(1);
                let parallel = |method: &str| format!("{} (Parallel, {} threads)", method, threads);
                Plot::new(Scale::Log)
                    .caption(format!("Merge Sort: Serial vs Parallel ({} Threads)", threads))
                    .x_desc("Number of elements (n)")
                    .y_desc("Time (seconds)")
                    .x_format(TickFormat::Abbreviated)
                    .y_format(TickFormat::Seconds)
                    .series(
                        select(
                            "Recursive (Serial)",
                            Selector::variant("recursive").mode(Mode::Serial),
                        ),
                        SeriesStyle::palette(0, Marker::Circle),
                    )
                    .series(
                        select(
                            "Iterative (Serial)",
                            Selector::variant("iterative").mode(Mode::Serial),
                        ),
                        SeriesStyle::palette(1, Marker::Square),
                    )
                    .series(
                        select(
                            &parallel("Recursive"),
                            Selector::variant("recursive").mode(Mode::Parallel),
                        ),
                        SeriesStyle::palette(0, Marker::Triangle).dashed(),
                    )
                    .series(
                        select(
                            &parallel("Iterative"),
                            Selector::variant("iterative").mode(Mode::Parallel),
                        ),
                        SeriesStyle::palette(1, Marker::Cross).dashed(),
                    )
            }
            Benchmark::VectorAddition => {
                let threads = self
                    .threads(table)
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "?".to_owned());
                Plot::new(Scale::Linear)
                    .caption(format!("Vector Addition Performance ({} Threads)", threads))
                    .x_desc("Vector Size (Elements)")
                    .y_desc("Time (Seconds)")
                    .size_ticks()
                    .x_format(TickFormat::Millions)
                    .series(
                        select("Sequential", Selector::variant("Sequential")),
                        SeriesStyle::palette(0, Marker::Circle),
                    )
                    .series(
                        select("Parallel (Chunked/Good)", Selector::variant("Parallel_Chunked")),
                        SeriesStyle::palette(2, Marker::Square),
                    )
                    .series(
                        select(
                            "Parallel (Interleaved/False Sharing)",
                            Selector::variant("Parallel_Interleaved"),
                        ),
                        SeriesStyle::palette(3, Marker::Triangle).dashed(),
                    )
            }
        }
    }
}

fn show(path: &Path) {
    if let Err(e) = viewer::show(path) {
        warn!("could not open {}: {}", path.display(), e);
    }
}
