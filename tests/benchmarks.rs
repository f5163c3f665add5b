// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use perf_charts::chart::{Scale, Stroke};
use perf_charts::{Benchmark, ChartError, Config};

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temp directory holding result files, with a config pointing at it.
struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).unwrap();
    }

    fn config(&self) -> Config {
        let mut config = Config::default();
        config.set_directory(self.path());
        config
    }
}

#[test]
fn missing_input() {
    let scratch = Scratch::new();
    let config = scratch.config();

    for benchmark in config.charts() {
        match benchmark.render(&config) {
            Err(e @ ChartError::MissingInputFile { .. }) => {
                let message = e.to_string();
                assert!(message.contains(benchmark.input()), "{}", message);
                assert!(message.contains(benchmark.producer()), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!config.output(*benchmark).exists());
    }
}

#[test]
fn malformed_input_writes_nothing() {
    let scratch = Scratch::new();
    scratch.write("results.csv", "n,method\n10,recursive\n");
    let config = scratch.config();

    assert!(matches!(
        Benchmark::MergeSort.render(&config),
        Err(ChartError::MissingColumn { .. })
    ));
    assert!(!config.output(Benchmark::MergeSort).exists());
}

#[test]
fn bubble_sort() {
    let scratch = Scratch::new();
    scratch.write(
        "benchmark_results.csv",
        "Size,Normal,Optimized,Parallel\n100,0.01,0.005,0.003\n1000,0.1,0.04,0.02\n",
    );
    let config = scratch.config();

    let table = Benchmark::BubbleSort.load(&config).unwrap();
    let plot = Benchmark::BubbleSort.plan(&table);
    assert_eq!(plot.get_scale(), Scale::Linear);
    assert_eq!(plot.get_series().len(), 3);
    for (group, _) in plot.get_series() {
        assert_eq!(group.sizes().collect::<Vec<_>>(), vec![100, 1000]);
    }
}

#[test]
fn merge_sort() {
    let scratch = Scratch::new();
    scratch.write(
        "results.csv",
        "n,method,time\n\
         1000,recursive,0.00012\n1000,recursive,0.00014\n\
         1000,iterative,0.00010\n1000,iterative,0.00012\n\
         100000,recursive,0.015\n100000,recursive,0.017\n\
         100000,iterative,0.012\n100000,iterative,0.014\n",
    );
    let config = scratch.config();

    let table = Benchmark::MergeSort.load(&config).unwrap();
    assert_eq!(table.len(), 8);

    let plot = Benchmark::MergeSort.plan(&table);
    assert_eq!(plot.get_scale(), Scale::Log);
    assert_eq!(plot.get_series().len(), 2);
    for (group, _) in plot.get_series() {
        assert_eq!(group.points().len(), 2);
    }
    let recursive = plot.get_series()[0].0.points();
    assert!((recursive[0].1 - 0.00013).abs() < 1e-12);
    assert!((recursive[1].1 - 0.016).abs() < 1e-12);
}

#[test]
fn serial_vs_parallel() {
    let scratch = Scratch::new();
    scratch.write(
        "parallel_results.csv",
        "n,method,threads,time\n\
         10000,recursive,1,0.002\n10000,iterative,1,0.0018\n\
         10000,recursive,4,0.0008\n10000,iterative,4,0.0007\n\
         1000000,recursive,1,0.25\n1000000,iterative,1,0.21\n\
         1000000,recursive,4,0.08\n1000000,iterative,4,0.07\n",
    );
    let config = scratch.config();

    let table = Benchmark::MergeSortThreads.load(&config).unwrap();
    assert_eq!(Benchmark::MergeSortThreads.threads(&table), Some(4));

    let plot = Benchmark::MergeSortThreads.plan(&table);
    assert_eq!(plot.get_series().len(), 4);
    let dashed: Vec<_> = plot
        .get_series()
        .iter()
        .filter(|(_, style)| style.stroke() == Stroke::Dashed)
        .map(|(group, _)| group.name())
        .collect();
    assert_eq!(
        dashed,
        [
            "Recursive (Parallel, 4 threads)",
            "Iterative (Parallel, 4 threads)"
        ]
    );
}

#[test]
fn vector_addition() {
    let scratch = Scratch::new();
    scratch.write(
        "vector_results.csv",
        "Size,Sequential,Parallel_Chunked,Parallel_Interleaved,Threads\n\
         10000000,0.031,0.009,0.022,8\n\
         50000000,0.152,0.041,0.101,8\n\
         100000000,0.301,0.083,0.197,8\n",
    );
    let config = scratch.config();

    let table = Benchmark::VectorAddition.load(&config).unwrap();
    let plot = Benchmark::VectorAddition.plan(&table);
    assert_eq!(plot.get_caption(), "Vector Addition Performance (8 Threads)");
    assert_eq!(plot.sizes(), vec![10_000_000, 50_000_000, 100_000_000]);
}

#[test]
fn input_override() {
    let scratch = Scratch::new();
    scratch.write(
        "omp.csv",
        "n,method,threads,time\n1000,recursive,1,0.4\n1000,recursive,2,0.3\n",
    );
    let toml = scratch.path().join("charts.toml");
    fs::write(
        &toml,
        format!(
            "[general]\ndirectory = {:?}\n\n[merge-sort-threads]\ninput = \"omp.csv\"\n",
            scratch.path().display().to_string()
        ),
    )
    .unwrap();

    let config = Config::from_args(vec![
        "perf-charts",
        "merge-sort-threads",
        "--config",
        toml.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(config.charts(), &[Benchmark::MergeSortThreads]);

    let table = Benchmark::MergeSortThreads.load(&config).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(Benchmark::MergeSortThreads.threads(&table), Some(2));
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[test]
fn renders_every_chart() {
    let scratch = Scratch::new();
    scratch.write(
        "benchmark_results.csv",
        "Size,Normal,Optimized,Parallel\n100,0.01,0.005,0.003\n1000,0.1,0.04,0.02\n",
    );
    scratch.write(
        "results.csv",
        "n,method,time\n1000,recursive,0.00012\n1000,iterative,0.0001\n\
         100000,recursive,0.015\n100000,iterative,0.012\n",
    );
    scratch.write(
        "parallel_results.csv",
        "n,method,threads,time\n\
         10000,recursive,1,0.002\n10000,iterative,1,0.0018\n\
         10000,recursive,4,0.0008\n10000,iterative,4,0.0007\n",
    );
    scratch.write(
        "vector_results.csv",
        "Size,Sequential,Parallel_Chunked,Parallel_Interleaved,Threads\n\
         10000000,0.031,0.009,0.022,8\n50000000,0.152,0.041,0.101,8\n",
    );
    let config = scratch.config();

    for benchmark in config.charts() {
        // running twice replaces the previous image
        for _ in 0..2 {
            let rendered = match benchmark.render(&config) {
                Ok(rendered) => rendered,
                Err(ChartError::Drawing(message)) if message.to_lowercase().contains("font") => {
                    eprintln!("skipping chart rendering, no usable font: {}", message);
                    return;
                }
                Err(e) => panic!("{}: {}", benchmark, e),
            };

            assert_eq!(rendered.output, config.output(*benchmark));
            let image = fs::read(&rendered.output).unwrap();
            assert!(image.starts_with(PNG_MAGIC), "{} is not a PNG", benchmark);

            let message = rendered.to_string();
            assert!(message.starts_with("Plot saved as "), "{}", message);
            assert!(message.contains(benchmark.output()), "{}", message);
            match benchmark {
                Benchmark::MergeSortThreads => {
                    assert!(message.ends_with("(Threads detected: 4)"), "{}", message)
                }
                Benchmark::VectorAddition => {
                    assert!(message.ends_with("(Threads detected: 8)"), "{}", message)
                }
                _ => assert!(!message.contains("Threads"), "{}", message),
            }
        }
    }

    let leftovers: Vec<_> = fs::read_dir(scratch.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".partial-"))
        .collect();
    assert!(leftovers.is_empty());
}
