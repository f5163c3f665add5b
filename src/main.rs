// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use perf_charts::{Config, Logger, NAME, VERSION};

fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Logger::new().label(NAME).level(config.logging()).init() {
        eprintln!("failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("{} {} initializing...", NAME, VERSION);
    config.print();

    let mut failed = 0;
    for benchmark in config.charts() {
        match benchmark.render(&config) {
            // reported whatever the log level
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                error!("{}: {}", benchmark, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{} of {} charts failed", failed, config.charts().len());
        std::process::exit(1);
    }
}
