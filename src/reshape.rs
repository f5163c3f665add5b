// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::table::ResultRow;
use std::collections::BTreeMap;

/// Collapse repeated runs: one row per (variant, threads, size) holding the
/// mean time of the group.
pub fn average(rows: &[ResultRow]) -> Vec<ResultRow> {
    let mut groups: BTreeMap<(&str, Option<u32>, u64), (f64, usize)> = BTreeMap::new();
    for row in rows {
        let group = groups
            .entry((row.variant.as_str(), row.threads, row.size))
            .or_insert((0.0, 0));
        group.0 += row.time;
        group.1 += 1;
    }

    groups
        .into_iter()
        .map(|((variant, threads, size), (sum, count))| {
            ResultRow::new(size, sum / count as f64, variant, threads)
        })
        .collect()
}

/// Execution mode derived from a row's thread count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Any,
    /// Exactly one thread, or no thread count recorded. Loading rejects a
    /// thread count of zero.
    Serial,
    /// More than one thread.
    Parallel,
}

impl Mode {
    fn matches(self, threads: Option<u32>) -> bool {
        let threads = threads.unwrap_or(1);
        match self {
            Mode::Any => true,
            Mode::Serial => threads == 1,
            Mode::Parallel => threads > 1,
        }
    }
}

/// Predicate selecting the rows of one series.
#[derive(Clone, Debug)]
pub struct Selector {
    variant: Option<String>,
    mode: Mode,
}

impl Selector {
    pub fn all() -> Self {
        Self {
            variant: None,
            mode: Mode::Any,
        }
    }

    pub fn variant(variant: impl Into<String>) -> Self {
        Self {
            variant: Some(variant.into()),
            mode: Mode::Any,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn matches(&self, row: &ResultRow) -> bool {
        self.variant.as_deref().map_or(true, |v| v == row.variant) && self.mode.matches(row.threads)
    }
}

/// A named line of (size, seconds) points ordered by increasing size, with
/// one point per distinct size.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesGroup {
    name: String,
    points: Vec<(u64, f64)>,
}

impl SeriesGroup {
    /// Select the rows matching `selector`. Rows sharing a size (e.g.
    /// different parallel thread counts) are averaged into one point.
    pub fn select(name: impl Into<String>, rows: &[ResultRow], selector: &Selector) -> Self {
        let mut sizes: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
        for row in rows.iter().filter(|row| selector.matches(row)) {
            let point = sizes.entry(row.size).or_insert((0.0, 0));
            point.0 += row.time;
            point.1 += 1;
        }

        Self {
            name: name.into(),
            points: sizes
                .into_iter()
                .map(|(size, (sum, count))| (size, sum / count as f64))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(u64, f64)] {
        &self.points
    }

    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|p| p.0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
