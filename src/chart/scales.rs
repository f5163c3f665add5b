// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use std::ops::Range;

/// Linear axis with its tick marks at fixed values (typically the measured
/// sizes). Falls back to evenly spaced ticks when the fixed ones do not fit.
pub struct FixedTicks {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl FixedTicks {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for FixedTicks {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if self.ticks.len() <= hint.max_num_points() {
            self.ticks.clone()
        } else {
            self.inner.key_points(hint)
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

impl ValueFormatter<f64> for FixedTicks {
    fn format(value: &f64) -> String {
        abbreviate(*value)
    }
}

/// Axis scale, applied to both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

impl Scale {
    /// Data range padded so that no point sits on the plot border.
    pub fn range(self, values: impl Iterator<Item = f64>) -> Range<f64> {
        match self {
            Scale::Linear => linear_range(values),
            Scale::Log => log_range(values),
        }
    }

    /// Whether a value can be placed on this scale.
    pub fn admits(self, value: f64) -> bool {
        match self {
            Scale::Linear => value.is_finite(),
            Scale::Log => value.is_finite() && value > 0.0,
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

fn linear_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match bounds(values.filter(|v| v.is_finite())) {
        None => 0.0..1.0,
        Some((min, max)) => {
            let span = max - min;
            let pad = if span > 0.0 {
                span * 0.05
            } else {
                (max.abs() * 0.1).max(1.0)
            };
            // non-negative data keeps a zero floor
            let start = if min >= 0.0 { (min - pad).max(0.0) } else { min - pad };
            start..(max + pad)
        }
    }
}

fn log_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match bounds(values.filter(|v| v.is_finite() && *v > 0.0)) {
        None => 1.0..10.0,
        Some((min, max)) => (min / 1.25)..(max * 1.25),
    }
}

/// Tick label format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFormat {
    /// Whatever the axis prints by default.
    Default,
    /// 1.5K, 20M, 3G.
    Abbreviated,
    /// Whole millions, as in 10M.
    Millions,
    /// Seconds, switching to exponent notation for small values.
    Seconds,
}

impl TickFormat {
    /// `None` leaves the axis' own formatter in place.
    pub fn formatter(self) -> Option<fn(&f64) -> String> {
        let f: fn(&f64) -> String = match self {
            TickFormat::Default => return None,
            TickFormat::Abbreviated => |v| abbreviate(*v),
            TickFormat::Millions => |v| millions(*v),
            TickFormat::Seconds => |v| seconds(*v),
        };
        Some(f)
    }
}

fn trim_decimals(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

pub fn abbreviate(value: f64) -> String {
    let (scaled, suffix) = match value.abs() {
        v if v >= 1e9 => (value / 1e9, "G"),
        v if v >= 1e6 => (value / 1e6, "M"),
        v if v >= 1e3 => (value / 1e3, "K"),
        _ => (value, ""),
    };
    format!("{}{}", trim_decimals(&format!("{:.1}", scaled)), suffix)
}

pub fn millions(value: f64) -> String {
    format!("{:.0}M", value / 1e6)
}

pub fn seconds(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 0.01 {
        trim_decimals(&format!("{:.3}", value)).to_string()
    } else {
        format!("{:.0e}", value)
    }
}
