// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod scales;
mod style;

pub use scales::*;
pub use style::*;

use crate::reshape::SeriesGroup;
use crate::ChartError;

use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use std::fs;
use std::path::{Path, PathBuf};

const LEGEND_LENGTH: i32 = 24;
const MARKER_SIZE: i32 = 5;

/// A chart plan: everything needed to draw one figure.
pub struct Plot {
    caption: String,
    x_desc: String,
    y_desc: String,
    scale: Scale,
    size_ticks: bool,
    x_format: TickFormat,
    y_format: TickFormat,
    size: (u32, u32),
    series: Vec<(SeriesGroup, SeriesStyle)>,
}

impl Plot {
    pub fn new(scale: Scale) -> Self {
        Self {
            caption: String::new(),
            x_desc: "Size".to_owned(),
            y_desc: "Time (Seconds)".to_owned(),
            scale,
            size_ticks: false,
            x_format: TickFormat::Default,
            y_format: TickFormat::Default,
            size: (1000, 600),
            series: Vec::new(),
        }
    }

    pub fn caption(mut self, caption: impl AsRef<str>) -> Self {
        self.caption = caption.as_ref().to_owned();
        self
    }

    pub fn x_desc(mut self, x_desc: impl AsRef<str>) -> Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(mut self, y_desc: impl AsRef<str>) -> Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    /// Put the x-axis ticks at the measured sizes (linear scale only).
    pub fn size_ticks(mut self) -> Self {
        self.size_ticks = true;
        self
    }

    pub fn x_format(mut self, format: TickFormat) -> Self {
        self.x_format = format;
        self
    }

    pub fn y_format(mut self, format: TickFormat) -> Self {
        self.y_format = format;
        self
    }

    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    /// Add a series. Empty series are left out of the chart.
    pub fn series(mut self, group: SeriesGroup, style: SeriesStyle) -> Self {
        if group.is_empty() {
            warn!("series '{}' has no data and is not drawn", group.name());
        } else {
            self.series.push((group, style));
        }
        self
    }

    pub fn get_caption(&self) -> &str {
        &self.caption
    }

    pub fn get_scale(&self) -> Scale {
        self.scale
    }

    pub fn get_x_format(&self) -> TickFormat {
        self.x_format
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.size
    }

    pub fn get_series(&self) -> &[(SeriesGroup, SeriesStyle)] {
        &self.series
    }

    /// Every distinct size across all series, ascending.
    pub fn sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = self
            .series
            .iter()
            .flat_map(|(group, _)| group.sizes())
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Draw the chart into a PNG at `filename`, replacing any existing file.
    /// The image is drawn next to `filename` first and only moved into place
    /// once complete, so a failed draw leaves any previous chart untouched.
    pub fn render(&self, filename: &Path) -> Result<(), ChartError> {
        if self.series.is_empty() {
            return Err(ChartError::Drawing("no series to draw".to_owned()));
        }

        let partial = partial_path(filename);
        match self.render_to(&partial) {
            Ok(()) => fs::rename(&partial, filename).map_err(|e| {
                let _ = fs::remove_file(&partial);
                ChartError::Drawing(format!("failed to write '{}': {}", filename.display(), e))
            }),
            Err(e) => {
                // the bitmap backend saves on drop, even after an error
                let _ = fs::remove_file(&partial);
                Err(e)
            }
        }
    }

    fn render_to(&self, filename: &Path) -> Result<(), ChartError> {
        let x_values = || {
            self.series
                .iter()
                .flat_map(|(group, _)| group.points().iter().map(|p| p.0 as f64))
                .filter(move |v| self.scale.admits(*v))
        };
        let y_values = || {
            self.series
                .iter()
                .flat_map(|(group, _)| group.points().iter().map(|p| p.1))
                .filter(move |v| self.scale.admits(*v))
        };
        let x_range = self.scale.range(x_values());
        let y_range = self.scale.range(y_values());

        let root = BitMapBackend::new(filename, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        match self.scale {
            Scale::Linear if self.size_ticks => {
                let ticks = self.sizes().into_iter().map(|s| s as f64).collect();
                self.draw(&root, FixedTicks::new(x_range, ticks), y_range)?
            }
            Scale::Linear => self.draw(&root, x_range, y_range)?,
            Scale::Log => self.draw(&root, x_range.log_scale(), y_range.log_scale())?,
        }

        root.present()?;
        Ok(())
    }

    fn draw<X, Y>(
        &self,
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        x_axis: X,
        y_axis: Y,
    ) -> Result<(), ChartError>
    where
        X: AsRangedCoord<Value = f64>,
        Y: AsRangedCoord<Value = f64>,
        <X as AsRangedCoord>::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
        <Y as AsRangedCoord>::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        let mut chart = ChartBuilder::on(root)
            .caption(&self.caption, ("sans-serif", 28))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .build_cartesian_2d(x_axis, y_axis)?;

        let x_formatter = self.x_format.formatter();
        let y_formatter = self.y_format.formatter();

        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(&self.x_desc)
                .y_desc(&self.y_desc)
                .axis_desc_style(("sans-serif", 18))
                .label_style(("sans-serif", 14))
                .bold_line_style(BLACK.mix(0.2))
                .light_line_style(BLACK.mix(0.06));
            if let Some(ref f) = x_formatter {
                mesh.x_label_formatter(f);
            }
            if let Some(ref f) = y_formatter {
                mesh.y_label_formatter(f);
            }
            mesh.draw()?;
        }

        for (group, style) in &self.series {
            let points: Vec<(f64, f64)> = group
                .points()
                .iter()
                .map(|&(x, y)| (x as f64, y))
                .filter(|&(x, y)| self.scale.admits(x) && self.scale.admits(y))
                .collect();
            if points.len() < group.points().len() {
                warn!(
                    "series '{}': {} points cannot be shown on a log scale",
                    group.name(),
                    group.points().len() - points.len()
                );
            }

            draw_markers(&mut chart, &points, style)?;

            let line = style.line();
            let legend = style.line();
            let anno = match style.stroke() {
                Stroke::Solid => chart.draw_series(LineSeries::new(points, line))?,
                Stroke::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, line))?,
            };
            anno.label(group.name());
            match style.stroke() {
                Stroke::Solid => {
                    anno.legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + LEGEND_LENGTH, y)], legend)
                    });
                }
                Stroke::Dashed => {
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (9, 0)], legend)
                            + PathElement::new(vec![(15, 0), (LEGEND_LENGTH, 0)], legend)
                    });
                }
            }
        }

        chart
            .configure_series_labels()
            .label_font(("sans-serif", 16))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        Ok(())
    }
}

/// Sibling of `filename` keeping its extension, which selects the image format.
fn partial_path(filename: &Path) -> PathBuf {
    let name = filename
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    filename.with_file_name(format!(".partial-{}", name))
}

fn draw_markers<X, Y>(
    chart: &mut ChartContext<BitMapBackend, Cartesian2d<X, Y>>,
    points: &[(f64, f64)],
    style: &SeriesStyle,
) -> Result<(), ChartError>
where
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let fill = style.fill();
    let points = points.iter().copied();
    match style.marker() {
        Marker::Circle => {
            chart.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, fill)))?;
        }
        Marker::Square => {
            chart.draw_series(points.map(|p| {
                EmptyElement::at(p)
                    + Rectangle::new([(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)], fill)
            }))?;
        }
        Marker::Triangle => {
            chart.draw_series(points.map(|p| TriangleMarker::new(p, MARKER_SIZE + 1, fill)))?;
        }
        Marker::Cross => {
            chart.draw_series(points.map(|p| Cross::new(p, MARKER_SIZE, style.line())))?;
        }
    }
    Ok(())
}
