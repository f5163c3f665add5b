// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::style::{Color, RGBColor, ShapeStyle};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

pub const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
}

/// How one series is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    colour: RGBColor,
    marker: Marker,
    stroke: Stroke,
    width: u32,
}

impl SeriesStyle {
    /// Solid line of width 2 using the `index`th palette colour.
    pub fn palette(index: usize, marker: Marker) -> Self {
        Self::new(COLOURS[index % COLOURS.len()], marker)
    }

    pub fn new(colour: RGBColor, marker: Marker) -> Self {
        Self {
            colour,
            marker,
            stroke: Stroke::Solid,
            width: 2,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.stroke = Stroke::Dashed;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn colour(&self) -> RGBColor {
        self.colour
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn line(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.colour.to_rgba(),
            filled: false,
            stroke_width: self.width,
        }
    }

    pub fn fill(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.colour.to_rgba(),
            filled: true,
            stroke_width: 1,
        }
    }
}
