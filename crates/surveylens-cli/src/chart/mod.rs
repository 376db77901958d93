//! SVG charts of result tables.

use std::{ops::Range, path::Path};

use plotters::{
    coord::{
        Shift,
        ranged1d::{DefaultFormatting, KeyPointHint},
        types::RangedCoordf64,
    },
    prelude::*,
};

mod bar;
mod grouped;
mod heatmap;
mod pie;

pub(crate) use self::{
    bar::{Bar, draw_bars},
    grouped::draw_grouped,
    heatmap::{ColorScale, draw_heatmap},
    pie::draw_pie,
};

/// Qualitative palette for categories and series.
pub(crate) const SET2: [RGBColor; 8] = [
    RGBColor(0x66, 0xc2, 0xa5),
    RGBColor(0xfc, 0x8d, 0x62),
    RGBColor(0x8d, 0xa0, 0xcb),
    RGBColor(0xe7, 0x8a, 0xc3),
    RGBColor(0xa6, 0xd8, 0x54),
    RGBColor(0xff, 0xd9, 0x2f),
    RGBColor(0xe5, 0xc4, 0x94),
    RGBColor(0xb3, 0xb3, 0xb3),
];

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 24;
const LABEL_SIZE: u32 = 13;

fn palette(i: usize) -> RGBColor {
    SET2[i % SET2.len()]
}

fn svg_root(path: &Path, size: (u32, u32)) -> DrawingArea<SVGBackend<'_>, Shift> {
    SVGBackend::new(path, size).into_drawing_area()
}

/// Axis over unit-wide slots `[i, i + 1)`, ticked at each slot center.
#[derive(Clone)]
struct SlotAxis {
    slots: usize,
    coord: RangedCoordf64,
}

#[expect(clippy::cast_precision_loss)]
fn category_axis(slots: usize) -> SlotAxis {
    SlotAxis {
        slots,
        coord: (0.0..slots as f64).into(),
    }
}

impl Ranged for SlotAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    #[expect(clippy::cast_precision_loss)]
    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // every slot or none; a partial set would label the wrong slots
        if hint.max_num_points() < self.slots {
            return vec![];
        }
        (0..self.slots).map(|i| i as f64 + 0.5).collect()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

/// Label of the slot containing `x`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slot_label(labels: &[String], x: f64) -> String {
    if x < 0.0 {
        return String::new();
    }
    labels.get(x.floor() as usize).cloned().unwrap_or_default()
}

/// Upper bound of a value axis with some headroom for bar labels.
fn value_ceiling<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    let max = values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

/// Linear blend of two colors, `t` in `[0, 1]`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
