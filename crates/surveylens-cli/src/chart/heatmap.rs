use std::path::Path;

use anyhow::bail;
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use super::{FONT, LABEL_SIZE, TITLE_SIZE, blend, category_axis, slot_label, svg_root};

const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];
const DIVERGING: [RGBColor; 3] = [
    RGBColor(33, 102, 172),
    RGBColor(247, 247, 247),
    RGBColor(178, 24, 43),
];

/// Mapping from cell values to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorScale {
    /// Sequential dark-to-light scale over `[0, 1]`.
    Sequential,
    /// Blue-white-red scale over `[-1, 1]`.
    Diverging,
}

impl ColorScale {
    fn color(self, value: f64) -> RGBColor {
        match self {
            Self::Sequential => gradient(&VIRIDIS, value.clamp(0.0, 1.0)),
            Self::Diverging => gradient(&DIVERGING, (value.clamp(-1.0, 1.0) + 1.0) / 2.0),
        }
    }
}

/// Color at `t` in `[0, 1]` along evenly spaced `stops`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn gradient(stops: &[RGBColor], t: f64) -> RGBColor {
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    blend(stops[i], stops[i + 1], pos - i as f64)
}

fn is_dark(color: RGBColor) -> bool {
    let luma = 0.299 * f64::from(color.0) + 0.587 * f64::from(color.1) + 0.114 * f64::from(color.2);
    luma < 128.0
}

/// Annotated heatmap, `values[row][column]`. Non-finite cells stay blank.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn draw_heatmap(
    path: &Path,
    title: &str,
    rows: &[String],
    columns: &[String],
    values: &[Vec<f64>],
    scale: ColorScale,
    digits: usize,
) -> anyhow::Result<()> {
    if rows.is_empty() || columns.is_empty() {
        bail!("empty matrix for {title}");
    }
    // the first row is drawn at the top
    let y_labels = rows.iter().rev().cloned().collect::<Vec<_>>();
    let top = rows.len() as f64;

    let root = svg_root(path, (1100, 900));
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(160)
        .build_cartesian_2d(category_axis(columns.len()), category_axis(rows.len()))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(columns.len())
        .y_labels(rows.len())
        .x_label_formatter(&|x| slot_label(columns, *x))
        .y_label_formatter(&|y| slot_label(&y_labels, *y))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let cells = values.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(move |(j, v)| (j as f64, top - 1.0 - i as f64, *v))
    });
    let cells = cells.collect::<Vec<_>>();

    chart.draw_series(
        cells
            .iter()
            .map(|&(x, y, v)| Rectangle::new([(x, y), (x + 1.0, y + 1.0)], scale.color(v).filled())),
    )?;
    let anchor = Pos::new(HPos::Center, VPos::Center);
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let ink: &'static RGBColor = if is_dark(scale.color(v)) { &WHITE } else { &BLACK };
        let style = TextStyle::from((FONT, LABEL_SIZE).into_font()).color(ink).pos(anchor);
        Text::new(format!("{v:.digits$}"), (x + 0.5, y + 0.5), style)
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(ColorScale::Sequential.color(0.0), VIRIDIS[0]);
        assert_eq!(ColorScale::Sequential.color(1.0), VIRIDIS[4]);
        assert_eq!(ColorScale::Diverging.color(-1.0), DIVERGING[0]);
        assert_eq!(ColorScale::Diverging.color(0.0), DIVERGING[1]);
        assert_eq!(ColorScale::Diverging.color(2.0), DIVERGING[2]);
    }

    #[test]
    fn test_text_contrast() {
        assert!(is_dark(VIRIDIS[0]));
        assert!(!is_dark(VIRIDIS[4]));
    }
}
