use std::path::Path;

use anyhow::bail;
use plotters::prelude::*;

use super::{FONT, LABEL_SIZE, TITLE_SIZE, category_axis, palette, slot_label, svg_root, value_ceiling};

/// Share of a slot left empty between neighboring groups.
const GROUP_GAP: f64 = 0.2;

/// Grouped bar chart: one slot per group, one bar per series within it.
///
/// `values[group][series]`; non-finite values are drawn as zero.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn draw_grouped(
    path: &Path,
    title: &str,
    groups: &[String],
    series: &[String],
    values: &[Vec<f64>],
    y_desc: &str,
) -> anyhow::Result<()> {
    if groups.is_empty() || series.is_empty() {
        bail!("no groups to draw for {title}");
    }
    let ceiling = value_ceiling(values.iter().flatten());
    let width = (1.0 - GROUP_GAP) / series.len() as f64;

    let root = svg_root(path, (1200, 650));
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(category_axis(groups.len()), 0.0..ceiling)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|x| slot_label(groups, *x))
        .x_label_style((FONT, LABEL_SIZE))
        .y_desc(y_desc)
        .draw()?;

    for (k, name) in series.iter().enumerate() {
        let color = palette(k);
        let bars = values.iter().enumerate().map(|(g, row)| {
            let value = row.get(k).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
            let x0 = g as f64 + GROUP_GAP / 2.0 + k as f64 * width;
            Rectangle::new([(x0, 0.0), (x0 + width, value)], color.filled())
        });
        chart
            .draw_series(bars)?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, LABEL_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}
