use std::path::Path;

use anyhow::bail;
use plotters::{prelude::*, style::text_anchor::{HPos, Pos, VPos}};

use super::{FONT, LABEL_SIZE, TITLE_SIZE, category_axis, palette, slot_label, svg_root, value_ceiling};

/// One bar: a category with its percentage and count.
#[derive(Debug, Clone)]
pub(crate) struct Bar {
    pub label: String,
    pub percent: f64,
    pub count: u64,
}

/// Vertical bar chart of percentages.
///
/// With `numbered` each bar carries its count above it.
pub(crate) fn draw_bars(path: &Path, title: &str, bars: &[Bar], numbered: bool) -> anyhow::Result<()> {
    if bars.is_empty() {
        bail!("no bars to draw for {title}");
    }
    let labels = bars.iter().map(|b| b.label.clone()).collect::<Vec<_>>();
    let ceiling = value_ceiling(bars.iter().map(|b| &b.percent));

    let root = svg_root(path, (1000, 600));
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(category_axis(bars.len()), 0.0..ceiling)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| slot_label(&labels, *x))
        .x_label_style((FONT, LABEL_SIZE))
        .y_desc("Prozent")
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = slot_start(i);
        let mut rect = Rectangle::new([(x, 0.0), (x + 1.0, bar.percent)], palette(i).filled());
        rect.set_margin(0, 0, 12, 12);
        rect
    }))?;

    if numbered {
        let style = TextStyle::from((FONT, LABEL_SIZE).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Text::new(bar.count.to_string(), (slot_start(i) + 0.5, bar.percent), style.clone())
        }))?;
    }

    root.present()?;
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn slot_start(i: usize) -> f64 {
    i as f64
}
