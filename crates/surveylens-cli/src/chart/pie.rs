use std::path::Path;

use anyhow::bail;
use plotters::{element::Pie, prelude::*};

use super::{FONT, TITLE_SIZE, palette, svg_root};

/// Pie chart of category shares with percentage labels.
#[expect(clippy::cast_possible_wrap)]
pub(crate) fn draw_pie(path: &Path, title: &str, labels: &[String], values: &[f64]) -> anyhow::Result<()> {
    if values.iter().sum::<f64>() <= 0.0 {
        bail!("no shares to draw for {title}");
    }
    let root = svg_root(path, (800, 650));
    root.fill(&WHITE)?;
    let area = root.titled(title, (FONT, TITLE_SIZE))?;

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;
    let colors = (0..values.len()).map(palette).collect::<Vec<_>>();

    let mut pie = Pie::new(&center, &radius, values, &colors, labels);
    pie.label_style((FONT, 16).into_font().color(&BLACK));
    pie.percentages((FONT, 14).into_font().color(&BLACK));
    area.draw(&pie)?;

    root.present()?;
    Ok(())
}
