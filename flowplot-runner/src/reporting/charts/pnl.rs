//! Signed PnL attribution bars with a net PnL box.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use flowplot_core::derive::PnlFigure;
use flowplot_core::FigureSize;

use super::style::{bounds, color, padded, text_width, title_font, FONT, GRID_GRAY};

const NET_FONT_SIZE: u32 = 22;
const BAR_HALF_WIDTH: f64 = 0.4;

pub(super) fn draw(figure: &PnlFigure, size: FigureSize, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let values = figure.values();
    let (lo, hi) = bounds(values.iter().chain([0.0].iter())).unwrap_or((0.0, 1.0));
    let y_range = padded(lo, hi, 0.15);
    let n = figure.bars.len();
    let x_range = -0.5..(n as f64 - 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, title_font(28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    // One category per integer x; key points land on 0..n.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| category_at(figure, *x))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .y_desc("USD")
        .label_style((FONT, 16))
        .draw()?;

    chart.draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, bar.value)],
            color(bar.color).filled(),
        )
    }))?;

    let label_font = title_font(18);
    chart.draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
        let anchor = if bar.value >= 0.0 {
            Pos::new(HPos::Center, VPos::Bottom)
        } else {
            Pos::new(HPos::Center, VPos::Top)
        };
        Text::new(
            bar.label.clone(),
            (i as f64, bar.value),
            TextStyle::from(label_font.clone()).pos(anchor),
        )
    }))?;

    chart.draw_series(LineSeries::new(
        [(x_range.start, 0.0), (x_range.end, 0.0)],
        GRID_GRAY.stroke_width(1),
    ))?;

    // Net PnL box, top-right of the plotting area.
    let (px, py) = chart.plotting_area().get_pixel_range();
    let box_w = text_width(&figure.net_label, NET_FONT_SIZE) + 24;
    let box_h = NET_FONT_SIZE as i32 + 20;
    let (right, top) = (px.end - 12, py.start + 12);
    let left = right - box_w;
    root.draw(&Rectangle::new(
        [(left, top), (right, top + box_h)],
        RGBColor(0xFF, 0xFF, 0xE0).filled(),
    ))?;
    root.draw(&Rectangle::new([(left, top), (right, top + box_h)], GRID_GRAY.stroke_width(1)))?;
    root.draw_text(
        &figure.net_label,
        &title_font(NET_FONT_SIZE).color(&BLACK),
        (left + 12, top + 10),
    )?;

    root.present()?;
    Ok(())
}

fn category_at(figure: &PnlFigure, x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    figure
        .bars
        .get(idx as usize)
        .map(|b| b.category.to_string())
        .unwrap_or_default()
}
