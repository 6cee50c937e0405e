//! Historical portfolio value with Monte Carlo percentile bands and a stats box.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use flowplot_core::derive::TrajectoryFigure;
use flowplot_core::FigureSize;

use super::style::{
    band_polygon, bounds, date_label, padded, seconds, text_width, time_range, title_font,
    BAND_COLOR, FONT, GRID_GRAY, HISTORICAL_COLOR, MONO_FONT,
};

const X_LABEL_FORMAT: &str = "%b %Y";
const STATS_FONT_SIZE: u32 = 18;

pub(super) fn draw(figure: &TrajectoryFigure, size: FigureSize, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let xs = seconds(&figure.timestamps);
    let x_range = time_range(&xs);

    let mut series: Vec<&f64> = figure.tvl.iter().collect();
    if let Some(b) = &figure.bands {
        series.extend(b.p5.iter().chain(&b.p95));
    }
    let (lo, hi) = bounds(series).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, title_font(28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range, padded(lo, hi, 0.05))?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|ts| date_label(*ts, X_LABEL_FORMAT))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc("Date")
        .y_desc("Portfolio Value (USD)")
        .label_style((FONT, 16))
        .draw()?;

    if let Some(bands) = &figure.bands {
        let outer = BAND_COLOR.mix(0.12);
        let inner = BAND_COLOR.mix(0.25);
        chart
            .draw_series(std::iter::once(Polygon::new(
                band_polygon(&xs, &bands.p5, &bands.p95),
                outer.filled(),
            )))?
            .label("MC 5th-95th")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], outer.filled()));
        chart
            .draw_series(std::iter::once(Polygon::new(
                band_polygon(&xs, &bands.p25, &bands.p75),
                inner.filled(),
            )))?
            .label("MC 25th-75th")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], inner.filled()));
    }

    chart
        .draw_series(LineSeries::new(
            xs.iter().copied().zip(figure.tvl.iter().copied()),
            HISTORICAL_COLOR.stroke_width(3),
        ))?
        .label("Historical")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], HISTORICAL_COLOR.stroke_width(3))
        });

    let (x0, x1) = (xs.first().copied().unwrap_or(0.0), xs.last().copied().unwrap_or(1.0));
    chart.draw_series(DashedLineSeries::new(
        [(x0, figure.baseline), (x1, figure.baseline)],
        8,
        6,
        GRID_GRAY.mix(0.6).stroke_width(1),
    ))?;

    let note = &figure.annotation;
    chart.draw_series(std::iter::once(
        EmptyElement::at((note.timestamp as f64, note.value))
            + Circle::new((0, 0), 3, BLACK.filled())
            + Text::new(note.text.clone(), (-160, -30), title_font(18)),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    // Stats box, bottom-right of the plotting area.
    let (px, py) = chart.plotting_area().get_pixel_range();
    let line_height = STATS_FONT_SIZE as i32 + 6;
    let box_w = figure
        .stats_lines
        .iter()
        .map(|l| text_width(l, STATS_FONT_SIZE))
        .max()
        .unwrap_or(0)
        + 20;
    let box_h = line_height * figure.stats_lines.len() as i32 + 14;
    let (right, bottom) = (px.end - 12, py.end - 12);
    let (left, top) = (right - box_w, bottom - box_h);

    root.draw(&Rectangle::new([(left, top), (right, bottom)], WHITE.mix(0.9).filled()))?;
    root.draw(&Rectangle::new([(left, top), (right, bottom)], GRID_GRAY.stroke_width(1)))?;
    let stats_style = (MONO_FONT, STATS_FONT_SIZE).into_font().color(&BLACK);
    for (i, line) in figure.stats_lines.iter().enumerate() {
        root.draw_text(line, &stats_style, (left + 10, top + 8 + i as i32 * line_height))?;
    }

    root.present()?;
    Ok(())
}
