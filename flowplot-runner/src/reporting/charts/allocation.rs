//! Three stacked panels sharing a time axis: reference prices, USD value
//! stack with TVL, and percent-of-TVL stack.

use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use flowplot_core::derive::{AllocationFigure, StackedLayer};
use flowplot_core::domain::PriceSeries;
use flowplot_core::FigureSize;

use super::style::{
    band_polygon, bounds, color, date_label, padded, seconds, time_range, title_font, FONT,
    PERP_COLOR, SPOT_COLOR,
};

const LAYER_ALPHA: f64 = 0.7;
const X_LABEL_FORMAT: &str = "%b '%y";

pub(super) fn draw(figure: &AllocationFigure, size: FigureSize, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, title_font(28))?;

    // Height ratios 1 : 1.2 : 0.8
    let height = body.dim_in_pixel().1;
    let (prices_area, rest) = body.split_vertically(height / 3);
    let (values_area, percent_area) = rest.split_vertically(height * 2 / 5);

    let xs = seconds(&figure.timestamps);
    let x_range = time_range(&xs);

    draw_prices(&prices_area, figure, &x_range)?;
    draw_values(&values_area, figure, &xs, &x_range)?;
    draw_percent(&percent_area, figure, &xs, &x_range)?;

    root.present()?;
    Ok(())
}

fn draw_prices<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &AllocationFigure,
    x_range: &Range<f64>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let feeds: Vec<(&PriceSeries, RGBAColor, u32)> = [
        (figure.spot.as_ref(), SPOT_COLOR.mix(1.0), 2),
        (figure.perp.as_ref(), PERP_COLOR.mix(0.7), 1),
    ]
    .into_iter()
    .filter_map(|(feed, c, w)| feed.map(|f| (f, c, w)))
    .collect();

    let y_range = bounds(feeds.iter().flat_map(|(f, _, _)| f.points.iter().map(|p| &p.price)))
        .map(|(lo, hi)| padded(lo, hi, 0.05))
        .unwrap_or(0.0..1.0);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_labels(0)
        .y_desc("ETH/USD")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    for (feed, c, width) in feeds {
        chart
            .draw_series(LineSeries::new(
                feed.points.iter().map(|p| (p.timestamp as f64, p.price)),
                c.stroke_width(width),
            ))?
            .label(feed.feed.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c.stroke_width(2)));
    }

    if figure.spot.is_some() || figure.perp.is_some() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}

fn draw_layers<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    layers: &[StackedLayer],
    xs: &[f64],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    for layer in layers {
        let fill = color(layer.color).mix(LAYER_ALPHA);
        chart
            .draw_series(std::iter::once(Polygon::new(
                band_polygon(xs, &layer.lower, &layer.upper),
                fill.filled(),
            )))?
            .label(layer.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], fill.filled()));
    }
    Ok(())
}

fn draw_values<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &AllocationFigure,
    xs: &[f64],
    x_range: &Range<f64>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let top = figure.stack_top();
    let hi = bounds(top.iter().chain(&figure.tvl)).map_or(1.0, |(_, hi)| hi.max(1.0));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), 0.0..hi * 1.08)?;

    chart
        .configure_mesh()
        .x_labels(0)
        .y_desc("USD")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    draw_layers(&mut chart, &figure.value_layers, xs)?;

    chart
        .draw_series(DashedLineSeries::new(
            xs.iter().copied().zip(figure.tvl.iter().copied()),
            8,
            4,
            BLACK.stroke_width(2),
        ))?
        .label("TVL")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    let note = &figure.annotation;
    let anchor = (note.timestamp as f64, note.value);
    chart.draw_series(std::iter::once(
        EmptyElement::at(anchor)
            + Circle::new((0, 0), 3, BLACK.filled())
            + Text::new(note.text.clone(), (-180, -30), title_font(16)),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_percent<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &AllocationFigure,
    xs: &[f64],
    x_range: &Range<f64>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), 0.0..105.0)?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|ts| date_label(*ts, X_LABEL_FORMAT))
        .x_label_style((FONT, 14))
        .y_desc("%")
        .draw()?;

    draw_layers(&mut chart, &figure.percent_layers, xs)?;

    chart.draw_series(DashedLineSeries::new(
        [(x_range.start, 50.0), (x_range.end, 50.0)],
        6,
        4,
        WHITE.mix(0.5).stroke_width(1),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
