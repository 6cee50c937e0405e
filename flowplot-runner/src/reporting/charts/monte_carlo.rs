//! Side-by-side histograms of simulated TWRR, max drawdown and Sharpe, each
//! with a reference line at the historical value.

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use flowplot_core::derive::{HistogramPanel, McFigure};
use flowplot_core::FigureSize;

use super::style::{color, padded, title_font, FONT};

const REFERENCE_COLOR: RGBColor = RGBColor(0xE0, 0x20, 0x20);

pub(super) fn draw(figure: &McFigure, size: FigureSize, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, title_font(26))?;

    for (area, panel) in body.split_evenly((1, 3)).iter().zip(&figure.panels) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

/// X extent covering every bin and the reference line.
fn x_extent(panel: &HistogramPanel) -> (f64, f64) {
    let edges = &panel.histogram.edges;
    match (edges.first(), edges.last()) {
        (Some(&lo), Some(&hi)) => (lo.min(panel.reference), hi.max(panel.reference)),
        _ => (panel.reference, panel.reference),
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HistogramPanel,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (lo, hi) = x_extent(panel);
    let y_top = (panel.histogram.max_count().max(1) as f64) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(padded(lo, hi, 0.05), 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_desc(panel.x_label)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style((FONT, 14))
        .draw()?;

    let fill = color(panel.color).mix(0.8);
    chart.draw_series(panel.histogram.bins().map(|(left, right, count)| {
        Rectangle::new([(left, 0.0), (right, count as f64)], fill.filled())
    }))?;
    chart.draw_series(panel.histogram.bins().map(|(left, right, count)| {
        Rectangle::new([(left, 0.0), (right, count as f64)], WHITE.stroke_width(1))
    }))?;

    let x = panel.reference;
    chart
        .draw_series(LineSeries::new(
            [(x, 0.0), (x, y_top)],
            REFERENCE_COLOR.stroke_width(3),
        ))?
        .label(panel.reference_label.clone())
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE_COLOR.stroke_width(3))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, 16))
        .draw()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowplot_core::derive::Histogram;
    use flowplot_core::Rgb;

    fn panel(values: &[f64], reference: f64) -> HistogramPanel {
        HistogramPanel {
            title: "TWRR Distribution",
            x_label: "TWRR (%)",
            color: Rgb(70, 130, 180),
            values: values.to_vec(),
            histogram: Histogram::from_values(values, 10),
            reference,
            reference_label: String::new(),
        }
    }

    #[test]
    fn extent_includes_reference_outside_bins() {
        assert_eq!(x_extent(&panel(&[1.0, 2.0, 3.0], 12.34)), (1.0, 12.34));
        assert_eq!(x_extent(&panel(&[1.0, 2.0, 3.0], -4.0)), (-4.0, 3.0));
        assert_eq!(x_extent(&panel(&[1.0, 2.0, 3.0], 2.0)), (1.0, 3.0));
    }
}
