//! Shared chart styling and coordinate helpers.

use std::ops::Range;

use chrono::DateTime;
use plotters::prelude::*;

use flowplot_core::Rgb;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const MONO_FONT: &str = "monospace";

pub(crate) const SPOT_COLOR: RGBColor = RGBColor(0x21, 0x96, 0xF3);
pub(crate) const PERP_COLOR: RGBColor = RGBColor(0xFF, 0x57, 0x22);
pub(crate) const HISTORICAL_COLOR: RGBColor = RGBColor(0x1A, 0x1A, 0x2E);
pub(crate) const BAND_COLOR: RGBColor = RGBColor(70, 130, 180);
pub(crate) const GRID_GRAY: RGBColor = RGBColor(128, 128, 128);

pub(crate) fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

pub(crate) fn title_font(size: u32) -> FontDesc<'static> {
    (FONT, size).into_font().style(FontStyle::Bold)
}

/// Epoch seconds as chart x values. plotters' datetime ranges overflow on
/// nanosecond arithmetic over long spans, so the axes stay on f64.
pub(crate) fn seconds(timestamps: &[i64]) -> Vec<f64> {
    timestamps.iter().map(|&t| t as f64).collect()
}

pub(crate) fn date_label(ts: f64, format: &str) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

/// `[min, max]` over finite values, or `None` when there are none.
pub(crate) fn bounds<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Range widened by `frac` of its width on both sides; a flat range gets ±1.
pub(crate) fn padded(lo: f64, hi: f64, frac: f64) -> Range<f64> {
    let width = hi - lo;
    if width <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - width * frac)..(hi + width * frac)
}

/// Time axis range; a single tick is padded by an hour each way.
pub(crate) fn time_range(xs: &[f64]) -> Range<f64> {
    match bounds(xs) {
        Some((lo, hi)) if hi > lo => lo..hi,
        Some((t, _)) => (t - 3600.0)..(t + 3600.0),
        None => 0.0..1.0,
    }
}

/// Closed outline of the band between `lower` and `upper`: forward along the
/// upper edge, back along the lower one.
pub(crate) fn band_polygon(xs: &[f64], lower: &[f64], upper: &[f64]) -> Vec<(f64, f64)> {
    let forward = xs.iter().zip(upper).map(|(&x, &y)| (x, y));
    let back = xs.iter().zip(lower).rev().map(|(&x, &y)| (x, y));
    forward.chain(back).collect()
}

/// Rough pixel width of `text` at `size`, for sizing annotation boxes.
pub(crate) fn text_width(text: &str, size: u32) -> i32 {
    (text.chars().count() as f64 * size as f64 * 0.6).ceil() as i32
}
