//! Venue allocation figure: price panel, stacked USD values, stacked % of TVL.

use super::format::value_annotation;
use super::Annotation;
use crate::domain::{PriceSeries, TickSet};
use crate::fingerprint::{SeriesDigest, SeriesHasher};
use crate::venue::{ordered_venues, Palette, Rgb};

/// TVL is clamped to this before computing percent-of-TVL.
///
/// When the floor kicks in while venue values stay above it, the percent stack
/// can exceed 100%. That is expected output, not an error.
pub const TVL_FLOOR: f64 = 1.0;

/// Title when the caller gives none, picked from the venue columns present.
pub fn allocation_title(venue_ids: &[String]) -> &'static str {
    let has = |id: &str| venue_ids.iter().any(|v| v == id);
    if has("lend_eth") {
        "v2: ETH Lending + Short Perp + USDC Lending  (group-aware rebalance)"
    } else if has("buy_eth") {
        "v1: Spot ETH + Short Perp + USDC Lending  (group-aware rebalance)"
    } else {
        "Backtest Allocations"
    }
}

/// One band of a stacked area chart, drawn between `lower` and `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayer {
    pub venue_id: String,
    pub label: String,
    pub color: Rgb,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

pub struct AllocationInputs<'a> {
    pub ticks: &'a TickSet,
    pub spot: Option<&'a PriceSeries>,
    pub perp: Option<&'a PriceSeries>,
    /// Explicit title; wins over the column heuristic.
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationFigure {
    pub title: String,
    pub timestamps: Vec<i64>,
    /// Present only when a feed was given and has points inside the tick span.
    pub spot: Option<PriceSeries>,
    pub perp: Option<PriceSeries>,
    pub tvl: Vec<f64>,
    pub value_layers: Vec<StackedLayer>,
    pub percent_layers: Vec<StackedLayer>,
    pub annotation: Annotation,
}

fn stack(series: Vec<(String, Vec<f64>)>, len: usize, palette: &Palette) -> Vec<StackedLayer> {
    let mut bottom = vec![0.0; len];
    series
        .into_iter()
        .map(|(venue_id, values)| {
            let upper: Vec<f64> = bottom.iter().zip(&values).map(|(b, v)| b + v).collect();
            let style = palette.style_for(&venue_id);
            let layer = StackedLayer {
                venue_id,
                label: style.label,
                color: style.color,
                lower: bottom.clone(),
                upper: upper.clone(),
            };
            bottom = upper;
            layer
        })
        .collect()
}

impl AllocationFigure {
    /// Returns `None` for an empty tick set; there is nothing to draw.
    pub fn derive<S: AsRef<str>>(
        inputs: &AllocationInputs<'_>,
        palette: &Palette,
        stack_order: &[S],
    ) -> Option<Self> {
        let ticks = inputs.ticks;
        let first = ticks.records.first()?;
        let last = ticks.records.last()?;

        let timestamps = ticks.timestamps();
        let tvl = ticks.tvl();
        let order = ordered_venues(&ticks.venue_ids, stack_order);

        let values: Vec<(String, Vec<f64>)> = order
            .iter()
            .filter_map(|id| ticks.venue_series(id).map(|s| (id.clone(), s)))
            .collect();
        let floored: Vec<f64> = tvl.iter().map(|t| t.max(TVL_FLOOR)).collect();
        let percents: Vec<(String, Vec<f64>)> = values
            .iter()
            .map(|(id, series)| {
                let pct = series
                    .iter()
                    .zip(&floored)
                    .map(|(v, t)| v / t * 100.0)
                    .collect();
                (id.clone(), pct)
            })
            .collect();

        let title = inputs
            .title
            .map(str::to_string)
            .unwrap_or_else(|| allocation_title(&ticks.venue_ids).to_string());

        Some(Self {
            title,
            timestamps,
            spot: inputs.spot.filter(|s| !s.is_empty()).cloned(),
            perp: inputs.perp.filter(|s| !s.is_empty()).cloned(),
            value_layers: stack(values, ticks.len(), palette),
            percent_layers: stack(percents, ticks.len(), palette),
            annotation: Annotation {
                timestamp: last.timestamp,
                value: last.tvl,
                text: value_annotation(first.tvl, last.tvl),
            },
            tvl,
        })
    }

    /// Top of the USD stack per tick (sum of all venue values).
    pub fn stack_top(&self) -> Vec<f64> {
        self.value_layers
            .last()
            .map(|l| l.upper.clone())
            .unwrap_or_else(|| vec![0.0; self.timestamps.len()])
    }

    /// Top of the percent stack per tick.
    pub fn percent_top(&self) -> Vec<f64> {
        self.percent_layers
            .last()
            .map(|l| l.upper.clone())
            .unwrap_or_else(|| vec![0.0; self.timestamps.len()])
    }

    pub fn fingerprint(&self) -> SeriesDigest {
        let mut h = SeriesHasher::new();
        h.text(&self.title).timestamps(&self.timestamps).values(&self.tvl);
        for feed in [&self.spot, &self.perp].into_iter().flatten() {
            let stamps: Vec<i64> = feed.points.iter().map(|p| p.timestamp).collect();
            let prices: Vec<f64> = feed.points.iter().map(|p| p.price).collect();
            h.text(feed.feed.label()).timestamps(&stamps).values(&prices);
        }
        for layer in self.value_layers.iter().chain(&self.percent_layers) {
            h.text(&layer.venue_id).values(&layer.lower).values(&layer.upper);
        }
        h.value(self.annotation.value).text(&self.annotation.text);
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceFeed, PricePoint, TickRecord};
    use crate::venue::DEFAULT_STACK_ORDER;

    fn ticks(venues: &[&str], rows: Vec<(i64, f64, Vec<f64>)>) -> TickSet {
        TickSet {
            venue_ids: venues.iter().map(|v| v.to_string()).collect(),
            records: rows
                .into_iter()
                .map(|(timestamp, tvl, venue_values)| TickRecord {
                    timestamp,
                    tvl,
                    venue_values,
                })
                .collect(),
        }
    }

    fn derive(set: &TickSet, title: Option<&str>) -> AllocationFigure {
        let inputs = AllocationInputs {
            ticks: set,
            spot: None,
            perp: None,
            title,
        };
        AllocationFigure::derive(&inputs, &Palette::default(), &DEFAULT_STACK_ORDER).unwrap()
    }

    #[test]
    fn empty_ticks_derive_nothing() {
        let set = ticks(&["buy_eth"], vec![]);
        let inputs = AllocationInputs {
            ticks: &set,
            spot: None,
            perp: None,
            title: None,
        };
        assert!(
            AllocationFigure::derive(&inputs, &Palette::default(), &DEFAULT_STACK_ORDER).is_none()
        );
    }

    #[test]
    fn layers_follow_preference_order() {
        let set = ticks(
            &["lend_idle", "custom", "short_eth", "buy_eth"],
            vec![(1, 100.0, vec![10.0, 5.0, 35.0, 50.0])],
        );
        let fig = derive(&set, None);
        let ids: Vec<&str> = fig.value_layers.iter().map(|l| l.venue_id.as_str()).collect();
        assert_eq!(ids, vec!["buy_eth", "short_eth", "lend_idle", "custom"]);
        assert_eq!(fig.value_layers[0].lower, vec![0.0]);
        assert_eq!(fig.value_layers[1].lower, vec![50.0]);
        assert_eq!(fig.stack_top(), vec![100.0]);
        assert_eq!(fig.value_layers[3].label, "custom");
    }

    #[test]
    fn percent_uses_floored_tvl() {
        let set = ticks(&["buy_eth"], vec![(1, 0.0, vec![0.5]), (2, 200.0, vec![100.0])]);
        let fig = derive(&set, None);
        // tvl 0 floors to 1.0: 0.5 / 1.0 = 50%
        assert_eq!(fig.percent_top(), vec![50.0, 50.0]);
    }

    #[test]
    fn floor_can_push_percent_above_hundred() {
        let set = ticks(&["buy_eth"], vec![(1, 0.5, vec![3.0])]);
        let fig = derive(&set, None);
        assert_eq!(fig.percent_top(), vec![300.0]);
    }

    #[test]
    fn title_heuristic_and_override() {
        let v2 = ticks(&["buy_eth", "lend_eth"], vec![(1, 1.0, vec![0.5, 0.5])]);
        assert!(derive(&v2, None).title.starts_with("v2: ETH Lending"));

        let v1 = ticks(&["buy_eth", "short_eth"], vec![(1, 1.0, vec![0.5, 0.5])]);
        assert!(derive(&v1, None).title.starts_with("v1: Spot ETH"));

        let other = ticks(&["lend_usdc"], vec![(1, 1.0, vec![1.0])]);
        assert_eq!(derive(&other, None).title, "Backtest Allocations");

        assert_eq!(derive(&v2, Some("Custom")).title, "Custom");
    }

    #[test]
    fn annotation_on_last_tick() {
        let set = ticks(
            &["buy_eth"],
            vec![(1, 10_000.0, vec![10_000.0]), (2, 10_500.0, vec![10_500.0])],
        );
        let fig = derive(&set, None);
        assert_eq!(fig.annotation.timestamp, 2);
        assert_eq!(fig.annotation.text, "$10,500 (+5.0%)");
    }

    #[test]
    fn empty_price_feed_is_dropped() {
        let set = ticks(&["buy_eth"], vec![(1, 1.0, vec![1.0])]);
        let empty = PriceSeries {
            feed: PriceFeed::Spot,
            points: vec![],
        };
        let perp = PriceSeries {
            feed: PriceFeed::Perp,
            points: vec![PricePoint {
                timestamp: 1,
                price: 2000.0,
            }],
        };
        let inputs = AllocationInputs {
            ticks: &set,
            spot: Some(&empty),
            perp: Some(&perp),
            title: None,
        };
        let fig =
            AllocationFigure::derive(&inputs, &Palette::default(), &DEFAULT_STACK_ORDER).unwrap();
        assert!(fig.spot.is_none());
        assert_eq!(fig.perp.as_ref().map(|p| p.points.len()), Some(1));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let set = ticks(
            &["buy_eth", "short_eth"],
            vec![(1, 10.0, vec![6.0, 4.0]), (2, 11.0, vec![7.0, 4.0])],
        );
        assert_eq!(derive(&set, None).fingerprint(), derive(&set, None).fingerprint());
        assert_ne!(derive(&set, None).fingerprint(), derive(&set, Some("x")).fingerprint());
    }
}
