//! PnL attribution bars.

use super::format::format_signed_usd;
use crate::domain::HistoricalResult;
use crate::fingerprint::{SeriesDigest, SeriesHasher};
use crate::venue::Rgb;

pub const GAIN_COLOR: Rgb = Rgb(0x2E, 0xCC, 0x71);
pub const LOSS_COLOR: Rgb = Rgb(0xE7, 0x4C, 0x3C);

#[derive(Debug, Clone, PartialEq)]
pub struct PnlBar {
    pub category: &'static str,
    /// Signed contribution to net PnL.
    pub value: f64,
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PnlFigure {
    pub title: String,
    pub bars: Vec<PnlBar>,
    pub net_pnl: f64,
    pub net_label: String,
}

impl PnlFigure {
    /// Six bars in fixed order. Swap costs are stored positive and drawn negated.
    pub fn derive(hist: &HistoricalResult) -> Self {
        let categories = [
            ("Funding", hist.funding_pnl),
            ("Lending", hist.lending_interest),
            ("Rewards", hist.rewards_pnl),
            ("Premium", hist.premium_pnl),
            ("LP Fees", hist.lp_fees),
            ("Swap Costs", -hist.swap_costs),
        ];
        let bars = categories
            .into_iter()
            .map(|(category, value)| PnlBar {
                category,
                value,
                label: format_signed_usd(value, 2),
                color: if value >= 0.0 { GAIN_COLOR } else { LOSS_COLOR },
            })
            .collect();

        Self {
            title: format!("{} - PnL Breakdown", hist.label),
            bars,
            net_pnl: hist.net_pnl,
            net_label: format!("Net PnL: {}", format_signed_usd(hist.net_pnl, 2)),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    pub fn fingerprint(&self) -> SeriesDigest {
        SeriesHasher::new()
            .text(&self.title)
            .values(&self.values())
            .value(self.net_pnl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist() -> HistoricalResult {
        HistoricalResult {
            label: "delta neutral".into(),
            trajectory: vec![],
            twrr_pct: 0.0,
            annualized_pct: 0.0,
            max_drawdown_pct: 0.0,
            sharpe: 0.0,
            funding_pnl: 812.5,
            lending_interest: 140.25,
            rewards_pnl: 0.0,
            premium_pnl: -3.0,
            lp_fees: 0.0,
            swap_costs: 57.75,
            net_pnl: 892.0,
            rebalances: None,
            liquidations: None,
            ticks: None,
        }
    }

    #[test]
    fn swap_costs_are_negated() {
        let fig = PnlFigure::derive(&hist());
        let last = fig.bars.last().unwrap();
        assert_eq!(last.category, "Swap Costs");
        assert_eq!(last.value, -57.75);
        assert_eq!(last.label, "$-57.75");
        assert_eq!(last.color, LOSS_COLOR);
    }

    #[test]
    fn fixed_category_order_and_colors() {
        let fig = PnlFigure::derive(&hist());
        let cats: Vec<&str> = fig.bars.iter().map(|b| b.category).collect();
        assert_eq!(
            cats,
            vec!["Funding", "Lending", "Rewards", "Premium", "LP Fees", "Swap Costs"]
        );
        assert_eq!(fig.bars[0].color, GAIN_COLOR);
        assert_eq!(fig.bars[2].color, GAIN_COLOR); // zero counts as gain
        assert_eq!(fig.bars[3].color, LOSS_COLOR);
        assert_eq!(fig.title, "delta neutral - PnL Breakdown");
        assert_eq!(fig.net_label, "Net PnL: $+892.00");
    }
}
