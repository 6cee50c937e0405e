//! Venue display palette.
//!
//! Maps engine venue identifiers to a legend label and fill color. Unknown
//! venues fall back to a neutral slate and their raw identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default stacking preference: spot / ETH lending first, then perp, then USDC lending.
pub const DEFAULT_STACK_ORDER: [&str; 5] =
    ["buy_eth", "lend_eth", "short_eth", "lend_idle", "lend_usdc"];

/// 24-bit color, parsed from and printed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const NEUTRAL: Rgb = Rgb(0x60, 0x7D, 0x8B);
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{s}' must start with '#'"))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{s}' is not #RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("color '{s}': {e}"))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Legend label and fill color for one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueStyle {
    pub label: String,
    pub color: Rgb,
}

/// Venue id → style lookup with the built-in table plus configured overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    styles: BTreeMap<String, VenueStyle>,
}

impl Default for Palette {
    fn default() -> Self {
        let green = Rgb(0x4C, 0xAF, 0x50);
        let orange = Rgb(0xFF, 0x98, 0x00);
        let purple = Rgb(0x9C, 0x27, 0xB0);
        let builtin = [
            ("buy_eth", "Spot ETH", green),
            ("lend_eth", "ETH Lending", green),
            ("short_eth", "Short Perp", orange),
            ("lend_idle", "USDC Lending", purple),
            ("lend_usdc", "USDC Lending", purple),
        ];
        let styles = builtin
            .into_iter()
            .map(|(id, label, color)| {
                (
                    id.to_string(),
                    VenueStyle {
                        label: label.to_string(),
                        color,
                    },
                )
            })
            .collect();
        Self { styles }
    }
}

impl Palette {
    /// Add or replace a venue style.
    pub fn insert(&mut self, venue_id: impl Into<String>, style: VenueStyle) {
        self.styles.insert(venue_id.into(), style);
    }

    /// Style for a venue; unknown ids get the neutral color and their raw id as label.
    pub fn style_for(&self, venue_id: &str) -> VenueStyle {
        self.styles.get(venue_id).cloned().unwrap_or_else(|| VenueStyle {
            label: venue_id.to_string(),
            color: Rgb::NEUTRAL,
        })
    }
}

/// Order venues for stacking: preferred ids that are present, then the rest in first-seen order.
pub fn ordered_venues<S: AsRef<str>>(venue_ids: &[String], preference: &[S]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(venue_ids.len());
    let preferred = preference
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|p| venue_ids.iter().any(|v| v == p));
    for venue in preferred.chain(venue_ids.iter().map(String::as_str)) {
        if !ordered.iter().any(|o| o == venue) {
            ordered.push(venue.to_string());
        }
    }
    ordered
}
