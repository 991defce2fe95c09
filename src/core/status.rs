//! Classifies readings into the tiers shown on the dashboard.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Below this percentage the soil is dry.
pub const DRY_BELOW_PERCENT: u8 = 20;

/// Above this percentage the soil is wet.
pub const WET_ABOVE_PERCENT: u8 = 80;

/// Soil moisture severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoistureTier {
    Dry,
    Normal,
    Wet,
}

impl MoistureTier {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            _ if percent < DRY_BELOW_PERCENT => Self::Dry,
            _ if percent > WET_ABOVE_PERCENT => Self::Wet,
            _ => Self::Normal,
        }
    }

    /// Full status text, e.g. for the alert.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dry => "DRY - Water needed!",
            Self::Normal => "NORMAL - Moisture OK",
            Self::Wet => "WET - Optimal moisture",
        }
    }

    /// The part of the label before the dash, used in badges.
    pub fn short_label(self) -> &'static str {
        self.label().split(" - ").next().unwrap_or_default()
    }

    /// Badge variant name as the API clients know it.
    pub fn variant(self) -> &'static str {
        match self {
            Self::Dry => "destructive",
            Self::Normal => "secondary",
            Self::Wet => "default",
        }
    }

    /// Returns a [color class](https://bulma.io/documentation/helpers/color-helpers/) for the tier.
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Dry => "is-danger",
            Self::Normal => "is-warning",
            Self::Wet => "is-success",
        }
    }
}

/// Qualitative radio signal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalStrength {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl SignalStrength {
    /// Buckets an RSSI value in dBm.
    ///
    /// All the thresholds are strict, so `-67` is `Fair` even though
    /// `-67 dBm` is the commonly quoted "good" limit.
    pub fn from_rssi(rssi: i16) -> Self {
        match rssi {
            _ if rssi > -30 => Self::Excellent,
            _ if rssi > -67 => Self::Good,
            _ if rssi > -70 => Self::Fair,
            _ => Self::Weak,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Weak => "Weak",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            Self::Excellent | Self::Good => "is-success",
            Self::Fair => "is-warning",
            Self::Weak => "is-danger",
        }
    }
}

impl Display for SignalStrength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_below_twenty() {
        assert_eq!(MoistureTier::from_percent(0), MoistureTier::Dry);
        assert_eq!(MoistureTier::from_percent(19), MoistureTier::Dry);
    }

    #[test]
    fn boundaries_are_normal() {
        assert_eq!(MoistureTier::from_percent(20), MoistureTier::Normal);
        assert_eq!(MoistureTier::from_percent(45), MoistureTier::Normal);
        assert_eq!(MoistureTier::from_percent(80), MoistureTier::Normal);
    }

    #[test]
    fn wet_above_eighty() {
        assert_eq!(MoistureTier::from_percent(81), MoistureTier::Wet);
        assert_eq!(MoistureTier::from_percent(100), MoistureTier::Wet);
    }

    #[test]
    fn labels() {
        assert_eq!(MoistureTier::from_percent(45).label(), "NORMAL - Moisture OK");
        assert_eq!(MoistureTier::Dry.label(), "DRY - Water needed!");
        assert_eq!(MoistureTier::Wet.short_label(), "WET");
        assert_eq!(MoistureTier::Dry.variant(), "destructive");
        assert_eq!(MoistureTier::Normal.variant(), "secondary");
        assert_eq!(MoistureTier::Wet.variant(), "default");
    }

    #[test]
    fn signal_strength() {
        assert_eq!(SignalStrength::from_rssi(-20), SignalStrength::Excellent);
        assert_eq!(SignalStrength::from_rssi(-30), SignalStrength::Good);
        assert_eq!(SignalStrength::from_rssi(-66), SignalStrength::Good);
        assert_eq!(SignalStrength::from_rssi(-69), SignalStrength::Fair);
        assert_eq!(SignalStrength::from_rssi(-70), SignalStrength::Weak);
        assert_eq!(SignalStrength::from_rssi(-120), SignalStrength::Weak);
    }

    /// The sample reading shows `-67 dBm`, which the strict threshold labels `Fair`.
    #[test]
    fn minus_sixty_seven_is_fair() {
        assert_eq!(SignalStrength::from_rssi(-67), SignalStrength::Fair);
        assert_eq!(SignalStrength::from_rssi(-67).to_string(), "Fair");
    }
}
