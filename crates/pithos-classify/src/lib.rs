#![warn(missing_docs)]

//! Volume classification on the Tsetlin scale.
//!
//! The scale is a fixed, ordered table of 20 qualitative volume groups
//! (I through XX) with contiguous, non-overlapping ranges in liters:
//! the end of each group equals the start of the next, spanning 0.024 L
//! to 25 000 L. Each group carries a quality name, one of six mobility
//! classes describing how practical the full vessel is to move, and a
//! short functional description.
//!
//! Lookup scans the table in order and the first entry whose inclusive
//! `[start, end]` range contains the volume wins, so a volume exactly
//! on a shared boundary resolves to the earlier group. Volumes outside
//! the scale clamp to the first or last group with a range annotation.
//! An assignment is *strict* when the volume lies within a quarter of
//! the group's interval from its center; otherwise it is transitional,
//! a flag for the archaeologist rather than a rejection.

use serde::Serialize;

/// Practical transportability of the full vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityClass {
    /// Class 1: under 0.097 L.
    SuperSmall,
    /// Class 2: 0.097 L - 50 L, easily moved by one adult.
    Mobile,
    /// Class 3: 50 L - 200 L, takes at least two people.
    LimitedMobility,
    /// Class 4: 200 L - 800 L, moved rarely and only empty.
    LowMobility,
    /// Class 5: 800 L - 3200 L, movable only when empty.
    ConditionallyMobile,
    /// Class 6: 3200 L - 25 000 L, not intended to move at all.
    Stationary,
}

impl MobilityClass {
    /// Ordinal of the class on the scale, 1 through 6.
    pub fn index(&self) -> u8 {
        match self {
            Self::SuperSmall => 1,
            Self::Mobile => 2,
            Self::LimitedMobility => 3,
            Self::LowMobility => 4,
            Self::ConditionallyMobile => 5,
            Self::Stationary => 6,
        }
    }

    /// Label with the class's volume span.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperSmall => "super-small (under 0.097 L)",
            Self::Mobile => "mobile (0.097 L - 50.0 L)",
            Self::LimitedMobility => "limited-mobility (50.0 L - 200.0 L)",
            Self::LowMobility => "low-mobility (200.0 L - 800.0 L)",
            Self::ConditionallyMobile => "conditionally-mobile (800.0 L - 3200.0 L)",
            Self::Stationary => "stationary (3200.0 L - 25000.0 L)",
        }
    }
}

/// One row of the scale.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationEntry {
    /// Group label, a Roman numeral I through XX.
    pub group: &'static str,
    /// Lower volume bound, liters.
    pub start_l: f64,
    /// Center volume of the group, liters.
    pub center_l: f64,
    /// Upper volume bound, liters.
    pub end_l: f64,
    /// Quality name of the group.
    pub quality: &'static str,
    /// Mobility class the group belongs to.
    pub mobility: MobilityClass,
    /// Functional description.
    pub description: &'static str,
}

impl ClassificationEntry {
    /// Width of the group's volume range, liters.
    pub fn interval(&self) -> f64 {
        self.end_l - self.start_l
    }

    /// Arabic ordinal of the Roman group label (1..=20), or 0 for an
    /// unknown label.
    pub fn ordinal(&self) -> usize {
        match self.group {
            "I" => 1,
            "II" => 2,
            "III" => 3,
            "IV" => 4,
            "V" => 5,
            "VI" => 6,
            "VII" => 7,
            "VIII" => 8,
            "IX" => 9,
            "X" => 10,
            "XI" => 11,
            "XII" => 12,
            "XIII" => 13,
            "XIV" => 14,
            "XV" => 15,
            "XVI" => 16,
            "XVII" => 17,
            "XVIII" => 18,
            "XIX" => 19,
            "XX" => 20,
            _ => 0,
        }
    }
}

const DESC_AROMATICS: &str = "Vessels for storing aromatic substances";
const DESC_ONE_ADULT: &str = "Easily moved by one adult";
const DESC_TWO_PEOPLE: &str = "Require the effort of at least two people";
const DESC_RARELY_MOVED: &str = "Moved only rarely, and only empty";
const DESC_EMPTY_ONLY: &str = "Movable only when unfilled";
const DESC_NEVER_MOVED: &str = "Not intended to be moved at all";

const fn row(
    group: &'static str,
    start_l: f64,
    center_l: f64,
    end_l: f64,
    quality: &'static str,
    mobility: MobilityClass,
    description: &'static str,
) -> ClassificationEntry {
    ClassificationEntry {
        group,
        start_l,
        center_l,
        end_l,
        quality,
        mobility,
        description,
    }
}

use MobilityClass::{
    ConditionallyMobile, LimitedMobility, LowMobility, Mobile, Stationary, SuperSmall,
};

/// The Tsetlin scale: 20 contiguous groups, ascending.
pub static TSETLIN_SCALE: [ClassificationEntry; 20] = [
    row("I", 0.024, 0.035, 0.049, "Super-small 2", SuperSmall, DESC_AROMATICS),
    row("II", 0.049, 0.071, 0.097, "Super-small 1", SuperSmall, DESC_AROMATICS),
    row("III", 0.097, 0.137, 0.194, "Very very small", Mobile, DESC_ONE_ADULT),
    row("IV", 0.194, 0.274, 0.389, "Very small", Mobile, DESC_ONE_ADULT),
    row("V", 0.389, 0.552, 0.782, "Small", Mobile, DESC_ONE_ADULT),
    row("VI", 0.782, 1.105, 1.565, "Small-medium", Mobile, DESC_ONE_ADULT),
    row("VII", 1.565, 2.210, 3.125, "Medium 1", Mobile, DESC_ONE_ADULT),
    row("VIII", 3.125, 4.420, 6.250, "Medium 2", Mobile, DESC_ONE_ADULT),
    row("IX", 6.250, 8.840, 12.500, "Medium 3", Mobile, DESC_ONE_ADULT),
    row("X", 12.500, 17.680, 25.000, "Medium 4", Mobile, DESC_ONE_ADULT),
    row("XI", 25.000, 35.360, 50.0, "Large-medium", Mobile, DESC_ONE_ADULT),
    row("XII", 50.0, 70.7, 100.0, "Large", LimitedMobility, DESC_TWO_PEOPLE),
    row("XIII", 100.0, 141.4, 200.0, "Very large", LimitedMobility, DESC_TWO_PEOPLE),
    row("XIV", 200.0, 282.9, 400.0, "Very very large", LowMobility, DESC_RARELY_MOVED),
    row("XV", 400.0, 565.8, 800.0, "Giant", LowMobility, DESC_RARELY_MOVED),
    row("XVI", 800.0, 1131.5, 1600.0, "Super 1", ConditionallyMobile, DESC_EMPTY_ONLY),
    row("XVII", 1600.0, 2263.0, 3200.0, "Super 2", ConditionallyMobile, DESC_EMPTY_ONLY),
    row("XVIII", 3200.0, 4526.0, 6400.0, "Ultra 1", Stationary, DESC_NEVER_MOVED),
    row("XIX", 6400.0, 9052.0, 12800.0, "Ultra 2", Stationary, DESC_NEVER_MOVED),
    row("XX", 12800.0, 18104.0, 25000.0, "Ultra 3", Stationary, DESC_NEVER_MOVED),
];

/// Where a volume fell relative to the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePosition {
    /// Inside the matched group's range.
    Within,
    /// Below the first group; clamped to it.
    BelowRange,
    /// Above the last group; clamped to it.
    AboveRange,
}

/// A volume's assignment on the scale.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// The matched (or clamped-to) scale entry.
    pub entry: &'static ClassificationEntry,
    /// The classified volume, liters.
    pub volume_l: f64,
    /// Whether the volume lies close to the group center (within a
    /// quarter of the group interval). Always false outside the scale.
    pub strict: bool,
    /// Position relative to the scale.
    pub position: RangePosition,
}

impl Classification {
    /// Quality name with a range annotation when the volume fell
    /// outside the scale.
    pub fn quality_label(&self) -> String {
        match self.position {
            RangePosition::Within => self.entry.quality.to_string(),
            RangePosition::BelowRange => format!("{} (below range)", self.entry.quality),
            RangePosition::AboveRange => format!("{} (above range)", self.entry.quality),
        }
    }
}

/// Classify a volume given in cubic centimeters.
pub fn classify(volume_cm3: f64) -> Classification {
    classify_liters(volume_cm3 / 1000.0)
}

/// Classify a volume given in liters.
pub fn classify_liters(volume_l: f64) -> Classification {
    for entry in &TSETLIN_SCALE {
        if entry.start_l <= volume_l && volume_l <= entry.end_l {
            let strict = (volume_l - entry.center_l).abs() < 0.25 * entry.interval();
            return Classification {
                entry,
                volume_l,
                strict,
                position: RangePosition::Within,
            };
        }
    }

    if volume_l < TSETLIN_SCALE[0].start_l {
        Classification {
            entry: &TSETLIN_SCALE[0],
            volume_l,
            strict: false,
            position: RangePosition::BelowRange,
        }
    } else {
        Classification {
            entry: &TSETLIN_SCALE[TSETLIN_SCALE.len() - 1],
            volume_l,
            strict: false,
            position: RangePosition::AboveRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_contiguous() {
        for pair in TSETLIN_SCALE.windows(2) {
            assert_eq!(
                pair[0].end_l, pair[1].start_l,
                "gap between {} and {}",
                pair[0].group, pair[1].group
            );
        }
    }

    #[test]
    fn test_scale_ordinals() {
        for (i, entry) in TSETLIN_SCALE.iter().enumerate() {
            assert_eq!(entry.ordinal(), i + 1, "{}", entry.group);
            assert!(entry.start_l < entry.center_l && entry.center_l < entry.end_l);
        }
    }

    #[test]
    fn test_boundary_resolves_to_earlier_group() {
        // 0.049 L ends group I and starts group II.
        let c = classify_liters(0.049);
        assert_eq!(c.entry.group, "I");
        assert_eq!(c.position, RangePosition::Within);

        let c = classify_liters(50.0);
        assert_eq!(c.entry.group, "XI");
    }

    #[test]
    fn test_strict_at_center_transitional_at_edges() {
        let center = classify_liters(0.035);
        assert_eq!(center.entry.group, "I");
        assert!(center.strict);

        let at_start = classify_liters(0.024);
        assert!(!at_start.strict);
        let at_end = classify_liters(0.049);
        assert!(!at_end.strict);
    }

    #[test]
    fn test_below_range_clamps_to_first_group() {
        let c = classify_liters(0.001);
        assert_eq!(c.entry.group, "I");
        assert_eq!(c.position, RangePosition::BelowRange);
        assert!(!c.strict);
        assert_eq!(c.quality_label(), "Super-small 2 (below range)");
    }

    #[test]
    fn test_above_range_clamps_to_last_group() {
        let c = classify_liters(30000.0);
        assert_eq!(c.entry.group, "XX");
        assert_eq!(c.position, RangePosition::AboveRange);
        assert!(!c.strict);
    }

    #[test]
    fn test_cubic_centimeter_conversion() {
        // A cylinder of radius 5 cm and height 10 cm holds ~785.4 cm³,
        // i.e. ~0.785 L, which lands in group VI (0.782 - 1.565 L).
        let c = classify(785.4);
        assert_eq!(c.entry.group, "VI");
        assert!((c.volume_l - 0.7854).abs() < 1e-9);
    }

    #[test]
    fn test_mobility_class_counts() {
        let count = |m: MobilityClass| TSETLIN_SCALE.iter().filter(|e| e.mobility == m).count();
        assert_eq!(count(MobilityClass::SuperSmall), 2);
        assert_eq!(count(MobilityClass::Mobile), 9);
        assert_eq!(count(MobilityClass::LimitedMobility), 2);
        assert_eq!(count(MobilityClass::LowMobility), 2);
        assert_eq!(count(MobilityClass::ConditionallyMobile), 2);
        assert_eq!(count(MobilityClass::Stationary), 3);
    }
}
