//! Shared primitive types, remark buckets, and the month-length table.

/// Student roll number, the roster's primary key.
pub type RollNumber = u32;
/// 1-based day-of-month as supplied by callers.
pub type Day = u8;
/// Calendar month number, 1 through 12.
pub type Month = u8;

/// Widest possible month; every attendance sheet carries this many slots.
pub const MAX_DAYS: usize = 31;
/// Month assumed when no persisted state exists.
pub const DEFAULT_MONTH: Month = 5;

/// Qualitative remark attached to a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Remark {
    /// No remark recorded yet.
    #[default]
    None,
    /// Poor attendance or conduct.
    Poor,
    /// Average attendance or conduct.
    Average,
    /// Good attendance or conduct.
    Good,
    /// Excellent attendance or conduct.
    Excellent,
}

impl Remark {
    /// Maps the 1-4 menu selector to a remark.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::Poor),
            2 => Some(Self::Average),
            3 => Some(Self::Good),
            4 => Some(Self::Excellent),
            _ => None,
        }
    }

    /// Canonical display string; [`Remark::None`] is the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Poor => "Poor",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// Direction of a strict attendance-percentage threshold filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdMode {
    /// Keep records strictly above the threshold.
    Above,
    /// Keep records strictly below the threshold.
    Below,
}

/// Day count for `month`, February fixed at 28 (leap years ignored).
pub fn days_in_month(month: Month) -> u8 {
    match month {
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_table_matches_simplified_calendar() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (idx, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(idx as Month + 1), *days);
        }
    }

    #[test]
    fn selector_maps_all_four_remarks() {
        assert_eq!(Remark::from_selector(1), Some(Remark::Poor));
        assert_eq!(Remark::from_selector(2), Some(Remark::Average));
        assert_eq!(Remark::from_selector(3), Some(Remark::Good));
        assert_eq!(Remark::from_selector(4), Some(Remark::Excellent));
        assert_eq!(Remark::from_selector(0), None);
        assert_eq!(Remark::from_selector(5), None);
    }
}
