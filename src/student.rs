//! Student domain record and the per-day attendance sheet.

use crate::types::{Remark, RollNumber, MAX_DAYS};

/// Per-day presence flags for one student over one month.
///
/// The sheet always carries [`MAX_DAYS`] slots; the store's current
/// `days_in_month` only bounds which slots are reachable through the public
/// operations. Narrowing the month therefore hides flags without erasing
/// them, and widening it again exposes the original values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceSheet {
    days: [bool; MAX_DAYS],
}

impl AttendanceSheet {
    /// Fresh sheet with every day absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag for 0-based `day`. Out-of-range writes are ignored
    /// without error.
    pub fn mark(&mut self, day: usize, present: bool) {
        if day < MAX_DAYS {
            self.days[day] = present;
        }
    }

    /// Flag for 0-based `day`; out-of-range reads are absent.
    pub fn is_present(&self, day: usize) -> bool {
        day < MAX_DAYS && self.days[day]
    }

    /// Count of present days among the first `total_days` slots.
    pub fn present_through(&self, total_days: usize) -> usize {
        self.days[..total_days.min(MAX_DAYS)]
            .iter()
            .filter(|p| **p)
            .count()
    }

    /// Packs the sheet into a bitmask, bit `d` set when day `d` is present.
    pub fn to_bits(&self) -> u32 {
        self.days
            .iter()
            .enumerate()
            .fold(0u32, |acc, (d, p)| if *p { acc | 1 << d } else { acc })
    }

    /// Unpacks a bitmask produced by [`AttendanceSheet::to_bits`].
    pub fn from_bits(bits: u32) -> Self {
        let mut sheet = Self::default();
        for (d, slot) in sheet.days.iter_mut().enumerate() {
            *slot = bits & (1 << d) != 0;
        }
        sheet
    }
}

/// Fully materialized, authoritative student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// Roll number, unique within the roster.
    pub roll: RollNumber,
    /// Student name, letters and spaces only.
    pub name: String,
    /// Per-day presence flags for the current month.
    pub attendance: AttendanceSheet,
    /// Qualitative remark.
    pub remark: Remark,
}

impl StudentRecord {
    /// New record with an empty sheet and no remark.
    pub fn new(roll: RollNumber, name: String) -> Self {
        Self {
            roll,
            name,
            attendance: AttendanceSheet::new(),
            remark: Remark::None,
        }
    }

    /// Percentage of the first `total_days` days marked present, 0-100.
    ///
    /// Returns 0 when `total_days` is zero so an unset month can never
    /// divide by zero.
    pub fn attendance_percentage(&self, total_days: usize) -> f64 {
        if total_days == 0 {
            return 0.0;
        }
        self.attendance.present_through(total_days) as f64 / total_days as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_marks_are_ignored() {
        let mut sheet = AttendanceSheet::new();
        sheet.mark(MAX_DAYS, true);
        sheet.mark(40, true);
        assert_eq!(sheet.to_bits(), 0);
        assert!(!sheet.is_present(MAX_DAYS));
    }

    #[test]
    fn percentage_guards_zero_days() {
        let rec = StudentRecord::new(1, "Asha".to_string());
        assert_eq!(rec.attendance_percentage(0), 0.0);
    }

    #[test]
    fn percentage_counts_only_visible_days() {
        let mut rec = StudentRecord::new(1, "Asha".to_string());
        rec.attendance.mark(0, true);
        rec.attendance.mark(29, true);
        // Day 30 (0-based 29) is outside a 28-day view.
        assert!((rec.attendance_percentage(28) - 100.0 / 28.0).abs() < 1e-9);
        assert!((rec.attendance_percentage(30) - 2.0 / 30.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn bitmask_round_trips_every_slot() {
        let mut sheet = AttendanceSheet::new();
        for d in (0..MAX_DAYS).step_by(3) {
            sheet.mark(d, true);
        }
        assert_eq!(AttendanceSheet::from_bits(sheet.to_bits()), sheet);
    }
}
