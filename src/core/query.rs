use crate::{
    core::store::{RosterStore, StoreError},
    student::StudentRecord,
    types::{Day, RollNumber, ThresholdMode},
};

/// One student's status within a [`DayReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    /// Roll number of the student.
    pub roll: RollNumber,
    /// Student name at report time.
    pub name: String,
    /// True when marked present on the reported day.
    pub present: bool,
}

/// Roster-wide view of a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    /// 1-based day the report covers.
    pub day: Day,
    /// Per-student status in canonical order.
    pub entries: Vec<DayEntry>,
    /// Number of students marked present.
    pub present_count: usize,
    /// Present students over roster size, 0-100; 0 for an empty roster.
    pub percentage: f64,
}

/// Records with the highest and lowest attendance percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceExtremes {
    /// First record attaining the maximum percentage.
    pub max: StudentRecord,
    /// Maximum percentage.
    pub max_percentage: f64,
    /// First record attaining the minimum percentage.
    pub min: StudentRecord,
    /// Minimum percentage.
    pub min_percentage: f64,
}

impl RosterStore {
    /// Present/absent status of every student on a 1-based `day`, with the
    /// roster-wide present count and percentage.
    ///
    /// An empty roster is not an error here; the percentage is defined as
    /// zero rather than dividing by zero.
    pub fn attendance_for_day(&self, day: Day) -> Result<DayReport, StoreError> {
        if day < 1 || day > self.days_in_month() {
            return Err(StoreError::InvalidDay(day));
        }
        let entries: Vec<DayEntry> = self
            .list_all()
            .iter()
            .map(|rec| DayEntry {
                roll: rec.roll,
                name: rec.name.clone(),
                present: rec.attendance.is_present(usize::from(day) - 1),
            })
            .collect();
        let present_count = entries.iter().filter(|e| e.present).count();
        let percentage = if entries.is_empty() {
            0.0
        } else {
            present_count as f64 / entries.len() as f64 * 100.0
        };
        Ok(DayReport {
            day,
            entries,
            present_count,
            percentage,
        })
    }

    /// Mean of per-record attendance percentages over the current month.
    pub fn average_attendance(&self) -> Result<f64, StoreError> {
        if self.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        let days = usize::from(self.days_in_month());
        let total: f64 = self
            .list_all()
            .iter()
            .map(|rec| rec.attendance_percentage(days))
            .sum();
        Ok(total / self.len() as f64)
    }

    /// Records with the maximum and minimum attendance percentage.
    ///
    /// Single forward pass; the running extreme is replaced only on a
    /// strictly greater (or strictly lesser) percentage, so the first
    /// occurrence wins every tie.
    pub fn extreme_attendance(&self) -> Result<AttendanceExtremes, StoreError> {
        let days = usize::from(self.days_in_month());
        let mut iter = self.list_all().iter();
        let first = iter.next().ok_or(StoreError::EmptyStore)?;
        let first_pct = first.attendance_percentage(days);

        let mut max = first;
        let mut max_pct = first_pct;
        let mut min = first;
        let mut min_pct = first_pct;
        for rec in iter {
            let pct = rec.attendance_percentage(days);
            if pct > max_pct {
                max = rec;
                max_pct = pct;
            }
            if pct < min_pct {
                min = rec;
                min_pct = pct;
            }
        }
        Ok(AttendanceExtremes {
            max: max.clone(),
            max_percentage: max_pct,
            min: min.clone(),
            min_percentage: min_pct,
        })
    }

    /// Records whose percentage is strictly above or below `threshold`,
    /// in canonical order. An empty result is a valid outcome.
    pub fn filter_by_threshold(
        &self,
        threshold: f64,
        mode: ThresholdMode,
    ) -> Vec<&StudentRecord> {
        let days = usize::from(self.days_in_month());
        self.list_all()
            .iter()
            .filter(|rec| {
                let pct = rec.attendance_percentage(days);
                match mode {
                    ThresholdMode::Above => pct > threshold,
                    ThresholdMode::Below => pct < threshold,
                }
            })
            .collect()
    }

    /// Records whose percentage lies in `[min, max]` inclusive, in
    /// canonical order.
    pub fn filter_by_range(&self, min: f64, max: f64) -> Vec<&StudentRecord> {
        let days = usize::from(self.days_in_month());
        self.list_all()
            .iter()
            .filter(|rec| {
                let pct = rec.attendance_percentage(days);
                pct >= min && pct <= max
            })
            .collect()
    }

    /// Reorders the canonical order by descending attendance percentage.
    /// Stable, so equal percentages keep their pre-sort order.
    pub fn sort_by_attendance_desc(&mut self) {
        let days = usize::from(self.days_in_month());
        self.records_mut().sort_by(|a, b| {
            b.attendance_percentage(days)
                .total_cmp(&a.attendance_percentage(days))
        });
        self.rebuild_positions();
    }

    /// Reorders the canonical order by lexicographic name, ascending.
    pub fn sort_by_name(&mut self) {
        self.records_mut().sort_by(|a, b| a.name.cmp(&b.name));
        self.rebuild_positions();
    }

    /// Reorders the canonical order by roll number, ascending.
    pub fn sort_by_roll(&mut self) {
        self.records_mut().sort_by_key(|rec| rec.roll);
        self.rebuild_positions();
    }
}
