use hashbrown::HashMap;

use crate::{
    student::StudentRecord,
    types::{days_in_month, Day, Month, RollNumber, DEFAULT_MONTH},
};

/// Failure conditions surfaced by roster operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The roll number is already taken by another record.
    DuplicateKey(RollNumber),
    /// The roster is at its configured capacity.
    CapacityExceeded,
    /// Name is empty or contains a non-letter, non-space character.
    InvalidName,
    /// No record with this roll number exists.
    NotFound(RollNumber),
    /// Day outside `[1, days_in_month]`.
    InvalidDay(Day),
    /// Month outside `[1, 12]`.
    InvalidMonth(Month),
    /// Remark selector outside `[1, 4]`.
    InvalidRemark(u8),
    /// The operation needs at least one record.
    EmptyStore,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(roll) => write!(f, "roll number {roll} already exists"),
            Self::CapacityExceeded => write!(f, "roster capacity reached"),
            Self::InvalidName => write!(f, "name must be non-empty letters and spaces"),
            Self::NotFound(roll) => write!(f, "no student with roll number {roll}"),
            Self::InvalidDay(day) => write!(f, "day {day} outside the current month"),
            Self::InvalidMonth(month) => write!(f, "month {month} outside 1-12"),
            Self::InvalidRemark(sel) => write!(f, "remark selector {sel} outside 1-4"),
            Self::EmptyStore => write!(f, "roster has no students"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Construction-time knobs for [`RosterStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of records the roster accepts.
    pub capacity: usize,
    /// Starting month, 1-12.
    pub month: Month,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            month: DEFAULT_MONTH,
        }
    }
}

/// Portable image of the full roster state, exchanged with persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshotV1 {
    /// Month the roster was tracking.
    pub month: Month,
    /// Derived day count, stored for format parity and re-derived on import.
    pub days_in_month: u8,
    /// Configured record ceiling, so a reload restores the same limit.
    pub capacity: u32,
    /// Records in canonical order.
    pub records: Vec<StudentRecord>,
}

/// In-memory roster of student records keyed by roll number.
///
/// Canonical order is insertion order until one of the sort operations in
/// [`crate::core::query`] reorders it. Every failed operation leaves the
/// roster unchanged.
#[derive(Debug)]
pub struct RosterStore {
    records: Vec<StudentRecord>,
    pos: HashMap<RollNumber, usize>,
    capacity: usize,
    month: Month,
    days: u8,
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterStore {
    /// Empty roster with [`StoreConfig::default`].
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Empty roster with explicit capacity and starting month.
    ///
    /// An out-of-range starting month falls back to [`DEFAULT_MONTH`].
    pub fn with_config(config: StoreConfig) -> Self {
        let month = if (1..=12).contains(&config.month) {
            config.month
        } else {
            DEFAULT_MONTH
        };
        Self {
            records: Vec::new(),
            pos: HashMap::new(),
            capacity: config.capacity,
            month,
            days: days_in_month(month),
        }
    }

    /// Rebuilds a roster from a persisted snapshot, restoring the month and
    /// the configured capacity it was saved with.
    ///
    /// Rejects snapshots that violate store invariants (duplicate rolls,
    /// month out of range, more records than the snapshot's own capacity);
    /// such payloads only arise from corrupt files.
    pub fn from_snapshot(snapshot: RosterSnapshotV1) -> Result<Self, StoreError> {
        if !(1..=12).contains(&snapshot.month) {
            return Err(StoreError::InvalidMonth(snapshot.month));
        }
        let mut store = Self::with_config(StoreConfig {
            month: snapshot.month,
            capacity: snapshot.capacity as usize,
        });
        if snapshot.records.len() > store.capacity {
            return Err(StoreError::CapacityExceeded);
        }
        for rec in snapshot.records {
            if store.pos.contains_key(&rec.roll) {
                return Err(StoreError::DuplicateKey(rec.roll));
            }
            store.pos.insert(rec.roll, store.records.len());
            store.records.push(rec);
        }
        Ok(store)
    }

    /// Full roster state for persistence.
    pub fn export_snapshot(&self) -> RosterSnapshotV1 {
        RosterSnapshotV1 {
            month: self.month,
            days_in_month: self.days,
            capacity: u32::try_from(self.capacity).unwrap_or(u32::MAX),
            records: self.records.clone(),
        }
    }

    /// Appends a new record with an empty sheet and no remark.
    pub fn add_record(&mut self, roll: RollNumber, name: &str) -> Result<(), StoreError> {
        if self.pos.contains_key(&roll) {
            return Err(StoreError::DuplicateKey(roll));
        }
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded);
        }
        if !is_valid_name(name) {
            return Err(StoreError::InvalidName);
        }
        self.pos.insert(roll, self.records.len());
        self.records.push(StudentRecord::new(roll, name.to_string()));
        Ok(())
    }

    /// Overwrites the presence flag for a 1-based `day`. Re-marking the same
    /// state is a no-op.
    pub fn mark_attendance(
        &mut self,
        roll: RollNumber,
        day: Day,
        present: bool,
    ) -> Result<(), StoreError> {
        let idx = self.index_of(roll)?;
        if day < 1 || day > self.days {
            return Err(StoreError::InvalidDay(day));
        }
        self.records[idx].attendance.mark(usize::from(day) - 1, present);
        Ok(())
    }

    /// Replaces a student's name after validation.
    pub fn update_name(&mut self, roll: RollNumber, name: &str) -> Result<(), StoreError> {
        let idx = self.index_of(roll)?;
        if !is_valid_name(name) {
            return Err(StoreError::InvalidName);
        }
        self.records[idx].name = name.to_string();
        Ok(())
    }

    /// Re-keys a record. Re-assigning a record its own roll is allowed;
    /// colliding with a different record is not.
    pub fn update_roll_number(
        &mut self,
        old: RollNumber,
        new: RollNumber,
    ) -> Result<(), StoreError> {
        let idx = self.index_of(old)?;
        if new != old && self.pos.contains_key(&new) {
            return Err(StoreError::DuplicateKey(new));
        }
        self.pos.remove(&old);
        self.pos.insert(new, idx);
        self.records[idx].roll = new;
        Ok(())
    }

    /// Sets a remark through the 1-4 menu selector.
    pub fn update_remark(&mut self, roll: RollNumber, selector: u8) -> Result<(), StoreError> {
        let idx = self.index_of(roll)?;
        let remark = crate::types::Remark::from_selector(selector)
            .ok_or(StoreError::InvalidRemark(selector))?;
        self.records[idx].remark = remark;
        Ok(())
    }

    /// Removes a record, shifting survivors left so relative order holds.
    pub fn delete_record(&mut self, roll: RollNumber) -> Result<(), StoreError> {
        let idx = self.index_of(roll)?;
        self.records.remove(idx);
        self.pos.remove(&roll);
        for rec in &self.records[idx..] {
            if let Some(p) = self.pos.get_mut(&rec.roll) {
                *p -= 1;
            }
        }
        Ok(())
    }

    /// Looks up the record with this roll number.
    pub fn find_by_roll(&self, roll: RollNumber) -> Result<&StudentRecord, StoreError> {
        self.index_of(roll).map(|idx| &self.records[idx])
    }

    /// All records in canonical order.
    pub fn list_all(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Switches the tracked month and re-derives its day count.
    ///
    /// Attendance flags beyond the new day count become unreachable but are
    /// not erased; switching back to a longer month exposes them again.
    pub fn set_month(&mut self, month: Month) -> Result<(), StoreError> {
        if !(1..=12).contains(&month) {
            return Err(StoreError::InvalidMonth(month));
        }
        self.month = month;
        self.days = days_in_month(month);
        Ok(())
    }

    /// Currently tracked month, 1-12.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Day count of the tracked month.
    pub fn days_in_month(&self) -> u8 {
        self.days
    }

    /// Configured record ceiling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records exist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn index_of(&self, roll: RollNumber) -> Result<usize, StoreError> {
        self.pos.get(&roll).copied().ok_or(StoreError::NotFound(roll))
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<StudentRecord> {
        &mut self.records
    }

    pub(crate) fn rebuild_positions(&mut self) {
        self.pos.clear();
        for (idx, rec) in self.records.iter().enumerate() {
            self.pos.insert(rec.roll, idx);
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphabetic() || c == ' ')
}
