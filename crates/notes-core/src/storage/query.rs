//! Filtering, ordering and pagination over decrypted records.
//!
//! Order of operations is fixed:
//!
//! 1. `start_date` / `end_date` against `created_at` (inclusive)
//! 2. `is_task` equality
//! 3. stable sort by `created_at` ascending
//! 4. skip `offset`
//! 5. take `limit` (`0` means no limit)

use super::types::{NoteRecord, Timestamp};

/// Options for listing notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of results; `Some(0)` is treated as unset
    pub limit: Option<usize>,

    /// Number of leading results to skip
    pub offset: Option<usize>,

    /// Start date (inclusive) on `created_at`
    pub start_date: Option<Timestamp>,

    /// End date (inclusive) on `created_at`
    pub end_date: Option<Timestamp>,

    /// Keep only tasks (`true`) or only plain notes (`false`)
    pub is_task: Option<bool>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn start_date(mut self, date: Timestamp) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: Timestamp) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn is_task(mut self, is_task: bool) -> Self {
        self.is_task = Some(is_task);
        self
    }

    /// True if `record` passes the date and task filters.
    pub fn matches(&self, record: &NoteRecord) -> bool {
        if let Some(start) = self.start_date {
            if record.created_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.created_at > end {
                return false;
            }
        }
        if let Some(is_task) = self.is_task {
            if record.is_task() != is_task {
                return false;
            }
        }
        true
    }

    /// Run the full pipeline over `records`.
    pub fn apply(&self, records: Vec<NoteRecord>) -> Vec<NoteRecord> {
        let mut records: Vec<NoteRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();

        sort_by_created(&mut records);

        let offset = self.offset.unwrap_or(0);
        let page = records.into_iter().skip(offset);
        match self.limit {
            Some(limit) if limit > 0 => page.take(limit).collect(),
            _ => page.collect(),
        }
    }
}

/// Stable sort by `created_at` ascending; ties keep their input order.
pub fn sort_by_created(records: &mut [NoteRecord]) {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn ts(value: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn note(id: &str, created: &str, is_task: bool) -> NoteRecord {
        let record = NoteRecord::new(id, id, "", ts(created));
        if is_task {
            record.with_task(None)
        } else {
            record
        }
    }

    fn five_notes() -> Vec<NoteRecord> {
        // Deliberately out of order
        vec![
            note("t3", "2024-01-04T00:00:00+00:00", false),
            note("t0", "2024-01-01T00:00:00+00:00", false),
            note("t4", "2024-01-05T00:00:00+00:00", true),
            note("t1", "2024-01-02T00:00:00+00:00", true),
            note("t2", "2024-01-03T00:00:00+00:00", false),
        ]
    }

    fn ids(records: &[NoteRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_only() {
        let result = ListOptions::new().apply(five_notes());
        assert_eq!(ids(&result), vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_offset_then_limit() {
        let result = ListOptions::new().offset(1).limit(2).apply(five_notes());
        assert_eq!(ids(&result), vec!["t1", "t2"]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let result = ListOptions::new().offset(10).apply(five_notes());
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_limit_returns_everything() {
        let result = ListOptions::new().limit(0).apply(five_notes());
        assert_eq!(result.len(), 5);

        let result = ListOptions::new().offset(2).limit(0).apply(five_notes());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let result = ListOptions::new()
            .start_date(ts("2024-01-02T00:00:00+00:00"))
            .end_date(ts("2024-01-04T00:00:00+00:00"))
            .apply(five_notes());
        assert_eq!(ids(&result), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_date_bounds_compare_instants_across_offsets() {
        // 2024-01-02T02:00+02:00 is exactly t1's created_at
        let result = ListOptions::new()
            .start_date(ts("2024-01-02T02:00:00+02:00"))
            .end_date(ts("2024-01-02T02:00:00+02:00"))
            .apply(five_notes());
        assert_eq!(ids(&result), vec!["t1"]);
    }

    #[test]
    fn test_task_filter() {
        let tasks = ListOptions::new().is_task(true).apply(five_notes());
        assert_eq!(ids(&tasks), vec!["t1", "t4"]);

        let plain = ListOptions::new().is_task(false).apply(five_notes());
        assert_eq!(ids(&plain), vec!["t0", "t2", "t3"]);
    }

    #[test]
    fn test_filters_apply_before_pagination() {
        let result = ListOptions::new()
            .is_task(false)
            .offset(1)
            .limit(1)
            .apply(five_notes());
        assert_eq!(ids(&result), vec!["t2"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let records = vec![
            note("b", "2024-01-01T00:00:00+00:00", false),
            note("a", "2024-01-01T00:00:00+00:00", false),
        ];
        let result = ListOptions::new().apply(records);
        assert_eq!(ids(&result), vec!["b", "a"]);
    }
}
