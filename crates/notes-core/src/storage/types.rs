//! Core data types for the storage layer.
//!
//! Records are plain Rust values; the stored JSON shape lives in `codec`.

use chrono::{DateTime, FixedOffset, Utc};

/// Timezone-aware timestamp. The original offset is preserved on disk.
pub type Timestamp = DateTime<FixedOffset>;

/// A note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    /// Unique identifier, also the filename stem
    pub id: String,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,

    /// When this note was created (caller-supplied)
    pub created_at: Timestamp,

    /// When this note was last updated (caller-supplied)
    pub updated_at: Timestamp,

    /// Editor divider position
    pub divider_position: i64,

    /// Plain note or task
    pub kind: NoteKind,
}

/// Whether a note is a plain note or a task.
///
/// Task metadata is independent of the task flag: a plain note may still hold
/// metadata (for example after being switched back from a task by another
/// client), and it is written back unchanged. A task saved without metadata
/// stays a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteKind {
    Plain { metadata: Option<TaskMetadata> },
    Task { metadata: Option<TaskMetadata> },
}

impl Default for NoteKind {
    fn default() -> Self {
        NoteKind::plain()
    }
}

impl NoteKind {
    /// A plain note without metadata.
    pub fn plain() -> Self {
        NoteKind::Plain { metadata: None }
    }

    pub fn metadata(&self) -> Option<&TaskMetadata> {
        match self {
            NoteKind::Plain { metadata } | NoteKind::Task { metadata } => metadata.as_ref(),
        }
    }

    pub fn into_metadata(self) -> Option<TaskMetadata> {
        match self {
            NoteKind::Plain { metadata } | NoteKind::Task { metadata } => metadata,
        }
    }
}

/// Task details attached to task notes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskMetadata {
    /// Priority (caller-defined scale)
    pub priority: i64,

    /// Tags in caller order; duplicates are kept
    pub tags: Vec<String>,

    /// Optional due date
    pub due_date: Option<Timestamp>,

    /// Completion flag
    pub completed: bool,

    /// When the task was completed
    pub completed_at: Option<Timestamp>,
}

impl NoteRecord {
    /// Create a plain note with `updated_at` equal to `created_at`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at: created_at,
            divider_position: 0,
            kind: NoteKind::plain(),
        }
    }

    pub fn with_updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn with_divider_position(mut self, divider_position: i64) -> Self {
        self.divider_position = divider_position;
        self
    }

    /// Turn this note into a task.
    pub fn with_task(mut self, metadata: Option<TaskMetadata>) -> Self {
        self.kind = NoteKind::Task { metadata };
        self
    }

    pub fn is_task(&self) -> bool {
        matches!(self.kind, NoteKind::Task { .. })
    }

    /// Task metadata, whether or not the note is currently a task.
    pub fn task_metadata(&self) -> Option<&TaskMetadata> {
        self.kind.metadata()
    }
}

impl TaskMetadata {
    pub fn new(priority: i64) -> Self {
        Self {
            priority,
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Mark completed at `completed_at`.
    pub fn completed_at(mut self, completed_at: Timestamp) -> Self {
        self.completed = true;
        self.completed_at = Some(completed_at);
        self
    }
}

/// Partial update for an existing note.
///
/// The store always overwrites whole records; callers merge with a patch
/// before saving.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated_at: Option<Timestamp>,
    pub divider_position: Option<i64>,
    pub kind: Option<NoteKind>,
}

impl NotePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn divider_position(mut self, divider_position: i64) -> Self {
        self.divider_position = Some(divider_position);
        self
    }

    pub fn kind(mut self, kind: NoteKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// True if the patch sets no field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.updated_at.is_none()
            && self.divider_position.is_none()
            && self.kind.is_none()
    }

    /// Apply to `record`, stamping `updated_at` with the current time when unset.
    pub fn apply_to(self, record: &mut NoteRecord) {
        let now = Utc::now().fixed_offset();
        self.apply_at(record, now);
    }

    /// Apply to `record`, using `now` when `updated_at` is unset.
    pub fn apply_at(self, record: &mut NoteRecord, now: Timestamp) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(divider_position) = self.divider_position {
            record.divider_position = divider_position;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        record.updated_at = self.updated_at.unwrap_or(now);
    }
}
