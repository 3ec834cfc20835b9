//! Inline rename state machine.

/// Result of committing the rename input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Not editing; nothing happened
    Idle,
    /// Edit mode exited without a name change (blank input)
    Discarded,
    /// Edit mode exited; the store should rename the field
    Rename(String),
}

/// Edit-mode flag and in-progress rename text of one row.
///
/// `pending_name` is only authoritative while `editing` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEditState {
    editing: bool,
    pending_name: String,
}

impl RowEditState {
    /// Creates the state at mount, seeded with the field's name.
    pub fn new(field_name: &str) -> Self {
        Self {
            editing: false,
            pending_name: field_name.to_string(),
        }
    }

    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    /// Enters edit mode, snapshotting the current field name.
    ///
    /// Returns true if edit mode was entered. Read-only diagrams and rows
    /// already in edit mode are left untouched.
    pub fn enter(&mut self, read_only: bool, current_name: &str) -> bool {
        if read_only || self.editing {
            return false;
        }
        self.editing = true;
        self.pending_name = current_name.to_string();
        true
    }

    /// Replaces the pending name verbatim. Ignored outside edit mode.
    pub fn set_pending(&mut self, text: &str) -> bool {
        if !self.editing {
            return false;
        }
        text.clone_into(&mut self.pending_name);
        true
    }

    /// Exits edit mode, proposing the trimmed pending name if it is not blank.
    pub fn commit(&mut self) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Idle;
        }
        self.editing = false;
        let trimmed = self.pending_name.trim();
        if trimmed.is_empty() {
            CommitOutcome::Discarded
        } else {
            CommitOutcome::Rename(trimmed.to_string())
        }
    }

    /// Exits edit mode and discards typed text in favour of the current name.
    pub fn abort(&mut self, current_name: &str) {
        self.editing = false;
        self.pending_name = current_name.to_string();
    }
}
