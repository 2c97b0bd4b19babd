//! Asset replacement domain types
//!
//! Defines the upload-then-swap replacement as a state machine with
//! explicit intermediate states.
//!
//! ```text
//! Start -> UploadingNew -> UploadFailed
//!                       -> UploadedTemp -> DeletingOld -> DeleteFailed
//!                                                      -> OldDeleted -> RenamingNew -> RenameFailed
//!                                                                                   -> Done
//! ```
//!
//! When no asset with the target name exists the machine goes straight
//! from `UploadingNew` to `Done` (a plain upload).

use uuid::Uuid;

/// States of an asset replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceState {
    Start,
    UploadingNew,
    /// Upload rejected; remote state untouched
    UploadFailed,
    UploadedTemp,
    DeletingOld,
    /// Two assets exist: the old one and the temp-named upload
    DeleteFailed,
    OldDeleted,
    RenamingNew,
    /// Only the temp-named upload exists
    RenameFailed,
    Done,
}

impl ReplaceState {
    /// Get human-readable name for the state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::UploadingNew => "uploading new asset",
            Self::UploadFailed => "upload failed",
            Self::UploadedTemp => "uploaded under temporary name",
            Self::DeletingOld => "deleting old asset",
            Self::DeleteFailed => "delete of old asset failed",
            Self::OldDeleted => "old asset deleted",
            Self::RenamingNew => "renaming new asset",
            Self::RenameFailed => "rename of new asset failed",
            Self::Done => "done",
        }
    }

    /// Terminal states past the safe point that automation will not repair
    pub fn requires_manual_recovery(&self) -> bool {
        matches!(self, Self::DeleteFailed | Self::RenameFailed)
    }

    /// Follow-up state after the current step succeeds or fails
    ///
    /// Terminal states map to themselves.
    pub fn advance(self, step_succeeded: bool) -> Self {
        match (self, step_succeeded) {
            (Self::Start, _) => Self::UploadingNew,
            (Self::UploadingNew, true) => Self::UploadedTemp,
            (Self::UploadingNew, false) => Self::UploadFailed,
            (Self::UploadedTemp, _) => Self::DeletingOld,
            (Self::DeletingOld, true) => Self::OldDeleted,
            (Self::DeletingOld, false) => Self::DeleteFailed,
            (Self::OldDeleted, _) => Self::RenamingNew,
            (Self::RenamingNew, true) => Self::Done,
            (Self::RenamingNew, false) => Self::RenameFailed,
            (terminal, _) => terminal,
        }
    }
}

/// Collision-improbable temporary name for `name`
pub fn temp_asset_name(name: &str) -> String {
    format!("{}-{}", Uuid::new_v4().simple(), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut state = ReplaceState::Start;
        let mut visited = vec![state];
        while state != ReplaceState::Done {
            state = state.advance(true);
            visited.push(state);
        }
        assert_eq!(
            visited,
            vec![
                ReplaceState::Start,
                ReplaceState::UploadingNew,
                ReplaceState::UploadedTemp,
                ReplaceState::DeletingOld,
                ReplaceState::OldDeleted,
                ReplaceState::RenamingNew,
                ReplaceState::Done,
            ]
        );
    }

    #[test]
    fn test_failure_transitions() {
        assert_eq!(
            ReplaceState::UploadingNew.advance(false),
            ReplaceState::UploadFailed
        );
        assert_eq!(
            ReplaceState::DeletingOld.advance(false),
            ReplaceState::DeleteFailed
        );
        assert_eq!(
            ReplaceState::RenamingNew.advance(false),
            ReplaceState::RenameFailed
        );
        assert_eq!(ReplaceState::Done.advance(false), ReplaceState::Done);
    }

    #[test]
    fn test_manual_recovery_states() {
        assert!(!ReplaceState::UploadFailed.requires_manual_recovery());
        assert!(ReplaceState::DeleteFailed.requires_manual_recovery());
        assert!(ReplaceState::RenameFailed.requires_manual_recovery());
        assert!(!ReplaceState::Done.requires_manual_recovery());
    }

    #[test]
    fn test_temp_asset_name() {
        let a = temp_asset_name("tool.bin");
        let b = temp_asset_name("tool.bin");
        assert!(a.ends_with("-tool.bin"));
        assert_eq!(a.len(), 32 + 1 + "tool.bin".len());
        assert_ne!(a, b);
    }
}
