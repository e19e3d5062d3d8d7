//! Two-phase inline edits: the user types a draft, an explicit save sends
//! it, and only the server's answer replaces the displayed value.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit<T> {
    Viewing(T),
    Editing { saved: T, draft: String },
    Saving { saved: T, pending: T },
}

impl<T: Clone + Display> DraftEdit<T> {
    pub fn new(saved: T) -> Self {
        Self::Viewing(saved)
    }

    /// The last server-confirmed value. This is what the table displays,
    /// even while a draft or save is outstanding.
    pub fn saved(&self) -> &T {
        match self {
            Self::Viewing(saved)
            | Self::Editing { saved, .. }
            | Self::Saving { saved, .. } => saved,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving { .. })
    }

    pub fn start_editing(&self) -> Self {
        match self {
            Self::Viewing(saved) => Self::Editing {
                saved: saved.clone(),
                draft: saved.to_string(),
            },
            other => other.clone(),
        }
    }

    pub fn update_draft(&self, input: impl Into<String>) -> Self {
        match self {
            Self::Editing { saved, .. } => Self::Editing {
                saved: saved.clone(),
                draft: input.into(),
            },
            other => other.clone(),
        }
    }

    pub fn cancel(&self) -> Self {
        match self {
            Self::Editing { saved, .. } => Self::Viewing(saved.clone()),
            other => other.clone(),
        }
    }

    /// Parse the draft and move to `Saving`, returning the new state and the
    /// value to send. A draft that fails to parse leaves the state alone.
    pub fn begin_save<E>(
        &self,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Option<Result<(Self, T), E>> {
        let Self::Editing { saved, draft } = self else {
            return None;
        };
        Some(parse(draft.as_str()).map(|pending| {
            (
                Self::Saving {
                    saved: saved.clone(),
                    pending: pending.clone(),
                },
                pending,
            )
        }))
    }

    /// The server accepted the save.
    pub fn confirm(&self, server_value: T) -> Self {
        Self::Viewing(server_value)
    }

    /// The save failed; reopen the editor with what the user had typed.
    pub fn fail(&self) -> Self {
        match self {
            Self::Saving { saved, pending } => Self::Editing {
                saved: saved.clone(),
                draft: pending.to_string(),
            },
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::parse_count;

    #[test]
    fn display_value_only_changes_on_confirm() {
        let view = DraftEdit::new(3u32);
        let editing = view.start_editing();
        assert_eq!(editing.draft(), Some("3"));

        let editing = editing.update_draft("5");
        assert_eq!(*editing.saved(), 3);

        let (saving, pending) = editing
            .begin_save(|s| parse_count("Spins", s))
            .unwrap()
            .unwrap();
        assert_eq!(pending, 5);
        assert!(saving.is_saving());
        assert_eq!(*saving.saved(), 3);

        let confirmed = saving.confirm(5);
        assert_eq!(confirmed, DraftEdit::Viewing(5));
    }

    #[test]
    fn failed_save_reopens_with_typed_value() {
        let saving = DraftEdit::new(3u32)
            .start_editing()
            .update_draft("9")
            .begin_save(|s| parse_count("Spins", s))
            .unwrap()
            .unwrap()
            .0;
        let reopened = saving.fail();
        assert_eq!(reopened.draft(), Some("9"));
        assert_eq!(*reopened.saved(), 3);
    }

    #[test]
    fn unparseable_draft_stays_editing() {
        let editing = DraftEdit::new(3u32).start_editing().update_draft("x");
        assert!(
            editing
                .begin_save(|s| parse_count("Spins", s))
                .unwrap()
                .is_err()
        );
        assert!(editing.is_editing());
        assert_eq!(editing.cancel(), DraftEdit::Viewing(3));
    }

    #[test]
    fn save_requires_an_open_editor() {
        let view = DraftEdit::new(1u32);
        assert!(view.begin_save(|s| parse_count("Spins", s)).is_none());
    }
}
