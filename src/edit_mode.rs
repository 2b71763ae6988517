//! Edit mode tracking for the interactive field.

/// The current editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Characters are inserted at the cursor position.
    #[default]
    Insert,
    /// Characters overtype (replace) at the cursor position.
    Overtype,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Insert => EditMode::Overtype,
            EditMode::Overtype => EditMode::Insert,
        }
    }

    /// Short status-line label.
    pub fn label(self) -> &'static str {
        match self {
            EditMode::Insert => "INS",
            EditMode::Overtype => "OVR",
        }
    }
}
