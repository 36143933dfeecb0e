//! Tool menu actions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A discrete action emitted by the floating tool menu.
///
/// Brush and history actions only apply while drawing; `Save` starts a
/// region-selection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// Switch to the pencil brush preset
    Pencil,
    /// Switch to the eraser brush preset
    Eraser,
    /// Remove the most recent stroke
    Undo,
    /// Remove every stroke
    Clear,
    /// Select a region to export
    Save,
}

impl ToolAction {
    pub const ALL: [ToolAction; 5] = [
        ToolAction::Pencil,
        ToolAction::Eraser,
        ToolAction::Undo,
        ToolAction::Clear,
        ToolAction::Save,
    ];

    /// Menu label, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ToolAction::Pencil => "pencil",
            ToolAction::Eraser => "eraser",
            ToolAction::Undo => "undo",
            ToolAction::Clear => "clear",
            ToolAction::Save => "save",
        }
    }

    /// Whether this action edits the drawing or its brush.
    pub fn is_drawing_action(self) -> bool {
        !matches!(self, ToolAction::Save)
    }
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tool '{0}'")]
pub struct UnknownTool(pub String);

impl FromStr for ToolAction {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTool(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_names_case_insensitively() {
        assert_eq!("Pencil".parse(), Ok(ToolAction::Pencil));
        assert_eq!(" SAVE ".parse(), Ok(ToolAction::Save));
        assert_eq!("undo".parse(), Ok(ToolAction::Undo));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "highlighter".parse::<ToolAction>(),
            Err(UnknownTool("highlighter".to_string()))
        );
    }
}
