//! Global command identifiers and the shell interface that toggles them.
//!
//! Each window type declares a fixed set of commands that only make sense
//! while it has focus. The window enables the set on focus and disables it
//! on unfocus through a [`CommandShell`]; it never touches menu state
//! directly.

use std::collections::HashSet;

/// A global command, typically bound to a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Edit > Cut.
    Cut,
    /// Show or hide row labels.
    ViewRowLabels,
    /// Show or hide column labels.
    ViewColumnLabels,
    /// Highlight the selected row.
    ViewHighlightRow,
    /// Highlight the selected column.
    ViewHighlightColumn,
    /// Remove cell borders.
    BorderNone,
    /// Border on every side.
    BorderAll,
    /// Right border.
    BorderRight,
    /// Left border.
    BorderLeft,
    /// Top border.
    BorderTop,
    /// Bottom border.
    BorderBottom,
    /// Double bottom border.
    BorderDoubleBottom,
    /// Thick bottom border.
    BorderThickBottom,
    /// Delete cell, shift left.
    DeleteLeft,
    /// Delete cell, shift up.
    DeleteUp,
    /// Delete row.
    DeleteRow,
    /// Delete column.
    DeleteColumn,
    /// Insert column to the left.
    InsertLeft,
    /// Insert column to the right.
    InsertRight,
    /// Insert row above.
    InsertAbove,
    /// Insert row below.
    InsertBelow,
    /// Narrow the selected column.
    ColumnNarrow,
    /// Widen the selected column.
    ColumnWiden,
    /// Export as CSV.
    FileSaveCsv,
    /// Export as text.
    FileSaveText,
}

/// Commands enabled while a table window has focus.
pub const TABLE_COMMANDS: &[Command] = &[
    Command::Cut,
    Command::ViewRowLabels,
    Command::ViewColumnLabels,
    Command::ViewHighlightRow,
    Command::ViewHighlightColumn,
    Command::BorderNone,
    Command::BorderAll,
    Command::BorderRight,
    Command::BorderLeft,
    Command::BorderTop,
    Command::BorderBottom,
    Command::BorderDoubleBottom,
    Command::BorderThickBottom,
    Command::DeleteLeft,
    Command::DeleteUp,
    Command::DeleteRow,
    Command::DeleteColumn,
    Command::InsertLeft,
    Command::InsertRight,
    Command::InsertAbove,
    Command::InsertBelow,
    Command::ColumnNarrow,
    Command::ColumnWiden,
    Command::FileSaveCsv,
    Command::FileSaveText,
];

/// The application shell's command switchboard.
pub trait CommandShell {
    /// Make a command available.
    fn enable_command(&mut self, command: Command);

    /// Make a command unavailable.
    fn disable_command(&mut self, command: Command);

    /// Enable or disable a whole set.
    fn set_commands(&mut self, commands: &[Command], enabled: bool) {
        for &command in commands {
            if enabled {
                self.enable_command(command);
            } else {
                self.disable_command(command);
            }
        }
    }
}

/// A [`CommandShell`] that records which commands are enabled.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    enabled: HashSet<Command>,
}

impl CommandRegistry {
    /// Nothing enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `command` is enabled.
    pub fn is_enabled(&self, command: Command) -> bool {
        self.enabled.contains(&command)
    }

    /// Number of enabled commands.
    pub fn enabled_count(&self) -> usize {
        self.enabled.len()
    }
}

impl CommandShell for CommandRegistry {
    fn enable_command(&mut self, command: Command) {
        self.enabled.insert(command);
    }

    fn disable_command(&mut self, command: Command) {
        self.enabled.remove(&command);
    }
}
