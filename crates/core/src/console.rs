//! Capabilities the turn loop consumes from its host environment.
//!
//! The loop never talks to a terminal directly. It renders through
//! [`Console::line`], asks for one selection per turn through
//! [`Console::choose`], confirms the exit through [`Console::confirm`],
//! and paces itself through [`Console::pause`]. The terminal frontend
//! implements this trait over ratatui; tests implement it over a script.

use std::time::Duration;

use anyhow::Result;

use crate::models::Location;

/// Semantic emphasis for a rendered line. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Plain narration.
    Info,
    /// Highlighted headings, e.g. a ship offered for sale.
    Accent,
    /// De-emphasized flavor text.
    Muted,
    /// A successful purchase.
    Success,
    /// Costs the player should keep an eye on.
    Warning,
    /// A rejected purchase.
    Error,
}

/// What a menu selection means, resolved once per turn.
///
/// Selections carry their meaning directly instead of being re-matched as
/// strings after the fact, so a ship name can never be confused with a
/// navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Move the player to another location.
    Navigate(Location),
    /// Buy the named ship from the catalog.
    Purchase(String),
    /// Ask to end the session (subject to confirmation).
    ExitGame,
}

/// One selectable menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Label shown to the player, unique within its menu.
    pub label: String,
    /// Meaning of selecting this row.
    pub action: MenuAction,
}

impl MenuEntry {
    /// Build an entry from a label and its action.
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// An ordered, non-empty choice menu presented for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// Question shown above the entries.
    pub prompt: String,
    /// The selectable rows, in display order.
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    /// Build a menu from a prompt and its entries.
    pub fn new(prompt: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            prompt: prompt.into(),
            entries,
        }
    }
}

/// The three environment capabilities the loop depends on.
///
/// Failures are environment failures (a broken terminal, a closed input
/// channel); the loop propagates them and the process ends. There is no
/// in-game recovery path for them.
#[allow(async_fn_in_trait)]
pub trait Console {
    /// Render one line of text with the given emphasis.
    fn line(&mut self, style: TextStyle, text: &str) -> Result<()>;

    /// Present the menu and block until the player selects exactly one
    /// entry; returns that entry's action.
    async fn choose(&mut self, menu: &Menu) -> Result<MenuAction>;

    /// Ask a yes/no question and block until the player answers.
    async fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Suspend for the given duration.
    async fn pause(&mut self, delay: Duration);
}
