//! Interaction state of the console.
//!
//! `App` wraps the `SessionView` (which owns all console data) and
//! adds the purely presentational state: the admin cursor, the active overlay,
//! and the status bar message.

use std::path::PathBuf;

use crate::console::{AgentCardField, ProviderField, SessionView};
use crate::definitions::AdminCursor;

/// Everything the event loop and renderer need.
pub struct App {
    /// Set by Ctrl+Q or the palette; the event loop exits after the next draw.
    pub should_quit: bool,
    /// Conversation, providers, agent cards and the view selector.
    pub session: SessionView,
    /// Row and field selection in the admin view.
    pub admin: AdminCursor,
    /// Modal that captures keys while open.
    pub overlay: Option<OverlayState>,
    /// Feedback for the last action.
    pub status_message: String,
    /// The directory the console was started in.
    pub workspace_root: PathBuf,
}

#[derive(Debug, Clone)]
pub enum OverlayState {
    CommandPalette(CommandPaletteState),
    InputPrompt(InputPromptState),
}

/// The record field an input prompt will write to when confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Provider { id: String, field: ProviderField },
    AgentCard { id: String, field: AgentCardField },
}

/// Single-line editor opened from the admin view.
#[derive(Debug, Clone)]
pub struct InputPromptState {
    /// e.g. "OpenAI · Base URL".
    pub title: String,
    /// Starts as the field's current value.
    pub value: String,
    pub placeholder: String,
    /// Where the value goes on confirmation.
    pub target: EditTarget,
    /// Render the value masked (API keys while keys are hidden).
    pub masked: bool,
}

impl InputPromptState {
    pub fn new(
        title: impl Into<String>,
        placeholder: impl Into<String>,
        target: EditTarget,
        initial: impl Into<String>,
        masked: bool,
    ) -> Self {
        Self {
            title: title.into(),
            value: initial.into(),
            placeholder: placeholder.into(),
            target,
            masked,
        }
    }
}

/// Filterable action list behind Ctrl+P.
#[derive(Debug, Clone)]
pub struct CommandPaletteState {
    pub entries: Vec<CommandPaletteEntry>,
    pub filter: String,
    /// Indices into `entries` that match `filter`.
    pub visible: Vec<usize>,
    /// Position within `visible`, not `entries`.
    pub selected: usize,
}

impl CommandPaletteState {
    pub fn new(entries: Vec<CommandPaletteEntry>) -> Self {
        let visible = (0..entries.len()).collect();
        Self {
            entries,
            filter: String::new(),
            visible,
            selected: 0,
        }
    }

    pub fn selected_entry(&self) -> Option<&CommandPaletteEntry> {
        self.visible
            .get(self.selected)
            .and_then(|idx| self.entries.get(*idx))
    }

    /// Wraps at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.visible.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Recomputes `visible` after `filter` changed and keeps the selection in range.
    pub fn update_filter(&mut self) {
        let needle = self.filter.trim().to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| needle.is_empty() || entry.search_text.contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandPaletteEntry {
    pub label: String,
    /// Optional shortcut hint.
    pub detail: Option<String>,
    pub action: CommandAction,
    /// Lowercased label and detail, used for filtering.
    pub(crate) search_text: String,
}

impl CommandPaletteEntry {
    pub fn new(label: impl Into<String>, detail: Option<String>, action: CommandAction) -> Self {
        let label = label.into();
        let mut search_text = label.to_lowercase();
        if let Some(detail) = detail.as_ref() {
            search_text.push(' ');
            search_text.push_str(&detail.to_lowercase());
        }
        Self {
            label,
            detail,
            action,
            search_text,
        }
    }
}

/// Actions reachable from the palette; some also have direct shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    ShowConversation,
    ShowAdmin,
    SendMessage,
    ToggleKeyVisibility,
    AddAgentCard,
    Quit,
}
