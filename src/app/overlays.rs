use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};

use super::{
    App, CommandAction, CommandPaletteEntry, CommandPaletteState, InputPromptState, OverlayState,
};
use crate::console::ViewMode;

// Implementation block for overlay-related logic in the App.
impl App {
    /// Generates the list of entries for the command palette.
    ///
    /// Labels reflect the current state, e.g. "Show API Keys" vs "Hide API Keys".
    pub(crate) fn command_palette_entries(&self) -> Vec<CommandPaletteEntry> {
        let mut entries = Vec::new();
        entries.push(CommandPaletteEntry::new(
            "Show Conversations",
            Some(String::from("F1")),
            CommandAction::ShowConversation,
        ));
        entries.push(CommandPaletteEntry::new(
            "Show Admin",
            Some(String::from("F2")),
            CommandAction::ShowAdmin,
        ));
        if self.session.active_view() == ViewMode::Conversation {
            entries.push(CommandPaletteEntry::new(
                "Send Message",
                Some(String::from("Enter")),
                CommandAction::SendMessage,
            ));
        }
        entries.push(CommandPaletteEntry::new(
            if self.session.keys_visible() {
                "Hide API Keys"
            } else {
                "Show API Keys"
            },
            Some(String::from("Ctrl+K")),
            CommandAction::ToggleKeyVisibility,
        ));
        entries.push(CommandPaletteEntry::new(
            "Add Agent Card",
            Some(String::from("a")),
            CommandAction::AddAgentCard,
        ));
        entries.push(CommandPaletteEntry::new(
            "Quit",
            Some(String::from("Ctrl+Q")),
            CommandAction::Quit,
        ));
        entries
    }

    /// Opens the command palette overlay.
    pub(crate) fn open_command_palette(&mut self) {
        let entries = self.command_palette_entries();
        self.overlay = Some(OverlayState::CommandPalette(CommandPaletteState::new(entries)));
        self.status_message = String::from("Command Palette: type to filter");
        info!("Opened command palette");
    }

    /// Closes any active overlay.
    pub(crate) fn close_overlay(&mut self) {
        self.overlay = None;
        debug!("Closed overlay");
    }

    pub(crate) fn handle_overlay_key(&mut self, key: KeyEvent) {
        // Take the overlay out so handlers can borrow `self` freely.
        match self.overlay.take() {
            Some(OverlayState::CommandPalette(state)) => self.handle_command_palette_key(key, state),
            Some(OverlayState::InputPrompt(state)) => self.handle_input_prompt_key(key, state),
            None => {}
        }
    }

    fn handle_command_palette_key(&mut self, key: KeyEvent, mut state: CommandPaletteState) {
        let mut close = false;
        let mut action = None;
        match key.code {
            KeyCode::Esc => close = true,
            KeyCode::Up | KeyCode::BackTab => state.move_selection(-1),
            KeyCode::Down | KeyCode::Tab => state.move_selection(1),
            KeyCode::Backspace => {
                state.filter.pop();
                state.update_filter();
            }
            KeyCode::Char(ch) if !has_command_modifier(key) => {
                state.filter.push(ch);
                state.update_filter();
            }
            KeyCode::Enter => action = state.selected_entry().map(|entry| entry.action),
            _ => {}
        }
        if let Some(entry) = state.selected_entry() {
            self.status_message = format!("Command: {}", entry.label);
        } else if state.visible.is_empty() {
            self.status_message = String::from("Command: No matches");
        }

        if let Some(action) = action {
            self.close_overlay();
            self.execute_action(action);
        } else if close {
            self.close_overlay();
        } else {
            self.overlay = Some(OverlayState::CommandPalette(state));
        }
    }

    fn handle_input_prompt_key(&mut self, key: KeyEvent, mut state: InputPromptState) {
        match key.code {
            KeyCode::Esc => {
                self.close_overlay();
                self.status_message = format!("{}: cancelled", state.title);
            }
            KeyCode::Enter => {
                self.close_overlay();
                self.apply_edit(state.target, state.value);
            }
            KeyCode::Backspace => {
                state.value.pop();
                self.overlay = Some(OverlayState::InputPrompt(state));
            }
            KeyCode::Char(ch) if !has_command_modifier(key) => {
                state.value.push(ch);
                self.overlay = Some(OverlayState::InputPrompt(state));
            }
            _ => self.overlay = Some(OverlayState::InputPrompt(state)),
        }
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
}
