use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;
use crate::console::ViewMode;

impl App {
    /// The main entry point for handling keyboard events.
    ///
    /// Overlays capture all input, then global shortcuts, then the active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        if self.handle_global_shortcuts(key) {
            return;
        }

        match self.session.active_view() {
            ViewMode::Conversation => self.handle_conversation_key(key),
            ViewMode::Admin => self.handle_admin_key(key),
        }
    }

    /// Handles global keyboard shortcuts.
    /// Returns `true` if a shortcut was handled, `false` otherwise.
    fn handle_global_shortcuts(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('p') if ctrl => self.open_command_palette(),
            KeyCode::Char('k') if ctrl => self.toggle_keys(),
            KeyCode::F(1) => self.show_view(ViewMode::Conversation),
            KeyCode::F(2) => self.show_view(ViewMode::Admin),
            _ => return false,
        }
        true
    }

    /// Keys for the draft composer in the conversation view.
    fn handle_conversation_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter && !key.modifiers.contains(KeyModifiers::SHIFT) {
            self.submit_draft();
            return;
        }
        let draft = self.session.draft_mut();
        match key.code {
            KeyCode::Enter => draft.insert_newline(),
            KeyCode::Backspace => draft.backspace(),
            KeyCode::Delete => draft.delete(),
            KeyCode::Left => draft.move_left(),
            KeyCode::Right => draft.move_right(),
            KeyCode::Home => draft.move_to_line_start(),
            KeyCode::End => draft.move_to_line_end(),
            KeyCode::Up => {
                draft.history_previous();
            }
            KeyCode::Down => {
                draft.history_next();
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                draft.insert_char(ch);
            }
            _ => {}
        }
    }

    /// Keys for navigating and editing the admin lists.
    fn handle_admin_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_admin_row(-1),
            KeyCode::Down => self.move_admin_row(1),
            KeyCode::Left => self.admin.move_field(-1),
            KeyCode::Right => self.admin.move_field(1),
            KeyCode::Tab | KeyCode::BackTab => self.switch_admin_section(),
            KeyCode::Enter => self.edit_selected_field(),
            KeyCode::Char(' ') => self.toggle_selected_enabled(),
            KeyCode::Char('a') => self.add_agent_card(),
            KeyCode::Char('k') => self.toggle_keys(),
            _ => {}
        }
    }
}
