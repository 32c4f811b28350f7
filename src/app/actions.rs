use log::debug;

use super::{App, CommandAction};
use crate::console::ViewMode;

impl App {
    /// The single source of truth for executing a `CommandAction`.
    pub(crate) fn execute_action(&mut self, action: CommandAction) {
        debug!("Executing action {:?}", action);
        match action {
            CommandAction::ShowConversation => self.show_view(ViewMode::Conversation),
            CommandAction::ShowAdmin => self.show_view(ViewMode::Admin),
            CommandAction::SendMessage => self.submit_draft(),
            CommandAction::ToggleKeyVisibility => self.toggle_keys(),
            CommandAction::AddAgentCard => self.add_agent_card(),
            CommandAction::Quit => self.should_quit = true,
        }
    }

    pub(crate) fn show_view(&mut self, mode: ViewMode) {
        self.session.set_active_view(mode);
        self.status_message = format!("View: {}", mode.label());
    }

    /// Sends the current draft; a blank draft only updates the status bar.
    pub(crate) fn submit_draft(&mut self) {
        if self.session.send_message().is_some() {
            self.status_message = String::from("Message queued for the agent");
        } else {
            self.status_message = String::from("Nothing to send");
        }
    }

    pub(crate) fn toggle_keys(&mut self) {
        let visible = self.session.toggle_key_visibility();
        self.status_message = String::from(if visible { "API keys shown" } else { "API keys hidden" });
    }
}
