use log::debug;

use super::{App, EditTarget, InputPromptState, OverlayState};
use crate::console::{AgentCardPatch, ProviderField, ProviderPatch};
use crate::definitions::AdminSection;

// Implementation block for admin-view logic in the App.
impl App {
    fn active_row_count(&self) -> usize {
        match self.admin.section {
            AdminSection::Providers => self.session.providers().len(),
            AdminSection::AgentCards => self.session.agent_cards().len(),
        }
    }

    pub(crate) fn move_admin_row(&mut self, delta: isize) {
        let len = self.active_row_count();
        self.admin.move_row(delta, len);
    }

    pub(crate) fn switch_admin_section(&mut self) {
        self.admin.switch_section();
        self.status_message = format!("Editing: {}", self.admin.section.label());
    }

    /// Flips the enabled flag of the selected provider or agent card.
    pub(crate) fn toggle_selected_enabled(&mut self) {
        let row = self.admin.row();
        match self.admin.section {
            AdminSection::Providers => {
                let Some((id, enabled)) = self
                    .session
                    .providers()
                    .get(row)
                    .map(|provider| (provider.id.clone(), provider.enabled))
                else {
                    return;
                };
                if let Some(provider) = self
                    .session
                    .update_provider(&id, ProviderPatch::default().enabled(!enabled))
                {
                    self.status_message = format!(
                        "{} {}",
                        provider.name,
                        if provider.enabled { "enabled" } else { "disabled" }
                    );
                }
            }
            AdminSection::AgentCards => {
                let Some((id, enabled)) = self
                    .session
                    .agent_cards()
                    .get(row)
                    .map(|card| (card.id.clone(), card.enabled))
                else {
                    return;
                };
                if let Some(card) = self
                    .session
                    .update_agent_card(&id, AgentCardPatch::default().enabled(!enabled))
                {
                    self.status_message = format!(
                        "{} is {}",
                        card.name,
                        if card.enabled { "live" } else { "offline" }
                    );
                }
            }
        }
    }

    /// Appends a default agent card and moves the cursor onto it.
    pub(crate) fn add_agent_card(&mut self) {
        let name = self.session.add_agent_card().name.clone();
        let row = self.session.agent_cards().len() - 1;
        self.admin.select_card(row);
        self.status_message = format!("Added agent card: {}", name);
    }

    /// Opens an input prompt for the field under the admin cursor.
    pub(crate) fn edit_selected_field(&mut self) {
        let row = self.admin.row();
        let prompt = match self.admin.section {
            AdminSection::Providers => {
                let field = self.admin.provider_field();
                self.session.providers().get(row).map(|provider| {
                    InputPromptState::new(
                        format!("{} · {}", provider.name, field.label()),
                        match field {
                            ProviderField::Name => "Display name",
                            ProviderField::BaseUrl => "https://...",
                            ProviderField::ApiKey => "sk-...",
                        },
                        EditTarget::Provider {
                            id: provider.id.clone(),
                            field,
                        },
                        provider.text(field),
                        field == ProviderField::ApiKey && !self.session.keys_visible(),
                    )
                })
            }
            AdminSection::AgentCards => {
                let field = self.admin.card_field();
                self.session.agent_cards().get(row).map(|card| {
                    InputPromptState::new(
                        format!("{} · {}", card.name, field.label()),
                        field.label(),
                        EditTarget::AgentCard {
                            id: card.id.clone(),
                            field,
                        },
                        card.text(field),
                        false,
                    )
                })
            }
        };
        if let Some(prompt) = prompt {
            debug!("Showing input prompt: {}", prompt.title);
            self.status_message = format!("{}: waiting for input", prompt.title);
            self.overlay = Some(OverlayState::InputPrompt(prompt));
        }
    }

    /// Writes a confirmed prompt value into the targeted record.
    pub(crate) fn apply_edit(&mut self, target: EditTarget, value: String) {
        match target {
            EditTarget::Provider { id, field } => {
                if self.session.update_provider(&id, ProviderPatch::text(field, value)).is_some() {
                    self.status_message = format!("Updated {} of {}", field.label(), id);
                } else {
                    self.status_message = format!("Provider {} no longer exists", id);
                }
            }
            EditTarget::AgentCard { id, field } => {
                if self.session.update_agent_card(&id, AgentCardPatch::text(field, value)).is_some() {
                    self.status_message = format!("Updated {} of {}", field.label(), id);
                } else {
                    self.status_message = format!("Agent card {} no longer exists", id);
                }
            }
        }
    }
}
