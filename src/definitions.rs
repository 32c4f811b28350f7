use crate::console::{AgentCardField, ProviderField};

/// The two lists shown side by side in the admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSection {
    #[default]
    Providers,
    AgentCards,
}

impl AdminSection {
    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::Providers => "LLM Providers",
            AdminSection::AgentCards => "A2A Agent Cards",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            AdminSection::Providers => AdminSection::AgentCards,
            AdminSection::AgentCards => AdminSection::Providers,
        }
    }

    /// Number of editable text fields on one row of this section.
    pub fn field_count(&self) -> usize {
        match self {
            AdminSection::Providers => ProviderField::ALL.len(),
            AdminSection::AgentCards => AgentCardField::ALL.len(),
        }
    }
}

/// Selection state inside the admin view.
///
/// Row indices are kept per section so switching back and forth returns to the
/// same row. The field index is shared and clamped to the active section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminCursor {
    pub section: AdminSection,
    pub provider_row: usize,
    pub card_row: usize,
    pub field: usize,
}

impl AdminCursor {
    pub fn row(&self) -> usize {
        match self.section {
            AdminSection::Providers => self.provider_row,
            AdminSection::AgentCards => self.card_row,
        }
    }

    /// Moves the active row by `delta`, staying inside `0..len`.
    pub fn move_row(&mut self, delta: isize, len: usize) {
        let row = match self.section {
            AdminSection::Providers => &mut self.provider_row,
            AdminSection::AgentCards => &mut self.card_row,
        };
        if len == 0 {
            *row = 0;
            return;
        }
        let next = (*row as isize + delta).clamp(0, len as isize - 1);
        *row = next as usize;
    }

    /// Moves the field cursor, wrapping around the section's fields.
    pub fn move_field(&mut self, delta: isize) {
        let len = self.section.field_count() as isize;
        self.field = (self.field as isize + delta).rem_euclid(len) as usize;
    }

    pub fn switch_section(&mut self) {
        self.section = self.section.other();
        self.field = self.field.min(self.section.field_count() - 1);
    }

    pub fn select_card(&mut self, row: usize) {
        self.section = AdminSection::AgentCards;
        self.card_row = row;
        self.field = 0;
    }

    pub fn provider_field(&self) -> ProviderField {
        ProviderField::ALL[self.field.min(ProviderField::ALL.len() - 1)]
    }

    pub fn card_field(&self) -> AgentCardField {
        AgentCardField::ALL[self.field.min(AgentCardField::ALL.len() - 1)]
    }
}
