//! A2A 代理卡片及其集合。
//!
//! 代理卡片描述一個代理的身分、主要模型、技能與聯絡端點，供代理之間協作使用。
//! 卡片可以新增與逐欄更新，但不能刪除；顯示順序即插入順序。

use log::{info, warn};
use serde::Deserialize;

use super::ids::IdSource;

/// 單一 A2A 代理卡片。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub primary_model: String,
    /// 以逗號分隔的自由格式技能清單。
    #[serde(default)]
    pub skills: String,
    /// 聯絡 URI，例如 `agent://dexter/lead`。
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub enabled: bool,
}

impl AgentCard {
    pub fn text(&self, field: AgentCardField) -> &str {
        match field {
            AgentCardField::Name => &self.name,
            AgentCardField::Description => &self.description,
            AgentCardField::PrimaryModel => &self.primary_model,
            AgentCardField::Skills => &self.skills,
            AgentCardField::Contact => &self.contact,
        }
    }

    /// 將技能字串拆成去除空白、非空的項目。
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .collect()
    }
}

/// 代理卡片上可編輯的文字欄位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCardField {
    Name,
    Description,
    PrimaryModel,
    Skills,
    Contact,
}

impl AgentCardField {
    pub const ALL: [AgentCardField; 5] = [
        Self::Name,
        Self::Description,
        Self::PrimaryModel,
        Self::Skills,
        Self::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgentCardField::Name => "Name",
            AgentCardField::Description => "Description",
            AgentCardField::PrimaryModel => "Primary model",
            AgentCardField::Skills => "Skills",
            AgentCardField::Contact => "Contact URI",
        }
    }
}

/// 代理卡片的部分更新，語意與 [`ProviderPatch`](super::provider::ProviderPatch) 相同。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentCardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub primary_model: Option<String>,
    pub skills: Option<String>,
    pub contact: Option<String>,
    pub enabled: Option<bool>,
}

impl AgentCardPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn primary_model(mut self, model: impl Into<String>) -> Self {
        self.primary_model = Some(model.into());
        self
    }

    pub fn skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn text(field: AgentCardField, value: impl Into<String>) -> Self {
        let patch = Self::default();
        match field {
            AgentCardField::Name => patch.name(value),
            AgentCardField::Description => patch.description(value),
            AgentCardField::PrimaryModel => patch.primary_model(value),
            AgentCardField::Skills => patch.skills(value),
            AgentCardField::Contact => patch.contact(value),
        }
    }

    pub fn touched_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("primary_model", self.primary_model.is_some()),
            ("skills", self.skills.is_some()),
            ("contact", self.contact.is_some()),
            ("enabled", self.enabled.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, touched)| touched.then_some(name))
        .collect()
    }

    fn apply(self, card: &mut AgentCard) {
        if let Some(name) = self.name {
            card.name = name;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(primary_model) = self.primary_model {
            card.primary_model = primary_model;
        }
        if let Some(skills) = self.skills {
            card.skills = skills;
        }
        if let Some(contact) = self.contact {
            card.contact = contact;
        }
        if let Some(enabled) = self.enabled {
            card.enabled = enabled;
        }
    }
}

/// 新增卡片時使用的預設內容。新卡片一律為停用狀態。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentCardTemplate {
    pub name: String,
    pub description: String,
    pub primary_model: String,
    pub skills: String,
    pub contact: String,
}

impl Default for AgentCardTemplate {
    fn default() -> Self {
        Self {
            name: String::from("New Agent"),
            description: String::from("Describe this agent card."),
            primary_model: String::from("gpt-5.2"),
            skills: String::new(),
            contact: String::from("agent://dexter/new"),
        }
    }
}

impl AgentCardTemplate {
    fn instantiate(&self, id: String) -> AgentCard {
        AgentCard {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            primary_model: self.primary_model.clone(),
            skills: self.skills.clone(),
            contact: self.contact.clone(),
            enabled: false,
        }
    }
}

/// 依插入順序保存的代理卡片集合。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AgentCardRegistry {
    cards: Vec<AgentCard>,
    template: AgentCardTemplate,
}

impl AgentCardRegistry {
    pub fn from_seed(cards: Vec<AgentCard>, template: AgentCardTemplate) -> Self {
        Self { cards, template }
    }

    pub fn cards(&self) -> &[AgentCard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&AgentCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// 合併部分更新；找不到識別碼時不做任何事並回傳 `None`。
    pub fn update(&mut self, id: &str, patch: AgentCardPatch) -> Option<&AgentCard> {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            warn!("Ignoring update for unknown agent card: {}", id);
            return None;
        };
        info!("Updating agent card {}: {}", id, patch.touched_fields().join(", "));
        patch.apply(card);
        Some(&*card)
    }

    /// 以預設內容新增一張卡片並附加到集合尾端。
    ///
    /// 若識別碼來源產生了已存在的識別碼（例如與種子資料撞名），會再向來源索取，
    /// 直到取得未使用的識別碼為止。
    pub fn add(&mut self, ids: &mut dyn IdSource) -> &AgentCard {
        let mut id = ids.next_id();
        while self.get(&id).is_some() {
            warn!("Generated agent card id {} already exists, drawing another", id);
            id = ids.next_id();
        }
        info!("Adding agent card {}", id);
        let index = self.cards.len();
        self.cards.push(self.template.instantiate(id));
        &self.cards[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ids::SequentialIds;
    use rstest::{fixture, rstest};
    use std::collections::HashSet;

    #[fixture]
    fn registry() -> AgentCardRegistry {
        AgentCardRegistry::from_seed(
            vec![
                AgentCard {
                    id: String::from("a2a-1"),
                    name: String::from("Dexter Research Lead"),
                    description: String::from("Coordinates research."),
                    primary_model: String::from("gpt-5.2"),
                    skills: String::from("Financial search, SEC filings, valuation summaries"),
                    contact: String::from("agent://dexter/lead"),
                    enabled: true,
                },
                AgentCard {
                    id: String::from("a2a-2"),
                    name: String::from("Market Pulse Scout"),
                    description: String::from("Tracks catalysts."),
                    primary_model: String::from("claude-3.5-sonnet"),
                    skills: String::from("Web search"),
                    contact: String::from("agent://dexter/market"),
                    enabled: false,
                },
            ],
            AgentCardTemplate::default(),
        )
    }

    #[rstest]
    fn add_appends_disabled_default_card(registry: AgentCardRegistry) {
        let mut registry = registry;
        let mut ids = SequentialIds::new("card");

        let card = registry.add(&mut ids).clone();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.cards().last(), Some(&card));
        assert_eq!(card.id, "card-1");
        assert_eq!(card.name, "New Agent");
        assert_eq!(card.description, "Describe this agent card.");
        assert_eq!(card.primary_model, "gpt-5.2");
        assert_eq!(card.skills, "");
        assert_eq!(card.contact, "agent://dexter/new");
        assert!(!card.enabled);
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(20)]
    fn add_n_times_grows_by_n_with_distinct_ids(registry: AgentCardRegistry, #[case] n: usize) {
        let mut registry = registry;
        let mut ids = SequentialIds::new("card");
        for _ in 0..n {
            registry.add(&mut ids);
        }

        assert_eq!(registry.len(), 2 + n);
        let distinct: HashSet<&str> = registry.cards().iter().map(|card| card.id.as_str()).collect();
        assert_eq!(distinct.len(), registry.len());
    }

    #[rstest]
    fn add_skips_ids_that_collide_with_seeds(registry: AgentCardRegistry) {
        let mut registry = registry;
        let mut ids = SequentialIds::new("a2a");

        let card = registry.add(&mut ids);

        assert_eq!(card.id, "a2a-3");
    }

    #[rstest]
    fn update_merges_fields_and_keeps_order(registry: AgentCardRegistry) {
        let mut registry = registry;
        registry.update(
            "a2a-2",
            AgentCardPatch::default().enabled(true).primary_model("claude-4"),
        );

        let ids: Vec<&str> = registry.cards().iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, ["a2a-1", "a2a-2"]);
        let card = registry.get("a2a-2").expect("seeded");
        assert!(card.enabled);
        assert_eq!(card.primary_model, "claude-4");
        assert_eq!(card.name, "Market Pulse Scout");
        assert_eq!(card.contact, "agent://dexter/market");
    }

    #[rstest]
    fn update_unknown_card_is_a_no_op(registry: AgentCardRegistry) {
        let mut updated = registry.clone();
        assert!(updated.update("a2a-9", AgentCardPatch::default().name("ghost")).is_none());
        assert_eq!(updated, registry);
    }

    #[rstest]
    fn skill_list_splits_and_trims(registry: AgentCardRegistry) {
        let card = registry.get("a2a-1").expect("seeded");
        assert_eq!(
            card.skill_list(),
            ["Financial search", "SEC filings", "valuation summaries"]
        );

        let mut blank = card.clone();
        blank.skills = String::from(" , ,");
        assert!(blank.skill_list().is_empty());
    }

    #[rstest]
    fn text_patch_sets_named_field(registry: AgentCardRegistry) {
        let mut registry = registry;
        for field in AgentCardField::ALL {
            let value = format!("new {}", field.label());
            let card = registry
                .update("a2a-1", AgentCardPatch::text(field, value.clone()))
                .expect("seeded");
            assert_eq!(card.text(field), value);
        }
    }
}
