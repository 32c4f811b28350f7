use log::{info, warn};
use serde::Deserialize;

/// 一個 LLM 供應商的連線設定。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// 唯一且不可變更的識別碼，例如 `openai`。
    pub id: String,
    pub name: String,
    /// 供應商 API 的基底網址。
    pub base_url: String,
    /// API 金鑰；可以為空字串。
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub enabled: bool,
}

impl ProviderConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_url: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_url: base_url.into(),
            api_key: String::new(),
            enabled,
        }
    }

    /// 取得可編輯文字欄位目前的值。
    pub fn text(&self, field: ProviderField) -> &str {
        match field {
            ProviderField::Name => &self.name,
            ProviderField::BaseUrl => &self.base_url,
            ProviderField::ApiKey => &self.api_key,
        }
    }
}

/// 供應商設定中可由管理面板編輯的文字欄位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderField {
    Name,
    BaseUrl,
    ApiKey,
}

impl ProviderField {
    pub const ALL: [ProviderField; 3] = [Self::Name, Self::BaseUrl, Self::ApiKey];

    pub fn label(&self) -> &'static str {
        match self {
            ProviderField::Name => "Name",
            ProviderField::BaseUrl => "Base URL",
            ProviderField::ApiKey => "API Key",
        }
    }
}

/// 供應商設定的部分更新。
///
/// 只有 `Some` 的欄位會被覆寫。這個結構刻意不含 `id`，因此識別碼無法被更新。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderPatch {
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub enabled: Option<bool>,
}

impl ProviderPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// 建立只設定單一文字欄位的更新。
    pub fn text(field: ProviderField, value: impl Into<String>) -> Self {
        let patch = Self::default();
        match field {
            ProviderField::Name => patch.name(value),
            ProviderField::BaseUrl => patch.base_url(value),
            ProviderField::ApiKey => patch.api_key(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.base_url.is_none()
            && self.api_key.is_none()
            && self.enabled.is_none()
    }

    /// 被此更新觸及的欄位名稱，用於日誌（不含欄位值）。
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.base_url.is_some() {
            fields.push("base_url");
        }
        if self.api_key.is_some() {
            fields.push("api_key");
        }
        if self.enabled.is_some() {
            fields.push("enabled");
        }
        fields
    }

    fn apply(self, provider: &mut ProviderConfig) {
        if let Some(name) = self.name {
            provider.name = name;
        }
        if let Some(base_url) = self.base_url {
            provider.base_url = base_url;
        }
        if let Some(api_key) = self.api_key {
            provider.api_key = api_key;
        }
        if let Some(enabled) = self.enabled {
            provider.enabled = enabled;
        }
    }
}

/// 以識別碼為鍵的供應商設定集合，保留種子資料的順序。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<ProviderConfig>,
}

impl ProviderRegistry {
    /// 以種子資料建立集合。識別碼的唯一性由設定載入時檢查。
    pub fn from_seed(providers: Vec<ProviderConfig>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn enabled_count(&self) -> usize {
        self.providers.iter().filter(|provider| provider.enabled).count()
    }

    /// 將部分更新合併到指定的供應商。
    ///
    /// 找不到識別碼時集合保持不變並回傳 `None`。
    pub fn update(&mut self, id: &str, patch: ProviderPatch) -> Option<&ProviderConfig> {
        let Some(provider) = self.providers.iter_mut().find(|provider| provider.id == id) else {
            warn!("Ignoring update for unknown provider: {}", id);
            return None;
        };
        info!("Updating provider {}: {}", id, patch.touched_fields().join(", "));
        patch.apply(provider);
        Some(&*provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> ProviderRegistry {
        ProviderRegistry::from_seed(vec![
            ProviderConfig::new("openai", "OpenAI", "https://api.openai.com", true),
            ProviderConfig::new("anthropic", "Anthropic", "https://api.anthropic.com", false),
            ProviderConfig::new("ollama", "Ollama (Local)", "http://127.0.0.1:11434", false),
        ])
    }

    #[rstest]
    fn disabling_openai_touches_only_that_flag(registry: ProviderRegistry) {
        let mut updated = registry.clone();
        let provider = updated
            .update("openai", ProviderPatch::default().enabled(false))
            .expect("openai is seeded")
            .clone();

        let mut expected = registry.get("openai").cloned().expect("seeded");
        expected.enabled = false;
        assert_eq!(provider, expected);
        assert_eq!(updated.get("anthropic"), registry.get("anthropic"));
        assert_eq!(updated.get("ollama"), registry.get("ollama"));
    }

    #[rstest]
    fn patch_merges_only_present_fields(registry: ProviderRegistry) {
        let mut registry = registry;
        registry.update(
            "anthropic",
            ProviderPatch::default().api_key("sk-ant-test").base_url("https://proxy.local"),
        );

        let provider = registry.get("anthropic").expect("seeded");
        assert_eq!(provider.id, "anthropic");
        assert_eq!(provider.name, "Anthropic");
        assert_eq!(provider.base_url, "https://proxy.local");
        assert_eq!(provider.api_key, "sk-ant-test");
        assert!(!provider.enabled);
    }

    #[rstest]
    fn unknown_id_leaves_registry_unchanged(registry: ProviderRegistry) {
        let mut updated = registry.clone();
        let result = updated.update("mistral", ProviderPatch::default().enabled(true).name("x"));

        assert!(result.is_none());
        assert_eq!(updated, registry);
    }

    #[rstest]
    fn empty_patch_is_identity(registry: ProviderRegistry) {
        let mut updated = registry.clone();
        assert!(ProviderPatch::default().is_empty());
        updated.update("ollama", ProviderPatch::default());
        assert_eq!(updated, registry);
    }

    #[rstest]
    #[case(ProviderField::Name, "OpenAI EU")]
    #[case(ProviderField::BaseUrl, "https://eu.api.openai.com")]
    #[case(ProviderField::ApiKey, "sk-123")]
    fn text_patch_targets_one_field(
        registry: ProviderRegistry,
        #[case] field: ProviderField,
        #[case] value: &str,
    ) {
        let mut registry = registry;
        let provider = registry
            .update("openai", ProviderPatch::text(field, value))
            .expect("openai is seeded");
        assert_eq!(provider.text(field), value);
        for other in ProviderField::ALL.into_iter().filter(|other| *other != field) {
            assert_ne!(provider.text(other), value);
        }
    }

    #[rstest]
    fn enabled_count_follows_toggles(registry: ProviderRegistry) {
        let mut registry = registry;
        assert_eq!(registry.enabled_count(), 1);
        registry.update("ollama", ProviderPatch::default().enabled(true));
        assert_eq!(registry.enabled_count(), 2);
    }
}
