//! 主控台設定與種子資料。
//!
//! 設定通常從工作區的 `config/console.toml` 載入；檔案不存在時使用內建的
//! 預設種子資料。設定只會被讀取，不會寫回。

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::agent_card::{AgentCard, AgentCardTemplate};
use super::provider::ProviderConfig;
use super::responder::DEFAULT_ACKNOWLEDGEMENT;

pub const CONFIG_RELATIVE_PATH: &str = "config/console.toml";

const DEFAULT_WELCOME: &str = "Welcome to Dexter Web. Ask a financial research question, manage providers, or configure A2A agent cards.";

/// 種子資料違反識別碼規則時的錯誤。
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{kind} at position {index} has an empty id")]
    EmptyId { kind: &'static str, index: usize },
    #[error("duplicate provider id: {0}")]
    DuplicateProvider(String),
    #[error("duplicate agent card id: {0}")]
    DuplicateAgentCard(String),
}

/// 日誌設定。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `error`、`warn`、`info`、`debug` 或 `trace`。
    pub level: String,
    /// 日誌檔路徑；相對路徑以工作區為基準。
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            file: PathBuf::from("dexter.log"),
        }
    }
}

/// 主控台設定的頂層結構。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// 對話開頭的代理歡迎訊息。
    pub welcome_message: String,
    /// 每則使用者訊息後附加的代理佔位回覆。
    pub acknowledgement: String,
    pub providers: Vec<ProviderConfig>,
    pub agent_cards: Vec<AgentCard>,
    /// 「新增卡片」使用的預設內容。
    pub new_card: AgentCardTemplate,
    pub log: LogSettings,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            welcome_message: String::from(DEFAULT_WELCOME),
            acknowledgement: String::from(DEFAULT_ACKNOWLEDGEMENT),
            providers: default_providers(),
            agent_cards: default_agent_cards(),
            new_card: AgentCardTemplate::default(),
            log: LogSettings::default(),
        }
    }
}

/// 設定的來源，供啟動時記錄。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    Defaults,
}

impl ConsoleSettings {
    /// 從工作區讀取設定；`config/console.toml` 不存在時回傳預設值。
    pub fn load(workspace_root: &Path) -> Result<(Self, SettingsSource)> {
        let config_path = workspace_root.join(CONFIG_RELATIVE_PATH);
        if config_path.exists() {
            let settings = Self::load_file(&config_path)?;
            Ok((settings, SettingsSource::File(config_path)))
        } else {
            Ok((Self::default(), SettingsSource::Defaults))
        }
    }

    /// 讀取並驗證指定的設定檔。
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read console settings: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid console settings: {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let settings: ConsoleSettings = toml::from_str(raw).context("Failed to parse TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// 檢查種子資料的識別碼皆非空且不重複。
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut seen = HashSet::new();
        for (index, provider) in self.providers.iter().enumerate() {
            if provider.id.trim().is_empty() {
                return Err(SettingsError::EmptyId { kind: "provider", index });
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(SettingsError::DuplicateProvider(provider.id.clone()));
            }
        }
        let mut seen = HashSet::new();
        for (index, card) in self.agent_cards.iter().enumerate() {
            if card.id.trim().is_empty() {
                return Err(SettingsError::EmptyId { kind: "agent card", index });
            }
            if !seen.insert(card.id.as_str()) {
                return Err(SettingsError::DuplicateAgentCard(card.id.clone()));
            }
        }
        Ok(())
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("openai", "OpenAI", "https://api.openai.com", true),
        ProviderConfig::new("anthropic", "Anthropic", "https://api.anthropic.com", false),
        ProviderConfig::new(
            "google",
            "Google Gemini",
            "https://generativelanguage.googleapis.com",
            false,
        ),
        ProviderConfig::new("openrouter", "OpenRouter", "https://openrouter.ai/api", false),
        ProviderConfig::new("ollama", "Ollama (Local)", "http://127.0.0.1:11434", false),
    ]
}

fn default_agent_cards() -> Vec<AgentCard> {
    vec![
        AgentCard {
            id: String::from("a2a-1"),
            name: String::from("Dexter Research Lead"),
            description: String::from("Coordinates deep financial research and tool orchestration."),
            primary_model: String::from("gpt-5.2"),
            skills: String::from("Financial search, SEC filings, valuation summaries"),
            contact: String::from("agent://dexter/lead"),
            enabled: true,
        },
        AgentCard {
            id: String::from("a2a-2"),
            name: String::from("Market Pulse Scout"),
            description: String::from("Tracks catalysts, earnings moves, and market sentiment."),
            primary_model: String::from("claude-3.5-sonnet"),
            skills: String::from("Web search, sentiment tagging, event briefs"),
            contact: String::from("agent://dexter/market"),
            enabled: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn defaults_carry_the_builtin_seeds() {
        let settings = ConsoleSettings::default();
        let ids: Vec<&str> = settings.providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["openai", "anthropic", "google", "openrouter", "ollama"]);
        assert_eq!(
            settings.providers.iter().filter(|p| p.enabled).count(),
            1
        );
        assert!(settings.providers.iter().all(|p| p.api_key.is_empty()));
        assert_eq!(settings.agent_cards.len(), 2);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[rstest]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let settings = ConsoleSettings::parse(
            r#"
            acknowledgement = "Queued."

            [[providers]]
            id = "local"
            name = "Local vLLM"
            base_url = "http://localhost:8000"
            enabled = true

            [log]
            level = "debug"
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.acknowledgement, "Queued.");
        assert_eq!(settings.welcome_message, DEFAULT_WELCOME);
        assert_eq!(settings.providers.len(), 1);
        assert_eq!(settings.providers[0].api_key, "");
        assert_eq!(settings.agent_cards, default_agent_cards());
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.log.file, PathBuf::from("dexter.log"));
    }

    #[rstest]
    #[case(
        r#"
        [[providers]]
        id = "openai"
        name = "A"
        base_url = "https://a"
        [[providers]]
        id = "openai"
        name = "B"
        base_url = "https://b"
        "#,
        SettingsError::DuplicateProvider(String::from("openai"))
    )]
    #[case(
        r#"
        [[agent_cards]]
        id = "x"
        name = "One"
        [[agent_cards]]
        id = "x"
        name = "Two"
        "#,
        SettingsError::DuplicateAgentCard(String::from("x"))
    )]
    #[case(
        r#"
        [[agent_cards]]
        id = "  "
        name = "Blank"
        "#,
        SettingsError::EmptyId { kind: "agent card", index: 0 }
    )]
    fn invalid_seeds_are_rejected(#[case] raw: &str, #[case] expected: SettingsError) {
        let err = ConsoleSettings::parse(raw).expect_err("seeds are invalid");
        assert_eq!(err.downcast_ref::<SettingsError>(), Some(&expected));
    }

    #[rstest]
    fn load_falls_back_to_defaults_without_a_file() {
        let dir = TempDir::new().expect("create temp dir");
        let (settings, source) = ConsoleSettings::load(dir.path()).expect("defaults");
        assert_eq!(source, SettingsSource::Defaults);
        assert_eq!(settings, ConsoleSettings::default());
    }

    #[rstest]
    fn load_reads_workspace_config() {
        let dir = TempDir::new().expect("create temp dir");
        let config_path = dir.path().join(CONFIG_RELATIVE_PATH);
        fs::create_dir_all(dir.path().join("config")).expect("create config dir");
        fs::write(&config_path, "welcome_message = \"Hi from file\"\n").expect("write config");

        let (settings, source) = ConsoleSettings::load(dir.path()).expect("load config");
        assert_eq!(settings.welcome_message, "Hi from file");
        assert_eq!(source, SettingsSource::File(config_path));
    }

    #[rstest]
    fn load_file_reports_the_broken_path() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "providers = \"not a list\"").expect("write config");

        let err = ConsoleSettings::load_file(&path).expect_err("invalid TOML");
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
