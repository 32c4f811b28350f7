//! 主控台的記憶體內狀態模型。
//!
//! 三個彼此獨立的集合（對話訊息、供應商設定、代理卡片）加上一個協調用的
//! `SessionView`。所有資料都只存在於記憶體中，不會儲存或傳送。

/// `agent_card` 模組：A2A 代理卡片、部分更新與卡片集合。
pub mod agent_card;
/// `config` 模組：`config/console.toml` 的格式、預設種子資料與驗證。
pub mod config;
/// `conversation` 模組：只能附加的對話紀錄。
pub mod conversation;
/// `draft` 模組：尚未送出的輸入草稿。
pub mod draft;
/// `ids` 模組：可注入的識別碼來源。
pub mod ids;
/// `message` 模組：對話訊息與發送者角色。
pub mod message;
/// `provider` 模組：LLM 供應商設定與其集合。
pub mod provider;
/// `responder` 模組：代理回覆的接縫與佔位實作。
pub mod responder;
/// `session` 模組：協調三個集合的工作階段。
pub mod session;

pub use agent_card::{AgentCard, AgentCardField, AgentCardPatch};
pub use config::{ConsoleSettings, SettingsSource};
pub use ids::{IdSource, UuidIds};
pub use message::Role;
pub use provider::{ProviderConfig, ProviderField, ProviderPatch};
pub use session::{SessionView, ViewMode};
