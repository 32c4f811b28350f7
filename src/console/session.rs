//! 協調者：把三個資料集合組合成一個工作階段。
//!
//! `SessionView` 持有檢視模式、金鑰顯示旗標與輸入草稿，並把使用者操作轉交給
//! 對應的集合。它本身不保存任何業務資料；訊息數量等衍生值每次都由集合即時計算。

use std::borrow::Cow;

use log::{debug, info};

use super::agent_card::{AgentCard, AgentCardPatch, AgentCardRegistry};
use super::config::ConsoleSettings;
use super::conversation::ConversationStore;
use super::draft::DraftComposer;
use super::ids::IdSource;
use super::message::Message;
use super::provider::{ProviderConfig, ProviderPatch, ProviderRegistry};
use super::responder::{PlaceholderResponder, Responder};

/// 主畫面目前顯示的檢視。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Conversation,
    Admin,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Conversation => "Conversations",
            ViewMode::Admin => "Admin",
        }
    }
}

const MASK_CHAR: char = '•';

pub struct SessionView {
    conversation: ConversationStore,
    providers: ProviderRegistry,
    agent_cards: AgentCardRegistry,
    view: ViewMode,
    show_keys: bool,
    draft: DraftComposer,
    ids: Box<dyn IdSource>,
    responder: Box<dyn Responder>,
}

impl SessionView {
    /// 依設定中的種子資料建立工作階段。
    pub fn new(settings: &ConsoleSettings, ids: Box<dyn IdSource>) -> Self {
        let mut ids = ids;
        let conversation = ConversationStore::with_welcome(settings.welcome_message.clone(), ids.as_mut());
        Self {
            conversation,
            providers: ProviderRegistry::from_seed(settings.providers.clone()),
            agent_cards: AgentCardRegistry::from_seed(
                settings.agent_cards.clone(),
                settings.new_card.clone(),
            ),
            view: ViewMode::default(),
            show_keys: false,
            draft: DraftComposer::new(),
            ids,
            responder: Box::new(PlaceholderResponder::new(settings.acknowledgement.clone())),
        }
    }

    /// 替換產生代理回覆的元件。
    #[cfg(test)]
    pub fn with_responder(mut self, responder: Box<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    // --- 讀取 ---

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// 目前的訊息數量；每次讀取都直接來自對話紀錄。
    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        self.providers.providers()
    }

    pub fn provider_registry(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn agent_cards(&self) -> &[AgentCard] {
        self.agent_cards.cards()
    }

    pub fn active_view(&self) -> ViewMode {
        self.view
    }

    pub fn keys_visible(&self) -> bool {
        self.show_keys
    }

    pub fn draft(&self) -> &DraftComposer {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftComposer {
        &mut self.draft
    }

    /// 依金鑰顯示旗標回傳明文或遮罩後的 API 金鑰。
    pub fn display_api_key<'a>(&self, provider: &'a ProviderConfig) -> Cow<'a, str> {
        if self.show_keys {
            Cow::Borrowed(provider.api_key.as_str())
        } else {
            Cow::Owned(mask_secret(&provider.api_key))
        }
    }

    // --- 操作 ---

    /// 送出目前的草稿。
    ///
    /// 草稿為空白時不做任何事（草稿也保持原樣）；成功時附加兩則訊息並清空草稿。
    pub fn send_message(&mut self) -> Option<(Message, Message)> {
        let sent = self
            .conversation
            .send(self.draft.buffer(), self.ids.as_mut(), self.responder.as_ref())?;
        self.draft.take();
        info!(
            "Sent message {}: {}",
            sent.0.id(),
            sent.0.content().lines().next().unwrap_or("")
        );
        Some(sent)
    }

    pub fn update_provider(&mut self, id: &str, patch: ProviderPatch) -> Option<&ProviderConfig> {
        self.providers.update(id, patch)
    }

    pub fn update_agent_card(&mut self, id: &str, patch: AgentCardPatch) -> Option<&AgentCard> {
        self.agent_cards.update(id, patch)
    }

    pub fn add_agent_card(&mut self) -> &AgentCard {
        self.agent_cards.add(self.ids.as_mut())
    }

    pub fn set_active_view(&mut self, mode: ViewMode) {
        if self.view != mode {
            info!("Switching view: {} -> {}", self.view.label(), mode.label());
        }
        self.view = mode;
    }

    pub fn toggle_key_visibility(&mut self) -> bool {
        self.show_keys = !self.show_keys;
        debug!("API key visibility: {}", self.show_keys);
        self.show_keys
    }
}

/// 每個字元以遮罩符號取代，保留長度提示。
pub fn mask_secret(secret: &str) -> String {
    secret.chars().map(|_| MASK_CHAR).collect()
}
