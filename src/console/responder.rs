//! 代理回覆的接縫。
//!
//! 真正的代理執行環境日後會在這裡接上；目前唯一的實作只回傳
//! 設定中的佔位確認訊息。

/// 為一則使用者訊息產生代理回覆。
pub trait Responder {
    fn acknowledge(&self, prompt: &str) -> String;
}

pub const DEFAULT_ACKNOWLEDGEMENT: &str =
    "Message queued. This web UI is ready to connect to the agent runtime.";

/// 永遠回傳固定確認文字的回覆者。
#[derive(Debug, Clone)]
pub struct PlaceholderResponder {
    text: String,
}

impl PlaceholderResponder {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for PlaceholderResponder {
    fn default() -> Self {
        Self::new(DEFAULT_ACKNOWLEDGEMENT)
    }
}

impl Responder for PlaceholderResponder {
    fn acknowledge(&self, _prompt: &str) -> String {
        self.text.clone()
    }
}
