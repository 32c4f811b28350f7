//! 實體識別碼的產生能力。
//!
//! 訊息與新增的代理卡片都需要新的唯一識別碼。所有產生都經過
//! [`IdSource`]，讓測試可以注入可預期的序列。

use uuid::Uuid;

/// 產生新識別碼的能力。
pub trait IdSource {
    /// 回傳一個新的識別碼。每次呼叫都必須與先前的結果不同。
    fn next_id(&mut self) -> String;
}

/// 以 UUID v4 為基礎的識別碼來源，供正式執行使用。
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        format!("id-{}", Uuid::new_v4().simple())
    }
}

/// 依序遞增的識別碼來源：`<prefix>-1`、`<prefix>-2`……
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

#[cfg(test)]
impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

#[cfg(test)]
impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

#[cfg(test)]
impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
