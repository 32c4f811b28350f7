/// 訊息的發送者。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 使用者輸入的提問。
    User,
    /// 代理（目前為佔位回覆）。
    Agent,
}

impl Role {
    /// 對話列表中顯示的角色名稱。
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Agent => "Dexter",
        }
    }
}

/// 對話中的單一訊息。建立後即不可變更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
}

impl Message {
    pub(crate) fn new(id: String, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
