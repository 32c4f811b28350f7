use log::debug;

use super::ids::IdSource;
use super::message::{Message, Role};
use super::responder::Responder;

/// 依附加順序保存的對話紀錄。只能附加，不能刪除或修改。
#[derive(Debug, Default, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    /// 建立一個以代理歡迎訊息開頭的對話。
    pub fn with_welcome(welcome: impl Into<String>, ids: &mut dyn IdSource) -> Self {
        Self {
            messages: vec![Message::new(ids.next_id(), Role::Agent, welcome)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// 送出一則草稿。
    ///
    /// 去除前後空白後為空時不做任何事，也不會消耗識別碼。否則依序附加
    /// 使用者訊息與代理的確認訊息，並回傳這兩則訊息。
    pub fn send(
        &mut self,
        draft: &str,
        ids: &mut dyn IdSource,
        responder: &dyn Responder,
    ) -> Option<(Message, Message)> {
        let content = draft.trim();
        if content.is_empty() {
            return None;
        }
        let user = Message::new(ids.next_id(), Role::User, content);
        let agent = Message::new(ids.next_id(), Role::Agent, responder.acknowledge(content));
        debug!("Appending message pair {} / {}", user.id(), agent.id());
        self.messages.push(user.clone());
        self.messages.push(agent.clone());
        Some((user, agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ids::SequentialIds;
    use crate::console::responder::{PlaceholderResponder, DEFAULT_ACKNOWLEDGEMENT};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ids() -> SequentialIds {
        SequentialIds::new("m")
    }

    #[fixture]
    fn store(ids: SequentialIds) -> (ConversationStore, SequentialIds) {
        let mut ids = ids;
        let store = ConversationStore::with_welcome("Welcome", &mut ids);
        (store, ids)
    }

    #[rstest]
    fn send_appends_user_then_agent(store: (ConversationStore, SequentialIds)) {
        let (mut store, mut ids) = store;
        let responder = PlaceholderResponder::default();

        let (user, agent) = store
            .send("  What is AAPL's P/E?  ", &mut ids, &responder)
            .expect("non-empty draft is sent");

        assert_eq!(store.len(), 3);
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.content(), "What is AAPL's P/E?");
        assert_eq!(agent.role(), Role::Agent);
        assert_eq!(agent.content(), DEFAULT_ACKNOWLEDGEMENT);
        assert_eq!(&store.messages()[1], &user);
        assert_eq!(&store.messages()[2], &agent);
        assert_ne!(user.id(), agent.id());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t  \n")]
    fn blank_drafts_are_ignored(
        store: (ConversationStore, SequentialIds),
        #[case] draft: &str,
    ) {
        let (mut store, mut ids) = store;
        let before = store.messages().to_vec();

        assert!(store.send(draft, &mut ids, &PlaceholderResponder::default()).is_none());
        assert_eq!(store.messages(), before.as_slice());
        // No id was consumed by the no-op.
        assert_eq!(ids.next_id(), "m-2");
    }

    #[rstest]
    fn repeated_sends_keep_pairs_adjacent(store: (ConversationStore, SequentialIds)) {
        let (mut store, mut ids) = store;
        let responder = PlaceholderResponder::new("ack");
        for prompt in ["first", "second", "third"] {
            store.send(prompt, &mut ids, &responder);
        }

        assert_eq!(store.len(), 7);
        for (pair, prompt) in store.messages()[1..].chunks(2).zip(["first", "second", "third"]) {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[0].content(), prompt);
            assert_eq!(pair[1].role(), Role::Agent);
            assert_eq!(pair[1].content(), "ack");
        }
    }
}
