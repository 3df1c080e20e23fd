use std::collections::VecDeque;

use crate::domain::value_object::MessageId;

use super::message::ChatMessage;

/// ルームごとに保持するメッセージの上限
pub const HISTORY_CAPACITY: usize = 100;

/// ルームごとのメッセージ履歴
///
/// 挿入順を保持し、容量を超えたら最も古いメッセージから捨てる（FIFO）。
/// 削除（redact）されたメッセージも枠を占有し続け、古くなるまで残る。
#[derive(Debug, Clone)]
pub struct MessageHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// 指定した容量で履歴を作成
    ///
    /// 容量 0 は 1 に切り上げる（追加したメッセージは必ず残る）。
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 末尾に追加し、容量を超えた分を先頭から捨てる
    pub fn append(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            if let Some(evicted) = self.messages.pop_front() {
                tracing::debug!("Evicted message '{}' from history", evicted.id.as_str());
            }
        }
        // 直前に push_back しているので空にはならない
        &self.messages[self.messages.len() - 1]
    }

    /// 指定 ID の最初のメッセージを削除済みにする
    ///
    /// 見つからなかった場合は `false` を返すだけで、エラーにはしない。
    pub fn redact(&mut self, message_id: &MessageId) -> bool {
        match self.messages.iter_mut().find(|m| &m.id == message_id) {
            Some(message) => {
                message.redact();
                true
            }
            None => false,
        }
    }

    /// 新規参加者に送る履歴
    ///
    /// 削除済みメッセージはマスクではなく丸ごと除外する。
    pub fn snapshot_for_join(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|m| !m.redacted)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}
