use crate::domain::value_object::UserId;

/// 接続に紐づくユーザー情報
///
/// 呼び出し元から渡された値をそのまま信頼する。本人確認は上流の責務。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(user_id: UserId, nickname: String, avatar_url: Option<String>) -> Self {
        Self {
            user_id,
            nickname,
            avatar_url,
        }
    }
}
