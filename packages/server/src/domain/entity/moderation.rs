use std::collections::HashSet;

use crate::domain::value_object::UserId;

/// ルームのモデレーション状態（オーナーと BAN 済みユーザー）
///
/// オーナーは最初に配信者 ID の主張に成功したユーザーで、以後は上書きされない。
/// これがこのシステムにおける唯一の認可の根拠となる。
#[derive(Debug, Clone, Default)]
pub struct Moderation {
    owner: Option<UserId>,
    banned: HashSet<UserId>,
}

impl Moderation {
    pub fn new() -> Self {
        Self::default()
    }

    /// オーナーの主張を処理
    ///
    /// 主張された配信者 ID が参加ユーザーと一致し、まだオーナーがいない場合のみ記録する。
    /// 記録できたかどうかを返す。
    pub fn claim_ownership(
        &mut self,
        claimed_creator_id: Option<&UserId>,
        joining_user_id: &UserId,
    ) -> bool {
        match claimed_creator_id {
            Some(claimed) if claimed == joining_user_id && self.owner.is_none() => {
                self.owner = Some(joining_user_id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner.as_ref() == Some(user_id)
    }

    pub fn ban(&mut self, user_id: UserId) {
        self.banned.insert(user_id);
    }

    pub fn is_banned(&self, user_id: &UserId) -> bool {
        self.banned.contains(user_id)
    }

    /// BAN 済みユーザー ID（ID 順）
    pub fn banned_users(&self) -> Vec<UserId> {
        let mut banned: Vec<UserId> = self.banned.iter().cloned().collect();
        banned.sort();
        banned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_claim_ownership_when_claim_matches() {
        // テスト項目: 配信者 ID と参加ユーザー ID が一致すればオーナーになる
        // given (前提条件):
        let mut moderation = Moderation::new();

        // when (操作):
        let recorded = moderation.claim_ownership(Some(&user("u1")), &user("u1"));

        // then (期待する結果):
        assert!(recorded);
        assert!(moderation.is_owner(&user("u1")));
    }

    #[test]
    fn test_claim_ownership_ignores_mismatched_claim() {
        // テスト項目: 配信者 ID と参加ユーザー ID が異なればオーナーにならない
        // given (前提条件):
        let mut moderation = Moderation::new();

        // when (操作):
        let recorded = moderation.claim_ownership(Some(&user("u1")), &user("u2"));
        let without_claim = moderation.claim_ownership(None, &user("u2"));

        // then (期待する結果):
        assert!(!recorded);
        assert!(!without_claim);
        assert_eq!(moderation.owner(), None);
    }

    #[test]
    fn test_claim_ownership_first_writer_wins() {
        // テスト項目: 最初の主張だけが記録され、後からの主張で上書きされない
        // given (前提条件):
        let mut moderation = Moderation::new();
        moderation.claim_ownership(Some(&user("u1")), &user("u1"));

        // when (操作):
        let second = moderation.claim_ownership(Some(&user("u2")), &user("u2"));

        // then (期待する結果):
        assert!(!second);
        assert!(moderation.is_owner(&user("u1")));
        assert!(!moderation.is_owner(&user("u2")));
    }

    #[test]
    fn test_ban_and_is_banned() {
        // テスト項目: BAN したユーザーだけが BAN 済みと判定される
        // given (前提条件):
        let mut moderation = Moderation::new();

        // when (操作):
        moderation.ban(user("troll"));
        moderation.ban(user("troll"));

        // then (期待する結果):
        assert!(moderation.is_banned(&user("troll")));
        assert!(!moderation.is_banned(&user("u1")));
        assert_eq!(moderation.banned_users(), vec![user("troll")]);
    }
}
