//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 参加者からの削除と退出通知
//!
//! ### なぜこのテストが必要か
//! - 退出通知はユーザー情報が紐づいている場合だけ、退出した本人以外に送る
//! - 退出は冪等で、参加していないルームからの退出では何も起きない
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のルームからの退出
//! - エッジケース：ユーザー情報の紐づいていない接続の退出、未参加・存在しないルームからの退出

use std::sync::Arc;

use livechat_shared::time::Clock;

use crate::domain::{
    ConnectionId, Identity, MessagePusher, Room, RoomId, RoomRepository, ServerEvent,
    SessionRepository, Timestamp,
};

/// ルームから接続を外し、ユーザー情報があれば残りの参加者に退出を通知する
///
/// 呼び出し側がルームのロックを保持していること。
/// 参加していなかった場合は何もせず `false` を返す。
pub(super) async fn leave_and_notify(
    room: &mut Room,
    connection_id: &ConnectionId,
    identity: Option<&Identity>,
    message_pusher: &dyn MessagePusher,
    timestamp: Timestamp,
) -> bool {
    if !room.members.leave(connection_id) {
        return false;
    }

    let Some(identity) = identity else {
        return true;
    };

    let event = ServerEvent::UserLeft {
        room_id: room.id.clone(),
        user_id: identity.user_id.clone(),
        nickname: identity.nickname.clone(),
        timestamp,
    };
    if let Err(e) = message_pusher.broadcast(room.members.members(), &event).await {
        tracing::warn!("Failed to broadcast user-left: {}", e);
    }

    true
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            sessions,
            message_pusher,
            clock,
        }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// 接続がルームの参加者だった場合 `true`
    pub async fn execute(&self, connection_id: &ConnectionId, room_id: RoomId) -> bool {
        let Some(shared) = self.rooms.find(&room_id).await else {
            return false;
        };
        let mut room = shared.lock().await;

        let identity = self.sessions.identity_of(connection_id).await;
        let left = leave_and_notify(
            &mut room,
            connection_id,
            identity.as_ref(),
            self.message_pusher.as_ref(),
            Timestamp::new(self.clock.now_millis()),
        )
        .await;

        if left {
            tracing::info!(
                "Connection '{}' left room '{}'",
                connection_id.as_str(),
                room_id.as_str()
            );
        }

        left
    }
}
