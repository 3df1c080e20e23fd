//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ConnectionId, Identity, Room, RoomId, Timestamp};

/// ルーム単位のロック
///
/// UseCase は 1 イベントの処理中このロックを保持し続け、
/// 同じルームへのイベントが途中で割り込まないようにする。
/// 異なるルームのイベントは互いに待たない。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait（ルームレジストリ）
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得し、存在しなければ作成する
    async fn get_or_create(&self, room_id: &RoomId, created_at: Timestamp) -> SharedRoom;

    /// 既存のルームを取得（作成はしない）
    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// 全ルームを ID 順に取得
    async fn all(&self) -> Vec<SharedRoom>;
}

/// Session Repository trait（セッションテーブル）
///
/// 「この接続は誰か」の唯一の情報源。
/// 参加後のイベントではクライアントの自己申告ではなく、ここに紐づいた ID を使う。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 接続にユーザー情報を紐づける（既存の紐づけは上書き）
    async fn bind(&self, connection_id: ConnectionId, identity: Identity);

    /// 接続に紐づいたユーザー情報を取得
    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<Identity>;

    /// 紐づけを解除し、解除したユーザー情報を返す
    async fn unbind(&self, connection_id: &ConnectionId) -> Option<Identity>;
}
