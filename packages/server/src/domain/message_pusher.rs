//! MessagePusher trait 定義
//!
//! 接続へのイベント送信（通知）の抽象化。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// 接続ごとの送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// UseCase 層はこの trait を通じてイベントを送信し、
/// トランスポートやエンコード形式には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を送信先として登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信
    ///
    /// 到達できない送信先はスキップされ、エラーにはならない。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;
}
