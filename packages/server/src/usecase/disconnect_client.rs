//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - レジストリからの削除と、残りの接続への接続数ブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録中の接続の切断
//! - エッジケース：ブロードキャスト中に既に外されていた接続の切断（冪等）

use std::sync::Arc;

use crate::domain::{BroadcastError, Broadcaster, ConnectionId, MessagePusher};

/// 切断処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected {
    /// 切断時点でレジストリに残っていたか
    pub was_registered: bool,
    /// 切断後の接続数
    pub remaining: usize,
}

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（接続レジストリの抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Broadcaster（ブロードキャストキューの抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            message_pusher,
            broadcaster,
        }
    }

    /// クライアント切断を実行
    ///
    /// ファンアウト中に既に外されていた接続でも、減った接続数は通知する。
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<Disconnected, BroadcastError> {
        let was_registered = self.message_pusher.unregister_client(&connection_id).await;
        let remaining = self.message_pusher.count_clients().await;
        self.broadcaster.enqueue_presence(remaining).await?;

        Ok(Disconnected {
            was_registered,
            remaining,
        })
    }
}
