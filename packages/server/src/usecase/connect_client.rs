//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 新規接続へのスナップショット・接続数の送信と、全接続への接続数ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新規接続は「スナップショット → 接続数」の順で受け取る必要がある
//! - 既存の接続には新しい接続数が 1 回だけ届く必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の接続、既存接続がある状態での接続
//! - 異常系：初期フレーム送信前に接続が閉じた場合

use std::sync::Arc;

use crate::domain::{
    Broadcaster, ConnectionId, Frame, MessagePusher, PusherChannel, SurveyState, presence_frame,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// アンケートの現在の状態
    state: Arc<SurveyState>,
    /// MessagePusher（接続レジストリの抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Broadcaster（ブロードキャストキューの抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl ConnectClientUseCase {
    pub fn new(
        state: Arc<SurveyState>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            state,
            message_pusher,
            broadcaster,
        }
    }

    /// クライアント接続を実行
    ///
    /// 1. アンケートのロックを取得してスナップショットをエンコード
    /// 2. スナップショットフレームを新規接続に送信
    /// 3. レジストリに登録し、接続数フレームを新規接続に送信
    /// 4. ロックを解放してから、新しい接続数を全接続にブロードキャスト
    ///
    /// 1〜3 を同じロックの中で行うため、送ったスナップショットより新しい更新は
    /// 必ず登録後のブロードキャストとして届く。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 登録後の接続数
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let count = {
            let survey = self.state.lock().await;
            let encoded = survey.encode().map_err(ConnectError::Snapshot)?;
            sender
                .try_send(Frame::SurveyUpdate(encoded).encode())
                .map_err(|_| ConnectError::ConnectionClosed)?;

            let count = self
                .message_pusher
                .register_client(connection_id, sender.clone())
                .await;
            if sender.try_send(presence_frame(count)).is_err() {
                self.message_pusher.unregister_client(&connection_id).await;
                return Err(ConnectError::ConnectionClosed);
            }
            count
        };

        self.broadcaster.enqueue_presence(count).await?;
        Ok(count)
    }

    /// 接続がまだレジストリに登録されているか
    ///
    /// ブロードキャスト中の書き込み失敗で外された接続は false になる。
    pub async fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.message_pusher.is_registered(connection_id).await
    }
}
