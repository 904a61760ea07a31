//! End-to-end tests of the survey server over real HTTP and WebSocket connections.

use std::{sync::Arc, time::Duration};

use futures_util::StreamExt;
use kairan_server::{
    domain::{SurveyState, SurveyStore},
    infrastructure::{
        broadcast::{FanOutWorkers, QueuedBroadcaster},
        definition::parse_definition,
        message_pusher::WebSocketMessagePusher,
        repository::InMemorySurveyStore,
    },
    ui::{Server, ServerOptions},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetSurveyPageUseCase,
        SnapshotSurveyUseCase, UpdateSurveyUseCase,
    },
};
use kairan_shared::time::FixedClock;
use tokio::{net::TcpStream, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const DEFINITION: &str = r#"
version = 1

[[questions]]
type = "MultipleChoice"
title = "Colour"
options = [{ title = "Red" }, { title = "Blue" }]

[[questions]]
type = "TextEntry"
title = "Comments"
"#;

/// version 1: Colour -> Blue, Comments -> "ok"
const UPDATE: [u8; 13] = [1, 2, 1, 0, 2, 2, 0b0100_0000, 2, 2, 3, 2, b'o', b'k'];

/// Helper struct to manage an in-process server
struct TestServer {
    addr: std::net::SocketAddr,
    store: Arc<InMemorySurveyStore>,
    initial: Vec<u8>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    workers: Option<FanOutWorkers>,
}

impl TestServer {
    /// Start a server on an ephemeral port
    async fn start() -> Self {
        let survey = parse_definition(DEFINITION).expect("definition should parse");
        let initial = survey.encode().expect("definition should encode");
        let state = Arc::new(SurveyState::new(survey));
        let store = Arc::new(InMemorySurveyStore::default());

        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let (broadcaster, workers) = QueuedBroadcaster::spawn(message_pusher.clone(), 64);
        let broadcaster = Arc::new(broadcaster);

        let server = Server::new(
            Arc::new(ConnectClientUseCase::new(
                state.clone(),
                message_pusher.clone(),
                broadcaster.clone(),
            )),
            Arc::new(DisconnectClientUseCase::new(message_pusher, broadcaster.clone())),
            Arc::new(UpdateSurveyUseCase::new(state.clone(), broadcaster)),
            Arc::new(GetSurveyPageUseCase::new(state.clone())),
            Arc::new(SnapshotSurveyUseCase::new(
                state,
                store.clone(),
                Arc::new(FixedClock::new(1_700_000_000_000)),
            )),
            ServerOptions {
                tls: false,
                liveness_interval: Duration::from_millis(50),
                snapshot_on_shutdown: false,
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                panic!("server failed: {e}");
            }
        });

        TestServer {
            addr,
            store,
            initial,
            shutdown: Some(shutdown_tx),
            handle,
            workers: Some(workers),
        }
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> WsClient {
        let (ws, _) = connect_async(format!("ws://{}/ws", self.addr))
            .await
            .expect("Failed to connect");
        ws
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(workers) = self.workers.take() {
            workers.shutdown().await;
        }
        self.handle.abort();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

/// Next binary frame, skipping control frames
async fn next_frame(ws: &mut WsClient) -> Vec<u8> {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection ended")
            .expect("WebSocket error");
        if let Message::Binary(data) = message {
            return data.to_vec();
        }
    }
}

/// Asserts no binary frame arrives within a short window
async fn assert_silent(ws: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(200), next_frame(ws)).await;
    assert!(result.is_err(), "unexpected frame: {result:?}");
}

fn survey_frame(encoded: &[u8]) -> Vec<u8> {
    let mut frame = vec![0];
    frame.extend_from_slice(encoded);
    frame
}

#[tokio::test]
async fn test_connect_receives_snapshot_then_presence() {
    // テスト項目: 接続直後にスナップショット → 接続数の順で届く
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut ws = server.connect().await;

    // then (期待する結果):
    assert_eq!(next_frame(&mut ws).await, survey_frame(&server.initial));
    assert_eq!(next_frame(&mut ws).await, vec![1, 0, 0, 0, 1]);

    server.stop().await;
}

#[tokio::test]
async fn test_presence_follows_connects_and_disconnects() {
    // テスト項目: 既存の接続に接続数の増減が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    next_frame(&mut alice).await; // snapshot
    assert_eq!(next_frame(&mut alice).await, vec![1, 0, 0, 0, 1]);
    assert_eq!(next_frame(&mut alice).await, vec![1, 0, 0, 0, 1]);

    // when (操作): bob が接続
    let mut bob = server.connect().await;

    // then (期待する結果):
    assert_eq!(next_frame(&mut bob).await, survey_frame(&server.initial));
    assert_eq!(next_frame(&mut bob).await, vec![1, 0, 0, 0, 2]);
    assert_eq!(next_frame(&mut alice).await, vec![1, 0, 0, 0, 2]);

    // when (操作): bob が切断
    bob.close(None).await.expect("Failed to close");

    // then (期待する結果):
    assert_eq!(next_frame(&mut alice).await, vec![1, 0, 0, 0, 1]);

    server.stop().await;
}

#[tokio::test]
async fn test_update_is_broadcast_to_clients() {
    // テスト項目: POST /update の内容がそのまま全接続に配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut ws = server.connect().await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;

    // when (操作):
    let response = reqwest::Client::new()
        .post(server.http_url("/update"))
        .body(UPDATE.to_vec())
        .send()
        .await
        .expect("Failed to send update");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Survey received successfully"
    );
    assert_eq!(next_frame(&mut ws).await, survey_frame(&UPDATE));

    // 新しい接続は更新後のスナップショットを受け取る
    let mut late = server.connect().await;
    let snapshot = next_frame(&mut late).await;
    assert_eq!(snapshot, survey_frame(&UPDATE));

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_update_is_rejected() {
    // テスト項目: デコードできない更新は 400 になり、配信されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut ws = server.connect().await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;

    // when (操作):
    let response = reqwest::Client::new()
        .post(server.http_url("/update"))
        .body(vec![1, 1, 1, 0, 2, 2, 0b1100_0000])
        .send()
        .await
        .expect("Failed to send update");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_silent(&mut ws).await;

    server.stop().await;
}

#[tokio::test]
async fn test_mismatched_update_is_rejected() {
    // テスト項目: 型の合わない質問を含む更新は 400 になり、反映も配信もされない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut ws = server.connect().await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;
    next_frame(&mut ws).await;

    // when (操作): 単一選択の q1 を自由記述として送る
    let response = reqwest::Client::new()
        .post(server.http_url("/update"))
        .body(vec![1, 1, 1, 2, 2, 1, b'x'])
        .send()
        .await
        .expect("Failed to send update");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_silent(&mut ws).await;
    let mut late = server.connect().await;
    assert_eq!(next_frame(&mut late).await, survey_frame(&server.initial));

    server.stop().await;
}

#[tokio::test]
async fn test_update_only_accepts_post() {
    // テスト項目: /update は POST 以外を 405 で拒否する
    let server = TestServer::start().await;

    let response = reqwest::get(server.http_url("/update"))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    server.stop().await;
}

#[tokio::test]
async fn test_page_shows_titles_and_answers() {
    // テスト項目: ページにはタイトルと最新の回答が含まれる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    client
        .post(server.http_url("/update"))
        .body(UPDATE.to_vec())
        .send()
        .await
        .expect("Failed to send update");

    // when (操作):
    let page: serde_json::Value = client
        .get(server.http_url("/"))
        .send()
        .await
        .expect("Failed to get page")
        .json()
        .await
        .expect("Failed to parse page");

    // then (期待する結果):
    assert_eq!(page["version"], 1);
    assert_eq!(page["ws_protocol"], "ws");
    assert_eq!(page["questions"][0]["title"], "Colour");
    assert_eq!(page["questions"][0]["type"], "multiple_choice");
    assert_eq!(page["questions"][0]["options"][1]["title"], "Blue");
    assert_eq!(page["questions"][0]["options"][1]["selected"], true);
    assert_eq!(page["questions"][1]["text"], "ok");

    server.stop().await;
}

#[tokio::test]
async fn test_snapshot_endpoint_saves_state() {
    // テスト項目: POST /admin/snapshot で現在の状態が保存される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::Client::new()
        .post(server.http_url("/admin/snapshot"))
        .send()
        .await
        .expect("Failed to request snapshot");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["bytes"], server.initial.len());
    assert_eq!(body["saved_at"], "2023-11-15T07:13:20+09:00");
    assert_eq!(
        server.store.load().await.expect("Failed to load"),
        Some(server.initial.clone())
    );

    server.stop().await;
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    let server = TestServer::start().await;

    let body: serde_json::Value = reqwest::get(server.http_url("/api/health"))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse body");

    assert_eq!(body, serde_json::json!({"status": "ok"}));
    server.stop().await;
}
