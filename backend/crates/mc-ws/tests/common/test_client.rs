#![allow(dead_code)]

use mc_ws::ServerMessage;

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};
use serde::Serialize;

pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect as the server's default user
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server
            .get_websocket("/ws")
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    /// Connect identifying as `user_id` through the header
    pub async fn connect_as(server: &TestServer, user_id: &str) -> Self {
        let ws = server
            .get_websocket("/ws")
            .add_header("X-User-Id", user_id)
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    /// Connect and consume the greeting frames, returning them
    pub async fn connect_and_greet(server: &TestServer) -> (Self, Vec<ServerMessage>) {
        let mut client = Self::connect(server).await;
        let status = client.receive().await;
        let logs = client.receive().await;
        (client, vec![status, logs])
    }

    pub async fn send_json<T: Serialize>(&mut self, value: &T) {
        self.ws.send_json(value).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Next frame parsed as a `ServerMessage`; panics after `RECEIVE_TIMEOUT`
    pub async fn receive(&mut self) -> ServerMessage {
        tokio::time::timeout(RECEIVE_TIMEOUT, self.ws.receive_json::<ServerMessage>())
            .await
            .expect("timed out waiting for a frame")
    }

    /// Skip frames until one satisfies `predicate`
    pub async fn receive_matching<F>(&mut self, predicate: F) -> ServerMessage
    where
        F: Fn(&ServerMessage) -> bool,
    {
        tokio::time::timeout(RECEIVE_TIMEOUT, async {
            loop {
                let msg = self.ws.receive_json::<ServerMessage>().await;
                if predicate(&msg) {
                    return msg;
                }
            }
        })
        .await
        .expect("timed out waiting for a matching frame")
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}
