use crate::handlers::dispatcher::dispatch;
use crate::{
    ClientMessage, ConnectionConfig, ConnectionId, HandlerContext, Metrics,
    Result as WsErrorResult, ServerMessage, ShutdownGuard, WsError,
};

use mc_core::{LogEntry, ServerEvent, StatSnapshot};
use mc_supervisor::{CommandGateway, ProcessSupervisor};

use std::panic::Location;

use axum::body::Bytes;
use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// One console stream: replays buffered output, then forwards live events
/// and answers client requests until either side goes away.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    user_id: String,
    config: ConnectionConfig,
    metrics: Metrics,
    supervisor: ProcessSupervisor,
    gateway: CommandGateway,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        user_id: String,
        config: ConnectionConfig,
        metrics: Metrics,
        supervisor: ProcessSupervisor,
        gateway: CommandGateway,
    ) -> Self {
        Self {
            connection_id,
            user_id,
            config,
            metrics,
            supervisor,
            gateway,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        info!(
            "Console connection {} established for {}",
            self.connection_id, self.user_id
        );
        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded so a stalled client pushes back onto its own event queue
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let mut subscription = self.supervisor.subscribe().await;

        let replay = std::mem::take(&mut subscription.replay);
        let greeting = self.greet(&tx, replay, subscription.latest_stats.take());

        let result = match greeting.await {
            Err(e) => Err(e),
            Ok(()) => {
                let mut heartbeat = tokio::time::interval_at(
                    Instant::now() + self.config.heartbeat_interval,
                    self.config.heartbeat_interval,
                );
                heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
                let mut last_seen = Instant::now();

                loop {
                    tokio::select! {
                        msg = ws_receiver.next() => {
                            match msg {
                                Some(Ok(msg)) => {
                                    last_seen = Instant::now();
                                    match self.handle_client_message(msg, &tx).await {
                                        Ok(true) => {}
                                        Ok(false) => break Ok(()),
                                        Err(e) => {
                                            self.metrics.error_occurred("message_handling");
                                            break Err(e);
                                        }
                                    }
                                }
                                Some(Err(e)) => {
                                    break Err(WsError::ConnectionClosed {
                                        reason: format!("WebSocket error: {}", e),
                                        location: ErrorLocation::from(Location::caller()),
                                    });
                                }
                                None => {
                                    info!("Connection {} closed by client", self.connection_id);
                                    break Ok(());
                                }
                            }
                        }

                        event = subscription.recv() => {
                            match event {
                                Ok(event) => {
                                    if let Err(e) = self.forward_event(event, &tx).await {
                                        break Err(e);
                                    }
                                }
                                Err(RecvError::Lagged(missed)) => {
                                    warn!(
                                        "Connection {} lagged, dropped {} oldest events",
                                        self.connection_id, missed
                                    );
                                    self.metrics.events_dropped(missed);
                                    if let Err(e) = self.send(&tx, ServerMessage::Lagged { missed }).await {
                                        break Err(e);
                                    }
                                }
                                Err(RecvError::Closed) => {
                                    info!("Event stream closed for connection {}", self.connection_id);
                                    break Ok(());
                                }
                            }
                        }

                        _ = heartbeat.tick() => {
                            if last_seen.elapsed() > self.config.heartbeat_timeout {
                                warn!(
                                    "Connection {} silent for {}s, closing",
                                    self.connection_id,
                                    last_seen.elapsed().as_secs()
                                );
                                break Err(WsError::HeartbeatTimeout {
                                    timeout_secs: self.config.heartbeat_timeout.as_secs(),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                            if tx.send(Message::Ping(Bytes::new())).await.is_err() {
                                break Ok(());
                            }
                        }

                        _ = shutdown_guard.wait() => {
                            info!("Shutting down connection {} gracefully", self.connection_id);
                            let _ = tx
                                .send(Message::Close(Some(CloseFrame {
                                    code: close_code::AWAY,
                                    reason: "server shutting down".into(),
                                })))
                                .await;
                            break Ok(());
                        }
                    }
                }
            }
        };

        drop(tx); // Close channel to terminate send task
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        match &result {
            Ok(()) => info!("Console connection {} closed", self.connection_id),
            Err(e) => error!("Console connection {} ended: {}", self.connection_id, e),
        }

        result
    }

    /// Status, buffered output and the last stats snapshot, in that order
    async fn greet(
        &self,
        tx: &mpsc::Sender<Message>,
        replay: Vec<LogEntry>,
        latest_stats: Option<StatSnapshot>,
    ) -> WsErrorResult<()> {
        self.send(
            tx,
            ServerMessage::ServerStatus {
                status: self.supervisor.status(),
            },
        )
        .await?;

        self.send(
            tx,
            ServerMessage::ServerLogs {
                entries: replay,
            },
        )
        .await?;

        if latest_stats.is_some() {
            self.send(
                tx,
                ServerMessage::ServerStats {
                    snapshot: latest_stats,
                },
            )
            .await?;
        }

        Ok(())
    }

    /// Returns false when the client asked to close
    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<bool> {
        match msg {
            Message::Text(text) => {
                self.handle_text_message(text.as_str(), tx).await?;
                Ok(true)
            }
            Message::Binary(data) => {
                debug!(
                    "Binary frame ({} bytes) from connection {}",
                    data.len(),
                    self.connection_id
                );
                self.send(
                    tx,
                    WsError::invalid_message("binary frames are not supported")
                        .to_server_message(),
                )
                .await?;
                Ok(true)
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferFull {
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(true)
            }
            Message::Pong(_) => Ok(true),
            Message::Close(_) => {
                info!("Received close frame from connection {}", self.connection_id);
                Ok(false)
            }
        }
    }

    async fn handle_text_message(
        &self,
        text: &str,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        if text.len() > self.config.max_message_bytes {
            self.metrics.error_occurred("message_too_large");
            return self
                .send(
                    tx,
                    WsError::invalid_message(format!(
                        "message exceeds {} bytes",
                        self.config.max_message_bytes
                    ))
                    .to_server_message(),
                )
                .await;
        }

        let msg = match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => msg,
            Err(source) => {
                let error = WsError::JsonDecode {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("Connection {}: {}", self.connection_id, error);
                self.metrics.error_occurred("decode");
                return self.send(tx, error.to_server_message()).await;
            }
        };

        self.metrics.message_received(msg.message_type());

        let ctx = HandlerContext {
            connection_id: self.connection_id,
            user_id: self.user_id.clone(),
            supervisor: self.supervisor.clone(),
            gateway: self.gateway.clone(),
            metrics: self.metrics.clone(),
        };

        let response = dispatch(msg, ctx).await;
        self.send(tx, response).await
    }

    async fn forward_event(
        &self,
        event: ServerEvent,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        self.send(tx, ServerMessage::from(event)).await
    }

    async fn send(&self, tx: &mpsc::Sender<Message>, msg: ServerMessage) -> WsErrorResult<()> {
        let message_type = msg.message_type();
        let json = serde_json::to_string(&msg).map_err(|source| WsError::JsonEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        tx.send(Message::Text(json.into()))
            .await
            .map_err(|_| WsError::ConnectionClosed {
                reason: String::from("send task ended"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.metrics.message_sent(message_type);
        Ok(())
    }
}
