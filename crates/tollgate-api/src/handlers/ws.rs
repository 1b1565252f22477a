//! WebSocket upgrade handler and inbound protocol.
//!
//! A connection is anonymous until its first `authenticate` message; only
//! then is it registered for pushes. Location updates drive the alert
//! engine; engine failures are logged and never close the socket.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use tollgate_core::types::id::UserId;
use tollgate_realtime::connection::handle::ConnectionHandle;
use tollgate_realtime::message::types::{InboundMessage, OutboundMessage};

use crate::state::AppState;

/// GET /ws — WebSocket upgrade
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Drives an established WebSocket connection.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Phase 1: wait for `authenticate` before registering anything.
    let user_id = loop {
        match ws_rx.next().await {
            Some(Ok(Message::Text(text))) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(InboundMessage::Authenticate { user_id }) => break user_id,
                Ok(_) => {
                    send_direct(
                        &mut ws_tx,
                        &OutboundMessage::Error {
                            code: "NOT_AUTHENTICATED".to_string(),
                            message: "Send an authenticate message first".to_string(),
                        },
                    )
                    .await;
                }
                Err(e) => {
                    send_direct(
                        &mut ws_tx,
                        &OutboundMessage::Error {
                            code: "INVALID_MESSAGE".to_string(),
                            message: format!("Failed to parse message: {e}"),
                        },
                    )
                    .await;
                }
            },
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!(error = %e, "WebSocket error before authentication");
                return;
            }
        }
    };

    let (handle, mut outbound_rx) = state.realtime.connections.register(user_id);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection established");

    // Forward registry pushes to the client.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Phase 2: inbound protocol.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_inbound(&state, user_id, &handle, &text).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.realtime.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection closed");
}

/// Processes one inbound message from an authenticated connection.
async fn handle_inbound(state: &AppState, user_id: UserId, handle: &ConnectionHandle, text: &str) {
    let msg: InboundMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            handle.send(OutboundMessage::Error {
                code: "INVALID_MESSAGE".to_string(),
                message: format!("Failed to parse message: {e}"),
            });
            return;
        }
    };

    match msg {
        InboundMessage::Authenticate { .. } => {
            // Already bound; re-authentication is a no-op.
        }
        InboundMessage::LocationUpdate {
            latitude,
            longitude,
        } => {
            if let Err(e) = state
                .user_service
                .record_location(user_id, latitude, longitude)
                .await
            {
                warn!(user_id = %user_id, error = %e, "Failed to record location");
            }

            if let Err(e) = state
                .realtime
                .alerts
                .check_alerts(user_id, latitude, longitude)
                .await
            {
                warn!(user_id = %user_id, error = %e, "Alert check failed");
            }
        }
        InboundMessage::MarkRead { notification_ids } => {
            if let Err(e) = state
                .realtime
                .dispatcher
                .mark_seen(&notification_ids, user_id)
                .await
            {
                warn!(user_id = %user_id, error = %e, "Failed to mark notifications seen");
            }
        }
    }
}

/// Sends a message on a socket that is not yet registered.
async fn send_direct(
    ws_tx: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &OutboundMessage,
) {
    if let Ok(text) = serde_json::to_string(msg) {
        let _ = ws_tx.send(Message::Text(text.into())).await;
    }
}
