//! WebSocket transport for the cross-tab auth signal
//!
//! Each open tab subscribes to `/ws/session`. Frames, in order:
//! - the deterministic logged-out snapshot every first render starts from
//! - the browser's current session
//! - one frame per published change (login or logout in any tab)

use axum::{
    extract::{ws::*, Extension, State},
    response::IntoResponse,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use super::server::SharedState;
use crate::auth::{RequestContext, Session, SessionProvider};

// ============================================================================
// Message Types
// ============================================================================

/// Messages from client to server
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum ClientMessage {
    /// Keep-alive ping
    Ping,
}

/// Messages from server to client
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum ServerMessage {
    /// Current auth state of the browser
    Session {
        #[serde(rename = "hasAccessToken")]
        has_access_token: bool,
        role: Option<String>,
        timestamp: String,
    },
    /// Response to Ping
    Pong,
    /// Error message
    Error { message: String },
}

impl ServerMessage {
    pub fn session(session: &Session) -> Self {
        ServerMessage::Session {
            has_access_token: session.has_access_token,
            role: session.role.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// WebSocket Handler
// ============================================================================

/// Handle WebSocket upgrade requests
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, ctx.client_id))
}

/// Drive one tab's subscription until either side goes away.
///
/// The watch receiver lives on this task's stack, so closing the socket
/// drops the subscription with it.
async fn handle_socket(socket: WebSocket, state: SharedState, client_id: String) {
    let (mut sender, mut receiver) = socket.split();

    if send(&mut sender, &ServerMessage::session(&SessionProvider::initial_snapshot()))
        .await
        .is_err()
    {
        return;
    }

    let mut rx: watch::Receiver<Session> = state.signal.subscribe(&client_id).await;
    let current = rx.borrow_and_update().clone();
    if send(&mut sender, &ServerMessage::session(&current)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = rx.borrow_and_update().clone();
                if send(&mut sender, &ServerMessage::session(&session)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                let reply = match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(ClientMessage::Ping) => ServerMessage::Pong,
                            Err(e) => ServerMessage::Error {
                                message: format!("Invalid message: {}", e),
                            },
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                };
                if send(&mut sender, &reply).await.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Session socket closed for client {}", client_id);
}

async fn send(sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    sender.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_message_shape() {
        let msg = ServerMessage::session(&Session::new(true, Some("ADMIN".to_string())));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "Session");
        assert_eq!(json["hasAccessToken"], true);
        assert_eq!(json["role"], "ADMIN");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_initial_frame_is_logged_out() {
        let msg = ServerMessage::session(&SessionProvider::initial_snapshot());
        match msg {
            ServerMessage::Session {
                has_access_token,
                role,
                ..
            } => {
                assert!(!has_access_token);
                assert!(role.is_none());
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_client_ping_parses() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"Nope"}"#).is_err());
    }
}
