//! WebSocket handler for real-time scan updates.
//!
//! Upgrades the connection and streams `scan_created` / `scan_updated`
//! events to the client.

use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::models::WsEventMessage;
use crate::services::EventBroadcaster;

/// Ping interval for keeping connections alive.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Timeout for receiving pong response.
const PONG_TIMEOUT: Duration = Duration::from_secs(10);

/// Upgrade the HTTP connection to a WebSocket event stream.
pub async fn websocket_handler(
    req: HttpRequest,
    stream: web::Payload,
    broadcaster: web::Data<EventBroadcaster>,
) -> Result<HttpResponse, actix_web::Error> {
    let client_addr = req
        .connection_info()
        .realip_remote_addr()
        .map(String::from)
        .unwrap_or_else(|| "unknown".to_string());

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    info!(client = %client_addr, "WebSocket connection established");

    actix_web::rt::spawn(handle_websocket_connection(
        session,
        msg_stream,
        broadcaster.get_ref().clone(),
        client_addr,
    ));

    Ok(response)
}

/// Whether the connection loop should keep going.
enum Flow {
    Continue,
    Close,
}

/// Pumps broadcast events to one client until either side goes away.
async fn handle_websocket_connection(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    broadcaster: EventBroadcaster,
    client_addr: String,
) {
    let mut rx = broadcaster.subscribe();
    let mut last_pong = Instant::now();
    let mut ping_interval = tokio::time::interval(PING_INTERVAL);

    loop {
        let flow = tokio::select! {
            Some(msg) = msg_stream.next() => match msg {
                Ok(Message::Pong(_)) => {
                    last_pong = Instant::now();
                    Flow::Continue
                }
                Ok(msg) => on_client_message(&mut session, msg, &client_addr).await,
                Err(e) => {
                    warn!(client = %client_addr, error = %e, "WebSocket message error");
                    Flow::Close
                }
            },

            event = rx.recv() => match event {
                Ok(event) => forward_event(&mut session, &event, &client_addr).await,
                Err(RecvError::Lagged(count)) => {
                    // Polling the scan endpoints recovers anything missed
                    warn!(client = %client_addr, missed = count, "Client lagged, missed events");
                    Flow::Continue
                }
                Err(RecvError::Closed) => Flow::Close,
            },

            _ = ping_interval.tick() => {
                if last_pong.elapsed() > PING_INTERVAL + PONG_TIMEOUT {
                    warn!(client = %client_addr, "Pong timeout, closing connection");
                    Flow::Close
                } else if session.ping(b"").await.is_err() {
                    Flow::Close
                } else {
                    Flow::Continue
                }
            }
        };

        if let Flow::Close = flow {
            break;
        }
    }

    let _ = session.close(None).await;
    info!(client = %client_addr, "WebSocket connection closed");
}

async fn on_client_message(
    session: &mut actix_ws::Session,
    msg: Message,
    client_addr: &str,
) -> Flow {
    match msg {
        Message::Ping(bytes) => {
            if session.pong(&bytes).await.is_err() {
                return Flow::Close;
            }
            Flow::Continue
        }
        Message::Close(reason) => {
            info!(client = %client_addr, reason = ?reason, "Client requested close");
            Flow::Close
        }
        other => {
            debug!(client = %client_addr, message = ?other, "Ignoring client message");
            Flow::Continue
        }
    }
}

async fn forward_event(
    session: &mut actix_ws::Session,
    event: &WsEventMessage,
    client_addr: &str,
) -> Flow {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize event");
            return Flow::Continue;
        }
    };

    if session.text(json).await.is_err() {
        warn!(client = %client_addr, "Failed to send event, closing connection");
        return Flow::Close;
    }
    Flow::Continue
}

/// Configure WebSocket routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").route(web::get().to(websocket_handler)));
}
