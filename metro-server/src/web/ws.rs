//! Websocket relay for live train positions.
//!
//! Each connection gets a `welcome_message`, then every `new_train_position`
//! published while it is open. Text frames carrying a `train_update` are
//! published to all connections, including the sender.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::live::{Broadcaster, decode_frame, welcome};

use super::state::AppState;

/// Upgrade to a websocket subscribed to live positions.
pub async fn live_positions(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| relay(socket, state.broadcaster))
}

async fn relay(socket: WebSocket, broadcaster: Broadcaster) {
    let (mut sink, mut stream) = socket.split();
    let mut updates = broadcaster.subscribe();
    info!(
        subscribers = broadcaster.subscriber_count(),
        "live subscriber connected"
    );

    match serde_json::to_string(&welcome()) {
        Ok(text) => {
            if sink.send(Message::Text(text)).await.is_err() {
                return;
            }
        }
        Err(e) => warn!(error = %e, "failed to encode welcome message"),
    }

    let mut forward = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "failed to encode train update");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "subscriber lagging, dropped updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let producer = broadcaster.clone();
    let mut receive = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => match decode_frame(&text) {
                    Ok(update) => {
                        producer.publish(update);
                    }
                    Err(e) => debug!(error = %e, "ignoring client frame"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut forward => receive.abort(),
        _ = &mut receive => forward.abort(),
    }

    info!("live subscriber disconnected");
}
