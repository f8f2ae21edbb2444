//! Real-time tick streaming endpoint.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::stream::{TickGenerator, TickPacer};
use crate::unix_time_secs;

/// Upgrade `/realtime` connections into the tick streaming loop.
pub async fn realtime_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| stream_ticks(socket, state))
}

/// Per-subscriber streaming loop.
///
/// One iteration per tick interval; a delivery failure or client close
/// deregisters the subscriber and ends this loop only.
async fn stream_ticks(socket: WebSocket, state: AppState) {
    let now = unix_time_secs();
    let id = state.subscribers.register(now);
    tracing::info!(
        subscriber = id,
        total = state.subscribers.len(),
        "subscriber connected"
    );

    let mut generator = TickGenerator::new(state.config.stream.clone());
    let mut pacer = TickPacer::new(now);
    let mut interval = tokio::time::interval(state.config.stream.tick_interval);
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = unix_time_secs();
                if !pacer.poll(now) {
                    continue;
                }
                let tick = generator.next_tick(now);
                let payload = match serde_json::to_string(&tick) {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!(subscriber = id, %err, "tick serialization failed");
                        continue;
                    }
                };
                if sender.send(Message::Text(payload.into())).await.is_err() {
                    tracing::debug!(subscriber = id, "delivery failed, dropping subscriber");
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.subscribers.deregister(id);
    tracing::info!(
        subscriber = id,
        total = state.subscribers.len(),
        "subscriber disconnected"
    );
}
