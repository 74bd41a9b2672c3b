//! WebSocket server: accept loop and per-connection sessions.
//!
//! Each accepted connection gets:
//!
//! - a **reader loop** (this task) that parses JSON frames into
//!   [`ClientMsg`] and hands them to the connection's [`SessionSupervisor`];
//! - a **writer task** that drains the session's outbound channel into text
//!   frames and pings the client every `ping_interval`.
//!
//! A connection that has not completed the WebSocket handshake within
//! `connect_timeout` is dropped before a session exists.
//!
//! A session ends when the client closes, the socket errors, nothing has been
//! heard for `ping_timeout`, or the server shuts down.  In every case the
//! supervisor is told to disconnect, which cancels the running job.
//!
//! Malformed frames are logged and ignored; they never end the session.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use sortstream_core::AlgorithmRegistry;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{accept_async_with_config, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{Outbox, SessionSupervisor};
use crate::domain::{ClientMsg, ServerConfig, ServerMsg};

/// Outbound events buffered per session before a job has to wait.
const OUTBOUND_CAPACITY: usize = 64;

type WsSink = SplitSink<WebSocketStream<TcpStream>, WsMessage>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission).
pub async fn run_server(config: ServerConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await.with_context(|| {
        format!(
            "failed to bind {} (is another server already using this port?)",
            config.bind_addr
        )
    })?;
    serve(listener, config, shutdown).await
}

/// Accepts connections on an already-bound `listener` until `shutdown` is
/// cancelled.  Tests bind port 0 and call this directly.
pub async fn serve(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let local_addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    let registry = Arc::new(AlgorithmRegistry::standard(
        config.limits.max_counting_range,
    ));

    info!("Sort visualization server listening on ws://{local_addr}");
    info!("Available sorting algorithms: {}", registry.keys().join(", "));

    let config = Arc::new(config);
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("shutdown requested; no longer accepting connections");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer_addr)) => {
                    let config = Arc::clone(&config);
                    let registry = Arc::clone(&registry);
                    let shutdown = shutdown.child_token();
                    tokio::spawn(async move {
                        handle_client(stream, peer_addr, config, registry, shutdown).await;
                    });
                }
                Err(e) => error!("accept error: {e}"),
            }
        }
    }
    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

async fn handle_client(
    stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
    registry: Arc<AlgorithmRegistry>,
    shutdown: CancellationToken,
) {
    let session_id = Uuid::new_v4();
    match run_session(stream, peer_addr, session_id, config, registry, shutdown).await {
        Ok(()) => info!("Client disconnected: {session_id} ({peer_addr})"),
        Err(e) => warn!("Client {session_id} ({peer_addr}) disconnected with error: {e:#}"),
    }
}

async fn run_session(
    stream: TcpStream,
    peer_addr: SocketAddr,
    session_id: Uuid,
    config: Arc<ServerConfig>,
    registry: Arc<AlgorithmRegistry>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let mut ws_config = WebSocketConfig::default();
    ws_config.max_message_size = Some(config.max_message_size);
    ws_config.max_frame_size = Some(config.max_message_size);

    let ws_stream = timeout(
        config.connect_timeout,
        accept_async_with_config(stream, Some(ws_config)),
    )
    .await
    .with_context(|| {
        format!(
            "WebSocket handshake with {peer_addr} timed out after {:?}",
            config.connect_timeout
        )
    })?
    .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    info!("Client connected: {session_id} ({peer_addr})");

    let (ws_tx, mut ws_rx) = ws_stream.split();
    let (out_tx, out_rx) = mpsc::channel::<ServerMsg>(OUTBOUND_CAPACITY);
    // Only ever locked for a load or a store, never across an await, so a
    // blocking mutex is enough and the writer can read it without yielding.
    let last_seen = Arc::new(Mutex::new(Instant::now()));

    let mut writer = tokio::spawn(write_frames(
        ws_tx,
        out_rx,
        session_id,
        config.ping_interval,
        config.ping_timeout,
        Arc::clone(&last_seen),
    ));

    let mut supervisor = SessionSupervisor::new(
        session_id,
        registry,
        config.limits.clone(),
        Outbox::new(out_tx),
    );

    let result = loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break Ok(()),
            _ = &mut writer => {
                debug!("session {session_id}: writer ended");
                break Ok(());
            }
            frame = ws_rx.next() => frame,
        };

        let msg = match frame {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) | None => break Ok(()),
            Some(Err(e)) => break Err(e).context("WebSocket read failed"),
        };

        // Any inbound frame, pongs included, counts as liveness.
        if let Ok(mut seen) = last_seen.lock() {
            *seen = Instant::now();
        }

        match msg {
            WsMessage::Text(text) => match serde_json::from_str::<ClientMsg>(&text) {
                Ok(event) => {
                    if supervisor.handle(event).await.is_err() {
                        break Ok(());
                    }
                }
                Err(e) => debug!("session {session_id}: ignoring malformed frame: {e}"),
            },
            WsMessage::Binary(_) => debug!("session {session_id}: binary frame ignored"),
            WsMessage::Close(_) => break Ok(()),
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
        }
    };

    supervisor.disconnect().await;
    writer.abort();
    result
}

/// Drains `rx` into text frames and keeps the connection alive with pings.
///
/// # Parameters
///
/// - `ping_interval`: time between pings, which is also how often idleness
///   is checked.
/// - `ping_timeout`: the writer closes the sink once `last_seen` is older
///   than this; the reader loop notices the writer ending and tears the
///   session down.
/// - `last_seen`: stamped by the reader loop on every inbound frame.
async fn write_frames(
    mut sink: WsSink,
    mut rx: mpsc::Receiver<ServerMsg>,
    session_id: Uuid,
    ping_interval: Duration,
    ping_timeout: Duration,
    last_seen: Arc<Mutex<Instant>>,
) {
    let mut ticker = interval(ping_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first ping is due one
    // interval after the handshake.
    ticker.tick().await;

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(msg) = msg else { break };
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("session {session_id}: failed to encode {}: {e}", msg.type_name());
                        continue;
                    }
                };
                if let Err(e) = sink.send(WsMessage::Text(json)).await {
                    debug!("session {session_id}: send failed: {e}");
                    break;
                }
            }
            _ = ticker.tick() => {
                let idle = last_seen
                    .lock()
                    .map(|seen| seen.elapsed())
                    .unwrap_or_default();
                if idle > ping_timeout {
                    warn!("session {session_id}: no traffic for {idle:?}; closing");
                    break;
                }
                if sink.send(WsMessage::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = sink.close().await;
}
