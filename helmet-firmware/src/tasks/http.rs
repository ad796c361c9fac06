// HTTP Server Task - Serviert das Dashboard und den WebSocket
use core::future::pending;
use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_time::Duration;
use helmet_core::protocol::{encode_notification, parse_command};
use picoserve::{io::embedded_io_async, response::IntoResponse, response::ws, routing::get};

use crate::config::*;
use crate::web::INDEX_HTML;
use crate::{ControlCommandSender, Notification, NotificationChannel, NotificationSubscriber};

/// Response-Enum für WebSocket-Endpoint
/// Ermöglicht Rückgabe von entweder WebSocket-Upgrade oder HTTP-Fehler
enum WebSocketResponse {
    Upgrade(
        ws::UpgradedWebSocket<ws::UnspecifiedProtocol, ws::CallbackNotUsingState<WebSocketHandler>>,
    ),
    ServiceUnavailable,
}

impl IntoResponse for WebSocketResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        match self {
            WebSocketResponse::Upgrade(ws) => ws.write_to(connection, response_writer).await,
            WebSocketResponse::ServiceUnavailable => {
                picoserve::response::Response::new(
                    picoserve::response::StatusCode::new(503),
                    "Service Unavailable: Too many dashboards connected (max 10)",
                )
                .with_header("Retry-After", "5")
                .write_to(connection, response_writer)
                .await
            }
        }
    }
}

/// HTTP Server Task - läuft parallel zum Game Loop
///
/// - Serviert index.html auf GET /
/// - WebSocket-Endpoint auf /ws: Kommandos rein, Wörter und Logs raus
///
/// **Task Pool:** Diese Task wird 4x (HTTP_TASK_COUNT) gespawnt, damit
/// Seite und WebSocket gleichzeitig bedient werden können.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `notifications`: PubSub Channel, jeder WebSocket erstellt einen Subscriber
/// - `command_sender`: Channel Sender zum Game Loop
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    notifications: &'static NotificationChannel,
    command_sender: ControlCommandSender,
) {
    info!("HTTP: Server task {} starting on port 80...", task_id);

    let app = picoserve::Router::new().route("/", get(serve_html)).route(
        "/ws",
        get(
            |upgrade: picoserve::response::WebSocketUpgrade| async move {
                info!("HTTP: WebSocket upgrade requested");

                // Jeder Listener braucht einen eigenen Subscriber-Slot.
                // Sind alle belegt, bekommt der Client HTTP 503 statt Panic.
                match notifications.subscriber() {
                    Ok(subscriber) => {
                        let handler = WebSocketHandler {
                            command_sender,
                            subscriber,
                        };
                        WebSocketResponse::Upgrade(upgrade.on_upgrade(handler))
                    }
                    Err(_) => {
                        warn!("HTTP: No subscriber slots available, sending HTTP 503");
                        WebSocketResponse::ServiceUnavailable
                    }
                }
            },
        ),
    );

    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // task_id ermöglicht mehrere concurrent Server-Instanzen
    let _ = server
        .listen_and_serve(task_id, *stack, 80, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert das Dashboard
async fn serve_html() -> impl IntoResponse {
    picoserve::response::Response::new(picoserve::response::StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}

/// WebSocket-Handler State: Weg zum Game Loop und eigener Subscriber
struct WebSocketHandler {
    command_sender: ControlCommandSender,
    subscriber: NotificationSubscriber,
}

impl ws::WebSocketCallback for WebSocketHandler {
    async fn run<R: embedded_io_async::Read, W: embedded_io_async::Write<Error = R::Error>>(
        mut self,
        mut rx: ws::SocketRx<R>,
        mut tx: ws::SocketTx<W>,
    ) -> Result<(), W::Error> {
        info!("HTTP: WebSocket connection established");

        let mut buffer = [0u8; WEBSOCKET_BUFFER_SIZE];

        let close_reason = loop {
            // Gleichzeitig auf Nachrichten vom Browser und auf
            // Benachrichtigungen vom Game Loop warten
            match select(
                rx.next_message(&mut buffer, pending()),
                self.subscriber.next_message_pure(),
            )
            .await
            {
                Either::First(ws_result) => match ws_result?.ignore_never_b() {
                    Ok(ws::Message::Text(data)) => {
                        // Ungültige Nachrichten werden still verworfen, keine Antwort
                        match parse_command(data.as_bytes()) {
                            Ok(command) => {
                                info!("HTTP: Command received: {}", command);
                                self.command_sender.send(command).await;
                            }
                            Err(e) => {
                                info!("HTTP: Dropping message ({} bytes): {}", data.len(), e);
                            }
                        }
                    }
                    Ok(ws::Message::Binary(data)) => {
                        info!("HTTP: Binary message ignored ({} bytes)", data.len());
                    }
                    Ok(ws::Message::Ping(data)) => {
                        tx.send_pong(data).await?;
                    }
                    Ok(ws::Message::Pong(_)) => {}
                    Ok(ws::Message::Close(_reason)) => {
                        info!("HTTP: WebSocket close received");
                        break None;
                    }
                    Err(error) => {
                        warn!("HTTP: WebSocket error");
                        break Some((error.code(), "WebSocket Error"));
                    }
                },
                Either::Second(notification) => {
                    Self::forward(&mut tx, &notification).await?;
                }
            }
        };

        info!("HTTP: WebSocket connection closed");
        tx.close(close_reason).await
    }
}

impl WebSocketHandler {
    /// Serialisiert eine Benachrichtigung und sendet sie an diesen Client
    async fn forward<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        notification: &Notification,
    ) -> Result<(), W::Error> {
        let mut json_buffer = [0u8; JSON_NOTIFICATION_BUFFER_SIZE];
        let n = match encode_notification(notification, &mut json_buffer) {
            Ok(n) => n,
            Err(e) => {
                warn!("HTTP: Notification dropped: {}", e);
                return Ok(());
            }
        };

        // serde-json-core schreibt immer gültiges UTF-8
        match core::str::from_utf8(&json_buffer[..n]) {
            Ok(json) => tx.send_text(json).await,
            Err(_) => Ok(()),
        }
    }
}
