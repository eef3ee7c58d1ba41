// WebSocket test utilities: a real server on a random port and a client.

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use futures::{SinkExt, StreamExt};
use hideseek_backend::middleware::request_trace::RequestTrace;
use hideseek_backend::middleware::structured_logger::StructuredLogger;
use hideseek_backend::routes;
use hideseek_backend::state::app_state::AppState;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Start a single-worker HTTP server with the production routes.
///
/// Returns the handle used to stop it and the bound address.
pub async fn start_test_server(
    state: AppState,
) -> Result<(ServerHandle, SocketAddr), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    tokio::spawn(server);
    Ok((handle, addr))
}

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to `/api/ws`, retrying until the server accepts or `timeout` passes.
    pub async fn connect(
        addr: SocketAddr,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let url = format!("ws://{addr}/api/ws");
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url.as_str()).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send_text(&value.to_string()).await
    }

    pub async fn send_text(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    /// Next text frame as JSON, skipping control frames. `None` once the
    /// server closes the connection.
    pub async fn recv_json(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?;
            match next.transpose()? {
                Some(Message::Text(text)) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Some(Message::Close(_)) | None => return Ok(None),
                Some(_) => continue,
            }
        }
    }

    /// Skip frames until a `view` at or above `min_version` arrives.
    pub async fn recv_view_at_least(
        &mut self,
        min_version: i64,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            let msg = self
                .recv_json(timeout)
                .await?
                .ok_or("Connection closed before the expected view")?;
            if msg["type"] == "view" && msg["version"].as_i64().unwrap_or(-1) >= min_version {
                return Ok(msg);
            }
        }
    }

    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }
}
