use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::view::{project, ChallengeFilter};
use crate::services::state_feed::SyncedState;
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One websocket client. Pushes a fresh projected view for every new feed
/// snapshot, using the filter this client last selected.
pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    filter: ChallengeFilter,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            filter: ChallengeFilter::All,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    fn send_view(&self, snapshot: &SyncedState, ctx: &mut ws::WebsocketContext<Self>) {
        let view = project(
            &snapshot.state,
            snapshot.version,
            self.app_state.setup(),
            self.filter,
        );
        Self::send_json(
            ctx,
            &ServerMsg::View {
                version: snapshot.version,
                view,
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    Self::send_error(ctx, ErrorCode::BadProtocol, "Unsupported protocol version");
                    ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Protocol)));
                    ctx.stop();
                    return;
                }
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                    },
                );
            }
            ClientMsg::SetFilter { filter } => match filter.parse::<ChallengeFilter>() {
                Ok(filter) => {
                    debug!(conn_id = %self.conn_id, filter = %filter, "[WS SESSION] filter changed");
                    self.filter = filter;
                    let snapshot = self.app_state.feed.current();
                    self.send_view(&snapshot, ctx);
                }
                Err(e) => Self::send_error(ctx, ErrorCode::InvalidFilter, e.to_string()),
            },
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");

        let snapshot = self.app_state.feed.current();
        self.send_view(&snapshot, ctx);
        ctx.add_stream(WatchStream::from_changes(self.app_state.feed.watch()));

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<SyncedState> for WsSession {
    fn handle(&mut self, snapshot: SyncedState, ctx: &mut Self::Context) {
        self.send_view(&snapshot, ctx);
    }

    fn finished(&mut self, _ctx: &mut Self::Context) {
        debug!(conn_id = %self.conn_id, "[WS SESSION] state feed ended");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(e) => Self::send_error(ctx, ErrorCode::BadRequest, format!("Malformed message: {e}")),
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Binary(_)) => {
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary frames are not supported");
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.stop();
            }
        }
    }
}
