use super::activity_log::ActivityLog;
use super::json_view;
use super::server_config::ServerConfig;
use crate::http_handler::common::HTTPError;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::authorize_post::AuthorizeRequest;
use crate::http_handler::http_request::metadata_get::MetadataGetRequest;
use crate::http_handler::http_request::request_common::{
    HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType,
};
use crate::http_handler::http_request::resource::ResourceRequest;
use crate::http_handler::http_request::signal_get::SignalGetRequest;
use crate::http_handler::http_request::signal_set_put::SignalSetRequest;
use crate::http_handler::http_response::response_common::NO_RESPONSE_MSG;
use crate::http_handler::http_response::vss_action::VssActionResponse;
use crate::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use strum_macros::Display;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Display)]
pub(crate) enum DispatchError {
    /// No server host/port configured; nothing was dispatched or logged.
    MissingServer,
    Http(HTTPError),
}

impl std::error::Error for DispatchError {}

impl From<HTTPError> for DispatchError {
    fn from(value: HTTPError) -> Self { Self::Http(value) }
}

/// Identity and cancellation of a single dispatched request. Each dispatch
/// owns its own context, so concurrent dispatches never clobber each other.
struct RequestContext {
    id: u64,
    cancel: CancellationToken,
}

impl RequestContext {
    async fn cancelled(&self) { self.cancel.cancelled().await }
}

/// Handle to an in-flight dispatch: the request id for `cancel`, and the
/// task handle so callers can await completion when they want to.
pub(crate) struct DispatchHandle {
    request_id: u64,
    task: JoinHandle<()>,
}

impl DispatchHandle {
    pub(crate) fn request_id(&self) -> u64 { self.request_id }
    pub(crate) async fn finished(self) { let _ = self.task.await; }
}

type InFlightMap = Arc<Mutex<HashMap<u64, CancellationToken>>>;

/// Issues requests built from the current `ServerConfig` and records every
/// outcome in the `ActivityLog`. Free-form and authorize dispatches run as
/// independent tasks; the typed VSS calls are awaited in place.
pub(crate) struct Dispatcher {
    config: Arc<RwLock<ServerConfig>>,
    log: Arc<Mutex<ActivityLog>>,
    next_request_id: AtomicU64,
    in_flight: InFlightMap,
}

impl Dispatcher {
    pub(crate) fn new(config: Arc<RwLock<ServerConfig>>, log: Arc<Mutex<ActivityLog>>) -> Self {
        Self {
            config,
            log,
            next_request_id: AtomicU64::new(0),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Dispatches the configured method against a free-form resource path.
    /// Returns as soon as the request task is running; the outcome lands in
    /// the activity log when the request reaches a terminal state.
    pub(crate) async fn dispatch_resource(
        &self,
        method: HTTPRequestMethod,
        path: &str,
    ) -> Result<DispatchHandle, DispatchError> {
        let client = self.client_from_config().await?;
        let ctx = self.register_context().await;
        let request_id = ctx.id;
        let request = ResourceRequest { path: path.to_string(), method };
        let log = Arc::clone(&self.log);
        let in_flight = Arc::clone(&self.in_flight);

        let task = tokio::spawn(async move {
            log.lock().await.log_request(method, &request.path);
            let result = tokio::select! {
                () = ctx.cancelled() => {
                    log.lock()
                        .await
                        .log_response(None, &format!("request #{request_id} cancelled"));
                    in_flight.lock().await.remove(&request_id);
                    return;
                }
                result = request.send_request(&client) => result,
            };
            match result {
                Ok(exchange) => {
                    if exchange.is_success() {
                        match json_view::render(exchange.body()) {
                            Ok(view) => info!("response #{request_id}:\n{view}"),
                            Err(err) => warn!("response #{request_id}: {err}"),
                        }
                    }
                    let message = if exchange.body().is_empty() {
                        NO_RESPONSE_MSG
                    } else {
                        exchange.body()
                    };
                    log.lock().await.log_response(Some(exchange.status()), message);
                }
                Err(err) => {
                    log.lock().await.log_response(err.status(), &err.message());
                }
            }
            in_flight.lock().await.remove(&request_id);
        });

        Ok(DispatchHandle { request_id, task })
    }

    /// The authorize variant: the resource path is replaced entirely by
    /// `authorize?token=<signed token>`.
    pub(crate) async fn authorize(&self, token: &str) -> Result<DispatchHandle, DispatchError> {
        let client = self.client_from_config().await?;
        let ctx = self.register_context().await;
        let request_id = ctx.id;
        let request = AuthorizeRequest { token: token.to_string() };
        let log = Arc::clone(&self.log);
        let in_flight = Arc::clone(&self.in_flight);

        let task = tokio::spawn(async move {
            log.lock().await.log_request(request.request_method(), &request.endpoint());
            let result = tokio::select! {
                () = ctx.cancelled() => {
                    log.lock()
                        .await
                        .log_response(None, &format!("request #{request_id} cancelled"));
                    in_flight.lock().await.remove(&request_id);
                    return;
                }
                result = request.send_request(&client) => result,
            };
            match result {
                Ok(response) => {
                    info!("response #{request_id}: {}", response.summary());
                    log.lock().await.log_response(Some(200), &response.summary());
                }
                Err(err) => {
                    log.lock().await.log_response(err.status(), &err.message());
                }
            }
            in_flight.lock().await.remove(&request_id);
        });

        Ok(DispatchHandle { request_id, task })
    }

    /// Reads a signal value, awaited in place.
    pub(crate) async fn signal_get(
        &self,
        signal: &str,
    ) -> Result<VssActionResponse, DispatchError> {
        let request = SignalGetRequest { signal: signal.to_string() };
        self.send_typed(&request).await
    }

    /// Writes a signal value, awaited in place.
    pub(crate) async fn signal_set(
        &self,
        signal: &str,
        value: &str,
    ) -> Result<VssActionResponse, DispatchError> {
        let request = SignalSetRequest { signal: signal.to_string(), value: value.to_string() };
        self.send_typed(&request).await
    }

    /// Reads signal metadata, awaited in place.
    pub(crate) async fn metadata(
        &self,
        signal: &str,
    ) -> Result<VssActionResponse, DispatchError> {
        let request = MetadataGetRequest { signal: signal.to_string() };
        self.send_typed(&request).await
    }

    /// Cancels the in-flight request with the given id. Returns whether such
    /// a request existed.
    pub(crate) async fn cancel(&self, request_id: u64) -> bool {
        match self.in_flight.lock().await.get(&request_id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    async fn send_typed<R>(&self, request: &R) -> Result<VssActionResponse, DispatchError>
    where R: NoBodyHTTPRequestType<Response = VssActionResponse> {
        let client = self.client_from_config().await?;
        self.log.lock().await.log_request(request.request_method(), &request.endpoint());
        let result = request.send_request(&client).await;
        {
            let mut log = self.log.lock().await;
            match &result {
                Ok(response) => log.log_response(Some(200), &response.summary()),
                Err(err) => log.log_response(err.status(), &err.message()),
            }
        }
        result.map_err(DispatchError::from)
    }

    async fn client_from_config(&self) -> Result<HTTPClient, DispatchError> {
        let config = self.config.read().await;
        if !config.has_server() {
            return Err(DispatchError::MissingServer);
        }
        Ok(HTTPClient::new(&config.base_url()))
    }

    async fn register_context(&self) -> RequestContext {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed) + 1;
        let cancel = CancellationToken::new();
        self.in_flight.lock().await.insert(id, cancel.clone());
        RequestContext { id, cancel }
    }
}
