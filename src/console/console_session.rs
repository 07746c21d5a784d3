use crate::http_handler::http_request::request_common::HTTPRequestMethod;
use crate::http_handler::http_response::vss_action::VssActionResponse;
use crate::token::{Credential, SignError, SignerMode};
use crate::workbench::activity_log::ActivityLog;
use crate::workbench::dispatcher::{DispatchError, Dispatcher};
use crate::workbench::server_config::{Scheme, ServerConfig};
use crate::{error, info, warn};
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::{Mutex, RwLock};

const PROMPT: &str = "restbench> ";

const HELP: &str = "\
Server set-up:
  server <host> [port]     set the server address
  port <port>              set the server port
  scheme <http|https>      select the transport scheme
  docroot <path>           set the doc root (default vss/api/v1)
  config                   show the current configuration
Token signing:
  mode <rs256|hs256>       select the signing algorithm
  payload <text>           set the token payload (re-signs)
  secret <text>            set the shared secret (re-signs)
  key-file <path>          load a private key PEM (re-signs)
  token                    show the current signed token
Requests:
  method <GET|POST|PUT|SET> pick the method for free-form dispatch
  path <resource>          set the resource path field
  send                     dispatch method+path, outcome goes to the log
  authorize [token]        POST authorize?token=<signed or given token>
  get <signal>             read a signal value
  set <signal> <value>     write a signal value
  metadata <signal>        read signal metadata
Activity log:
  log                      list entries, newest first
  replay <n>               copy entry n's path into the path field
  cancel <id>              cancel an in-flight request
  help                     this text
  quit                     leave";

/// Thin adapter between operator input and the workbench core. All state
/// the web form used to hold (address fields, method selector, resource
/// path, credential inputs) lives here for the session.
pub(crate) struct ConsoleSession {
    config: Arc<RwLock<ServerConfig>>,
    log: Arc<Mutex<ActivityLog>>,
    dispatcher: Arc<Dispatcher>,
    credential: Credential,
    resource_path: String,
    method: HTTPRequestMethod,
}

impl ConsoleSession {
    pub(crate) fn new(config: ServerConfig) -> Self {
        let config = Arc::new(RwLock::new(config));
        let log = Arc::new(Mutex::new(ActivityLog::new()));
        let dispatcher =
            Arc::new(Dispatcher::new(Arc::clone(&config), Arc::clone(&log)));
        Self {
            config,
            log,
            dispatcher,
            credential: Credential::new(SignerMode::Asymmetric),
            resource_path: String::new(),
            method: HTTPRequestMethod::Get,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("workbench ready at {}", self.config.read().await.base_url());
        info!("type 'help' for the command list");
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{PROMPT}");
            let _ = std::io::stdout().flush();
            let Ok(Some(line)) = lines.next_line().await else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (command, rest) = match line.split_once(char::is_whitespace) {
                Some((command, rest)) => (command, rest.trim()),
                None => (line, ""),
            };
            if matches!(command, "quit" | "exit") {
                break;
            }
            self.handle(command, rest).await;
        }
    }

    async fn handle(&mut self, command: &str, rest: &str) {
        match command {
            "help" => println!("{HELP}"),
            "server" => self.cmd_server(rest).await,
            "port" => self.cmd_port(rest).await,
            "scheme" => self.cmd_scheme(rest).await,
            "docroot" => {
                self.config.write().await.set_doc_root(rest);
                info!("doc root set to '{rest}'");
            }
            "config" => self.cmd_config().await,
            "mode" => self.cmd_mode(rest),
            "payload" => report_signing(self.credential.set_payload(rest)),
            "secret" => report_signing(self.credential.set_key_material(rest)),
            "key-file" => self.cmd_key_file(rest).await,
            "token" => match self.credential.token() {
                Some(token) => println!("{token}"),
                None => warn!("no token signed yet, set payload and key material first"),
            },
            "method" => self.cmd_method(rest),
            "path" => {
                self.resource_path = rest.to_string();
                info!("resource path set to '{}'", self.resource_path);
            }
            "send" => self.cmd_send().await,
            "authorize" => self.cmd_authorize(rest).await,
            "get" => match self.dispatcher.signal_get(rest).await {
                Ok(response) => print_response(&response),
                Err(err) => report_dispatch_error(&err),
            },
            "set" => self.cmd_set(rest).await,
            "metadata" => match self.dispatcher.metadata(rest).await {
                Ok(response) => print_response(&response),
                Err(err) => report_dispatch_error(&err),
            },
            "log" => self.cmd_log().await,
            "replay" => self.cmd_replay(rest).await,
            "cancel" => self.cmd_cancel(rest).await,
            _ => warn!("unknown command '{command}', try 'help'"),
        }
    }

    async fn cmd_server(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let Some(host) = parts.next() else {
            warn!("usage: server <host> [port]");
            return;
        };
        let mut config = self.config.write().await;
        config.set_host(host);
        if let Some(port) = parts.next() {
            match port.parse::<u16>() {
                Ok(port) => config.set_port(port),
                Err(_) => warn!("ignoring unparsable port '{port}'"),
            }
        }
        info!("server set to {}", config.base_url());
    }

    async fn cmd_port(&mut self, rest: &str) {
        match rest.parse::<u16>() {
            Ok(port) => {
                self.config.write().await.set_port(port);
                info!("port set to {port}");
            }
            Err(_) => warn!("usage: port <1-65535>"),
        }
    }

    async fn cmd_scheme(&mut self, rest: &str) {
        match rest.parse::<Scheme>() {
            Ok(scheme) => {
                self.config.write().await.set_scheme(scheme);
                info!("scheme set to {scheme}");
            }
            Err(_) => warn!("usage: scheme <http|https>"),
        }
    }

    async fn cmd_config(&self) {
        let config = self.config.read().await;
        println!("  server    {}", config.base_url());
        println!("  method    {}", self.method);
        println!("  path      {}", self.resource_path);
        println!("  signing   {}", self.credential.mode());
        println!("  token     {}", if self.credential.token().is_some() { "signed" } else { "none" });
    }

    fn cmd_mode(&mut self, rest: &str) {
        match rest.parse::<SignerMode>() {
            Ok(mode) => report_signing(self.credential.set_mode(mode)),
            Err(_) => warn!("usage: mode <rs256|hs256>"),
        }
    }

    async fn cmd_key_file(&mut self, rest: &str) {
        match tokio::fs::read_to_string(rest).await {
            Ok(pem) => report_signing(self.credential.set_key_material(&pem)),
            Err(err) => error!("could not read '{rest}': {err}"),
        }
    }

    fn cmd_method(&mut self, rest: &str) {
        match rest.parse::<HTTPRequestMethod>() {
            Ok(method) => {
                self.method = method;
                info!("method set to {method}");
            }
            Err(_) => warn!("usage: method <GET|POST|PUT|SET>"),
        }
    }

    async fn cmd_send(&self) {
        match self.dispatcher.dispatch_resource(self.method, &self.resource_path).await {
            Ok(handle) => info!("request #{} dispatched", handle.request_id()),
            Err(err) => report_dispatch_error(&err),
        }
    }

    async fn cmd_authorize(&self, rest: &str) {
        let token = if rest.is_empty() { self.credential.token() } else { Some(rest) };
        let Some(token) = token else {
            error!("no signed token available, set payload and key material first");
            return;
        };
        match self.dispatcher.authorize(token).await {
            Ok(handle) => info!("request #{} dispatched", handle.request_id()),
            Err(err) => report_dispatch_error(&err),
        }
    }

    async fn cmd_set(&self, rest: &str) {
        let Some((signal, value)) = rest.split_once(char::is_whitespace) else {
            warn!("usage: set <signal> <value>");
            return;
        };
        match self.dispatcher.signal_set(signal, value.trim()).await {
            Ok(response) => print_response(&response),
            Err(err) => report_dispatch_error(&err),
        }
    }

    async fn cmd_log(&self) {
        let log = self.log.lock().await;
        if log.is_empty() {
            info!("activity log is empty");
            return;
        }
        for (index, entry) in log.entries().enumerate() {
            let line = entry.display_line();
            if entry.is_request() {
                println!("{index:>3} {line}");
            } else if entry.is_error() {
                println!("{index:>3} \x1b[31m{line}\x1b[0m");
            } else {
                println!("{index:>3} \x1b[32m{line}\x1b[0m");
            }
        }
    }

    async fn cmd_replay(&mut self, rest: &str) {
        let Ok(index) = rest.parse::<usize>() else {
            warn!("usage: replay <entry number from 'log'>");
            return;
        };
        let replayed = self.log.lock().await.replay(index).map(str::to_string);
        match replayed {
            Some(path) => {
                self.resource_path = path;
                info!("resource path set to '{}'", self.resource_path);
            }
            None => warn!("entry {index} is not a request entry"),
        }
    }

    async fn cmd_cancel(&self, rest: &str) {
        let Ok(id) = rest.parse::<u64>() else {
            warn!("usage: cancel <request id>");
            return;
        };
        if self.dispatcher.cancel(id).await {
            info!("request #{id} cancelled");
        } else {
            warn!("no in-flight request #{id}");
        }
    }

}

/// Reports the outcome of a credential mutation. A failed re-sign keeps the
/// previous token, so the operator only sees the notice.
fn report_signing(result: Result<&str, SignError>) {
    match result {
        Ok(token) => info!("token signed: {token}"),
        Err(err) => error!("signing failed ({err}), previous token kept"),
    }
}

fn print_response(response: &VssActionResponse) {
    info!("{}", response.summary());
    if let Some(request_id) = response.request_id() {
        println!("  requestId  {request_id}");
    }
    if let Some(timestamp) = response.timestamp() {
        println!("  timestamp  {timestamp}");
    }
    if let Some(tokens) = response.tokens() {
        println!("  tokens     {tokens}");
    }
    if let Some(error) = response.error() {
        println!("  error      {error}");
    }
}

fn report_dispatch_error(err: &DispatchError) {
    match err {
        DispatchError::MissingServer => {
            error!("no server configured, use 'server <host> [port]' first");
        }
        DispatchError::Http(err) => error!("{}", err.message()),
    }
}
