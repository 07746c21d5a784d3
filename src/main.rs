#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod console;
mod http_handler;
mod logger;
mod token;
mod workbench;

use crate::console::ConsoleSession;
use crate::workbench::server_config::ServerConfig;
use std::env;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let addr_var = env::var("VSS_SERVER_ADDR");
    let config = addr_var
        .as_ref()
        .map_or_else(|_| ServerConfig::default(), |addr| ServerConfig::with_addr(addr));
    ConsoleSession::new(config).run().await;
}
