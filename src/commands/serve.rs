//! Serve command
//!
//! Starts the HTTP listener with the editor API bound to an in-memory runtime.

use std::path::Path;
use std::sync::Arc;

use log::info;

use flow_editor_api::adapters::memory::MemoryRuntime;
use flow_editor_api::api::EditorApi;
use flow_editor_api::config::EditorConfig;
use flow_editor_api::core::RuntimeHandle;
use flow_editor_api::server::ApiServer;

/// Serve the editor API until interrupted
pub fn serve(config: Option<&Path>, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load()?,
    };
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let runtime = RuntimeHandle::from_shared(Arc::new(MemoryRuntime::new()));
    let api = Arc::new(EditorApi::init(&config, runtime));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = ApiServer::bind(&config.server, api)?;
        let shutdown = server.shutdown_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutting down");
                shutdown.shutdown();
            }
        });

        let addr = server
            .local_addr()
            .map_or_else(|| config.server.bind_addr(), |addr| addr.to_string());
        println!("Serving the editor API on http://{addr}{}", config.server.prefix);
        println!("Press Ctrl+C to stop");
        server.run().await
    })
}
