//! Server module
//!
//! Listener setup, the accept loop, connection serving and graceful shutdown.

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config;
use crate::logger;
use connection::accept_connection;

pub use listener::create_listener;

/// How often the drain loop re-checks the connection counter
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` resolves, then wait for active
/// connections to finish, bounded by the configured write timeout.
///
/// Each connection is a `tokio::spawn`ed task, so it can run on any runtime
/// worker thread.
pub async fn run(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: impl Future<Output = ()>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = &mut shutdown => break,
        }
    }

    // Stop accepting before draining
    drop(listener);

    let deadline = tokio::time::Instant::now()
        + Duration::from_secs(state.config.performance.write_timeout);
    while active_connections.load(Ordering::SeqCst) > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(DRAIN_POLL).await;
    }

    logger::log_shutdown(active_connections.load(Ordering::SeqCst));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::store::{MemoryStore, NewCompany};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn state() -> Arc<AppState> {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(dir.path().join("none").to_str().unwrap()).unwrap();
        config.logging.access_log = false;
        config.performance.write_timeout = 1;

        let mut store = MemoryStore::default();
        store
            .insert_company(NewCompany::new("Acme", "hello@acme.test"))
            .unwrap();
        Arc::new(AppState::with_store(config, Arc::new(store)).unwrap())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_serves_request_and_shuts_down() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(run(listener, state(), async {
            let _ = rx.await;
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /clients/ HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.starts_with("HTTP/1.1 200"));
        assert!(text.contains("x-template: clients/companies_list.html"));
        assert!(text.contains("Acme"));

        tx.send(()).unwrap();
        server.await.unwrap();
    }
}
