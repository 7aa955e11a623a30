//! TCP Server
//!
//! Accepts connections and dispatches them to session workers.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::config::Config;
use crate::error::Result;
use crate::store::ColumnStore;

use super::Session;

/// Poll interval of the accept loop while idle or draining
const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// Signals a running server to stop accepting and drain
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Request a graceful shutdown
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

/// TCP server for the reference store
pub struct Server {
    /// Server configuration
    config: Config,

    /// Shared column store
    store: Arc<ColumnStore>,

    /// Bound listener (non-blocking, polled by the accept loop)
    listener: TcpListener,

    /// Shutdown flag checked by the accept loop
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Bind the listen address from the config
    ///
    /// Binding is separate from running so callers can learn the actual
    /// address first (the config may name port 0).
    pub fn bind(config: Config, store: Arc<ColumnStore>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            store,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the actual bound address
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Get a handle that can stop this server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Run the server (blocking)
    ///
    /// Spawns the session worker pool, then accepts connections until a
    /// shutdown is signalled. In-flight sessions finish before return.
    pub fn run(self) -> Result<()> {
        let worker_count = self.config.worker_threads.max(1);
        let (tx, rx): (Sender<TcpStream>, Receiver<TcpStream>) = bounded(worker_count * 2);

        tracing::info!(
            "Listening on {} with {} session workers",
            self.listener.local_addr()?,
            worker_count
        );

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            workers.push(Self::spawn_worker(
                id,
                rx.clone(),
                Arc::clone(&self.store),
                self.config.read_timeout_ms,
                self.config.write_timeout_ms,
            )?);
        }
        drop(rx);

        // Accept loop: non-blocking listener polled against the shutdown flag
        while !self.shutdown.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    tracing::debug!("Accepted connection from {}", addr);
                    // Accepted sockets must block; only the listener polls
                    stream.set_nonblocking(false)?;
                    if tx.send(stream).is_err() {
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(ACCEPT_POLL);
                }
            }
        }

        tracing::info!("Shutting down, draining sessions");

        // Closing the channel stops idle workers; busy ones finish first
        drop(tx);
        for worker in workers {
            let _ = worker.join();
        }

        Ok(())
    }

    /// Spawn one session worker draining the connection channel
    fn spawn_worker(
        id: usize,
        rx: Receiver<TcpStream>,
        store: Arc<ColumnStore>,
        read_timeout_ms: u64,
        write_timeout_ms: u64,
    ) -> Result<thread::JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(format!("session-worker-{}", id))
            .spawn(move || {
                while let Ok(stream) = rx.recv() {
                    let session = Session::new(stream, Arc::clone(&store)).and_then(|mut s| {
                        s.set_timeouts(read_timeout_ms, write_timeout_ms)?;
                        Ok(s)
                    });

                    match session {
                        Ok(mut session) => {
                            if let Err(e) = session.handle() {
                                tracing::warn!(
                                    "Session from {} ended with error: {}",
                                    session.peer_addr(),
                                    e
                                );
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Failed to set up session: {}", e);
                        }
                    }
                }
            })?;

        Ok(handle)
    }
}
