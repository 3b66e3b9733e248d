//! Fire-and-forget background writer for catalog snapshots.
//!
//! # Invariants
//! - Callers never wait on a write; `schedule` only enqueues.
//! - Snapshots queued for the same key collapse to the newest one.
//! - Gateway failures are logged and dropped, never retried.

use crate::store::gateway::{GatewayError, PersistenceGateway};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{error, info, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const WRITER_THREAD_NAME: &str = "scout-catalog-writer";

enum WriterMessage {
    Write { key: String, blob: Vec<u8> },
    Flush(Sender<()>),
}

/// Handle to the writer thread. Dropping it drains the queue and joins.
pub(crate) struct BackgroundWriter {
    gateway: Arc<dyn PersistenceGateway>,
    tx: Option<Sender<WriterMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundWriter {
    /// Starts the writer thread.
    ///
    /// When the OS refuses a new thread, writes fall back to running inline.
    pub(crate) fn spawn(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let (tx, rx) = unbounded();
        let worker_gateway = Arc::clone(&gateway);
        let spawned = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run(worker_gateway, rx));

        match spawned {
            Ok(handle) => Self {
                gateway,
                tx: Some(tx),
                handle: Some(handle),
            },
            Err(err) => {
                error!(
                    "event=writer_start module=service status=error fallback=inline error={err}"
                );
                Self {
                    gateway,
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    /// Queues `blob` to overwrite `key`. Returns immediately.
    pub(crate) fn schedule(&self, key: &str, blob: Vec<u8>) {
        let Some(tx) = self.tx.as_ref() else {
            save_logged(self.gateway.as_ref(), key, &blob);
            return;
        };

        let message = WriterMessage::Write {
            key: key.to_string(),
            blob,
        };
        if let Err(err) = tx.send(message) {
            warn!(
                "event=catalog_persist module=service status=degraded fallback=inline error={}",
                GatewayError::WriterUnavailable
            );
            if let WriterMessage::Write { key, blob } = err.into_inner() {
                save_logged(self.gateway.as_ref(), &key, &blob);
            }
        }
    }

    /// Blocks until every write queued before this call reached the gateway.
    pub(crate) fn flush(&self) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        let (ack_tx, ack_rx) = bounded(1);
        if tx.send(WriterMessage::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("event=writer_stop module=service status=error reason=worker_panicked");
            } else {
                info!("event=writer_stop module=service status=ok");
            }
        }
    }
}

fn run(gateway: Arc<dyn PersistenceGateway>, rx: Receiver<WriterMessage>) {
    while let Ok(first) = rx.recv() {
        let mut pending: Vec<(String, Vec<u8>)> = Vec::new();
        let mut acks: Vec<Sender<()>> = Vec::new();

        for message in std::iter::once(first).chain(rx.try_iter()) {
            match message {
                WriterMessage::Write { key, blob } => {
                    match pending.iter_mut().find(|(queued, _)| *queued == key) {
                        Some(slot) => slot.1 = blob,
                        None => pending.push((key, blob)),
                    }
                }
                WriterMessage::Flush(ack) => acks.push(ack),
            }
        }

        for (key, blob) in &pending {
            save_logged(gateway.as_ref(), key, blob);
        }
        for ack in acks {
            let _ = ack.send(());
        }
    }
}

fn save_logged(gateway: &dyn PersistenceGateway, key: &str, blob: &[u8]) {
    match gateway.save(key, blob) {
        Ok(()) => info!(
            "event=catalog_persist module=service status=ok bytes={}",
            blob.len()
        ),
        Err(err) => warn!(
            "event=catalog_persist module=service status=error bytes={} error={}",
            blob.len(),
            err
        ),
    }
}
