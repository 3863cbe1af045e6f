// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Running a [`SearchService`] on its own thread.
//!
//! ```text
//!  caller                          worker thread (current-thread runtime)
//!  ──────                          ─────────────────────────────────────
//!  handle.send(Inbound) ──mpsc──▶  service.handle(msg).await
//!  handle.recv()        ◀──mpsc──  Outbound
//! ```
//!
//! The service is owned by the worker thread and nothing else, so there are no
//! locks. Messages are handled strictly in the order they arrive; a slow
//! dataset fetch holds up every query queued behind it.

use super::message::{Inbound, Outbound};
use super::service::SearchService;
use super::source::DatasetSource;
use crate::error::{Error, Result};
use crate::text::TextIndex;
use std::thread::JoinHandle;
use tokio::sync::mpsc;

/// Spawns search workers.
pub struct Worker;

impl Worker {
    /// Move `service` onto a new thread and start serving.
    pub fn spawn<T, S>(service: SearchService<T, S>) -> WorkerHandle
    where
        T: TextIndex + Send + 'static,
        S: DatasetSource + Send + 'static,
    {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let thread = std::thread::spawn(move || run(service, inbound_rx, outbound_tx));
        WorkerHandle {
            inbound: Some(inbound_tx),
            outbound: outbound_rx,
            thread: Some(thread),
        }
    }
}

fn run<T, S>(
    mut service: SearchService<T, S>,
    mut inbound: mpsc::UnboundedReceiver<Inbound>,
    outbound: mpsc::UnboundedSender<Outbound>,
) where
    T: TextIndex,
    S: DatasetSource,
{
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(error = %err, "failed to start search worker runtime");
            return;
        }
    };

    runtime.block_on(async move {
        tracing::debug!("search worker started");
        while let Some(message) = inbound.recv().await {
            let reply = service.handle(message).await;
            if outbound.send(reply).is_err() {
                break;
            }
        }
        tracing::debug!("search worker stopped");
    });
}

/// The caller's end of a running worker.
///
/// Dropping the handle stops the worker once it finishes the message it is on.
pub struct WorkerHandle {
    inbound: Option<mpsc::UnboundedSender<Inbound>>,
    outbound: mpsc::UnboundedReceiver<Outbound>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queue a message. Fails once the worker is gone or closed.
    pub fn send(&self, message: Inbound) -> Result<()> {
        self.inbound
            .as_ref()
            .ok_or(Error::WorkerClosed)?
            .send(message)
            .map_err(|_| Error::WorkerClosed)
    }

    /// Next reply, or `None` once the worker has stopped and the queue is
    /// drained.
    pub async fn recv(&mut self) -> Option<Outbound> {
        self.outbound.recv().await
    }

    /// Blocking [`recv`](Self::recv). Panics if called from inside an async
    /// runtime.
    pub fn blocking_recv(&mut self) -> Option<Outbound> {
        self.outbound.blocking_recv()
    }

    /// A reply if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Outbound> {
        self.outbound.try_recv().ok()
    }

    /// Stop accepting messages. Replies to everything already queued are
    /// still delivered.
    pub fn close(&mut self) {
        self.inbound = None;
    }

    /// Close and wait for the worker thread to exit.
    pub fn shutdown(mut self) {
        self.close();
        // unbounded sends never block, so the join can't deadlock
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("search worker panicked");
            }
        }
    }
}
