// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Single-assignment deferred result.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::call::Response;
use crate::errors::CallError;

/// Outcome carried by a [`Deferred`].
pub type Outcome = Result<Response, CallError>;

/// Observable state of a [`Deferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    Pending,
    Fulfilled,
    Rejected,
}

/// Future returned by the deferred form of a mirrored call.
///
/// Resolves to `Ok(Response)` or `Err(CallError)` exactly once. If every
/// [`Settler`] is dropped without settling (the host discarded the callback),
/// it resolves to [`CallError::Abandoned`].
#[derive(Debug)]
pub struct Deferred {
    path: String,
    receiver: oneshot::Receiver<Outcome>,
    settled: Option<Outcome>,
}

impl Deferred {
    /// Creates a pending deferred and the handle that settles it.
    pub fn channel(path: impl Into<String>) -> (Deferred, Settler) {
        let (sender, receiver) = oneshot::channel();
        let deferred = Deferred {
            path: path.into(),
            receiver,
            settled: None,
        };
        let settler = Settler {
            sender: Arc::new(Mutex::new(Some(sender))),
        };
        (deferred, settler)
    }

    /// Path of the mirrored method this result belongs to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reports the current state without waiting.
    pub fn state(&mut self) -> DeferredState {
        if self.settled.is_none() {
            match self.receiver.try_recv() {
                Ok(outcome) => self.settled = Some(outcome),
                Err(oneshot::error::TryRecvError::Empty) => return DeferredState::Pending,
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.settled = Some(Err(self.abandoned()))
                }
            }
        }

        match &self.settled {
            Some(Ok(_)) => DeferredState::Fulfilled,
            Some(Err(_)) => DeferredState::Rejected,
            None => DeferredState::Pending,
        }
    }

    fn abandoned(&self) -> CallError {
        CallError::Abandoned {
            path: self.path.clone(),
        }
    }
}

impl Future for Deferred {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(outcome) = self.settled.take() {
            return Poll::Ready(outcome);
        }

        let polled = Pin::new(&mut self.receiver).poll(cx);
        match polled {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(self.abandoned())),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Settles a [`Deferred`]; cloneable, first settlement wins.
#[derive(Debug, Clone)]
pub struct Settler {
    sender: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

impl Settler {
    /// Settles the deferred. Returns `false` if it was already settled.
    pub fn settle(&self, outcome: Outcome) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            // A dropped Deferred means nobody is listening; the call still counts as settled.
            Some(sender) => {
                let _ = sender.send(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
