use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::error::AdmissionError;
use crate::domain::PaymentRequest;

/// A payment waiting for a worker, with the number of dispatch cycles it
/// has already been through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPayment {
    pub request: PaymentRequest,
    pub attempt: u32,
}

impl QueuedPayment {
    /// A freshly admitted payment
    pub fn admitted(request: PaymentRequest) -> Self {
        Self {
            request,
            attempt: 0,
        }
    }

    /// The same payment after another failed cycle
    pub fn retried(self) -> Self {
        Self {
            request: self.request,
            attempt: self.attempt.saturating_add(1),
        }
    }
}

/// Bounded multi-producer/multi-consumer queue of pending payments
///
/// Producers never wait: `submit` fails fast with `QueueFull` when the
/// bound is reached. Consumers share the receiving half behind an async
/// mutex, so exactly one idle worker is parked in `recv` at a time and
/// each payment is handed to exactly one worker.
#[derive(Clone)]
pub struct AdmissionQueue {
    sender: mpsc::Sender<QueuedPayment>,
    receiver: Arc<Mutex<mpsc::Receiver<QueuedPayment>>>,
    capacity: usize,
}

impl AdmissionQueue {
    /// Create a queue holding at most `capacity` payments (minimum 1)
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            capacity,
        }
    }

    /// Admit a new payment without waiting
    pub fn submit(&self, request: PaymentRequest) -> Result<(), AdmissionError> {
        self.sender
            .try_send(QueuedPayment::admitted(request))
            .map_err(|e| match e {
                TrySendError::Full(_) => AdmissionError::QueueFull {
                    capacity: self.capacity,
                },
                TrySendError::Closed(_) => AdmissionError::Closed,
            })
    }

    /// Put a payment back for any worker to pick up.
    ///
    /// On failure the payment is handed back so the caller keeps ownership.
    pub fn requeue(&self, payment: QueuedPayment) -> Result<(), QueuedPayment> {
        self.sender.try_send(payment).map_err(|e| match e {
            TrySendError::Full(p) | TrySendError::Closed(p) => p,
        })
    }

    /// Wait for the next payment. Returns None once the queue is closed and drained.
    pub async fn next(&self) -> Option<QueuedPayment> {
        self.receiver.lock().await.recv().await
    }

    /// Payments currently waiting
    pub fn len(&self) -> usize {
        self.capacity - self.sender.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
