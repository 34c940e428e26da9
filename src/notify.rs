//! Transient notifications ("toasts") that dismiss themselves after a fixed time.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::error::NotifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: ToastKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }
}

#[derive(Debug)]
pub enum ToastRequest {
    Push(Notification),
    Active {
        respond_to: oneshot::Sender<Vec<Notification>>,
    },
}

pub struct ToastService {
    receiver: mpsc::Receiver<ToastRequest>,
    active: VecDeque<(Instant, Notification)>,
    duration: Duration,
}

impl ToastService {
    pub fn new(buffer_size: usize, duration: Duration) -> (Self, Toaster) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            active: VecDeque::new(),
            duration,
        };
        (service, Toaster::new(sender))
    }

    #[instrument(name = "toast_service", skip(self))]
    pub async fn run(mut self) {
        info!("ToastService starting");
        while let Some(msg) = self.receiver.recv().await {
            self.prune(Instant::now());
            match msg {
                ToastRequest::Push(notification) => {
                    info!(kind = ?notification.kind, message = %notification.message, "Toast shown");
                    self.active.push_back((Instant::now() + self.duration, notification));
                }
                ToastRequest::Active { respond_to } => {
                    let shown = self.active.iter().map(|(_, n)| n.clone()).collect();
                    let _ = respond_to.send(shown);
                }
            }
        }
        info!("ToastService stopped");
    }

    // Toasts are pushed with a constant duration, so expiry order is push order.
    fn prune(&mut self, now: Instant) {
        while let Some((expires_at, _)) = self.active.front() {
            if *expires_at > now {
                break;
            }
            if let Some((_, dismissed)) = self.active.pop_front() {
                debug!(message = %dismissed.message, "Toast dismissed");
            }
        }
    }
}

/// Cloneable handle for showing notifications.
#[derive(Clone)]
pub struct Toaster {
    sender: mpsc::Sender<ToastRequest>,
}

impl Toaster {
    pub fn new(sender: mpsc::Sender<ToastRequest>) -> Self {
        Self { sender }
    }

    pub async fn push(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sender
            .send(ToastRequest::Push(notification))
            .await
            .map_err(|_| NotifyError::ActorCommunicationError("Toaster closed".to_string()))
    }

    /// Notifications that have not yet been dismissed, oldest first.
    pub async fn active(&self) -> Result<Vec<Notification>, NotifyError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ToastRequest::Active { respond_to })
            .await
            .map_err(|_| NotifyError::ActorCommunicationError("Toaster closed".to_string()))?;
        response
            .await
            .map_err(|_| NotifyError::ActorCommunicationError("Toaster dropped".to_string()))
    }
}
