//! Outbound status notifications.
//!
//! A [`StatusNotifier`] is told about every committed status change except placement.
//! Notifying is fire-and-forget: the call must not block and cannot fail the transition
//! that triggered it.

use crate::model::{OrderId, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// An order entered `status` at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChanged {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
}

impl StatusChanged {
    pub fn now(order_id: OrderId, status: OrderStatus) -> Self {
        Self {
            order_id,
            status,
            at: Utc::now(),
        }
    }
}

/// Receives status changes after they commit.
pub trait StatusNotifier: Send + Sync {
    fn notify(&self, change: StatusChanged);
}

/// Writes every change to the log. The default notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl StatusNotifier for TracingNotifier {
    fn notify(&self, change: StatusChanged) {
        info!(
            order_id = %change.order_id,
            status = %change.status,
            code = change.status.code(),
            "Order status changed"
        );
    }
}

/// Forwards changes into a bounded channel for an outer layer to consume.
///
/// When the channel is full or the receiver is gone the change is dropped with a
/// warning; the sender never waits.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<StatusChanged>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<StatusChanged>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl StatusNotifier for ChannelNotifier {
    fn notify(&self, change: StatusChanged) {
        if let Err(e) = self.sender.try_send(change) {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "full",
                mpsc::error::TrySendError::Closed(_) => "closed",
            };
            warn!(
                order_id = %change.order_id,
                status = %change.status,
                reason,
                "Status notification dropped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_forwards_and_drops() {
        let (notifier, mut receiver) = ChannelNotifier::new(1);
        let first = StatusChanged::now(OrderId(1), OrderStatus::Ready);
        notifier.notify(first);
        // full: dropped, not blocked
        notifier.notify(StatusChanged::now(OrderId(1), OrderStatus::OnTheWay));

        assert_eq!(receiver.recv().await, Some(first));
        assert!(receiver.try_recv().is_err());

        drop(receiver);
        notifier.notify(StatusChanged::now(OrderId(2), OrderStatus::Ready));
    }

    #[test]
    fn test_change_serializes_status_as_code() {
        let change = StatusChanged::now(OrderId(5), OrderStatus::Delivered);
        let json = serde_json::to_value(change).unwrap();
        assert_eq!(json["order_id"], 5);
        assert_eq!(json["status"], 4);
    }
}
