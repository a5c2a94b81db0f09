// src/mix/events.rs
//! The live status channel a mix reports over.

use crate::types::BowlId;
use serde::Serialize;
use tokio::sync::mpsc;

/// Every event a client can observe from a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum MixEvent {
    /// Whether a mix is in flight.
    Busy(bool),
    /// Advisory progress narration.
    Message(String),
    /// A user-visible failure. Terminal for the mix that sent it.
    Alert(String),
    /// A creation was published and appended to the bowl. Terminal.
    CreationAdded {
        #[serde(rename = "bowlId")]
        bowl_id: BowlId,
        creation: String,
    },
}

impl MixEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Alert(_) | Self::CreationAdded { .. })
    }
}

/// Ordered, unidirectional push channel to one client session.
///
/// Delivery is at-most-once: if the receiver is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct StatusChannel {
    tx: mpsc::UnboundedSender<MixEvent>,
}

impl StatusChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MixEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Sends an event; returns `false` if nobody is listening.
    pub fn emit(&self, event: MixEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                log::debug!("Status channel closed, dropped {:?}", event);
                false
            }
        }
    }

    pub fn busy(&self, busy: bool) -> bool {
        self.emit(MixEvent::Busy(busy))
    }

    pub fn message(&self, message: impl Into<String>) -> bool {
        self.emit(MixEvent::Message(message.into()))
    }

    pub fn alert(&self, alert: impl Into<String>) -> bool {
        self.emit(MixEvent::Alert(alert.into()))
    }

    pub fn creation_added(&self, bowl_id: BowlId, creation: impl Into<String>) -> bool {
        self.emit(MixEvent::CreationAdded {
            bowl_id,
            creation: creation.into(),
        })
    }
}

/// Raises the busy indicator and lowers it again when dropped, on every
/// exit path including unwinding.
pub struct BusyGuard<'a> {
    channel: &'a StatusChannel,
}

impl<'a> BusyGuard<'a> {
    pub fn raise(channel: &'a StatusChannel) -> Self {
        channel.busy(true);
        Self { channel }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.channel.busy(false);
    }
}
