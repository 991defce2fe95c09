//! Describes bus messages and related structures.

use crate::prelude::*;

/// Receiver services use messages to publish what they got from the radio.
#[derive(Debug, Clone)]
pub struct Message {
    /// Service that sent the message.
    pub service_id: String,

    /// When the message was composed.
    pub timestamp: DateTime<Local>,

    pub type_: Type,
}

/// Message type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Successfully decoded sensor reading.
    Reading(SensorReading),

    /// Radio input went up or down.
    Link(Link),

    /// A line could not be decoded. Contains the error description.
    Malformed(String),
}

/// Message builder. Prefer to use it instead of directly instantiating a `Message`.
pub struct Composer {
    pub message: Message,
}

impl Composer {
    pub fn new<S: Into<String>>(service_id: S, type_: Type) -> Self {
        Self {
            message: Message {
                service_id: service_id.into(),
                timestamp: Local::now(),
                type_,
            },
        }
    }

    pub fn timestamp<T: Into<DateTime<Local>>>(mut self, timestamp: T) -> Self {
        self.message.timestamp = timestamp.into();
        self
    }

    #[cfg(test)]
    pub fn compose(self) -> Message {
        self.message
    }

    /// Send the message via the specified sender and log and ignore any errors.
    pub fn send_and_forget(self, tx: &Sender) {
        self.message.send_and_forget(tx)
    }
}

impl Message {
    pub fn reading<S: Into<String>>(service_id: S, reading: SensorReading) -> Composer {
        let received_at = reading.received_at;
        Composer::new(service_id, Type::Reading(reading)).timestamp(received_at)
    }

    pub fn link<S: Into<String>>(service_id: S, link: Link) -> Composer {
        Composer::new(service_id, Type::Link(link))
    }

    pub fn malformed<S: Into<String>, E: ToString>(service_id: S, error: E) -> Composer {
        Composer::new(service_id, Type::Malformed(error.to_string()))
    }

    /// Send the message via the specified sender and log and ignore any errors.
    pub fn send_and_forget(self, tx: &Sender) {
        if let Err(error) = tx.send(self) {
            debug!("Could not send the message: {}", error.to_string());
        }
    }
}
