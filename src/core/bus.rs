//! # Message bus
//!
//! The bus implements many-producer-many-consumer queue: every receiver
//! service publishes into the same inbox and every subscriber gets a copy
//! of each message.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::message::Type;
use crate::prelude::*;

pub struct Bus {
    /// Subscriber inbox senders.
    subscriber_txs: Vec<Sender>,

    /// The bus message inbox sender.
    tx: Sender,

    /// The bus message inbox receiver.
    rx: Receiver,

    message_counter: Arc<AtomicU64>,
}

impl Bus {
    pub fn new(message_counter: Arc<AtomicU64>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<Message>();
        Self {
            tx,
            rx,
            message_counter,
            subscriber_txs: Vec::new(),
        }
    }

    /// Get a new message sender. Essentially, it makes a clone of the bus inbox.
    pub fn add_tx(&self) -> Sender {
        self.tx.clone()
    }

    /// Get a new receiver to subscribe to the bus.
    pub fn add_rx(&mut self) -> Receiver {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscriber_txs.push(tx);
        rx
    }

    /// Spawn the bus dispatcher thread.
    ///
    /// The thread finishes when all the senders are dropped.
    pub fn spawn(self) -> Result<thread::JoinHandle<()>> {
        info!("Spawning message bus…");
        let Self {
            subscriber_txs,
            tx,
            rx,
            message_counter,
        } = self;
        drop(tx);
        let handle = thread::Builder::new().name("system::bus".into()).spawn(move || {
            for message in &rx {
                Self::log_message(&message);
                for tx in subscriber_txs.iter() {
                    message.clone().send_and_forget(tx);
                }
                let number = message_counter.fetch_add(1, Ordering::Relaxed);
                debug!("Dispatched (#{}) from `{}`", number, &message.service_id);
            }
            info!("Message bus has stopped.");
        })?;
        Ok(handle)
    }

    fn log_message(message: &Message) {
        match &message.type_ {
            Type::Reading(reading) => info!(
                "[{}] #{}: {}% ({}) at {} dBm",
                &message.service_id, reading.address, reading.moisture_percent, reading.raw_value, reading.rssi,
            ),
            Type::Link(link) => info!("[{}] Link is {}", &message.service_id, link),
            Type::Malformed(error) => warn!("[{}] Malformed frame: {}", &message.service_id, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn broadcasts_to_all_subscribers() -> Result {
        let counter = Arc::new(AtomicU64::new(0));
        let mut bus = Bus::new(counter.clone());
        let tx = bus.add_tx();
        let rx_1 = bus.add_rx();
        let rx_2 = bus.add_rx();
        let handle = bus.spawn()?;

        Message::link("test", Link::Connected).send_and_forget(&tx);
        drop(tx);
        handle.join().map_err(|_| anyhow!("the bus thread has panicked"))?;

        assert_eq!(rx_1.recv_timeout(Duration::from_secs(1))?.type_, Type::Link(Link::Connected));
        assert_eq!(rx_2.recv_timeout(Duration::from_secs(1))?.type_, Type::Link(Link::Connected));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
        Ok(())
    }
}
