//! Keeps the latest reading and the receiver state in memory.

use crate::core::message::Type;
use crate::prelude::*;
use chrono::Duration;
use std::fmt::{Display, Formatter};

/// Radio input connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Link {
    Connected,
    Disconnected,
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Link::Connected => "Connected",
            Link::Disconnected => "Disconnected",
        })
    }
}

impl Link {
    pub fn color_class(self) -> &'static str {
        match self {
            Link::Connected => "is-success",
            Link::Disconnected => "is-danger",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    pub latest: Option<SensorReading>,

    pub link: Link,

    /// Incremented on every new reading, used as the entity tag.
    pub sequence: u64,

    pub frames_received: u64,

    pub frames_malformed: u64,

    /// Description of the last malformed frame.
    pub last_error: Option<String>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            latest: None,
            link: Link::Disconnected,
            sequence: 0,
            frames_received: 0,
            frames_malformed: 0,
            last_error: None,
        }
    }
}

impl Store {
    pub fn apply(&mut self, message: Message) {
        match message.type_ {
            Type::Reading(reading) => {
                self.latest = Some(reading);
                self.sequence += 1;
                self.frames_received += 1;
                self.link = Link::Connected;
            }
            Type::Link(link) => self.link = link,
            Type::Malformed(error) => {
                self.frames_malformed += 1;
                self.last_error = Some(error);
            }
        }
    }

    /// Whether the latest reading is older than `stale_after`.
    /// A missing reading is not stale, it's just missing.
    pub fn is_stale(&self, now: DateTime<Local>, stale_after: Duration) -> bool {
        self.latest
            .as_ref()
            .map_or(false, |reading| reading.age(now) > stale_after)
    }
}

/// Spawn the thread that applies the bus messages to the store.
pub fn spawn(store: Arc<Mutex<Store>>, rx: Receiver) -> Result<thread::JoinHandle<Result>> {
    info!("Spawning the store…");
    let handle = thread::Builder::new()
        .name("system::store".into())
        .spawn(move || apply_all(&store, &rx).log(|| "The store has stopped, readings will not be updated"))?;
    Ok(handle)
}

fn apply_all(store: &Mutex<Store>, rx: &Receiver) -> Result {
    for message in rx {
        debug!("Applying the message from `{}`", &message.service_id);
        store
            .lock()
            .map_err(|_| anyhow!("the store lock is poisoned"))?
            .apply(message);
    }
    Ok(())
}

/// Clones the current store state so that it can be rendered without holding the lock.
pub fn snapshot(store: &Mutex<Store>) -> Result<Store> {
    Ok(store.lock().map_err(|_| anyhow!("the store lock is poisoned"))?.clone())
}
