pub use crate::core::bus::Bus;
pub use crate::core::message::Message;
pub use crate::core::reading::SensorReading;
pub use crate::core::status::{MoistureTier, SignalStrength};
pub use crate::core::store::{Link, Store};
pub use crate::logging::Log;
pub use anyhow::{anyhow, bail, Context};
pub use chrono::prelude::*;
pub use log::{debug, error, info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::sync::{Arc, Mutex};
pub use std::thread;

pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
pub type Sender = crossbeam_channel::Sender<Message>;
pub type Receiver = crossbeam_channel::Receiver<Message>;
