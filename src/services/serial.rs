//! Reads the radio module output from a serial device.
//!
//! The device must already be configured, for example:
//! `stty -F /dev/ttyUSB0 115200 raw -echo`.

use crate::core::supervisor;
use crate::prelude::*;
use crate::services::handle_line;
use crate::telemetry::Calibration;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Serial {
    /// Device path. Any readable file or FIFO works as well.
    pub path: PathBuf,

    /// Delay before the device is reopened after a failure.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

const fn default_reconnect_delay_ms() -> u64 {
    5000
}

impl Serial {
    pub fn spawn(self, service_id: String, calibration: Calibration, bus: &mut Bus) -> Result {
        let retry_delay = Duration::from_millis(self.reconnect_delay_ms);
        supervisor::spawn(service_id, bus.add_tx(), retry_delay, move |service_id, tx| {
            self.loop_(service_id, &calibration, tx)
        })
    }

    fn loop_(&self, service_id: &str, calibration: &Calibration, tx: &Sender) -> Result {
        let file = File::open(&self.path).with_context(|| format!("could not open {:?}", self.path))?;
        info!("[{}] Opened {:?}", service_id, self.path);
        Message::link(service_id, Link::Connected).send_and_forget(tx);
        read_lines(service_id, BufReader::new(file), calibration, tx)
    }
}

/// Handles every line until the reader is exhausted.
fn read_lines<R: BufRead>(service_id: &str, reader: R, calibration: &Calibration, tx: &Sender) -> Result {
    for line in reader.lines() {
        handle_line(service_id, &line?, calibration, tx);
    }
    Ok(())
}
