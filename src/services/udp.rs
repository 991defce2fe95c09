//! Receives the radio module output forwarded by a gateway over UDP.
//! A datagram may contain several lines.

use crate::core::supervisor;
use crate::prelude::*;
use crate::services::handle_line;
use crate::telemetry::Calibration;
use std::net::UdpSocket;
use std::time::Duration;

/// Larger than any LoRa frame printed by the module.
const BUFFER_SIZE: usize = 1024;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Udp {
    /// Address to bind, for example `0.0.0.0:1700`.
    pub address: String,

    /// Delay before the socket is bound again after a failure.
    #[serde(default = "default_rebind_delay_ms")]
    pub rebind_delay_ms: u64,
}

const fn default_rebind_delay_ms() -> u64 {
    5000
}

impl Udp {
    pub fn spawn(self, service_id: String, calibration: Calibration, bus: &mut Bus) -> Result {
        let retry_delay = Duration::from_millis(self.rebind_delay_ms);
        supervisor::spawn(service_id, bus.add_tx(), retry_delay, move |service_id, tx| {
            self.loop_(service_id, &calibration, tx)
        })
    }

    fn loop_(&self, service_id: &str, calibration: &Calibration, tx: &Sender) -> Result {
        let socket = UdpSocket::bind(&self.address).with_context(|| format!("could not bind {}", self.address))?;
        info!("[{}] Listening on {}", service_id, self.address);
        Message::link(service_id, Link::Connected).send_and_forget(tx);
        receive(service_id, &socket, calibration, tx)
    }
}

fn receive(service_id: &str, socket: &UdpSocket, calibration: &Calibration, tx: &Sender) -> Result {
    let mut buffer = [0; BUFFER_SIZE];
    loop {
        let (size, peer) = socket.recv_from(&mut buffer)?;
        debug!("[{}] {} bytes from {}", service_id, size, peer);
        if size == BUFFER_SIZE {
            warn!("[{}] The datagram from {} may be truncated at {} bytes", service_id, peer, BUFFER_SIZE);
        }
        for line in String::from_utf8_lossy(&buffer[..size]).lines() {
            handle_line(service_id, line, calibration, tx);
        }
    }
}
