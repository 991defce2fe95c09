//! Receiver system status.

use crate::prelude::*;
use crate::settings::Settings;
use lazy_static::lazy_static;
use std::fs;
use std::net::{IpAddr, UdpSocket};
use std::time::Instant;

lazy_static! {
    /// When the process has started.
    pub static ref STARTED_AT: Instant = Instant::now();
}

const MEMINFO_PATH: &str = "/proc/meminfo";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub system: String,

    pub connectivity: Link,

    pub ip: String,

    /// Uptime in seconds.
    pub uptime: u64,

    /// Available memory in bytes.
    pub free_heap: Option<u64>,
}

impl SystemStatus {
    pub fn collect(settings: &Settings, link: Link) -> Self {
        Self {
            system: settings.system_name.clone(),
            connectivity: link,
            ip: settings
                .ip
                .clone()
                .or_else(|| detect_ip().map(|ip| ip.to_string()))
                .unwrap_or_else(|| "unknown".into()),
            uptime: uptime_millis() / 1000,
            free_heap: free_memory(),
        }
    }
}

/// Milliseconds since the process start.
pub fn uptime_millis() -> u64 {
    STARTED_AT.elapsed().as_millis() as u64
}

/// Finds the address of the interface that would be used for outbound traffic.
/// Connecting a UDP socket doesn't send anything.
fn detect_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|address| address.ip())
}

fn free_memory() -> Option<u64> {
    match fs::read_to_string(MEMINFO_PATH) {
        Ok(meminfo) => parse_mem_available(&meminfo),
        Err(error) => {
            debug!("Could not read {}: {}", MEMINFO_PATH, error);
            None
        }
    }
}

/// Parses the `MemAvailable` line of `/proc/meminfo` into bytes.
fn parse_mem_available(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemAvailable:"))
        .and_then(|value| value.trim().trim_end_matches("kB").trim().parse::<u64>().ok())
        .map(|kibibytes| kibibytes * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_available() {
        let meminfo = "MemTotal:       16318480 kB\nMemFree:          875224 kB\nMemAvailable:    9876543 kB\n";
        assert_eq!(parse_mem_available(meminfo), Some(9_876_543 * 1024));
    }

    #[test]
    fn mem_available_missing() {
        assert_eq!(parse_mem_available("MemTotal: 1 kB\n"), None);
        assert_eq!(parse_mem_available("MemAvailable: lots\n"), None);
    }

    #[test]
    fn collect_uses_configured_ip() {
        let settings = Settings {
            ip: Some("192.168.1.100".into()),
            ..Settings::default()
        };
        let status = SystemStatus::collect(&settings, Link::Connected);
        assert_eq!(status.system, "Soil Moisture Monitor");
        assert_eq!(status.ip, "192.168.1.100");
        assert_eq!(status.connectivity, Link::Connected);
    }
}
