//! Publishes a constant reading through the regular decoding path.

use crate::prelude::*;
use crate::services::handle_line;
use crate::telemetry::Calibration;
use std::time::Duration;

/// Reading shown when there is no radio hardware around.
pub const SAMPLE_PAYLOAD: &str = "raw=2847;pct=45;ts=125340";
pub const SAMPLE_ADDRESS: u16 = 1;
pub const SAMPLE_RSSI: i16 = -67;
pub const SAMPLE_SNR: i8 = 9;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Sample {
    /// Repeat the sample with this interval. It's sent only once when not set.
    #[serde(default)]
    pub interval_ms: Option<u64>,
}

/// Formats the sample as the radio module would print it.
pub fn sample_line() -> String {
    format!(
        "+RCV={},{},{},{},{}",
        SAMPLE_ADDRESS,
        SAMPLE_PAYLOAD.len(),
        SAMPLE_PAYLOAD,
        SAMPLE_RSSI,
        SAMPLE_SNR,
    )
}

impl Sample {
    pub fn spawn(self, service_id: String, calibration: Calibration, bus: &mut Bus) -> Result {
        let tx = bus.add_tx();

        thread::Builder::new().name(service_id.clone()).spawn(move || {
            Message::link(&service_id, Link::Connected).send_and_forget(&tx);
            let line = sample_line();
            loop {
                handle_line(&service_id, &line, &calibration, &tx);
                match self.interval_ms {
                    Some(interval_ms) => thread::sleep(Duration::from_millis(interval_ms)),
                    None => break,
                }
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::parse_line;

    #[test]
    fn sample_line_is_valid() -> Result {
        let frame = parse_line(&sample_line())?.ok_or_else(|| anyhow!("not a frame"))?;
        assert_eq!(frame.data, SAMPLE_PAYLOAD);
        assert_eq!(frame.rssi, -67);
        Ok(())
    }
}
