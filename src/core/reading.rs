//! Describes a soil moisture sensor reading.

use crate::core::status::{MoistureTier, SignalStrength};
use crate::telemetry::{Calibration, Frame, FrameError, Payload};
use chrono::{DateTime, Duration, Local};

/// The latest decoded reading of a sensor node.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Sender radio address.
    pub address: u16,

    pub moisture_percent: u8,

    /// Raw ADC value.
    pub raw_value: u16,

    /// Received signal strength in dBm.
    pub rssi: i16,

    /// Signal-to-noise ratio in dB.
    pub snr: i8,

    /// Sensor node uptime in milliseconds when it sent the reading.
    /// Falls back to the receiver uptime when the node doesn't send one.
    pub timestamp: u64,

    /// When the frame was actually received.
    pub received_at: DateTime<Local>,
}

impl SensorReading {
    /// Decodes a frame payload. The calibration is only used when the node
    /// doesn't send the percentage itself.
    pub fn from_frame(
        frame: &Frame,
        calibration: &Calibration,
        receiver_uptime_ms: u64,
        received_at: DateTime<Local>,
    ) -> Result<Self, FrameError> {
        let payload = Payload::parse(&frame.data)?;
        Ok(Self {
            address: frame.address,
            moisture_percent: payload.percent.unwrap_or_else(|| calibration.percent(payload.raw)),
            raw_value: payload.raw,
            rssi: frame.rssi,
            snr: frame.snr,
            timestamp: payload.timestamp.unwrap_or(receiver_uptime_ms),
            received_at,
        })
    }

    pub fn tier(&self) -> MoistureTier {
        MoistureTier::from_percent(self.moisture_percent)
    }

    /// Human-readable status, e.g. `NORMAL - Moisture OK`.
    pub fn status(&self) -> &'static str {
        self.tier().label()
    }

    pub fn signal_strength(&self) -> SignalStrength {
        SignalStrength::from_rssi(self.rssi)
    }

    /// Time elapsed since the reading was received.
    pub fn age(&self, now: DateTime<Local>) -> Duration {
        now.signed_duration_since(self.received_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(data: &str) -> Frame {
        Frame {
            address: 7,
            data: data.into(),
            rssi: -67,
            snr: 9,
        }
    }

    #[test]
    fn percentage_from_node() -> Result<(), FrameError> {
        let reading = SensorReading::from_frame(
            &frame("raw=2847;pct=45;ts=125340"),
            &Calibration::default(),
            1_000,
            Local::now(),
        )?;
        assert_eq!(reading.moisture_percent, 45);
        assert_eq!(reading.raw_value, 2847);
        assert_eq!(reading.timestamp, 125_340);
        assert_eq!(reading.status(), "NORMAL - Moisture OK");
        assert_eq!(reading.signal_strength(), SignalStrength::Fair);
        Ok(())
    }

    #[test]
    fn percentage_from_calibration() -> Result<(), FrameError> {
        let reading = SensorReading::from_frame(
            &frame("3400"),
            &Calibration { dry: 3500, wet: 1500 },
            1_000,
            Local::now(),
        )?;
        assert_eq!(reading.moisture_percent, 5);
        assert_eq!(reading.tier(), MoistureTier::Dry);
        assert_eq!(reading.timestamp, 1_000);
        Ok(())
    }

    #[test]
    fn age() -> Result<(), FrameError> {
        let received_at = Local::now();
        let reading = SensorReading::from_frame(&frame("2847"), &Calibration::default(), 0, received_at)?;
        assert_eq!(reading.age(received_at + Duration::seconds(25)).num_seconds(), 25);
        Ok(())
    }
}
