//! # Telemetry
//!
//! LoRa modules with the AT firmware print a line per received packet:
//!
//! ```text
//! +RCV=<address>,<length>,<data>,<rssi>,<snr>
//! ```
//!
//! The data is exactly `<length>` bytes long and may contain commas itself.
//! The sensor node sends either a bare ADC value (`2847`) or `key=value` pairs:
//!
//! ```text
//! raw=2847;pct=45;ts=125340
//! ```

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use thiserror::Error;

const RECEIVED_PREFIX: &str = "+RCV=";
const ERROR_PREFIX: &str = "+ERR=";

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("radio module error {0}")]
    Module(String),

    #[error("missing `{0}` field")]
    MissingField(&'static str),

    #[error("invalid `{field}` field `{value}`: {source}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("declared {declared} data bytes but got {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("empty payload")]
    EmptyPayload,

    #[error("moisture percentage {0} is out of range")]
    PercentOutOfRange(u16),
}

/// Single received radio packet.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Sender address.
    pub address: u16,
    pub data: String,
    /// Received signal strength in dBm.
    pub rssi: i16,
    /// Signal-to-noise ratio in dB.
    pub snr: i8,
}

/// Parses a line printed by the radio module.
///
/// Returns `None` for blank lines and for the module responses
/// that are not packet notifications, such as `+OK` or `+READY`.
pub fn parse_line(line: &str) -> Result<Option<Frame>, FrameError> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    if let Some(code) = line.strip_prefix(ERROR_PREFIX) {
        return Err(FrameError::Module(code.to_string()));
    }
    let rest = match line.strip_prefix(RECEIVED_PREFIX) {
        Some(rest) => rest,
        None => return Ok(None),
    };

    let (address, rest) = split_field(rest, "address")?;
    let address = parse_number::<u16>(address, "address")?;
    let (length, rest) = split_field(rest, "length")?;
    let length = parse_number::<usize>(length, "length")?;

    // The data field is delimited by its length rather than by a comma.
    let mismatch = || FrameError::LengthMismatch {
        declared: length,
        actual: rest.rsplitn(3, ',').nth(2).map_or(0, str::len),
    };
    let data = rest.get(..length).ok_or_else(mismatch)?;
    let rest = rest[length..].strip_prefix(',').ok_or_else(mismatch)?;

    let (rssi, snr) = split_field(rest, "rssi")?;
    if snr.is_empty() {
        return Err(FrameError::MissingField("snr"));
    }

    Ok(Some(Frame {
        address,
        data: data.to_string(),
        rssi: parse_number(rssi, "rssi")?,
        snr: parse_number(snr, "snr")?,
    }))
}

fn split_field<'a>(input: &'a str, field: &'static str) -> Result<(&'a str, &'a str), FrameError> {
    match input.split_once(',') {
        Some((value, rest)) if !value.is_empty() => Ok((value, rest)),
        _ => Err(FrameError::MissingField(field)),
    }
}

fn parse_number<T: std::str::FromStr<Err = ParseIntError>>(
    value: &str,
    field: &'static str,
) -> Result<T, FrameError> {
    value.trim().parse().map_err(|source| FrameError::InvalidNumber {
        field,
        value: value.to_string(),
        source,
    })
}

/// Decoded packet data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payload {
    /// Raw ADC value.
    pub raw: u16,

    /// Moisture percentage computed by the sensor node, if it sends one.
    pub percent: Option<u8>,

    /// Sensor node uptime in milliseconds.
    pub timestamp: Option<u64>,
}

impl Payload {
    pub fn parse(data: &str) -> Result<Self, FrameError> {
        let data = data.trim();
        if data.is_empty() {
            return Err(FrameError::EmptyPayload);
        }
        if !data.contains('=') {
            return Ok(Self {
                raw: parse_number(data, "raw")?,
                percent: None,
                timestamp: None,
            });
        }

        let mut raw = None;
        let mut percent = None;
        let mut timestamp = None;
        for pair in data.split(|c: char| c == ';' || c == '&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key.trim() {
                "raw" => raw = Some(parse_number::<u16>(value, "raw")?),
                "pct" => {
                    let value = parse_number::<u16>(value, "pct")?;
                    if value > 100 {
                        return Err(FrameError::PercentOutOfRange(value));
                    }
                    percent = Some(value as u8);
                }
                "ts" => timestamp = Some(parse_number::<u64>(value, "ts")?),
                _ => log::debug!("Ignoring the unknown payload key `{}`.", key),
            }
        }

        Ok(Self {
            raw: raw.ok_or(FrameError::MissingField("raw"))?,
            percent,
            timestamp,
        })
    }
}

/// Converts the raw ADC value into a moisture percentage.
///
/// Capacitive probes read higher in dry soil, so usually `dry > wet`,
/// but either orientation works.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// ADC value in dry air, that is 0%.
    #[serde(default = "default_dry")]
    pub dry: u16,

    /// ADC value in water, that is 100%.
    #[serde(default = "default_wet")]
    pub wet: u16,
}

const fn default_dry() -> u16 {
    3500
}

const fn default_wet() -> u16 {
    1500
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            dry: default_dry(),
            wet: default_wet(),
        }
    }
}

impl Calibration {
    pub fn percent(&self, raw: u16) -> u8 {
        if self.dry == self.wet {
            return 0;
        }
        let (dry, wet, raw) = (f64::from(self.dry), f64::from(self.wet), f64::from(raw));
        ((dry - raw) / (dry - wet) * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_received_line() -> Result<(), FrameError> {
        let frame = parse_line("+RCV=12,25,raw=2847;pct=45;ts=125340,-67,9\r\n")?;
        assert_eq!(
            frame,
            Some(Frame {
                address: 12,
                data: "raw=2847;pct=45;ts=125340".into(),
                rssi: -67,
                snr: 9,
            })
        );
        Ok(())
    }

    #[test]
    fn data_may_contain_commas() -> Result<(), FrameError> {
        let frame = parse_line("+RCV=1,6,12,345,-80,-3")?.unwrap();
        assert_eq!(frame.data, "12,345");
        assert_eq!(frame.rssi, -80);
        assert_eq!(frame.snr, -3);
        Ok(())
    }

    #[test]
    fn ignores_module_responses() -> Result<(), FrameError> {
        assert_eq!(parse_line("+OK")?, None);
        assert_eq!(parse_line("+READY")?, None);
        assert_eq!(parse_line("")?, None);
        Ok(())
    }

    #[test]
    fn module_error() {
        assert_eq!(parse_line("+ERR=4"), Err(FrameError::Module("4".into())));
    }

    #[test]
    fn length_mismatch() {
        assert!(matches!(
            parse_line("+RCV=1,40,2847,-67,9"),
            Err(FrameError::LengthMismatch { declared: 40, .. })
        ));
        assert!(matches!(
            parse_line("+RCV=1,2,2847,-67,9"),
            Err(FrameError::LengthMismatch { declared: 2, .. })
        ));
    }

    #[test]
    fn invalid_rssi() {
        assert!(matches!(
            parse_line("+RCV=1,4,2847,strong,9"),
            Err(FrameError::InvalidNumber { field: "rssi", .. })
        ));
    }

    #[test]
    fn missing_snr() {
        assert_eq!(
            parse_line("+RCV=1,4,2847,-67,"),
            Err(FrameError::MissingField("snr"))
        );
    }

    #[test]
    fn bare_payload() -> Result<(), FrameError> {
        assert_eq!(
            Payload::parse("2847")?,
            Payload {
                raw: 2847,
                percent: None,
                timestamp: None,
            }
        );
        Ok(())
    }

    #[test]
    fn key_value_payload() -> Result<(), FrameError> {
        let payload = Payload::parse("raw=2847&pct=45&ts=125340&bat=3.7")?;
        assert_eq!(payload.raw, 2847);
        assert_eq!(payload.percent, Some(45));
        assert_eq!(payload.timestamp, Some(125_340));
        Ok(())
    }

    #[test]
    fn payload_errors() {
        assert_eq!(Payload::parse(" "), Err(FrameError::EmptyPayload));
        assert_eq!(Payload::parse("pct=45"), Err(FrameError::MissingField("raw")));
        assert_eq!(Payload::parse("raw=1;pct=101"), Err(FrameError::PercentOutOfRange(101)));
        assert!(matches!(
            Payload::parse("raw=wet"),
            Err(FrameError::InvalidNumber { field: "raw", .. })
        ));
    }

    #[test]
    fn calibration() {
        let calibration = Calibration { dry: 3500, wet: 1500 };
        assert_eq!(calibration.percent(3500), 0);
        assert_eq!(calibration.percent(1500), 100);
        assert_eq!(calibration.percent(2500), 50);
        assert_eq!(calibration.percent(2847), 33);
        assert_eq!(calibration.percent(4095), 0);
        assert_eq!(calibration.percent(0), 100);
    }

    #[test]
    fn inverted_calibration() {
        let calibration = Calibration { dry: 1000, wet: 3000 };
        assert_eq!(calibration.percent(2000), 50);
        assert_eq!(calibration.percent(500), 0);
    }
}
