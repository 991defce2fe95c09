//! Receiver services that bring the radio telemetry in.

use crate::core::system::uptime_millis;
use crate::prelude::*;
use crate::settings::Settings;
use crate::telemetry::{parse_line, Calibration};

pub mod sample;
pub mod serial;
pub mod udp;

/// A service configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum Service {
    /// Publishes a constant sample reading, useful without radio hardware.
    Sample(sample::Sample),

    /// Reads the radio module output from a serial device.
    Serial(serial::Serial),

    /// Receives the radio module output forwarded over UDP.
    Udp(udp::Udp),
}

/// Spawn all configured services.
pub fn spawn_all(settings: &Settings, bus: &mut Bus) -> Result {
    for (service_id, service) in settings.services.iter() {
        info!("Spawning service `{}`…", service_id);
        debug!("Settings `{}`: {:?}", service_id, service);
        let service_id = service_id.clone();
        let calibration = settings.calibration;
        match service.clone() {
            Service::Sample(sample) => sample.spawn(service_id, calibration, bus),
            Service::Serial(serial) => serial.spawn(service_id, calibration, bus),
            Service::Udp(udp) => udp.spawn(service_id, calibration, bus),
        }?;
    }
    Ok(())
}

/// Decodes a single line printed by the radio module and publishes the result.
pub fn handle_line(service_id: &str, line: &str, calibration: &Calibration, tx: &Sender) {
    let result = parse_line(line).and_then(|frame| match frame {
        Some(frame) => SensorReading::from_frame(&frame, calibration, uptime_millis(), Local::now()).map(Some),
        None => Ok(None),
    });
    match result {
        Ok(Some(reading)) => Message::reading(service_id, reading).send_and_forget(tx),
        Ok(None) => debug!("[{}] Skipped: {:?}", service_id, line),
        Err(error) => Message::malformed(service_id, format!("{} in {:?}", error, line.trim_end())).send_and_forget(tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Type;

    #[test]
    fn publishes_readings() -> Result {
        let (tx, rx) = crossbeam_channel::unbounded();
        handle_line("test", "+RCV=3,4,2500,-40,10", &Calibration::default(), &tx);
        match rx.try_recv()?.type_ {
            Type::Reading(reading) => {
                assert_eq!(reading.address, 3);
                assert_eq!(reading.moisture_percent, 50);
                assert_eq!(reading.rssi, -40);
            }
            type_ => bail!("unexpected message: {:?}", type_),
        }
        Ok(())
    }

    #[test]
    fn publishes_malformed_frames() -> Result {
        let (tx, rx) = crossbeam_channel::unbounded();
        handle_line("test", "+RCV=3,4,abcd,-40,10", &Calibration::default(), &tx);
        assert!(matches!(rx.try_recv()?.type_, Type::Malformed(_)));
        Ok(())
    }

    #[test]
    fn skips_module_responses() {
        let (tx, rx) = crossbeam_channel::unbounded();
        handle_line("test", "+OK", &Calibration::default(), &tx);
        assert!(rx.try_recv().is_err());
    }
}
