//! Home page.

use crate::core::system::SystemStatus;
use crate::format::{format_age, format_free_heap, format_thousands, format_uptime};
use crate::prelude::*;
use crate::templates::metric::Metric;
use crate::templates::NavBar;
use chrono::Duration;

/// Everything the dashboard displays, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub reading: Option<ReadingView>,

    /// Age of the latest reading when it's stale.
    pub stale_for: Option<String>,

    pub system: SystemView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView {
    pub moisture_percent: String,
    pub tier: MoistureTier,
    pub raw_value: String,
    pub rssi: String,
    pub signal_strength: SignalStrength,
    pub last_update: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemView {
    pub system: String,
    pub connectivity: Link,
    pub ip: String,
    pub uptime: String,
    pub free_memory: String,
}

impl ReadingView {
    pub fn new(reading: &SensorReading, now: DateTime<Local>) -> Self {
        Self {
            moisture_percent: reading.moisture_percent.to_string(),
            tier: reading.tier(),
            raw_value: format_thousands(u64::from(reading.raw_value)),
            rssi: format!("{} dBm", reading.rssi),
            signal_strength: reading.signal_strength(),
            last_update: format_age(reading.age(now)),
            timestamp: reading.timestamp.to_string(),
        }
    }
}

impl From<&SystemStatus> for SystemView {
    fn from(status: &SystemStatus) -> Self {
        Self {
            system: status.system.clone(),
            connectivity: status.connectivity,
            ip: status.ip.clone(),
            uptime: format_uptime(status.uptime),
            free_memory: status.free_heap.map_or_else(|| "n/a".into(), format_free_heap),
        }
    }
}

impl DashboardView {
    pub fn new(store: &Store, system: &SystemStatus, now: DateTime<Local>, stale_after: Duration) -> Self {
        Self {
            reading: store.latest.as_ref().map(|reading| ReadingView::new(reading, now)),
            stale_for: store
                .latest
                .as_ref()
                .filter(|_| store.is_stale(now, stale_after))
                .map(|reading| format_age(reading.age(now)).trim_end_matches(" ago").to_string()),
            system: system.into(),
        }
    }
}

markup::define! {
    Dashboard(view: DashboardView) {
        section.hero."is-info" {
            div."hero-head" { {NavBar {}} }
            div."hero-body" {
                div.container."has-text-centered" {
                    h1.title."is-3" {
                        span.icon { i.fas."fa-tint" {} } " " "Soil Moisture Monitor"
                    }
                    h2.subtitle."is-6" { "Real-time soil moisture monitoring via LoRa" }
                }
            }
        }
        section.section {
            div.container {
                @if let Some(reading) = &view.reading {
                    div.notification.alert.{reading.tier.color_class()} {
                        span.icon { i.fas."fa-heartbeat" {} } " "
                        strong { {reading.tier.label()} }
                    }
                } else {
                    div.notification.alert."is-info" {
                        span.icon { i.fas."fa-satellite-dish" {} } " "
                        strong { "Waiting for the first reading" }
                    }
                }
                @if let Some(age) = &view.stale_for {
                    div.notification.stale."is-dark" {
                        span.icon { i.fas."fa-exclamation-triangle" {} } " "
                        strong { "STALE - No data for " {age} }
                    }
                }

                @if let Some(reading) = &view.reading {
                    div.columns."is-multiline" {
                        {Metric { title: "Moisture Level", icon: "", body: MoistureBody { reading } }}
                        {Metric { title: "Raw Sensor Value", icon: "", body: RawValueBody { reading } }}
                        {Metric { title: "Signal Strength", icon: "fa-wifi", body: SignalBody { reading } }}
                        {Metric { title: "Last Update", icon: "fa-clock", body: LastUpdateBody { reading } }}
                    }
                }

                div.card {
                    header."card-header" {
                        div {
                            p."card-header-title" { "System Status" }
                            p."is-size-7"."has-text-grey"."px-4"."pb-2" { "LoRa receiver and HTTP server information" }
                        }
                    }
                    div."card-content" {
                        div.columns {
                            div.column {
                                p."heading" { "System" }
                                p."is-size-5"."has-text-weight-semibold" { {&view.system.system} }
                            }
                            div.column {
                                p."heading" { "Connectivity" }
                                span.tag."is-light".{view.system.connectivity.color_class()} {
                                    {view.system.connectivity.to_string()}
                                }
                            }
                            div.column {
                                p."heading" { "IP Address" }
                                p."is-size-5"."is-family-monospace" { {&view.system.ip} }
                            }
                            div.column {
                                p."heading" { "Uptime" }
                                p."is-size-5"."has-text-weight-semibold" { {&view.system.uptime} }
                            }
                        }
                        hr;
                        div.level."is-mobile" {
                            div."level-left" { span."is-size-7"."has-text-grey" { "Free Memory" } }
                            div."level-right" { span."is-size-7"."is-family-monospace" { {&view.system.free_memory} } }
                        }
                    }
                }
            }
        }
    }

    MoistureBody<'a>(reading: &'a ReadingView) {
        p."is-size-3"."has-text-weight-bold"."has-text-info" { {&reading.moisture_percent} "%" }
        progress.progress."is-small".{reading.tier.color_class()}[value = {&reading.moisture_percent}, max = "100"] {
            {&reading.moisture_percent} "%"
        }
        span.tag.{reading.tier.color_class()} { {reading.tier.short_label()} }
    }

    RawValueBody<'a>(reading: &'a ReadingView) {
        p."is-size-3"."has-text-weight-bold" { {&reading.raw_value} }
        p."is-size-7"."has-text-grey" { "ADC Reading" }
    }

    SignalBody<'a>(reading: &'a ReadingView) {
        p."is-size-3"."has-text-weight-bold"."has-text-success" { {&reading.rssi} }
        span.tag."is-light".{reading.signal_strength.color_class()} { {reading.signal_strength.as_str()} }
    }

    LastUpdateBody<'a>(reading: &'a ReadingView) {
        p."is-size-4"."has-text-weight-bold" { {&reading.last_update} }
        p."is-size-7"."has-text-grey" { "Timestamp: " {&reading.timestamp} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{Calibration, Frame};

    fn sample_reading(received_at: DateTime<Local>) -> SensorReading {
        let frame = Frame {
            address: 1,
            data: "raw=2847;pct=45;ts=125340".into(),
            rssi: -67,
            snr: 9,
        };
        SensorReading::from_frame(&frame, &Calibration::default(), 0, received_at).unwrap()
    }

    fn sample_system() -> SystemStatus {
        SystemStatus {
            system: "Soil Moisture Monitor".into(),
            connectivity: Link::Connected,
            ip: "192.168.1.100".into(),
            uptime: 1250,
            free_heap: Some(180_000),
        }
    }

    #[test]
    fn renders_sample_values() {
        let now = Local::now();
        let mut store = Store::default();
        store.apply(Message::reading("test", sample_reading(now - Duration::seconds(25))).compose());
        let view = DashboardView::new(&store, &sample_system(), now, Duration::seconds(300));
        let html = Dashboard { view }.to_string();

        assert!(html.contains("NORMAL - Moisture OK"));
        assert!(html.contains("45%"));
        assert!(html.contains("2,847"));
        assert!(html.contains("-67 dBm"));
        assert!(html.contains("Fair"));
        assert!(html.contains("25s ago"));
        assert!(html.contains("Timestamp: 125340"));
        assert!(html.contains("192.168.1.100"));
        assert!(html.contains("0h 20m"));
        assert!(html.contains("175.8 KB"));
        assert!(html.contains("Connected"));
        assert!(!html.contains("STALE"));
    }

    #[test]
    fn renders_waiting_alert() {
        let view = DashboardView::new(&Store::default(), &sample_system(), Local::now(), Duration::seconds(300));
        let html = Dashboard { view }.to_string();
        assert!(html.contains("Waiting for the first reading"));
        assert!(!html.contains("ADC Reading"));
    }

    #[test]
    fn renders_stale_alert() {
        let now = Local::now();
        let mut store = Store::default();
        store.apply(Message::reading("test", sample_reading(now - Duration::minutes(10))).compose());
        let view = DashboardView::new(&store, &sample_system(), now, Duration::seconds(300));
        assert_eq!(view.stale_for.as_deref(), Some("10m"));
        assert!(Dashboard { view }.to_string().contains("STALE - No data for 10m"));
    }

    #[test]
    fn missing_free_memory() {
        let system = SystemStatus {
            free_heap: None,
            ..sample_system()
        };
        assert_eq!(SystemView::from(&system).free_memory, "n/a");
    }

    #[test]
    fn escapes_text() {
        let system = SystemStatus {
            system: "<script>".into(),
            ..sample_system()
        };
        let view = DashboardView::new(&Store::default(), &system, Local::now(), Duration::seconds(300));
        let html = Dashboard { view }.to_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
