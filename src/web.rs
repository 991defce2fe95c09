//! Web interface and JSON API.

use crate::core::store::snapshot;
use crate::core::system::SystemStatus;
use crate::format::format_age;
use crate::prelude::*;
use crate::settings::Settings;
use crate::templates::{self, Base, Dashboard, DashboardView, StatusView};
use crate::web::entity_tag::Tagged;
use crate::web::if_none_match::IfNoneMatch;
use crate::web::message_counter::MessageCounter;
use crate::web::to_html_string::ToHtmlString;
use chrono::Duration;
use rocket::response::Debug;
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, State};
use serde_json::json;
use std::sync::atomic::AtomicU64;

pub mod entity_tag;
pub mod if_none_match;
pub mod message_counter;
pub mod to_html_string;

type SharedStore = Arc<Mutex<Store>>;
type WebResult<T> = std::result::Result<T, Debug<anyhow::Error>>;

/// The latest reading, shaped after the dashboard `sensorData`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SensorData {
    pub moisture_percent: u8,
    pub raw_value: u16,
    pub rssi: i16,
    pub snr: i8,
    pub address: u16,
    pub status: &'static str,
    pub tier: MoistureTier,
    pub variant: &'static str,
    pub signal_strength: SignalStrength,
    pub last_update: String,
    pub timestamp: u64,
    pub stale: bool,
}

impl SensorData {
    fn new(reading: &SensorReading, now: DateTime<Local>, stale: bool) -> Self {
        Self {
            moisture_percent: reading.moisture_percent,
            raw_value: reading.raw_value,
            rssi: reading.rssi,
            snr: reading.snr,
            address: reading.address,
            status: reading.status(),
            tier: reading.tier(),
            variant: reading.tier().variant(),
            signal_strength: reading.signal_strength(),
            last_update: format_age(reading.age(now)),
            timestamp: reading.timestamp,
            stale,
        }
    }
}

/// The receiver status, shaped after the dashboard `systemData`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    pub system: String,
    pub wifi: Link,
    pub ip: String,
    pub uptime: u64,
    pub free_heap: Option<u64>,
}

impl From<SystemStatus> for SystemData {
    fn from(status: SystemStatus) -> Self {
        Self {
            system: status.system,
            wifi: status.connectivity,
            ip: status.ip,
            uptime: status.uptime,
            free_heap: status.free_heap,
        }
    }
}

#[derive(rocket::Responder)]
pub enum DataResponse {
    #[response(status = 304)]
    NotModified(Tagged<()>),
    Fresh(Tagged<Json<SensorData>>),
}

/// Wraps the page body into the page base.
fn render<B: markup::Render>(settings: &Settings, body: B) -> ToHtmlString<String> {
    ToHtmlString(
        Base {
            title: &settings.system_name,
            refresh_secs: settings.refresh_secs,
            body,
        }
        .to_string(),
    )
}

fn stale_after(settings: &Settings) -> Duration {
    Duration::seconds(settings.stale_after_secs as i64)
}

/// Dashboard page.
#[get("/")]
fn index(store: &State<SharedStore>, settings: &State<Settings>) -> WebResult<ToHtmlString<String>> {
    let store = snapshot(store).log(|| "Could not take the store snapshot")?;
    let system = SystemStatus::collect(settings, store.link);
    let view = DashboardView::new(&store, &system, Local::now(), stale_after(settings));
    Ok(render(settings, Dashboard { view }))
}

/// Diagnostics page.
#[get("/status")]
fn status(
    store: &State<SharedStore>,
    settings: &State<Settings>,
    message_counter: &State<MessageCounter>,
) -> WebResult<ToHtmlString<String>> {
    let view = StatusView {
        settings: settings.inner().clone(),
        store: snapshot(store).log(|| "Could not take the store snapshot")?,
        message_count: message_counter.value(),
    };
    Ok(render(settings, templates::Status { view }))
}

/// The latest reading. Responds with `404` until the first frame is received.
#[get("/api/data")]
fn data(
    store: &State<SharedStore>,
    settings: &State<Settings>,
    if_none_match: Option<IfNoneMatch>,
) -> WebResult<Option<DataResponse>> {
    let store = snapshot(store).log(|| "Could not take the store snapshot")?;
    let reading = match &store.latest {
        Some(reading) => reading,
        None => return Ok(None),
    };
    let entity_tag = store.entity_tag();
    if if_none_match.map_or(false, |if_none_match| if_none_match.matches(&entity_tag)) {
        return Ok(Some(DataResponse::NotModified(Tagged(entity_tag, ()))));
    }
    let now = Local::now();
    let data = SensorData::new(reading, now, store.is_stale(now, stale_after(settings)));
    Ok(Some(DataResponse::Fresh(Tagged(entity_tag, Json(data)))))
}

/// The receiver system status.
#[get("/api/status")]
fn system(store: &State<SharedStore>, settings: &State<Settings>) -> WebResult<Json<SystemData>> {
    let link = snapshot(store).log(|| "Could not take the store snapshot")?.link;
    Ok(Json(SystemStatus::collect(settings, link).into()))
}

#[get("/healthz")]
fn healthz() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Builds the web application.
pub fn build(settings: Settings, store: SharedStore, message_counter: Arc<AtomicU64>) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", settings.http.address.clone()))
        .merge(("port", settings.http.port));
    rocket::custom(figment)
        .manage(settings)
        .manage(store)
        .manage(MessageCounter(message_counter))
        .mount("/", routes![index, status, data, system, healthz])
}

/// Starts the web server and blocks until it's shut down.
pub fn start_server(settings: Settings, store: SharedStore, message_counter: Arc<AtomicU64>) -> Result {
    rocket::execute(build(settings, store, message_counter).launch())
        .map_err(|error| anyhow!("the web server has failed: {}", error))?;
    Ok(())
}
