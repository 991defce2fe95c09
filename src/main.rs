//! Entry point.

use crate::core::system::STARTED_AT;
use crate::opts::Opts;
use crate::prelude::*;
use std::sync::atomic::AtomicU64;
use structopt::StructOpt;

mod core;
mod format;
mod logging;
mod opts;
mod prelude;
mod services;
mod settings;
mod telemetry;
mod templates;
mod web;

fn main() -> Result {
    let opts = Opts::from_args();
    logging::init(&opts)?;
    lazy_static::initialize(&STARTED_AT);

    info!("Reading settings…");
    let settings = settings::read(&opts.settings)?;
    debug!("Settings: {:?}", &settings);
    if settings.services.is_empty() {
        warn!("No services are configured, the dashboard will stay empty.");
    }

    let message_counter = Arc::new(AtomicU64::new(0));
    let store = Arc::new(Mutex::new(Store::default()));
    let mut bus = Bus::new(message_counter.clone());

    crate::core::store::spawn(store.clone(), bus.add_rx())?;
    services::spawn_all(&settings, &mut bus).log(|| "Could not spawn the services")?;
    bus.spawn()?;

    info!("Starting web server on port {}…", settings.http.port);
    web::start_server(settings, store, message_counter).log(|| "Web server has stopped")
}
