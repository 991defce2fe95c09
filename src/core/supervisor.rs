//! Keeps a receiver running: re-spawns its loop when the radio input fails.

use crate::prelude::*;
use std::time::Duration;

/// Spawn a supervised named thread.
///
/// The closure is expected to open its source, send `Link::Connected` and process
/// lines until the source fails or ends.
pub fn spawn<F>(service_id: String, tx: Sender, retry_delay: Duration, f: F) -> Result
where
    F: Fn(&str, &Sender) -> Result + Send + 'static,
{
    thread::Builder::new().name(service_id.clone()).spawn(move || loop {
        info!("[{}] Running…", &service_id);
        match f(&service_id, &tx) {
            Ok(_) => warn!("[{}] The input has ended", &service_id),
            Err(error) => error!("[{}] The input has failed: {:#}", &service_id, error),
        }
        Message::link(&service_id, Link::Disconnected).send_and_forget(&tx);
        info!("[{}] Retrying in {:?}…", &service_id, retry_delay);
        thread::sleep(retry_delay);
    })?;
    Ok(())
}
