//! Status page.

use crate::prelude::*;
use crate::settings::Settings;
use crate::templates::{self, DATE_FORMAT};

/// Engine diagnostics.
#[derive(Debug, Clone)]
pub struct StatusView {
    pub settings: Settings,
    pub store: Store,
    pub message_count: u64,
}

markup::define! {
    Status(view: StatusView) {
        section.hero."is-info" {
            div."hero-head" { {templates::NavBar {}} }
            div."hero-body" {
                div.container {
                    h1.title."is-4" { "Status" }
                    h2.subtitle."is-6" { "Extended engine status" }
                }
            }
        }
        section.section {
            div.container {
                nav.level {
                    div."level-item"."has-text-centered" {
                        div {
                            p.heading { "Messages" }
                            p.title { {view.message_count.to_string()} }
                        }
                    }
                    div."level-item"."has-text-centered" {
                        div {
                            p.heading { "Frames" }
                            p.title { {view.store.frames_received.to_string()} }
                        }
                    }
                    div."level-item"."has-text-centered" {
                        div {
                            p.heading { "Malformed" }
                            p.title { {view.store.frames_malformed.to_string()} }
                        }
                    }
                    div."level-item"."has-text-centered" {
                        div {
                            p.heading { "Link" }
                            p.title { {view.store.link.to_string()} }
                        }
                    }
                }

                @if let Some(reading) = &view.store.latest {
                    h3.title."is-5" { "Latest reading" }
                    h4.subtitle."is-7" {
                        "Received at " {reading.received_at.format(DATE_FORMAT).to_string()}
                    }
                    div.message {
                        div."message-body" {
                            pre { code { {format!("{:#?}", reading)} } }
                        }
                    }
                }

                @if let Some(error) = &view.store.last_error {
                    h3.title."is-5" { "Last malformed frame" }
                    div.message."is-danger" {
                        div."message-body" { code { {error} } }
                    }
                }

                h3.title."is-5" { "Settings" }
                h4.subtitle."is-7" { "This is what configured in the settings files" }
                div.message {
                    div."message-body" {
                        pre { code { {format!("{:#?}", &view.settings)} } }
                    }
                }
            }
        }
    }
}
