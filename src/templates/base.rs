//! Page base.

markup::define! {
    Base<'a, Body: markup::Render>(title: &'a str, refresh_secs: u32, body: Body) {
        {markup::doctype()}
        html[lang = "en"] {
            head {
                title { {title} }
                meta[charset = "utf-8"];
                meta[name = "viewport", content = "width=device-width, initial-scale=1"];
                meta[name = "description", content = "Real-time soil monitoring dashboard powered by LoRa"];
                meta["http-equiv" = "refresh", content = {refresh_secs.to_string()}];
                link[rel = "stylesheet", href = "https://cdnjs.cloudflare.com/ajax/libs/bulma/0.9.4/css/bulma.min.css"];
                script[src = "https://kit.fontawesome.com/e88ef3598d.js"] {}
            }
            body {
                {body}
                footer.footer {
                    div.container {
                        p."has-text-centered" {
                            strong { "Soil Monitor " {env!("CARGO_PKG_VERSION")} }
                            " · Made with " a[href = "https://bulma.io/"] { strong { "Bulma" } }
                        }
                    }
                }
            }
        }
    }
}
