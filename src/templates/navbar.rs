// Shared navigation bar.
markup::define! {
    NavBar {
        nav.navbar[role = "navigation", "aria-label" = "main navigation"] {
            div.container {
                div."navbar-brand" {
                    a."navbar-item"[href = "/"] {
                        span.icon { i.fas."fa-tint" {} }
                        span { "Dashboard" }
                    }
                    a."navbar-item"[href = "/status"] {
                        span.icon { i.fas."fa-info" {} }
                        span { "Status" }
                    }
                    a."navbar-item"[href = "/api/data"] {
                        span.icon { i.fas."fa-code" {} }
                        span { "JSON" }
                    }
                }
            }
        }
    }
}
