//! Dashboard metric card.

markup::define! {
    Metric<'a, Body: markup::Render>(title: &'a str, icon: &'a str, body: Body) {
        div.column."is-one-quarter-desktop"."is-half-tablet" {
            div.card.metric {
                div."card-content" {
                    p."heading"."has-text-grey" {
                        @if !icon.is_empty() {
                            span.icon { i.fas.{icon} {} } " "
                        }
                        {title}
                    }
                    {body}
                }
            }
        }
    }
}
