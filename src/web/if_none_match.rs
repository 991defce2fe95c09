use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

/// Extracts a [`If-None-Match`](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/If-None-Match) header
/// from a request.
pub struct IfNoneMatch(pub String);

impl IfNoneMatch {
    /// Checks whether any of the listed tags matches, using the weak comparison.
    pub fn matches(&self, entity_tag: &str) -> bool {
        let entity_tag = entity_tag.trim_start_matches("W/");
        self.0
            .split(',')
            .map(|tag| tag.trim())
            .any(|tag| tag == "*" || tag.trim_start_matches("W/") == entity_tag)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for IfNoneMatch {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("If-None-Match") {
            Some(value) => Outcome::Success(IfNoneMatch(value.to_string())),
            None => Outcome::Forward(Status::Ok),
        }
    }
}
