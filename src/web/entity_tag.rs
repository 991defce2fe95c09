use crate::prelude::*;
use rocket::response::{self, Responder};
use rocket::{Request, Response};

impl Store {
    /// Entity tag of the latest reading. It changes with every received frame.
    pub fn entity_tag(&self) -> String {
        format!("\"{:x}\"", self.sequence)
    }
}

/// Attaches the `ETag` header to the response.
pub struct Tagged<R>(pub String, pub R);

impl<'r, 'o: 'r, R: Responder<'r, 'o>> Responder<'r, 'o> for Tagged<R> {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'o> {
        Response::build_from(self.1.respond_to(request)?)
            .raw_header("ETag", self.0)
            .raw_header("Cache-Control", "no-cache")
            .ok()
    }
}
