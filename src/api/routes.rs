use actix_web::web;
use crate::api::rest::{classify_handler, echo_fixture_handler, list_messages_handler};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dto")
            .route("/messages", web::get().to(list_messages_handler))
            .route("/classify", web::post().to(classify_handler))
            .route("/fixtures/echo", web::post().to(echo_fixture_handler))
    );
}
