use actix_web::{
    middleware::Logger,
    web::{self, Data, Json},
    App, HttpResponse, HttpServer,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    api::routes::configure_routes,
    config::RestConfig,
    dto::Dto,
    error::DtoError,
    message::{fixtures::FixtureMessage, DtoMessage},
};

#[derive(Clone)]
pub struct AppState {
    pub dto: Arc<Dto>,
}

impl AppState {
    pub fn new(dto: Dto) -> Self {
        Self { dto: Arc::new(dto) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllowedMessageItem {
    pub package: String,
    pub name: String,
    pub full_name: String,
    pub marker: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllowedMessagesResponse {
    pub messages: Vec<AllowedMessageItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub matches: Vec<String>,
}

/// Sends `message` as JSON, only if it is safe.
pub fn send_safe_json<M: DtoMessage>(dto: &Dto, message: &M) -> Result<HttpResponse, DtoError> {
    let body = dto.to_safe_json(message)?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /dto/messages
pub async fn list_messages_handler(state: Data<AppState>) -> HttpResponse {
    let dto = &state.dto;
    let messages = dto
        .allowed_messages()
        .iter()
        .map(|allow| AllowedMessageItem {
            package: allow.package.clone(),
            name: allow.name.clone(),
            full_name: allow.full_name(),
            marker: dto
                .messages()
                .values()
                .flatten()
                .find(|schema| schema.allow() == *allow)
                .map(|schema| schema.type_id.to_string()),
        })
        .collect();
    HttpResponse::Ok().json(AllowedMessagesResponse { messages })
}

/// POST /dto/classify
///
/// Reports every registered message whose marker the body carries.
pub async fn classify_handler(state: Data<AppState>, body: Json<Value>) -> HttpResponse {
    let value = body.into_inner();
    let matches: Vec<String> = state
        .dto
        .matching_messages(&value)
        .into_iter()
        .map(|schema| schema.full_name())
        .collect();
    debug!("Classified value against {} marker(s)", matches.len());
    HttpResponse::Ok().json(ClassifyResponse { matches })
}

/// POST /dto/fixtures/echo
///
/// Strictly classifies the body and sends the parsed message back.
pub async fn echo_fixture_handler(
    state: Data<AppState>,
    body: Json<Value>,
) -> Result<HttpResponse, DtoError> {
    let message = FixtureMessage::classify(&body.into_inner())?;
    debug!("Echoing {}", message.full_name());
    match &message {
        FixtureMessage::Test(inner) => send_safe_json(&state.dto, inner),
        FixtureMessage::Test1(inner) => send_safe_json(&state.dto, inner),
    }
}

pub async fn run_server(config: RestConfig, dto: Dto) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(dto));
    info!("Starting REST server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
