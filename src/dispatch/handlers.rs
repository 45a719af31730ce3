use super::action::ActionForm;
use super::service::RosterService;
use super::types::{Outcome, RosterStats, Section, SectionParams};

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Extension, Form, Query};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub const ENDPOINT_INDEX: &str = "/";
pub const ENDPOINT_STATS: &str = "/health/stats";

pub fn router(service: Arc<RosterService>) -> Router {
    Router::new()
        .route(ENDPOINT_INDEX, get(handle_index).post(handle_action))
        .route(ENDPOINT_STATS, get(handle_stats))
        .layer(Extension(service))
}

pub async fn handle_index(
    Extension(service): Extension<Arc<RosterService>>,
    params: Result<Query<SectionParams>, QueryRejection>,
) -> Html<String> {
    let section = requested_section(params);
    Html(service.render(&Outcome::idle(section)).await)
}

pub async fn handle_action(
    Extension(service): Extension<Arc<RosterService>>,
    params: Result<Query<SectionParams>, QueryRejection>,
    form: Result<Form<ActionForm>, FormRejection>,
) -> Html<String> {
    let fallback = requested_section(params);

    // A body the extractor cannot read is treated like a post without an action.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable form body: {}", rejection);
            return Html(service.render(&Outcome::idle(fallback)).await);
        }
    };

    let outcome = match form.decode(fallback) {
        Ok(Some(action)) => service.execute(action).await,
        Ok(None) => Outcome::idle(fallback),
        Err(rejected) => {
            tracing::debug!("Rejected form: {}", rejected.error);
            Outcome::message(rejected.section, rejected.error.to_string())
        }
    };

    Html(service.render(&outcome).await)
}

fn requested_section(params: Result<Query<SectionParams>, QueryRejection>) -> Section {
    match params {
        Ok(Query(params)) => Section::from_param(params.section.as_deref()),
        Err(rejection) => {
            tracing::debug!("Unreadable query string: {}", rejection);
            Section::default()
        }
    }
}

pub async fn handle_stats(Extension(service): Extension<Arc<RosterService>>) -> Json<RosterStats> {
    Json(service.stats().await)
}
