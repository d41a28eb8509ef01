use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use minijinja::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::EXAMPLE_QUESTIONS;
use crate::web::state::AppState;
use crate::web::templates::render_template;

// Main UI entry point
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut context: HashMap<&str, Value> = HashMap::new();
    context.insert(
        "schema_text",
        Value::from(state.converter.schema().render_text()),
    );
    context.insert("mode", Value::from(state.converter.mode_name()));
    context.insert(
        "examples",
        Value::from_serialize(EXAMPLE_QUESTIONS.as_slice()),
    );
    context.insert("version", Value::from(env!("CARGO_PKG_VERSION")));

    Html(render_template(&state.template_env, "index.html", context))
}
