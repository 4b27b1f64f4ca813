use crate::errors::AppError;
use crate::models::Page;
use crate::recorder;
use crate::state::AppState;
use crate::ui::render;
use axum::{
    extract::State,
    response::{Html, Redirect},
};

pub async fn welcome() -> Html<String> {
    Html(render(&Page::Welcome))
}

pub async fn count(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let outcome = recorder::record_visit(state.store.as_ref()).await?;
    Ok(Html(render(&Page::Count(outcome))))
}

pub async fn reset(State(state): State<AppState>) -> Result<Redirect, AppError> {
    recorder::reset(state.store.as_ref()).await?;
    Ok(Redirect::to("/count"))
}

pub async fn about() -> Html<String> {
    Html(render(&Page::About))
}
