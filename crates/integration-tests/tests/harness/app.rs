use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use errs_core::{Cause, Error, Failure, HttpErr, Kind, Op, Parameter, e, re};
use errs_http::ApiResult;
use http::StatusCode;
use serde_json::{Value, json};

/// Router whose handlers fail in every way the translator distinguishes
pub fn router() -> Router {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/orders/{id}", get(get_order))
        .route("/account", get(account))
        .route("/admin", get(admin))
        .route("/disk", get(disk))
        .route("/teapot", get(teapot))
        .route("/quota", get(quota))
}

async fn get_user(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    if id <= 0 {
        return Err(e!(Kind::Validation, "bad_id", Parameter::new("id"), Cause::message("id must be positive")).into());
    }
    if id > 100 {
        return Err(e!(Kind::NotExist, Parameter::new("id"), Cause::message(format!("user {id} not found"))).into());
    }
    Ok(Json(json!({ "id": id, "name": "ada" })))
}

/// Repository -> service -> handler, each layer wrapping the last
async fn get_order(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let failure = load_order(id);
    Err(re!(503, "orders_unavailable", failure).into())
}

fn load_order(id: i64) -> Failure {
    let repo = e!(
        Op::new("orders.repo.find"),
        Kind::Database,
        Parameter::new("id"),
        std::io::Error::other(format!("connection reset while reading order {id}"))
    );
    e!(Op::new("orders.service.get"), Kind::Database, repo)
}

async fn account() -> ApiResult<Json<Value>> {
    Err(Error::new(Kind::Unauthenticated)
        .with_code("token_expired")
        .with_cause(Cause::message("jwt expired at 2026-01-01T00:00:00Z"))
        .into())
}

async fn admin() -> ApiResult<Json<Value>> {
    Err(Error::new(Kind::Unauthorized).with_param("role").into())
}

async fn disk() -> ApiResult<Json<Value>> {
    Err(std::io::Error::other("/var/lib/app is full").into())
}

async fn teapot() -> ApiResult<Json<Value>> {
    Err(HttpErr::new(StatusCode::IM_A_TEAPOT).into())
}

async fn quota() -> ApiResult<Json<Value>> {
    let mut err = HttpErr {
        kind: Kind::Invalid,
        code: "quota_exceeded".into(),
        ..HttpErr::new(StatusCode::TOO_MANY_REQUESTS)
    };
    err.set_err("daily quota of 1000 requests exceeded");
    Err(err.into())
}
