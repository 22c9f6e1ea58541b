use std::convert::Infallible;
use std::sync::Arc;

use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Reply};

use super::page::INDEX_HTML;
use crate::address::{
    parse_addresses, to_csv_string, AddressIoError, UploadedTable, OUTPUT_FILE_NAME, PREVIEW_ROWS,
};
use crate::ai::{has_content, DraftOutcome, ResponseDrafter, EMPTY_INPUT_WARNING};

const MAX_DRAFT_BYTES: u64 = 1024 * 1024;
const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

pub fn routes(
    drafter: Arc<ResponseDrafter>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    index().or(warp::path("api").and(
        draft(drafter)
            .or(parse())
            .or(preview()),
    ))
}

fn with_drafter(
    drafter: Arc<ResponseDrafter>,
) -> impl Filter<Extract = (Arc<ResponseDrafter>,), Error = Infallible> + Clone {
    warp::any().map(move || drafter.clone())
}

fn index() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML))
}

fn draft(
    drafter: Arc<ResponseDrafter>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("draft")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_DRAFT_BYTES))
        .and(warp::body::json())
        .and(with_drafter(drafter))
        .and_then(handle_draft)
}

fn parse() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("parse")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
        .and(warp::body::bytes())
        .and_then(handle_parse)
}

fn preview() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("preview")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
        .and(warp::body::bytes())
        .and_then(handle_preview)
}

#[derive(Debug, Deserialize)]
struct DraftPayload {
    text: String,
}

async fn handle_draft(
    payload: DraftPayload,
    drafter: Arc<ResponseDrafter>,
) -> Result<Response, warp::Rejection> {
    if !has_content(&payload.text) {
        let body = json!({
            "ok": false,
            "error": EMPTY_INPUT_WARNING,
            "display": EMPTY_INPUT_WARNING,
        });
        return Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
            .into_response());
    }

    let outcome = drafter.draft_outcome(&payload.text).await;
    let display = outcome.display_text();
    let (body, status) = match outcome {
        DraftOutcome::Reply(reply) => (
            json!({ "ok": true, "reply": reply, "display": display }),
            StatusCode::OK,
        ),
        DraftOutcome::Failed(e) => (
            json!({ "ok": false, "error": e.to_string(), "display": display }),
            StatusCode::BAD_GATEWAY,
        ),
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), status).into_response())
}

async fn handle_parse(body: Bytes) -> Result<Response, warp::Rejection> {
    match parse_upload(&body) {
        Ok(csv) => {
            let reply = warp::reply::with_header(csv, "content-type", "text/csv");
            let reply = warp::reply::with_header(
                reply,
                "content-disposition",
                format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME),
            );
            Ok(reply.into_response())
        }
        Err(e) => Ok(upload_error(e)),
    }
}

async fn handle_preview(body: Bytes) -> Result<Response, warp::Rejection> {
    let table = match UploadedTable::from_reader(body.as_ref()) {
        Ok(table) => table,
        Err(e) => return Ok(upload_error(e)),
    };
    let parsed = parse_addresses(table.addresses());
    let body = json!({
        "columns": table.headers().iter().collect::<Vec<_>>(),
        "input": table.preview_rows(PREVIEW_ROWS),
        "parsed": parsed.iter().take(PREVIEW_ROWS).collect::<Vec<_>>(),
        "total": parsed.len(),
    });
    Ok(warp::reply::json(&body).into_response())
}

fn parse_upload(body: &[u8]) -> Result<String, AddressIoError> {
    let table = UploadedTable::from_reader(body)?;
    let parsed = parse_addresses(table.addresses());
    info!("Parsed {} addresses from {} uploaded rows", parsed.len(), table.len());
    to_csv_string(&parsed)
}

fn upload_error(e: AddressIoError) -> Response {
    warn!("Rejected upload: {}", e);
    warp::reply::with_status(e.to_string(), StatusCode::BAD_REQUEST).into_response()
}
