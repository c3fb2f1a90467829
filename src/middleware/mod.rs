use http::StatusCode;
use serde::Serialize;
use warp::reply::Response;
use warp::Reply;


/// Serializes `payload` as the body of a response with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    warp::reply::with_status(warp::reply::json(payload), status).into_response()
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// Span wrapping every request so handler logs carry the process tags.
pub fn request_span(info: warp::trace::Info<'_>) -> tracing::Span {
    tracing::info_span!(
        "request",
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        method = %info.method(),
        path = %info.path(),
    )
}
