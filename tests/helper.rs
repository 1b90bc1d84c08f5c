use std::{env, sync::Once};

use http::{header, StatusCode};
use tracing_subscriber::EnvFilter;
use waypoint::{handle_fn, middleware_fn, HandlerSpec, HeaderMapExt, Next, Request, Response};

static LOGGING: Once = Once::new();

pub fn setup_system() {
    LOGGING.call_once(|| {
        if env::var("CI").is_err() {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        }
    });
}

#[allow(dead_code)]
pub fn text(body: &'static str) -> HandlerSpec {
    handle_fn(move |_| async move { Ok(Response::text(StatusCode::OK, body)) }).into()
}

#[allow(dead_code)]
pub fn html(body: impl Into<String>) -> Response {
    Response::text(StatusCode::OK, body).with_header(header::CONTENT_TYPE, "text/html")
}

#[allow(dead_code)]
pub fn json(body: Option<serde_json::Value>, status: StatusCode) -> Response {
    let mut response =
        Response::new(status).with_header(header::CONTENT_TYPE, "application/json");
    if let Some(body) = body {
        response.set_body(body.to_string());
    }
    response
}

/// Appends `label` to the front of the `x-trail` response header on the way
/// out, so the header spells the order middleware were entered in.
#[allow(dead_code)]
pub fn tag(label: &'static str) -> HandlerSpec {
    middleware_fn(move |request: Request, next: Next| async move {
        let response = next.run(request).await?;
        let seen = response.header_str("x-trail").unwrap_or_default().to_string();
        Ok(response.with_header("x-trail", format!("{label}{seen}")))
    })
    .into()
}

#[allow(dead_code)]
pub fn content_type(response: &Response) -> &str {
    response.header_str(header::CONTENT_TYPE).unwrap_or_default()
}
