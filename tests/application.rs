mod helper;

use helper::{content_type, html, json, setup_system};
use http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use waypoint::{
    handle_fn, middleware_fn, Callable, Handler, HandlerSpec, HeaderMapExt, Next, Param, Request,
    Response, Router, RouterBuilder,
};

fn page(body: &'static str) -> HandlerSpec {
    handle_fn(move |_| async move { Ok(html(body)) }).into()
}

fn html_errors() -> HandlerSpec {
    middleware_fn(|request: Request, next: Next| async move {
        match next.run(request).await {
            Ok(response) => Ok(response),
            Err(e) => Ok(html(format!("<h1>{e}</h1>")).with_status(e.status_code())),
        }
    })
    .into()
}

fn api_errors() -> HandlerSpec {
    middleware_fn(|request: Request, next: Next| async move {
        match next.run(request).await {
            Ok(response) => Ok(response),
            Err(e) => Ok(json(Some(json!({ "msg": e.to_string() })), e.status_code())),
        }
    })
    .into()
}

fn with_id(name: &'static str) -> Callable {
    Callable::new(name, [Param::untyped("id")], |arguments| async move {
        let id = arguments.string(0)?;
        Ok(json(Some(json!({ "id": id })), StatusCode::OK))
    })
}

fn users(users: RouterBuilder) -> waypoint::Result<RouterBuilder> {
    users
        .post(
            "/",
            handle_fn(|_| async { Ok(json(Some(json!({ "id": "1" })), StatusCode::CREATED)) }),
        )?
        .get("/:id", with_id("users.show"))?
        .get("/:id/purchases", with_id("users.purchases"))?
        .delete(
            "/:id",
            handle_fn(|_| async { Ok(json(None, StatusCode::NO_CONTENT)) }),
        )
}

fn auth(auth: RouterBuilder) -> waypoint::Result<RouterBuilder> {
    auth.post(
        "/login",
        handle_fn(|_| async { Ok(json(Some(json!({ "token": "t0k3n" })), StatusCode::OK)) }),
    )?
    .get(
        "/me",
        handle_fn(|_| async { Ok(json(Some(json!({ "name": "me" })), StatusCode::OK)) }),
    )
}

fn application() -> waypoint::Result<Router> {
    Ok(Router::builder()
        .nest("/api/v1", |api| {
            api.middleware(api_errors())?
                .nest("/users", users)?
                .nest("/auth", auth)
        })?
        .middleware(html_errors())?
        .get("/", page("Home View"))?
        .get("/login", page("Login Form"))?
        .post(
            "/login",
            handle_fn(|_| async {
                Ok(Response::new(StatusCode::FOUND).with_header(header::LOCATION, "/"))
            }),
        )?
        .get("/courses", page("Courses"))?
        .stop()
        .build())
}

#[tokio::test]
async fn serves_html_pages() {
    setup_system();
    let app = application().unwrap();

    let response = app.handle(Request::get("/")).await.unwrap();
    assert_eq!(response.body_string(), "Home View");
    assert_eq!(content_type(&response), "text/html");

    let response = app.handle(Request::get("/login")).await.unwrap();
    assert_eq!(response.body_string(), "Login Form");

    let response = app.handle(Request::post("/login")).await.unwrap();
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header_str(header::LOCATION), Some("/"));
}

#[tokio::test]
async fn serves_the_json_api() {
    setup_system();
    let app = application().unwrap();

    let response = app.handle(Request::get("/api/v1/users/22")).await.unwrap();
    assert_eq!(response.body_string(), r#"{"id":"22"}"#);
    assert_eq!(content_type(&response), "application/json");

    let response = app
        .handle(Request::get("/api/v1/users/22/purchases"))
        .await
        .unwrap();
    assert_eq!(response.body_string(), r#"{"id":"22"}"#);

    let response = app
        .handle(Request::new(Method::DELETE, "/api/v1/users/22"))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body_string(), "");

    let response = app.handle(Request::post("/api/v1/users")).await.unwrap();
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.handle(Request::get("/api/v1/auth/me")).await.unwrap();
    assert_eq!(response.body_string(), r#"{"name":"me"}"#);
}

#[tokio::test]
async fn api_misses_are_reported_as_json() {
    setup_system();
    let app = application().unwrap();
    let response = app
        .handle(Request::get("/api/v1/auth/wrong-route"))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body_string(),
        r#"{"msg":"Cannot GET /api/v1/auth/wrong-route"}"#
    );
}

#[tokio::test]
async fn page_misses_are_reported_as_html() {
    setup_system();
    let app = application().unwrap();

    let response = app.handle(Request::get("/wrong-route")).await.unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(content_type(&response), "text/html");
    assert_eq!(response.body_string(), "<h1>Cannot GET /wrong-route</h1>");

    let response = app
        .handle(Request::new(Method::PUT, "/courses"))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.body_string(),
        "<h1>Cannot PUT /courses (Try: GET)</h1>"
    );
}
