mod helper;

use std::any::type_name;

use helper::setup_system;
use http::StatusCode;
use pretty_assertions::assert_eq;
use waypoint::{
    middleware_fn, Callable, Error, Handler, HandlerSpec, Next, Param, Request, Response, Router,
    ServiceMap,
};

#[derive(Debug, Clone, PartialEq)]
struct User {
    name: String,
}

struct Greeting(&'static str);

struct Mailer;

fn authenticate() -> HandlerSpec {
    middleware_fn(|request: Request, next: Next| async move {
        let user = User {
            name: request.query().unwrap_or("anonymous").to_string(),
        };
        next.run(request.with_attribute("auth", user)).await
    })
    .into()
}

fn show_purchase() -> Callable {
    Callable::new(
        "show_purchase",
        [
            Param::object::<User>("user"),
            Param::untyped("id"),
            Param::object::<Greeting>("greeting"),
            Param::untyped("currency").with_default("EUR"),
            Param::object::<Mailer>("mailer").nullable(),
        ],
        |arguments| async move {
            let user = arguments.get::<User>(0)?;
            let id = arguments.parse::<u64>(1)?;
            let greeting = arguments.get::<Greeting>(2)?;
            let currency = arguments.string(3)?;
            let mailer = arguments.optional::<Mailer>(4)?;
            Ok(Response::text(
                StatusCode::OK,
                format!(
                    "{} {}: purchase {id} in {currency}, mail {}",
                    greeting.0,
                    user.name,
                    if mailer.is_some() { "on" } else { "off" }
                ),
            ))
        },
    )
}

#[tokio::test]
async fn binds_every_source_through_the_router() {
    setup_system();
    let router = Router::builder()
        .with_container(ServiceMap::new().with_type(Greeting("hello")))
        .middleware(authenticate())
        .unwrap()
        .get("/purchases/:id", show_purchase())
        .unwrap()
        .stop()
        .build();
    let response = router
        .handle(Request::get("/purchases/31?alice"))
        .await
        .unwrap();
    assert_eq!(
        response.body_string(),
        "hello alice: purchase 31 in EUR, mail off"
    );
}

#[tokio::test]
async fn parse_failures_surface_as_errors() {
    setup_system();
    let router = Router::builder()
        .with_container(ServiceMap::new().with_type(Greeting("hi")))
        .middleware(authenticate())
        .unwrap()
        .get("/purchases/:id", show_purchase())
        .unwrap()
        .build();
    let error = router
        .handle(Request::get("/purchases/latest"))
        .await
        .unwrap_err();
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.to_string().contains("\"id\""), "{error}");
}

#[tokio::test]
async fn request_and_next_parameters() {
    setup_system();
    let guard = Callable::new(
        "guard",
        [Param::request("request"), Param::next("next")],
        |arguments| async move {
            let request = arguments.request(0)?;
            if request.query() == Some("deny") {
                return Ok(Response::new(StatusCode::FORBIDDEN));
            }
            arguments.next(1)?.run(request).await
        },
    );
    let router = Router::builder()
        .middleware(guard)
        .unwrap()
        .get(
            "/",
            Callable::new("home", Vec::<Param>::new(), |_| async {
                Ok(Response::text(StatusCode::OK, "home"))
            }),
        )
        .unwrap()
        .build();

    let response = router.handle(Request::get("/")).await.unwrap();
    assert_eq!(response.body_string(), "home");
    let response = router.handle(Request::get("/?deny")).await.unwrap();
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn attributes_are_found_by_name() {
    setup_system();
    let tenant = middleware_fn(|request: Request, next: Next| async move {
        next.run(request.with_attribute("tenant", "acme".to_string()))
            .await
    });
    let router = Router::builder()
        .middleware(tenant)
        .unwrap()
        .get(
            "/",
            Callable::new("tenant", [Param::string("tenant")], |arguments| async move {
                Ok(Response::text(StatusCode::OK, arguments.string(0)?))
            }),
        )
        .unwrap()
        .build();
    let response = router.handle(Request::get("/")).await.unwrap();
    assert_eq!(response.body_string(), "acme");
}

#[tokio::test]
async fn unresolvable_parameter_fails_at_request_time() {
    setup_system();
    let router = Router::builder()
        .get("/purchases/:id", show_purchase())
        .unwrap()
        .build();
    let error = router
        .handle(Request::get("/purchases/31"))
        .await
        .unwrap_err();
    assert!(matches!(error, Error::UnresolvableArgument(_)));
    assert_eq!(
        error.to_string(),
        format!(
            "Could not resolve 1st parameter \"user\" ({}) for \"show_purchase\". Try using a \
             dependency injection container (adding the parameter as a service) or adding the \
             parameter to the request attributes.",
            type_name::<User>()
        )
    );
}
