//! Open Library adapter against a local Actix stub over a real socket.

mod support;

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use catalog::domain::ports::{BookMetadataSource, BookMetadataSourceError};
use catalog::domain::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use catalog::outbound::open_library::OpenLibraryHttpSource;
use reqwest::Url;
use rstest::rstest;
use support::{HITCHHIKER_ISBN, isbn};

/// What the stub answers with.
#[derive(Clone)]
enum Reply {
    Json(&'static str),
    Status(u16, &'static str),
    Delay(Duration),
}

struct StubServer {
    endpoint: Url,
    handle: ServerHandle,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StubServer {
    async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let queries = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&queries);

        let server = HttpServer::new(move || {
            let reply = reply.clone();
            let recorded = Arc::clone(&recorded);
            App::new().route(
                "/api/books",
                web::get().to(move |query: web::Query<HashMap<String, String>>| {
                    let reply = reply.clone();
                    let recorded = Arc::clone(&recorded);
                    async move {
                        recorded
                            .lock()
                            .expect("queries lock")
                            .push(query.into_inner());
                        match reply {
                            Reply::Json(body) => HttpResponse::Ok()
                                .content_type("application/json")
                                .body(body),
                            Reply::Status(code, body) => HttpResponse::build(
                                actix_web::http::StatusCode::from_u16(code).expect("status"),
                            )
                            .body(body),
                            Reply::Delay(delay) => {
                                actix_web::rt::time::sleep(delay).await;
                                HttpResponse::Ok().body("{}")
                            }
                        }
                    }
                }),
            )
        })
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let endpoint = Url::parse(&format!("http://{addr}/api/books")).expect("stub endpoint");
        Self {
            endpoint,
            handle,
            queries,
        }
    }

    fn source(&self, timeout: Duration) -> OpenLibraryHttpSource {
        OpenLibraryHttpSource::new(self.endpoint.clone(), timeout).expect("build source")
    }

    fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().expect("queries lock").clone()
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

const HITCHHIKER_BODY: &str = r#"{
    "ISBN:9780345391803": {
        "title": "The Hitchhiker's Guide to the Galaxy",
        "authors": [{"name": "Douglas Adams", "url": "https://openlibrary.org/authors/OL272947A"}],
        "number_of_pages": 215
    }
}"#;

#[actix_web::test]
async fn resolves_title_and_author() {
    let stub = StubServer::start(Reply::Json(HITCHHIKER_BODY)).await;

    let book = stub
        .source(Duration::from_secs(5))
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect("resolution succeeds");

    assert_eq!(book.title, "The Hitchhiker's Guide to the Galaxy");
    assert_eq!(book.author, "Douglas Adams");
    assert_eq!(book.isbn, isbn(HITCHHIKER_ISBN));

    let queries = stub.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["bibkeys"], "ISBN:9780345391803");
    assert_eq!(queries[0]["format"], "json");
    assert_eq!(queries[0]["jscmd"], "data");
    stub.stop().await;
}

#[actix_web::test]
async fn joins_authors_and_fills_placeholders() {
    let stub = StubServer::start(Reply::Json(
        r#"{"ISBN:9780345391803": {"authors": [{"name": "A"}, {"url": "x"}, {"name": "B"}]}}"#,
    ))
    .await;
    let source = stub.source(Duration::from_secs(5));

    let book = source
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect("resolution succeeds");

    assert_eq!(book.title, UNKNOWN_TITLE);
    assert_eq!(book.author, "A, B");
    stub.stop().await;
}

#[rstest]
#[case(Reply::Json("{}"))]
#[case(Reply::Json(r#"{"ISBN:0000000000": {"title": "Other"}}"#))]
#[case(Reply::Json(r#"{"ISBN:9780345391803": null}"#))]
#[actix_web::test]
async fn missing_entry_is_not_found(#[case] reply: Reply) {
    let stub = StubServer::start(reply).await;

    let error = stub
        .source(Duration::from_secs(5))
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect_err("no entry");

    assert_eq!(error, BookMetadataSourceError::not_found(HITCHHIKER_ISBN));
    stub.stop().await;
}

#[actix_web::test]
async fn empty_authors_use_placeholder() {
    let stub = StubServer::start(Reply::Json(
        r#"{"ISBN:9780345391803": {"title": "Nameless", "authors": []}}"#,
    ))
    .await;

    let book = stub
        .source(Duration::from_secs(5))
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect("resolution succeeds");

    assert_eq!(book.author, UNKNOWN_AUTHOR);
    stub.stop().await;
}

#[rstest]
#[case(Reply::Status(500, "upstream exploded"), "status 500: upstream exploded")]
#[case(Reply::Status(404, ""), "status 404")]
#[case(Reply::Json("<html>maintenance</html>"), "invalid Open Library payload")]
#[actix_web::test]
async fn upstream_failures_are_unreachable(#[case] reply: Reply, #[case] fragment: &str) {
    let stub = StubServer::start(reply).await;

    let error = stub
        .source(Duration::from_secs(5))
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect_err("upstream failure");

    match error {
        BookMetadataSourceError::Unreachable { message } => {
            assert!(message.contains(fragment), "message: {message}");
        }
        other => panic!("expected unreachable, got {other:?}"),
    }
    stub.stop().await;
}

#[actix_web::test]
async fn slow_upstream_times_out() {
    let stub = StubServer::start(Reply::Delay(Duration::from_secs(2))).await;

    let error = stub
        .source(Duration::from_millis(100))
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect_err("timeout");

    assert!(matches!(error, BookMetadataSourceError::Unreachable { .. }));
    stub.stop().await;
}

#[actix_web::test]
async fn refused_connection_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    let endpoint = Url::parse(&format!("http://{addr}/api/books")).expect("endpoint");
    let source =
        OpenLibraryHttpSource::new(endpoint, Duration::from_secs(1)).expect("build source");

    let error = source
        .resolve(&isbn(HITCHHIKER_ISBN))
        .await
        .expect_err("connection refused");

    assert!(matches!(error, BookMetadataSourceError::Unreachable { .. }));
}
