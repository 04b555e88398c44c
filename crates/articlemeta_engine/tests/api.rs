use articlemeta_core::{Identifier, XmlFormat};
use articlemeta_engine::{
    ApiError, ArticleMetaClient, FailureKind, FetchSettings, ReqwestFetcher, PAGE_SIZE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ArticleMetaClient<ReqwestFetcher> {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    ArticleMetaClient::new(fetcher, &format!("{}/api/v1/", server.uri())).unwrap()
}

async fn mount_page(server: &MockServer, offset: u64, objects: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/article/identifiers"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"offset": offset, "limit": PAGE_SIZE},
            "objects": objects,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test]
fn urls_are_built_from_base_with_or_without_trailing_slash() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let client = ArticleMetaClient::new(fetcher, "http://articlemeta.test/api/v1").unwrap();

    assert_eq!(
        client.identifiers_url(2000).unwrap().as_str(),
        "http://articlemeta.test/api/v1/article/identifiers?offset=2000"
    );
    let id = Identifier::new("scl", "S0001-37652004000300014");
    assert_eq!(
        client.document_url(&id, XmlFormat::XmlRsps).unwrap().as_str(),
        "http://articlemeta.test/api/v1/article?code=S0001-37652004000300014&collection=scl&format=xmlrsps"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    assert!(matches!(
        ArticleMetaClient::new(fetcher, "::nope"),
        Err(ApiError::BaseUrl { .. })
    ));
}

#[tokio::test]
async fn pager_walks_offsets_until_an_empty_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!([
            {"code": "S0001-37652004000300014", "collection": "scl"},
            {"code": "S0325-00752010000100002", "collection": "arg"}
        ]),
    )
    .await;
    mount_page(
        &server,
        1000,
        json!([{"code": "S0717-95022011000100001", "collection": "chl"}]),
    )
    .await;
    mount_page(&server, 2000, json!([])).await;

    let client = client(&server);
    let mut pager = client.pager();

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.offset, 0);
    assert_eq!(
        first.identifiers,
        vec![
            Identifier::new("scl", "S0001-37652004000300014"),
            Identifier::new("arg", "S0325-00752010000100002"),
        ]
    );
    let second = pager.next_page().await.unwrap().unwrap();
    assert_eq!(second.offset, 1000);
    assert_eq!(second.identifiers.len(), 1);

    assert!(pager.next_page().await.unwrap().is_none());
    // Exhausted pagers do not hit the endpoint again.
    assert!(pager.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn page_without_objects_key_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/article/identifiers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "database unavailable"})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.pager().next_page().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidPage { offset: 0, .. }));
}

#[tokio::test]
async fn non_json_page_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/article/identifiers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_identifier_page(0).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidPage { offset: 0, .. }));
}

#[tokio::test]
async fn document_is_fetched_in_requested_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/article"))
        .and(query_param("code", "S0001-37652004000300014"))
        .and(query_param("collection", "scl"))
        .and(query_param("format", "xmlwos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<articles>caf\xe9</articles>".to_vec(), "text/xml; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let id = Identifier::new("scl", "S0001-37652004000300014");
    let document = client(&server)
        .fetch_document(&id, XmlFormat::XmlWos)
        .await
        .unwrap();
    assert_eq!(document.text, "<articles>café</articles>");
    assert!(!document.had_errors);
}

#[tokio::test]
async fn document_failure_carries_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/article"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let id = Identifier::new("scl", "S0001-37652004000300014");
    let err = client(&server)
        .fetch_document(&id, XmlFormat::XmlWos)
        .await
        .unwrap_err();
    match err {
        ApiError::Document { identifier, source } => {
            assert_eq!(identifier, id);
            assert_eq!(source.kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
