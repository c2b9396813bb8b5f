//! Integration tests for the document operations.

use docgraph_net::{
    AuditData, CreateAndUpdateRequest, DocgraphClient, Error, RelationConnection, RequestContext,
    SearchFilter,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Todo {
    title: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[allow(dead_code)]
    price: f64,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn client_for(server: &MockServer) -> DocgraphClient {
    DocgraphClient::builder(format!("{}/secured/graphql", server.uri()))
        .api_key("secret")
        .build()
        .expect("Failed to build client")
}

async fn respond_with_data(server: &MockServer, variables: Value, data: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": variables})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
        .expect(1)
        .mount(server)
        .await;
}

fn todo_page() -> Value {
    json!({
        "results": [
            {"id": "t1", "type": "todo", "data": {"title": "Buy milk", "done": false}},
            {"id": "t2", "type": "todo", "data": {"title": "Walk dog", "done": true}},
            {"id": "t3", "type": "todo", "data": {"title": "File taxes"}}
        ],
        "count": 42
    })
}

#[tokio::test]
async fn test_get_single_resource() {
    init_tracing();
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"model": "todo", "_id": "t1", "single_page_data": false}),
        json!({"getSingleData": {
            "_key": "k1",
            "id": "t1",
            "type": "todo",
            "data": {"title": "Buy milk", "done": false},
            "meta": {"created_at": "2024-01-01T00:00:00Z", "status": "published", "revision": 3},
            "expire_at": "1700000000"
        }}),
    )
    .await;

    let client = client_for(&server);
    let ctx = RequestContext::for_tenant("acme");
    let document = client
        .get_single_resource(&ctx, "todo", "t1", false)
        .await
        .expect("Request failed");

    assert_eq!(document.id, "t1");
    assert_eq!(document.key.as_deref(), Some("k1"));
    assert_eq!(document.field("title"), Some(&json!("Buy milk")));
    assert_eq!(document.meta.as_ref().unwrap().revision, Some(3));
    assert_eq!(document.expire_at_epoch(), Some(1_700_000_000));
}

#[tokio::test]
async fn test_get_single_resource_typed() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"_id": "t1"}),
        json!({"getSingleData": {
            "id": "t1",
            "type": "todo",
            "data": {"title": "Buy milk", "done": false}
        }}),
    )
    .await;

    let client = client_for(&server);
    let typed = client
        .get_single_resource_typed::<Todo>(&RequestContext::new(), "todo", "t1", false)
        .await
        .expect("Request failed");

    assert_eq!(typed.id, "t1");
    assert_eq!(typed.doc_type, "todo");
    assert_eq!(
        typed.data,
        Todo {
            title: "Buy milk".into(),
            done: false
        }
    );
}

#[tokio::test]
async fn test_search_resources_sends_only_set_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"getModelData": todo_page()}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = SearchFilter::new()
        .limit(3)
        .where_clause(json!({"done": {"eq": false}}));
    let result = client
        .search_resources(&RequestContext::new(), "todo", &filter)
        .await
        .expect("Request failed");

    assert_eq!(result.count, 42);
    assert_eq!(result.len(), 3);

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let variables = body["variables"].as_object().unwrap();
    assert_eq!(variables["model"], "todo");
    assert_eq!(variables["limit"], 3);
    assert_eq!(variables["where"], json!({"done": {"eq": false}}));
    assert!(!variables.contains_key("page"));
    assert!(!variables.contains_key("search"));
}

#[tokio::test]
async fn test_search_resources_typed_preserves_order() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"model": "todo"}),
        json!({"getModelData": todo_page()}),
    )
    .await;

    let client = client_for(&server);
    let typed = client
        .search_resources_typed::<Todo>(&RequestContext::new(), "todo", &SearchFilter::new())
        .await
        .expect("Request failed");

    let titles: Vec<&str> = typed.data().map(|todo| todo.title.as_str()).collect();
    assert_eq!(titles, ["Buy milk", "Walk dog", "File taxes"]);
    assert_eq!(typed.count, 42);
    assert!(!typed.results[2].data.done);
}

#[tokio::test]
async fn test_search_resources_typed_reports_failing_index() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"model": "product"}),
        json!({"getModelData": {
            "results": [
                {"id": "p1", "data": {"price": 1.5}},
                {"id": "p2", "data": {"price": 2}},
                {"id": "p3", "data": {"price": "twenty"}}
            ],
            "count": 3
        }}),
    )
    .await;

    let client = client_for(&server);
    let err = client
        .search_resources_typed::<Product>(&RequestContext::new(), "product", &SearchFilter::new())
        .await
        .unwrap_err();

    assert!(err.is_conversion());
    match err {
        Error::Conversion(conversion) => {
            assert_eq!(conversion.index(), Some(2));
            assert_eq!(conversion.path(), Some("price"));
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_relation_documents() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({
            "model": "category",
            "limit": 5,
            "connection": {
                "model": "category",
                "filter": {"limit": 5},
                "relation_type": "has_many",
                "_id": "t1"
            }
        }),
        json!({"getModelData": {
            "results": [{"id": "c1", "relation_doc_id": "edge-1", "data": {"title": "Home"}}],
            "count": 1
        }}),
    )
    .await;

    let client = client_for(&server);
    let connection = RelationConnection::new("category")
        .filter(SearchFilter::new().limit(5))
        .option("relation_type", "has_many");

    let result = client
        .get_relation_documents(&RequestContext::new(), "t1", &connection)
        .await
        .expect("Request failed");

    assert_eq!(result.len(), 1);
    assert!(result.results[0].is_relation());

    let typed = result.to_typed::<Todo>().unwrap();
    assert_eq!(typed.results[0].data.title, "Home");
}

#[tokio::test]
async fn test_create_new_resource() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({
            "model": "todo",
            "payload": {"title": "Buy milk", "done": false},
            "single_page_data": false,
            "connect": {"category_ids": ["c1"]}
        }),
        json!({"upsertModelData": {
            "id": "t9",
            "type": "todo",
            "data": {"title": "Buy milk", "done": false},
            "meta": {"revision": 1}
        }}),
    )
    .await;

    let client = client_for(&server);
    let request = CreateAndUpdateRequest::new("todo")
        .with_payload(&Todo {
            title: "Buy milk".into(),
            done: false,
        })
        .unwrap()
        .connect(json!({"category_ids": ["c1"]}));

    let created = client
        .create_new_resource_typed::<Todo>(&RequestContext::new(), &request)
        .await
        .expect("Request failed");

    assert_eq!(created.id, "t9");
    assert_eq!(created.data.title, "Buy milk");
}

#[tokio::test]
async fn test_update_resource() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({
            "_id": "t1",
            "model": "todo",
            "payload": {"done": true},
            "force_update": true,
            "disconnect": {"category_ids": ["c1"]}
        }),
        json!({"upsertModelData": {
            "id": "t1",
            "type": "todo",
            "data": {"title": "Buy milk", "done": true}
        }}),
    )
    .await;

    let client = client_for(&server);
    let mut payload = docgraph_net::Payload::new();
    payload.insert("done".into(), json!(true));
    let request = CreateAndUpdateRequest::new("todo")
        .id("t1")
        .payload(payload)
        .force_update(true)
        .disconnect(json!({"category_ids": ["c1"]}));

    let updated = client
        .update_resource_typed::<Todo>(&RequestContext::new(), &request)
        .await
        .expect("Request failed");
    assert!(updated.data.done);

    let untyped = client
        .update_resource(&RequestContext::new(), &CreateAndUpdateRequest::new("todo"))
        .await
        .unwrap_err();
    assert!(matches!(untyped, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn test_delete_resource() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"model": "todo", "_id": "t1"}),
        json!({"deleteModelData": {"id": "t1"}}),
    )
    .await;

    let client = client_for(&server);
    client
        .delete_resource(&RequestContext::new(), "todo", "t1")
        .await
        .expect("Request failed");
}

#[tokio::test]
async fn test_delete_and_audit_accept_null_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"_id": "t1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteModelData": null}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"auditData": {"action": "delete"}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::new();

    client
        .delete_resource(&ctx, "todo", "t1")
        .await
        .expect("null deleteModelData should succeed");
    client
        .send_audit_log(&ctx, &AuditData::new("todo", "delete"))
        .await
        .expect("null data should succeed");
}

#[tokio::test]
async fn test_invalid_credentials_never_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteModelData": {"id": "t1"}}
        })))
        .mount(&server)
        .await;

    let err = DocgraphClient::builder(format!("{}/secured/graphql", server.uri()))
        .api_key("sec\nret")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidHeader(_)));

    let client = client_for(&server);
    let err = client
        .delete_resource(&RequestContext::for_tenant("acme\r\nX-Evil: 1"), "todo", "t1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidHeader(_)));
    assert!(err.is_transport());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_audit_log() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"auditData": {
            "resource": "todo",
            "action": "delete",
            "author": {"id": "u1"},
            "ip": "10.0.0.1"
        }}),
        json!({"sendAuditLog": {"message": "ok"}}),
    )
    .await;

    let client = client_for(&server);
    let mut audit = AuditData::new("todo", "delete");
    audit.author.insert("id".into(), json!("u1"));
    audit.additional_fields.insert("ip".into(), json!("10.0.0.1"));

    client
        .send_audit_log(&RequestContext::new(), &audit)
        .await
        .expect("Request failed");
}

#[tokio::test]
async fn test_debug_echoes_data() {
    let server = MockServer::start().await;
    respond_with_data(
        &server,
        json!({"stage": "init", "data": [1, "two"]}),
        json!({"debug": {"message": "received", "data": [1, "two"]}}),
    )
    .await;

    let client = client_for(&server);
    let echoed = client
        .debug(&RequestContext::new(), "init", vec![json!(1), json!("two")])
        .await
        .expect("Request failed");

    assert_eq!(echoed["message"], "received");
}

#[tokio::test]
async fn test_debug_missing_root_is_null() {
    let server = MockServer::start().await;
    respond_with_data(&server, json!({"stage": "init"}), json!({})).await;

    let client = client_for(&server);
    let echoed = client
        .debug(&RequestContext::new(), "init", Vec::new())
        .await
        .expect("Request failed");

    assert_eq!(echoed, Value::Null);
}

#[tokio::test]
async fn test_generate_tenant_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("X-Apito-Key", "secret"))
        .and(body_partial_json(json!({"variables": {"token": "root", "tenantId": "acme"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"generateTenantToken": {"token": "scoped"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client
        .generate_tenant_token(&RequestContext::new(), "root", "acme")
        .await
        .expect("Request failed");

    assert_eq!(token, "scoped");
}

#[tokio::test]
async fn test_missing_root_field_is_shape_error() {
    let server = MockServer::start().await;
    respond_with_data(&server, json!({"_id": "t1"}), json!({"somethingElse": {}})).await;

    let client = client_for(&server);
    let err = client
        .get_single_resource(&RequestContext::new(), "todo", "t1", false)
        .await
        .unwrap_err();

    assert!(err.is_shape());
    assert!(err.to_string().contains("getSingleData"));
}

#[tokio::test]
async fn test_null_root_field_is_shape_error() {
    let server = MockServer::start().await;
    respond_with_data(&server, json!({"_id": "gone"}), json!({"getSingleData": null})).await;

    let client = client_for(&server);
    let err = client
        .get_single_resource(&RequestContext::new(), "todo", "gone", false)
        .await
        .unwrap_err();

    assert!(err.is_shape());
    assert!(err.to_string().contains("getSingleData returned null"));
}

#[tokio::test]
async fn test_remote_error_from_operation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Field not found"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search_resources(&RequestContext::new(), "todo", &SearchFilter::new())
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert!(err.to_string().contains("Field not found"));
}

#[tokio::test]
async fn test_http_500_from_operation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .delete_resource(&RequestContext::new(), "todo", "t1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
}
