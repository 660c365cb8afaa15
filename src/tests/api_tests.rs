use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::build_router;
use crate::core::models::group::{Collection, Group};
use crate::infrastructure::storage::Storage;
use crate::tests::{TestService, create_admin, create_member, create_pending_group, create_test_service};

struct TestApp {
    router: Router,
    service: Arc<TestService>,
}

impl TestApp {
    fn new() -> Self {
        let service = Arc::new(create_test_service());
        TestApp {
            router: build_router(service.clone()),
            service,
        }
    }

    async fn admin_token(&self) -> String {
        create_admin(&self.service).await;
        self.service
            .authenticate("admin@example.com", "admin-password")
            .await
            .unwrap()
    }

    async fn member_token(&self) -> String {
        create_member(&self.service, "Pieter", "pieter@example.com").await;
        self.service
            .authenticate("pieter@example.com", "password123")
            .await
            .unwrap()
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send_raw(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, bytes.to_vec())
    }
}

fn registration_body(group_name: &str) -> Value {
    json!({
        "leaderName": "Anna Botha",
        "leaderEmail": "anna@example.com",
        "groupName": group_name,
        "meetingDay": "Dinsdag",
        "meetingTime": "Aand",
        "meetingFrequency": "Weekliks",
        "meetingType": "in persoon",
        "targetAudience": "Mixed Adults",
        "childcareAvailable": true,
        "location": "Langenhovenpark",
        "primaryFocus": "geestelike-groei",
        "secondaryFocus": ["gaan"],
        "capacity": 12,
        "description": "Ons lees saam deur Romeine."
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, _, body) = app.send_raw(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_register_group_over_http() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::POST, "/api/groups/register", None, Some(registration_body("Romeine Studie")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["leaderContact"], "anna@example.com");
    assert_eq!(body["primaryFocus"], "geestelike-groei");
    assert_eq!(body["currentMembers"], 0);
    assert!(body.get("leaderId").is_none());

    let id = body["id"].as_str().unwrap();
    assert!(app
        .service
        .storage()
        .get_group(Collection::PendingGroups, id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_register_group_validation_error_names_field() {
    let app = TestApp::new();
    let mut body = registration_body("Romeine Studie");
    body["capacity"] = json!(0);

    let (status, body) = app.send(Method::POST, "/api/groups/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"]["field"], "capacity");
}

#[tokio::test]
async fn test_register_group_with_token_sets_leader() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/groups/register",
            Some(&token),
            Some(registration_body("Romeine Studie")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["leaderId"].is_string());
}

#[tokio::test]
async fn test_approve_callable_envelopes() {
    let app = TestApp::new();
    let group = create_pending_group(&app.service, "Romeine Studie").await;
    let payload = json!({ "data": { "groupId": group.id } });

    let (status, body) = app
        .send(Method::POST, "/api/functions/approveGroup", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["status"], "UNAUTHENTICATED");

    let member = app.member_token().await;
    let (status, body) = app
        .send(Method::POST, "/api/functions/approveGroup", Some(&member), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["status"], "PERMISSION_DENIED");
    assert_eq!(body["error"]["message"], "Only administrators can approve groups.");

    let admin = app.admin_token().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/functions/approveGroup",
            Some(&admin),
            Some(json!({ "data": {} })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/functions/approveGroup",
            Some(&admin),
            Some(json!({ "data": { "groupId": "missing" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "The pending group does not exist.");

    let (status, body) = app
        .send(Method::POST, "/api/functions/approveGroup", Some(&admin), Some(payload))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "result": { "status": "success", "message": "Group approved successfully." } })
    );

    let (status, body) = app.send(Method::GET, "/api/groups", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["groups"][0]["id"], group.id.as_str());
    assert_eq!(body["groups"][0]["status"], "active");
}

#[tokio::test]
async fn test_approve_callable_without_body_is_unauthenticated_first() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::POST, "/api/functions/approveGroup", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["status"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new();

    let (status, _) = app.send(Method::GET, "/api/admin/groups", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::GET, "/api/admin/groups", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let member = app.member_token().await;
    let (status, body) = app.send(Method::GET, "/api/admin/groups", Some(&member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let admin = app.admin_token().await;
    let (status, body) = app.send(Method::GET, "/api/admin/groups", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_moderation_over_http() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let group = create_pending_group(&app.service, "Romeine Studie").await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/admin/groups/{}/status", group.id),
            Some(&admin),
            Some(json!({ "status": "active", "sourceType": "pendingGroups" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sourceType"], "groups");
    assert_eq!(body["status"], "active");

    let (status, body) = app.send(Method::GET, "/api/admin/groups", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["sourceType"], "groups");

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/admin/groups/{}?collection=pendingGroups", group.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/admin/groups/{}?collection=groups", group.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/admin/groups/{}/audits", group.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["action"].as_str())
        .collect();
    assert_eq!(actions, vec!["GROUP_REGISTERED", "GROUP_APPROVED", "GROUP_DELETED"]);
}

#[tokio::test]
async fn test_join_and_leave_over_http() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let member = app.member_token().await;
    let group = create_pending_group(&app.service, "Romeine Studie").await;
    app.send(
        Method::POST,
        "/api/functions/approveGroup",
        Some(&admin),
        Some(json!({ "data": { "groupId": group.id } })),
    )
    .await;

    let join_uri = format!("/api/groups/{}/join", group.id);
    let (status, _) = app.send(Method::POST, &join_uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.send(Method::POST, &join_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"]["currentMembers"], 1);
    assert_eq!(body["members"][0]["name"], "Pieter");

    let (status, body) = app
        .send(Method::GET, &format!("/api/groups/{}", group.id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spotsLeft"], 9);

    let (status, body) = app
        .send(Method::POST, &format!("/api/groups/{}/leave", group.id), Some(&member), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"]["currentMembers"], 0);
}

#[tokio::test]
async fn test_pending_group_detail_is_not_public() {
    let app = TestApp::new();
    let group: Group = create_pending_group(&app.service, "Romeine Studie").await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/groups/{}", group.id), None, None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_users_login_and_me() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Sarie", "email": "sarie@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isAdmin"], false);
    assert!(body.get("passwordHash").is_none());

    let (status, _) = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Sarie", "email": "sarie@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "sarie@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "sarie@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app.send(Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "sarie@example.com");
}

#[tokio::test]
async fn test_announcements_over_http() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/admin/announcements",
            Some(&admin),
            Some(json!({ "title": "Braai", "content": "Gemeentebraai op Vrydag.", "category": "Event" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/admin/announcements/{}", id),
            Some(&admin),
            Some(json!({ "title": "Braai", "content": "Gemeentebraai op Saterdag." })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("category").is_none());

    let (status, body) = app.send(Method::GET, "/api/announcements", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "Gemeentebraai op Saterdag.");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/admin/announcements/{}", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::GET, "/api/admin/logs", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["action"] == "ANNOUNCEMENT_DELETED"));
}

#[tokio::test]
async fn test_export_over_http() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    create_pending_group(&app.service, "Romeine Studie").await;

    let (status, content_type, body) = app
        .send_raw(Method::GET, "/api/admin/groups/export", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));
    let csv = String::from_utf8(body).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("\"Romeine Studie\""));
}

#[tokio::test]
async fn test_directory_query_over_http() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    for name in ["Romeine Studie", "Oggend Gebed"] {
        let group = create_pending_group(&app.service, name).await;
        app.send(
            Method::POST,
            "/api/functions/approveGroup",
            Some(&admin),
            Some(json!({ "data": { "groupId": group.id } })),
        )
        .await;
    }

    let (status, body) = app
        .send(Method::GET, "/api/groups?search=gebed&view=list&meetingDay=Dinsdag", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "list");
    assert_eq!(body["total"], 1);
    assert_eq!(body["groups"][0]["groupName"], "Oggend Gebed");
}
