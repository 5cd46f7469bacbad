mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use tower::ServiceExt;

use common::{body_json, delete, get, location, session_set_cookie, test_app};
use tourdesk_api::{app, gate::RoutePolicy, session::Role, state::AppState};

#[tokio::test]
async fn login_page_open_to_anonymous_visitors() {
    let app = test_app();
    let res = app.send(get("/login", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_pages_redirect_any_valid_session_home() {
    let app = test_app();

    for role in [Role::Client, Role::Admin] {
        let cookie = app.cookie_for("u-1", role);
        for path in ["/login", "/register"] {
            let res = app.send(get(path, Some(&cookie))).await;
            assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{} as {}", path, role);
            assert_eq!(location(&res), Some("/"));
        }
    }
}

#[tokio::test]
async fn parameterized_protected_route_requires_session() {
    let app = test_app();

    let res = app.send(get("/users/42", None)).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/login"));

    let res = app.send(get("/bookings/42", None)).await;
    assert_eq!(location(&res), Some("/login"));
}

#[tokio::test]
async fn unusual_ids_still_hit_the_protected_gate() {
    let app = test_app();

    for path in ["/users/4.2", "/users/%34%32", "/bookings/a.b", "/users/~x"] {
        let res = app.send(get(path, None)).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{}", path);
        assert_eq!(location(&res), Some("/login"), "{}", path);
    }
}

#[tokio::test]
async fn parameterized_protected_route_allows_any_session() {
    let app = test_app();

    // Admin passes the gate; the record simply does not exist
    let res = app.send(get("/users/42", Some(&app.cookie_for("admin-1", Role::Admin)))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Client passes the gate for their own record
    let client = app.create_user("ada@example.com", "password123", Role::Client).await;
    let cookie = app.cookie_for(&client.id, Role::Client);
    let res = app.send(get(&format!("/users/{}", client.id), Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["data"]["email"], "ada@example.com");

    let res = app.send(get(&format!("/bookings/{}", client.id), Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn client_cannot_read_someone_elses_record() {
    let app = test_app();

    // The gate lets the request through; the handler refuses it
    let res = app.send(get("/users/42", Some(&app.cookie_for("u-1", Role::Client)))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send(get("/bookings/42", Some(&app.cookie_for("u-1", Role::Client)))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_reject_clients_and_anonymous_visitors() {
    let app = test_app();

    for path in ["/customers", "/users", "/bookings", "/flights"] {
        let res = app.send(get(path, None)).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{} anonymous", path);
        assert_eq!(location(&res), Some("/"));

        let res = app.send(get(path, Some(&app.cookie_for("u-1", Role::Client)))).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{} as client", path);
        assert_eq!(location(&res), Some("/"));
    }
}

#[tokio::test]
async fn admin_routes_allow_admins() {
    let app = test_app();
    let cookie = app.cookie_for("admin-1", Role::Admin);

    let res = app.send(get("/customers", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["section"], "customers");
    assert_eq!(body["data"]["viewer"]["role"], "ADMIN");

    let res = app.send(get("/users", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_json(res).await["data"].is_array());
}

#[tokio::test]
async fn open_routes_ignore_session_state() {
    let app = test_app();

    let res = app.send(get("/", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_json(res).await["data"]["viewer"].is_null());

    let res = app.send(get("/", Some(&app.cookie_for("u-1", Role::Client)))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["data"]["viewer"]["principal_id"], "u-1");
}

#[tokio::test]
async fn tampered_cookie_counts_as_no_session() {
    let app = test_app();
    let cookie = app.cookie_for("admin-1", Role::Admin);

    // Change one character in the middle of the signature
    let sig_start = cookie.rfind('.').unwrap() + 1;
    let pos = sig_start + 10;
    let replacement = if &cookie[pos..pos + 1] == "A" { "Q" } else { "A" };
    let mut tampered = cookie.clone();
    tampered.replace_range(pos..pos + 1, replacement);

    let res = app.send(get("/customers", Some(&tampered))).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/"));

    let res = app.send(get("/users/42", Some(&tampered))).await;
    assert_eq!(location(&res), Some("/login"));

    // The bad cookie is cleared
    let cleared = session_set_cookie(&res).expect("stale cookie should be cleared");
    assert!(cleared.starts_with("session=;"));
}

#[tokio::test]
async fn expired_cookie_counts_as_no_session() {
    let app = test_app();
    let issued = app
        .state
        .codec
        .issue_at("u-1", Role::Client, Utc::now() - Duration::days(8))
        .unwrap();
    let cookie = format!("session={}", issued.token);

    let res = app.send(get("/users/u-1", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/login"));

    // And an expired session does not block the login page
    let res = app.send(get("/login", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn garbage_cookie_on_open_route_is_cleared() {
    let app = test_app();
    let res = app.send(get("/", Some("session=not-a-token"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_set_cookie(&res).is_some());
    assert!(body_json(res).await["data"]["viewer"].is_null());
}

#[tokio::test]
async fn deleting_users_is_admin_only_even_past_the_gate() {
    let app = test_app();
    let victim = app.create_user("victim@example.com", "password123", Role::Client).await;
    let path = format!("/users/{}", victim.id);

    // A client session clears the PROTECTED gate but not the handler check
    let res = app.send(delete(&path, Some(&app.cookie_for(&victim.id, Role::Client)))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(app.state.users.find_by_id(&victim.id).await.is_some());

    let res = app.send(delete(&path, Some(&app.cookie_for("admin-1", Role::Admin)))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(app.state.users.find_by_id(&victim.id).await.is_none());
}

#[tokio::test]
async fn admin_cannot_delete_own_account() {
    let app = test_app();
    let admin = app.create_user("boss@example.com", "password123", Role::Admin).await;
    let cookie = app.cookie_for(&admin.id, Role::Admin);

    let res = app.send(delete(&format!("/users/{}", admin.id), Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn me_requires_a_session_at_the_handler() {
    let app = test_app();

    let res = app.send(get("/me", None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.send(get("/me", Some(&app.cookie_for("ghost", Role::Client)))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["session"]["principal_id"], "ghost");
    assert!(body["data"]["user"].is_null());
}

#[tokio::test]
async fn custom_policy_changes_what_the_gate_enforces() {
    let base = test_app();
    let policy = RoutePolicy::new()
        .protected("/health")
        .and_then(|p| p.public("/login"))
        .expect("valid patterns");
    let state = base.state.with_policy(policy);
    let router = app::router(state.clone());

    // /health now needs a session
    let res = router.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/login"));

    // /customers is no longer admin-only at the gate; the handler still refuses
    let res = router
        .oneshot(get("/customers", Some(&base_cookie(&state))))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

fn base_cookie(state: &AppState) -> String {
    let issued = state.codec.issue("u-1", Role::Client).unwrap();
    format!("session={}", issued.token)
}
