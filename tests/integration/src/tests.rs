use super::*;

use repair_api::ApiError;
use repair_auth::navigation::staff_route_guard;
use repair_auth::{
    AccessGuard, AuthError, GuardState, GuardedRoute, HttpAuthGateway, PortalSession, Redirect,
    StaffSession,
};
use repair_model::{
    AdminStats, MachineStats, MachineStatus, PasswordChange, PortalRole, StaffRole,
    ValidationError,
};

fn portal(backend: &MockBackend) -> PortalSession {
    PortalSession::new(HttpAuthGateway::new(backend.api()))
}

fn staff(backend: &MockBackend) -> StaffSession {
    StaffSession::new(HttpAuthGateway::new(backend.api()))
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_verify_without_session_is_none() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    assert!(session.is_loading());

    let identity = session.initialize().await;

    assert_eq!(identity, None);
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert_eq!(backend.hits("/api/auth/verify"), 1);
}

#[tokio::test]
async fn test_verify_rejection_body() {
    let backend = MockBackend::start().await.unwrap();

    let resp = reqwest::get(format!("{}/api/auth/verify", backend.base_url))
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "authenticated": false }));
}

#[tokio::test]
async fn test_successful_status_without_session_is_none() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();

    for reply in [VerifyReply::SignedOut, VerifyReply::NotJson] {
        backend.reply_to_verify(reply);

        assert_eq!(session.initialize().await, None, "{:?}", reply);
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    backend.reply_to_verify(VerifyReply::Session);
    assert_eq!(session.refresh().await.map(|i| i.id), Some(1));
}

#[tokio::test]
async fn test_client_login_then_verify_round_trip() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.initialize().await;

    let logged_in = session.login(JANE.0, JANE.1).await.unwrap();
    assert_eq!(logged_in.role, PortalRole::Client);
    assert_eq!(logged_in.identifiant.as_deref(), Some(JANE.0));
    assert_eq!(logged_in.display_name(), "Jane Doe");

    let verified = session.refresh().await;
    assert_eq!(verified.as_ref(), Some(&logged_in));
    assert_eq!(session.identity(), Some(logged_in));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let backend = MockBackend::start().await.unwrap();

    let resp = reqwest::Client::new()
        .post(format!("{}/api/auth/client/login", backend.base_url))
        .json(&json!({ "identifiant": JANE.0, "password": JANE.1 }))
        .send()
        .await
        .unwrap();
    let cookie = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_invalid_login_keeps_previous_identity() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.initialize().await;

    let err = session.login(JANE.0, "wrong-password").await.unwrap_err();
    assert!(matches!(
        &err,
        AuthError::InvalidCredentials(msg) if msg == "Identifiant ou mot de passe incorrect"
    ));
    assert_eq!(session.identity(), None);

    let jane = session.login(JANE.0, JANE.1).await.unwrap();
    assert!(session.login(JOHN.0, "nope").await.is_err());
    assert_eq!(session.identity(), Some(jane));
}

#[tokio::test]
async fn test_empty_credentials_never_reach_backend() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);

    let err = session.login("   ", "secret").await.unwrap_err();

    assert!(matches!(
        err,
        AuthError::Validation(ValidationError::MissingField(_))
    ));
    assert_eq!(backend.hits("/api/auth/client/login"), 0);
}

#[tokio::test]
async fn test_logout_clears_identity_and_cookie() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();

    session.logout().await;

    assert_eq!(session.identity(), None);
    assert_eq!(session.refresh().await, None);
}

#[tokio::test]
async fn test_logout_server_error_still_clears_identity() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();
    backend.fail_logout(true);

    session.logout().await;

    assert_eq!(session.identity(), None);
    assert!(!session.is_loading());
    assert_eq!(backend.hits("/api/auth/logout"), 1);
}

#[tokio::test]
async fn test_logout_dead_backend_still_clears_identity() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();

    backend.stop().await;
    session.logout().await;

    assert_eq!(session.identity(), None);
}

#[tokio::test]
async fn test_unreachable_backend_verifies_to_none() {
    let api = ApiClient::new(&ApiConfig::default().with_base_url(dead_address().await.unwrap()))
        .unwrap();
    let session = PortalSession::new(HttpAuthGateway::new(api));

    assert_eq!(session.initialize().await, None);
    assert!(!session.is_loading());

    let err = session.login(JANE.0, JANE.1).await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn test_subscribers_observe_login_and_logout() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    let mut rx = session.subscribe();
    session.initialize().await;
    let _ = rx.borrow_and_update();

    session.login(JANE.0, JANE.1).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_authenticated());

    session.logout().await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().identity, None);
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_staff_login_uses_email() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);

    let identity = session.login(TECH.0, TECH.1).await.unwrap();

    assert_eq!(identity.role, StaffRole::Technicien);
    assert_eq!(identity.identifiant, None);
    assert_eq!(identity.initials(), "MP");
    assert_eq!(backend.hits("/api/auth/login"), 1);
    assert_eq!(session.refresh().await, Some(identity));
}

#[tokio::test]
async fn test_admin_signs_in_to_portal_with_email() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);

    let identity = session.login(ADMIN.0, ADMIN.1).await.unwrap();

    assert_eq!(identity.role, PortalRole::Admin);
    assert_eq!(identity.identifiant.as_deref(), Some(ADMIN.0));
    assert_eq!(session.refresh().await, Some(identity));
}

#[tokio::test]
async fn test_unknown_role_is_rejected_and_session_closed() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);

    let err = session.login(GHOST.0, GHOST.1).await.unwrap_err();

    assert!(matches!(&err, AuthError::RoleNotAllowed(role) if role == "SUPERVISEUR"));
    assert_eq!(session.identity(), None);
    assert_eq!(backend.hits("/api/auth/logout"), 1);
    assert_eq!(session.refresh().await, None);
}

#[tokio::test]
async fn test_client_role_unknown_to_staff_console() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api();

    // Signed in through the portal, then read by the staff console sharing
    // the same jar: CLIENT is no staff role.
    let portal = PortalSession::new(HttpAuthGateway::new(api.clone()));
    portal.login(JANE.0, JANE.1).await.unwrap();

    let console = StaffSession::new(HttpAuthGateway::new(api));
    assert_eq!(console.initialize().await, None);
}

#[tokio::test]
async fn test_guard_follows_session_changes() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);

    let mut route = GuardedRoute::new(staff_route_guard("/dashboard/users"), "/dashboard/users");
    assert_eq!(route.update(&session.state()).state, GuardState::Checking);

    session.initialize().await;
    session.login(TECH.0, TECH.1).await.unwrap();

    let forbidden = route.update(&session.state());
    assert_eq!(forbidden.state, GuardState::Forbidden);
    assert_eq!(
        forbidden.redirect,
        Some(Redirect {
            to: "/dashboard".into()
        })
    );

    route.navigate("/dashboard", AccessGuard::authenticated());
    assert!(route.update(&session.state()).state.renders_children());

    session.logout().await;
    let signed_out = route.update(&session.state());
    assert_eq!(signed_out.state, GuardState::Unauthenticated);
    assert_eq!(signed_out.redirect, Some(Redirect { to: "/".into() }));
}

#[tokio::test]
async fn test_redirect_followed_then_sign_out_redirects_again() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);
    session.initialize().await;
    session.login(TECH.0, TECH.1).await.unwrap();

    let mut route = GuardedRoute::new(staff_route_guard("/dashboard/clients"), "/dashboard/clients");
    let denied = route.update(&session.state());
    assert_eq!(denied.state, GuardState::Forbidden);

    let landed = route.follow(denied.redirect.unwrap(), &session.state(), staff_route_guard);
    assert_eq!(route.path(), "/dashboard");
    assert_eq!(landed.state, GuardState::Authorized);

    session.logout().await;
    let signed_out = route.update(&session.state());
    assert_eq!(signed_out.state, GuardState::Unauthenticated);
    assert_eq!(signed_out.redirect, Some(Redirect { to: "/".into() }));

    let at_entry = route.follow(signed_out.redirect.unwrap(), &session.state(), staff_route_guard);
    assert_eq!(route.path(), "/");
    assert!(at_entry.state.renders_children());
    assert_eq!(at_entry.redirect, None);
}

// ============================================================================
// Data access
// ============================================================================

#[tokio::test]
async fn test_data_requests_carry_session_cookie() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    let api = session.gateway().api().clone();

    let err = api.client_machines(1).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Non authentifié");

    let jane = session.login(JANE.0, JANE.1).await.unwrap();
    let machines = api.machines_for(&jane).await.unwrap();

    assert_eq!(machines.len(), 2);
    assert!(machines.iter().all(|m| m.client.id == jane.id));

    let me = api.current_client().await.unwrap();
    assert_eq!(me.identifiant, JANE.0);
    assert_eq!(api.client(jane.id).await.unwrap(), me);
}

#[tokio::test]
async fn test_admin_sees_whole_shop() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    let admin = session.login(ADMIN.0, ADMIN.1).await.unwrap();
    let api = session.gateway().api();

    let machines = api.machines_for(&admin).await.unwrap();
    assert_eq!(machines.len(), 4);
    assert_eq!(MachineStats::from_machines(&machines).en_cours, 2);

    let (clients, machines) = api.admin_overview().await.unwrap();
    let stats = AdminStats::compute(&clients, &machines);
    assert_eq!(stats.total_clients, 2);
    assert_eq!(stats.active_clients, 1);
    assert_eq!(stats.paid_machines, 1);
    assert_eq!(stats.total_revenue, 25000.0);
}

#[tokio::test]
async fn test_admin_routes_forbidden_for_technician() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);
    session.login(TECH.0, TECH.1).await.unwrap();

    let err = session.gateway().api().all_machines().await.unwrap_err();

    assert!(matches!(
        &err,
        ApiError::Server { status: 403, message } if message == "Accès réservé aux administrateurs"
    ));
    // Data errors never touch the session.
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_machine_statuses_decode() {
    let backend = MockBackend::start().await.unwrap();
    let session = staff(&backend);
    session.login(ADMIN.0, ADMIN.1).await.unwrap();

    let machines = session.gateway().api().all_machines().await.unwrap();
    let paid = machines.iter().find(|m| m.id == 102).unwrap();

    assert_eq!(paid.statut, MachineStatus::Paye);
    assert_eq!(paid.montant, Some(25000.0));
    assert!(paid.technicien.is_none());
    assert_eq!(
        machines.iter().find(|m| m.id == 101).unwrap().technician_short_name().as_deref(),
        Some("Paul M.")
    );
}

// ============================================================================
// Password change
// ============================================================================

#[tokio::test]
async fn test_rejected_form_sends_nothing() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();
    let before = backend.requests().len();

    assert_eq!(
        PasswordChange::new(JANE.1, "abc", "abc").unwrap_err(),
        ValidationError::PasswordTooShort { min: 6 }
    );
    assert_eq!(
        PasswordChange::new(JANE.1, "abcdef", "abcdeg").unwrap_err(),
        ValidationError::PasswordMismatch
    );

    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn test_backend_password_rule_surfaces_unchanged() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();

    let change = PasswordChange::new(JANE.1, "seven77", "seven77").unwrap();
    let err = session
        .gateway()
        .api()
        .change_password(&change)
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        ApiError::Server { status: 400, message } if message == BACKEND_PASSWORD_ERROR
    ));
}

#[tokio::test]
async fn test_password_change_then_login_with_new_password() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(JANE.0, JANE.1).await.unwrap();

    let change = PasswordChange::new(JANE.1, "nouveau-secret", "nouveau-secret").unwrap();
    let ack = session
        .gateway()
        .api()
        .change_password(&change)
        .await
        .unwrap();
    assert_eq!(ack.message, "Mot de passe modifié avec succès");

    session.logout().await;
    assert!(session.login(JANE.0, JANE.1).await.is_err());
    assert!(session.login(JANE.0, "nouveau-secret").await.is_ok());
}

#[tokio::test]
async fn test_password_change_requires_client_role() {
    let backend = MockBackend::start().await.unwrap();
    let session = portal(&backend);
    session.login(ADMIN.0, ADMIN.1).await.unwrap();

    let change = PasswordChange::new(ADMIN.1, "nouveau-secret", "nouveau-secret").unwrap();
    let err = session
        .gateway()
        .api()
        .change_password(&change)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
}
