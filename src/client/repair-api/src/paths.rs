//! Backend routes.

/// Session check.
pub const VERIFY: &str = "/api/auth/verify";
/// Session teardown.
pub const LOGOUT: &str = "/api/auth/logout";
/// Client portal login (`identifiant` + `password`).
pub const CLIENT_LOGIN: &str = "/api/auth/client/login";
/// Staff console login (`email` + `password`).
pub const STAFF_LOGIN: &str = "/api/auth/login";
/// Password change for the signed-in client.
pub const CHANGE_PASSWORD: &str = "/api/auth/client/change-password";
/// Profile of the signed-in client.
pub const CLIENT_ME: &str = "/api/auth/client/me";
/// Every machine in the shop.
pub const ADMIN_MACHINES: &str = "/api/auth/admin/machines";
/// Every registered client.
pub const ADMIN_CLIENTS: &str = "/api/auth/admin/clients";

/// A single client record.
pub fn client(client_id: i64) -> String {
    format!("/api/auth/client/{}", client_id)
}

/// Machines owned by one client.
pub fn client_machines(client_id: i64) -> String {
    format!("/api/auth/client/{}/machines", client_id)
}
