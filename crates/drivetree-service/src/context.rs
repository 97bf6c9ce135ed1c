//! Request context carrying the acting user and the client address.

use uuid::Uuid;

/// Who is acting, and from where.
///
/// Built by the HTTP layer from the `{userId}` path segment and passed into
/// every service method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// Client address, stored as `ip_location` on new files.
    pub ip_address: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, ip_address: impl Into<String>) -> Self {
        Self {
            user_id,
            ip_address: ip_address.into(),
        }
    }

    /// Whether the acting user owns a resource.
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}
