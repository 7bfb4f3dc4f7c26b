//! The acting identity of a request.

use serde::{Deserialize, Serialize};

use super::Role;

/// Who is making a request, passed explicitly into every engine operation.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{Principal, Role};
///
/// let admin = Principal::new(1, Role::Admin).with_ip_address("10.0.0.7");
/// assert!(admin.is_admin());
/// assert_eq!(admin.ip_address.as_deref(), Some("10.0.0.7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated account id.
    pub user_id: i64,
    /// The role the account acts under.
    pub role: Role,
    /// The client address, when the transport knows it.
    pub ip_address: Option<String>,
}

impl Principal {
    /// Creates a principal without address information.
    pub fn new(user_id: i64, role: Role) -> Self {
        Self {
            user_id,
            role,
            ip_address: None,
        }
    }

    /// Attaches the client address.
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// Returns true for admin principals.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
