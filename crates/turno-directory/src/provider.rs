//! Read-only directory access.

use async_trait::async_trait;
use turno_core::{AdminUser, Customer, Result, Scope, Service, Staff};
use uuid::Uuid;

/// Read-only view of the business directory.
///
/// Every call takes the tenant scope explicitly; implementations hold no
/// ambient tenant state. Listings are request-time snapshots and include
/// inactive records so the resolver can tell "found but inactive" apart
/// from "not found".
#[async_trait]
pub trait Directory: Send + Sync {
    /// All staff members at this location, active and inactive.
    async fn list_staff(&self, scope: Scope) -> Result<Vec<Staff>>;

    /// All services offered at this location, active and inactive.
    async fn list_services(&self, scope: Scope) -> Result<Vec<Service>>;

    /// All registered customers, active and inactive.
    async fn list_customers(&self, scope: Scope) -> Result<Vec<Customer>>;

    /// Look up a registered customer by exact email or phone match.
    async fn find_customer_by_contact(
        &self,
        scope: Scope,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Customer>>;

    /// Look up an administrator by id. `None` means the caller is not an
    /// admin of this location.
    async fn find_admin(&self, scope: Scope, admin_id: Uuid) -> Result<Option<AdminUser>>;
}
