//! Typed facades over `ApiClient`, one per backend resource.
//!
//! Services only map a method call to a verb and a path; the envelope comes
//! back exactly as `ApiClient` returned it.

pub mod integrations;
pub mod users;

pub use integrations::IntegrationsService;
pub use users::UsersService;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// `?page=<page>&limit=<limit>` appended to `base`.
pub(crate) fn paginated(base: &str, page: u32, limit: u32) -> String {
    format!("{base}?page={page}&limit={limit}")
}
