//! Client core for the marketplace integrations admin API.
//!
//! # Overview
//! `ApiClient` is the single place outbound requests go through. It prefixes
//! paths with the configured base URL, sends JSON, and returns the backend's
//! `ApiResponse` envelope untouched. `IntegrationsService` and
//! `UsersService` are thin typed facades that map domain calls to verbs and
//! paths.
//!
//! # Design
//! - I/O is behind the `Transport` trait. `UreqTransport` talks to the
//!   network; tests pass a closure instead.
//! - Request building and response parsing are pure (`build_request`,
//!   `parse_response`), so the whole contract is testable without sockets.
//! - Failures are returned as `ApiError` and also pushed to an optional
//!   `Notifier`. `NotificationSink` lets a UI register itself as that
//!   notifier after the client exists.
//! - A 2xx envelope with `success: false` is data, not an error.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod integration;
pub mod notify;
pub mod services;
pub mod transport;
pub mod types;
pub mod user;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, EnvelopeFailure, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use integration::{
    ConnectionTestResult, CreateIntegrationRequest, Integration, IntegrationStats,
    IntegrationStatus, MarketplaceType, UpdateIntegrationRequest,
};
pub use notify::{NotificationSink, Notifier, TracingNotifier};
pub use services::{IntegrationsService, UsersService, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use transport::{Transport, UreqTransport};
pub use types::{ApiResponse, PaginatedResponse};
pub use user::{AuthResponse, CreateUserRequest, LoginRequest, UpdateUserRequest, User, UserRole};
