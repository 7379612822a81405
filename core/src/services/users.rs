//! `/users` resource and the `/auth` endpoints.

use super::paginated;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{ApiResponse, PaginatedResponse};
use crate::user::{AuthResponse, CreateUserRequest, LoginRequest, UpdateUserRequest, User};

pub const USERS_PATH: &str = "/users";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PROFILE_PATH: &str = "/auth/profile";

pub fn list_path(page: u32, limit: u32) -> String {
    paginated(USERS_PATH, page, limit)
}

pub fn item_path(id: &str) -> String {
    format!("{USERS_PATH}/{id}")
}

#[derive(Debug)]
pub struct UsersService<'c, T> {
    client: &'c ApiClient<T>,
}

impl<'c, T: Transport> UsersService<'c, T> {
    pub fn new(client: &'c ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_users(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse<PaginatedResponse<User>>, ApiError> {
        self.client.get(&list_path(page, limit))
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.client.get(&item_path(id))
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn create_user(&self, user: &CreateUserRequest) -> Result<ApiResponse<User>, ApiError> {
        self.client.post(USERS_PATH, user)
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn update_user(
        &self,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> Result<ApiResponse<User>, ApiError> {
        self.client.put(&item_path(id), changes)
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn delete_user(&self, id: &str) -> Result<ApiResponse<()>, ApiError> {
        self.client.delete(&item_path(id))
    }

    /// Exchange credentials for a user and token. The token is returned to
    /// the caller; the client does not keep it.
    ///
    /// # Errors
    ///
    /// Transport or HTTP failure (including 401), already reported by the
    /// client.
    pub fn login(&self, email: &str, password: &str) -> Result<ApiResponse<AuthResponse>, ApiError> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post(LOGIN_PATH, &credentials)
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn register(&self, user: &CreateUserRequest) -> Result<ApiResponse<AuthResponse>, ApiError> {
        self.client.post(REGISTER_PATH, user)
    }

    /// The user the configured `Authorization` header belongs to.
    ///
    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_profile(&self) -> Result<ApiResponse<User>, ApiError> {
        self.client.get(PROFILE_PATH)
    }
}
