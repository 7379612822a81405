//! `/marketplace-integrations` resource.

use super::paginated;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::integration::{
    ConnectionTestResult, CreateIntegrationRequest, Integration, IntegrationStats,
    UpdateIntegrationRequest,
};
use crate::transport::Transport;
use crate::types::{ApiResponse, PaginatedResponse};

pub const INTEGRATIONS_PATH: &str = "/marketplace-integrations";

pub fn list_path(page: u32, limit: u32) -> String {
    paginated(INTEGRATIONS_PATH, page, limit)
}

pub fn item_path(id: &str) -> String {
    format!("{INTEGRATIONS_PATH}/{id}")
}

pub fn sync_path(id: &str) -> String {
    format!("{INTEGRATIONS_PATH}/{id}/sync")
}

pub fn test_path(id: &str) -> String {
    format!("{INTEGRATIONS_PATH}/{id}/test")
}

pub fn stats_path() -> String {
    format!("{INTEGRATIONS_PATH}/stats")
}

/// Marketplace integration operations. Obtain one with
/// `ApiClient::integrations`.
#[derive(Debug)]
pub struct IntegrationsService<'c, T> {
    client: &'c ApiClient<T>,
}

impl<'c, T: Transport> IntegrationsService<'c, T> {
    pub fn new(client: &'c ApiClient<T>) -> Self {
        Self { client }
    }

    /// One page of integrations; `page` and `limit` are 1-based.
    ///
    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_integrations(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse<PaginatedResponse<Integration>>, ApiError> {
        self.client.get(&list_path(page, limit))
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_integration(&self, id: &str) -> Result<ApiResponse<Integration>, ApiError> {
        self.client.get(&item_path(id))
    }

    /// A duplicate or otherwise rejected integration usually comes back as a
    /// 2xx envelope with `success: false`, not as an `Err`.
    ///
    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn create_integration(
        &self,
        request: &CreateIntegrationRequest,
    ) -> Result<ApiResponse<Integration>, ApiError> {
        self.client.post(INTEGRATIONS_PATH, request)
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn update_integration(
        &self,
        id: &str,
        changes: &UpdateIntegrationRequest,
    ) -> Result<ApiResponse<Integration>, ApiError> {
        self.client.put(&item_path(id), changes)
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn delete_integration(&self, id: &str) -> Result<ApiResponse<()>, ApiError> {
        self.client.delete(&item_path(id))
    }

    /// Ask the backend to synchronize the integration now.
    ///
    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn sync_integration(&self, id: &str) -> Result<ApiResponse<Integration>, ApiError> {
        self.client.post_empty(&sync_path(id))
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn test_connection(
        &self,
        id: &str,
    ) -> Result<ApiResponse<ConnectionTestResult>, ApiError> {
        self.client.post_empty(&test_path(id))
    }

    /// # Errors
    ///
    /// Transport or HTTP failure, already reported by the client.
    pub fn get_integration_stats(&self) -> Result<ApiResponse<IntegrationStats>, ApiError> {
        self.client.get(&stats_path())
    }
}
