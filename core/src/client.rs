//! The HTTP client base every resource service goes through.
//!
//! # Design
//! `ApiClient` holds a `ClientConfig`, a `Transport`, and optionally a
//! `Notifier`. It carries no mutable state between calls.
//!
//! Each call is split the same way: `build_request` turns a path and body
//! into an `HttpRequest`, the transport executes it, and `parse_response`
//! turns the `HttpResponse` into the backend's `ApiResponse` envelope. The
//! two halves are pure and public so they can be tested without any I/O.
//!
//! Failures (serialization, transport, non-2xx, undecodable body) are
//! logged, sent once to the notifier's `error` channel with the configured
//! title, and then returned. A 2xx envelope with `success: false` is not a
//! failure here.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{merge_headers, HttpMethod, HttpRequest, HttpResponse, APPLICATION_JSON, CONTENT_TYPE};
use crate::notify::Notifier;
use crate::services::{IntegrationsService, UsersService};
use crate::transport::Transport;
use crate::types::ApiResponse;

/// Client for the marketplace backend, generic over how requests travel.
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: Arc<T>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            notifier: self.notifier.clone(),
        }
    }
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            notifier: None,
        }
    }

    /// Report failures to `notifier` in addition to returning them.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Build the request for `method path`.
    ///
    /// Headers are `Content-Type: application/json`, then the configured
    /// headers, then `headers`; a later header replaces an earlier one with
    /// the same name. `body` is serialized to JSON when present.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` if `body` cannot be serialized.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let mut merged = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        merge_headers(&mut merged, &self.config.headers);
        merge_headers(&mut merged, headers);

        Ok(HttpRequest {
            method,
            url: self.url_for(path),
            headers: merged,
            body,
        })
    }

    /// Interpret a transport response.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` for any status outside 200..300 (the body is not
    /// read), `ApiError::Deserialization` if a 2xx body is not a valid
    /// envelope for `R`.
    pub fn parse_response<R>(&self, response: HttpResponse) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    fn report(&self, method: HttpMethod, path: &str, err: &ApiError) {
        tracing::warn!(%method, path, error = %err, "API request failed");
        if let Some(notifier) = &self.notifier {
            notifier.error(&err.to_string(), Some(&self.config.error_title));
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Send one request and return the envelope, with per-request headers
    /// layered over the configured ones.
    ///
    /// # Errors
    ///
    /// Any `ApiError`; it has already been reported to the notifier.
    pub fn request_with_headers<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.round_trip(method, path, body, headers)
            .inspect_err(|err| self.report(method, path, err))
    }

    fn round_trip<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body, headers)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending API request");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, url = %request.url, "API response received");
        self.parse_response(response)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<R>, ApiError> {
        self.request_with_headers::<R, ()>(HttpMethod::Get, path, None, &[])
    }

    /// `POST path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn post<R, B>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(HttpMethod::Post, path, Some(body), &[])
    }

    /// `POST path` with no body.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<R>, ApiError> {
        self.request_with_headers::<R, ()>(HttpMethod::Post, path, None, &[])
    }

    /// `PUT path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn put<R, B>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(HttpMethod::Put, path, Some(body), &[])
    }

    /// `PUT path` with no body.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn put_empty<R: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<R>, ApiError> {
        self.request_with_headers::<R, ()>(HttpMethod::Put, path, None, &[])
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See `request_with_headers`.
    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<R>, ApiError> {
        self.request_with_headers::<R, ()>(HttpMethod::Delete, path, None, &[])
    }

    pub fn integrations(&self) -> IntegrationsService<'_, T> {
        IntegrationsService::new(self)
    }

    pub fn users(&self) -> UsersService<'_, T> {
        UsersService::new(self)
    }
}
