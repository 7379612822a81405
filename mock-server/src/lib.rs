//! In-memory stand-in for the marketplace admin backend.
//!
//! Serves the `/api/v1` routes the client consumes and wraps every reply in
//! the `{success, data?, message?, error?}` envelope, including rejections of
//! malformed ids, bodies and query strings. State lives in one `Store`
//! behind a `tokio` `RwLock` and is lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod extract;
pub mod integrations;
pub mod users;

pub use integrations::Integration;
pub use users::User;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Default)]
pub struct Store {
    pub integrations: Vec<Integration>,
    pub users: Vec<User>,
    passwords: HashMap<Uuid, String>,
    sessions: HashMap<String, Uuid>,
}

pub type Db = Arc<RwLock<Store>>;

/// Status code plus envelope body.
pub type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    router(Db::default())
}

/// The full API under `/api/v1`, sharing `db`.
pub fn router(db: Db) -> Router {
    let api = Router::new()
        .route(
            "/marketplace-integrations",
            get(integrations::list).post(integrations::create),
        )
        .route("/marketplace-integrations/stats", get(integrations::stats))
        .route(
            "/marketplace-integrations/{id}",
            get(integrations::fetch)
                .put(integrations::update)
                .delete(integrations::remove),
        )
        .route("/marketplace-integrations/{id}/sync", post(integrations::sync))
        .route(
            "/marketplace-integrations/{id}/test",
            post(integrations::test_connection),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::fetch).put(users::update).delete(users::remove),
        )
        .route("/auth/login", post(users::login))
        .route("/auth/register", post(users::register))
        .route("/auth/profile", get(users::profile))
        .with_state(db);

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
}

async fn unknown_route() -> Reply {
    fail(StatusCode::NOT_FOUND, "Route not found")
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn ok<T: Serialize>(data: T) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

pub fn created<T: Serialize>(data: T) -> Reply {
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": data })),
    )
}

pub fn ok_message(message: &str) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message })),
    )
}

/// Failure envelope with an arbitrary status. Application-level rejections
/// (duplicates) use `StatusCode::OK`.
pub fn fail(status: StatusCode, error: &str) -> Reply {
    (status, Json(json!({ "success": false, "error": error })))
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Slice `items` into the requested page, or a 400 envelope for a zero
/// `page` or `limit`.
pub fn paginate<T: Serialize>(items: &[T], params: &PageParams) -> Reply {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);
    if page == 0 || limit == 0 {
        return fail(
            StatusCode::BAD_REQUEST,
            "page and limit must be positive integers",
        );
    }
    let total = items.len();
    let per_page = limit as usize;
    let skip = (page as usize - 1).saturating_mul(per_page);
    let page_items: Vec<&T> = items.iter().skip(skip).take(per_page).collect();
    ok(json!({
        "items": page_items,
        "total": total,
        "page": page,
        "limit": limit,
        "totalPages": total.div_ceil(per_page),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, limit: u32) -> PageParams {
        PageParams {
            page: Some(page),
            limit: Some(limit),
        }
    }

    #[test]
    fn paginate_slices_and_counts_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let (status, Json(body)) = paginate(&items, &params(3, 5));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"], json!([11, 12]));
        assert_eq!(body["data"]["totalPages"], 3);
        assert_eq!(body["data"]["total"], 12);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=3).collect();
        let (_, Json(body)) = paginate(&items, &params(9, 10));
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(body["data"]["totalPages"], 1);
    }

    #[test]
    fn paginate_defaults_and_rejects_zero() {
        let items: Vec<u32> = Vec::new();
        let (_, Json(body)) = paginate(
            &items,
            &PageParams {
                page: None,
                limit: None,
            },
        );
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["limit"], 10);
        assert_eq!(body["data"]["totalPages"], 0);

        let (status, Json(body)) = paginate(&items, &params(0, 10));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[test]
    fn envelopes_have_the_expected_shape() {
        let (status, Json(body)) = fail(StatusCode::OK, "duplicate seller");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": false, "error": "duplicate seller"}));

        let (_, Json(body)) = ok_message("deleted");
        assert_eq!(body, json!({"success": true, "message": "deleted"}));
    }
}
