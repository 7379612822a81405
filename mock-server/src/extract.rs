//! Extractors whose rejections are failure envelopes instead of axum's
//! plain-text bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};

use crate::{fail, Reply};

/// A rejected extraction, keeping axum's status code.
pub struct Rejected(Reply);

impl IntoResponse for Rejected {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<JsonRejection> for Rejected {
    fn from(rejection: JsonRejection) -> Self {
        Self(fail(rejection.status(), &rejection.body_text()))
    }
}

impl From<PathRejection> for Rejected {
    fn from(rejection: PathRejection) -> Self {
        Self(fail(rejection.status(), &rejection.body_text()))
    }
}

impl From<QueryRejection> for Rejected {
    fn from(rejection: QueryRejection) -> Self {
        Self(fail(rejection.status(), &rejection.body_text()))
    }
}

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Rejected))]
pub struct Body<T>(pub T);

/// Path parameter, e.g. `{id}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Rejected))]
pub struct Id<T>(pub T);

/// Query string.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Rejected))]
pub struct Params<T>(pub T);
