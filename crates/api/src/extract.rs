//! Request extractors that report failures through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor.
///
/// Same as [`axum::Json`], but a malformed body, a wrong `Content-Type` or a
/// body that does not match the request type is returned as the standard
/// `{ "error": ... }` JSON body instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
