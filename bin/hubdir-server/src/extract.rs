//! Extractors whose rejections render as [`ServerError`] JSON bodies.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::ServerError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);
