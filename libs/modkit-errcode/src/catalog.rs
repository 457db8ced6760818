//! Base error codes shared by every service.
//!
//! Codes `1000..=1099` cover generic request failures, `1100..` data access
//! and `1200..` remote calls. Services register their own codes outside these
//! ranges. Call [`init`] once during startup before constructing any of them.

use std::sync::Once;

use http::StatusCode;

use crate::registry::{ErrorCode, register};

pub const PARAM: ErrorCode = ErrorCode::from_raw(1000);
pub const UNAUTHENTICATED: ErrorCode = ErrorCode::from_raw(1001);
pub const PARSE: ErrorCode = ErrorCode::from_raw(1002);
pub const PERMISSION: ErrorCode = ErrorCode::from_raw(1003);
pub const NOT_FOUND: ErrorCode = ErrorCode::from_raw(1004);
pub const CONFLICT: ErrorCode = ErrorCode::from_raw(1005);
pub const INTERNAL: ErrorCode = ErrorCode::from_raw(1006);

pub const DATABASE: ErrorCode = ErrorCode::from_raw(1100);
pub const DUPLICATE: ErrorCode = ErrorCode::from_raw(1101);

pub const RPC: ErrorCode = ErrorCode::from_raw(1200);

const BASE: &[(ErrorCode, StatusCode, &str)] = &[
    (PARAM, StatusCode::BAD_REQUEST, "invalid parameter"),
    (UNAUTHENTICATED, StatusCode::UNAUTHORIZED, "resource unauthorized"),
    (PARSE, StatusCode::BAD_REQUEST, "failed to parse data"),
    (PERMISSION, StatusCode::FORBIDDEN, "permission denied"),
    (NOT_FOUND, StatusCode::NOT_FOUND, "resource not found"),
    (CONFLICT, StatusCode::CONFLICT, "resource conflict"),
    (INTERNAL, StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
    (DATABASE, StatusCode::INTERNAL_SERVER_ERROR, "unexpected database error"),
    (DUPLICATE, StatusCode::BAD_REQUEST, "duplicate primary key"),
    (RPC, StatusCode::INTERNAL_SERVER_ERROR, "unexpected remote call error"),
];

static INIT: Once = Once::new();

/// Register the base codes in the process-wide registry. Later calls are no-ops.
///
/// # Panics
/// Panics if one of the base codes was already registered by other means.
pub fn init() {
    INIT.call_once(|| {
        for &(code, status, message) in BASE {
            register(code.as_u32(), status.as_u16(), message);
        }
        tracing::debug!(count = BASE.len(), "Registered base error codes");
    });
}
