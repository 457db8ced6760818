//! HTTP status carried by registered codes and error values.
//!
//! A status of `0` means "unset"; resolving it yields
//! [`DEFAULT_STATUS`] (500 Internal Server Error). Every other value is kept
//! as is, even when it is not a standard HTTP status.

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Status returned when a code carries no status of its own.
pub const DEFAULT_STATUS: u16 = 500;

/// Raw HTTP status as registered for an error code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HttpStatus(u16);

impl HttpStatus {
    /// The "unset" status.
    pub const UNSET: Self = Self(0);

    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Replace an unset status with [`DEFAULT_STATUS`].
    #[must_use]
    pub const fn resolve(self) -> Self {
        if self.0 == 0 {
            Self(DEFAULT_STATUS)
        } else {
            self
        }
    }

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Convert to [`http::StatusCode`] for the transport status line.
    ///
    /// The status is resolved first; values outside the valid HTTP range fall
    /// back to `INTERNAL_SERVER_ERROR`.
    #[must_use]
    pub fn to_status_code(self) -> StatusCode {
        StatusCode::from_u16(self.resolve().0).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Resolve a raw status, mapping `0` to [`DEFAULT_STATUS`].
#[must_use]
pub const fn resolve(raw: u16) -> HttpStatus {
    HttpStatus::new(raw).resolve()
}

impl From<u16> for HttpStatus {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<StatusCode> for HttpStatus {
    fn from(status: StatusCode) -> Self {
        Self(status.as_u16())
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
