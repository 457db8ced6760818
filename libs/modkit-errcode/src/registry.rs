//! Process-wide catalog of numeric error codes.
//!
//! Every code is bound once, at startup, to a default HTTP status and a
//! default message. The catalog is append-only: there is no way to remove or
//! rebind a code.
//!
//! Registration mistakes (a zero code, a code registered twice) are catalog
//! authoring bugs. [`register`] panics on them so a misconfigured binary dies
//! at startup; [`try_register`] reports them as [`RegistryError`] for callers
//! that want to surface them through their own bootstrap error path.
//!
//! Lookups of codes that were never registered do not fail: they return the
//! zero entry, whose status resolves to 500 and whose message is empty.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::status::HttpStatus;

/// Numeric identifier of an error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// Handle for a raw code value. This does not register anything; a code
    /// obtained this way that was never registered degrades to the zero entry.
    #[must_use]
    pub const fn from_raw(code: u32) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Defaults bound to a code at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub code: ErrorCode,
    /// Already resolved for registered codes; unset for the zero entry.
    pub status: HttpStatus,
    pub message: String,
}

impl RegistryEntry {
    fn zero(code: ErrorCode) -> Self {
        Self {
            code,
            status: HttpStatus::UNSET,
            message: String::new(),
        }
    }
}

/// Catalog authoring errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("error code must not be zero (message: '{message}')")]
    ZeroCode { message: String },

    #[error("error code {code} is already defined as '{existing}', rejected '{message}'")]
    Duplicate {
        code: ErrorCode,
        existing: String,
        message: String,
    },
}

/// Code catalog guarded by a read/write lock.
///
/// Most code uses the process-wide instance through [`register`] and
/// [`lookup`]; separate instances are handy for validating a catalog in
/// isolation.
pub struct CodeRegistry {
    entries: RwLock<HashMap<ErrorCode, RegistryEntry>>,
}

static GLOBAL: LazyLock<CodeRegistry> = LazyLock::new(CodeRegistry::new);

impl CodeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The registry consulted by the [`ErrorCode`] constructors.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Bind `code` to a default status and message.
    ///
    /// The status is resolved before it is stored, so an unset status is
    /// recorded as 500.
    ///
    /// # Errors
    /// Returns [`RegistryError::ZeroCode`] for code `0` and
    /// [`RegistryError::Duplicate`] if `code` is already registered, whatever
    /// status and message the earlier registration used.
    pub fn try_register(
        &self,
        code: u32,
        status: u16,
        message: impl Into<String>,
    ) -> Result<ErrorCode, RegistryError> {
        let message = message.into();
        if code == 0 {
            return Err(RegistryError::ZeroCode { message });
        }

        let code = ErrorCode(code);
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&code) {
            return Err(RegistryError::Duplicate {
                code,
                existing: existing.message.clone(),
                message,
            });
        }

        let status = HttpStatus::new(status).resolve();
        tracing::debug!(
            code = code.0,
            status = status.as_u16(),
            default_message = %message,
            "Registered error code"
        );
        entries.insert(
            code,
            RegistryEntry {
                code,
                status,
                message,
            },
        );
        Ok(code)
    }

    /// Bind `code` to a default status and message, aborting on misuse.
    ///
    /// # Panics
    /// Panics if `code` is `0` or already registered. Both indicate a broken
    /// catalog definition rather than a runtime condition.
    pub fn register(
        &self,
        code: u32,
        status: u16,
        message: impl Into<String>,
    ) -> ErrorCode {
        match self.try_register(code, status, message) {
            Ok(code) => code,
            Err(err) => {
                tracing::error!(error = %err, "Invalid error code registration");
                panic!("{err}");
            }
        }
    }

    /// Defaults for `code`, or the zero entry if it was never registered.
    #[must_use]
    pub fn lookup(&self, code: ErrorCode) -> RegistryEntry {
        self.get(code).unwrap_or_else(|| RegistryEntry::zero(code))
    }

    #[must_use]
    pub fn get(&self, code: ErrorCode) -> Option<RegistryEntry> {
        self.entries.read().get(&code).cloned()
    }

    /// Default message for `code` without cloning the whole entry.
    pub(crate) fn default_message(&self, code: ErrorCode) -> String {
        self.entries
            .read()
            .get(&code)
            .map_or_else(String::new, |e| e.message.clone())
    }

    /// Resolved default status for `code`.
    pub(crate) fn default_status(&self, code: ErrorCode) -> HttpStatus {
        self.entries
            .read()
            .get(&code)
            .map_or(HttpStatus::UNSET, |e| e.status)
            .resolve()
    }

    #[must_use]
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.entries.read().contains_key(&code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of all entries, ordered by code.
    #[must_use]
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut all: Vec<RegistryEntry> = self.entries.read().values().cloned().collect();
        all.sort_by_key(|e| e.code);
        all
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Register `code` in the process-wide registry.
///
/// # Panics
/// Panics if `code` is `0` or already registered.
pub fn register(code: u32, status: u16, message: impl Into<String>) -> ErrorCode {
    CodeRegistry::global().register(code, status, message)
}

/// Register `code` in the process-wide registry, reporting misuse as an error.
///
/// # Errors
/// See [`CodeRegistry::try_register`].
pub fn try_register(
    code: u32,
    status: u16,
    message: impl Into<String>,
) -> Result<ErrorCode, RegistryError> {
    CodeRegistry::global().try_register(code, status, message)
}

/// Look `code` up in the process-wide registry.
#[must_use]
pub fn lookup(code: ErrorCode) -> RegistryEntry {
    CodeRegistry::global().lookup(code)
}
