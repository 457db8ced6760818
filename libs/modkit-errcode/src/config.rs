//! Process-wide settings for call-stack capture.
//!
//! Capture is off by default. Services enable it from their own configuration
//! (typically in development) and apply it once during startup:
//!
//! ```ignore
//! let cfg: StackConfig = serde_json::from_value(raw["errors"].clone())?;
//! cfg.apply();
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Deserialize;

/// Frames kept per captured stack unless configured otherwise.
pub const DEFAULT_STACK_DEPTH: usize = 32;

static CAPTURE: AtomicBool = AtomicBool::new(false);
static DEPTH: AtomicUsize = AtomicUsize::new(DEFAULT_STACK_DEPTH);

/// Stack capture configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Capture the call stack whenever an error value is constructed.
    pub capture: bool,
    /// Maximum number of frames recorded per error value.
    pub depth: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            capture: false,
            depth: DEFAULT_STACK_DEPTH,
        }
    }
}

impl StackConfig {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    /// Install this configuration for every subsequently constructed error.
    pub fn apply(&self) {
        DEPTH.store(self.depth, Ordering::Relaxed);
        CAPTURE.store(self.capture, Ordering::Release);
        tracing::debug!(
            capture = self.capture,
            depth = self.depth,
            "Applied error stack capture config"
        );
    }

    /// The configuration currently in effect.
    #[must_use]
    pub fn current() -> Self {
        Self {
            capture: CAPTURE.load(Ordering::Acquire),
            depth: DEPTH.load(Ordering::Relaxed),
        }
    }
}

/// Depth to capture with, or `None` if capture is disabled.
pub(crate) fn capture_depth() -> Option<usize> {
    if CAPTURE.load(Ordering::Acquire) {
        Some(DEPTH.load(Ordering::Relaxed))
    } else {
        None
    }
}
