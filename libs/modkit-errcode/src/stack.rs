//! Call-stack snapshots for the verbose error view.
//!
//! Capturing only walks the stack and records instruction pointers. Symbols
//! (file, line, function) are resolved lazily, when the snapshot is rendered,
//! because resolution is by far the expensive part.

use std::ffi::c_void;
use std::fmt;
use std::sync::Arc;

use crate::config;

/// Symbol path prefixes of frames that belong to the capture machinery.
const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "modkit_errcode::", "_Unwind_"];

/// Extra frames walked on top of `depth` to cover the capture machinery, which
/// sits between the stack walk and the constructing function.
const INTERNAL_FRAME_BUDGET: usize = 16;

/// Raw program counters recorded at construction time, innermost first.
#[derive(Clone, PartialEq, Eq)]
pub struct StackTrace {
    ips: Vec<usize>,
    depth: usize,
}

/// A resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: String,
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_deref().unwrap_or("<unknown>");
        match self.line {
            Some(line) => write!(f, "{file}:{line}:{}", self.function),
            None => write!(f, "{file}:?:{}", self.function),
        }
    }
}

impl StackTrace {
    /// Record the current call stack, keeping up to `depth` caller frames.
    ///
    /// Frames of the capture machinery do not count against `depth`.
    #[inline(never)]
    #[must_use]
    pub fn capture(depth: usize) -> Self {
        let limit = depth.saturating_add(INTERNAL_FRAME_BUDGET);
        let mut ips = Vec::with_capacity(limit.min(64));
        if depth > 0 {
            backtrace::trace(|frame| {
                ips.push(frame.ip() as usize);
                ips.len() < limit
            });
        }
        Self { ips, depth }
    }

    /// Capture according to the process-wide [`StackConfig`](crate::StackConfig).
    pub(crate) fn capture_configured() -> Option<Arc<Self>> {
        let depth = config::capture_depth()?;
        Some(Arc::new(Self::capture(depth)))
    }

    /// Maximum number of caller frames [`StackTrace::frames`] returns.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Resolve the recorded program counters into frames.
    ///
    /// Leading frames inside this crate or the `backtrace` crate are skipped,
    /// so the first frame is the caller that constructed the error; at most
    /// `depth` frames follow from there, innermost first. Inlined code can
    /// yield several symbols per program counter; each becomes its own frame.
    #[must_use]
    pub fn frames(&self) -> Vec<StackFrame> {
        let mut frames = Vec::with_capacity(self.ips.len());
        for &ip in &self.ips {
            backtrace::resolve(ip as *mut c_void, |symbol| {
                let function = symbol
                    .name()
                    .map_or_else(|| "<unknown>".to_owned(), |n| format!("{n:#}"));
                frames.push(StackFrame {
                    file: symbol.filename().map(|p| p.display().to_string()),
                    line: symbol.lineno(),
                    function,
                });
            });
        }

        let skip = frames
            .iter()
            .take_while(|f| is_internal(&f.function))
            .count();
        let mut callers = frames.split_off(skip);
        callers.truncate(self.depth);
        callers
    }
}

fn is_internal(function: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix))
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackTrace")
            .field("recorded", &self.ips.len())
            .field("depth", &self.depth)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn capture_walks_past_internal_frames() {
        let trace = StackTrace::capture(1);
        assert_eq!(trace.depth(), 1);
        assert!(!trace.is_empty());
        // The internal budget lets the walk go beyond `depth` raw frames.
        assert!(trace.ips.len() > 1);
        assert!(trace.frames().len() <= 1);
    }

    #[test]
    fn zero_depth_records_nothing() {
        let trace = StackTrace::capture(0);
        assert!(trace.is_empty());
        assert!(trace.frames().is_empty());
    }

    #[test]
    fn internal_frames_are_recognized() {
        assert!(is_internal("backtrace::backtrace::trace"));
        assert!(is_internal("modkit_errcode::stack::StackTrace::capture"));
        assert!(!is_internal("my_service::handlers::create_user"));
    }

    #[test]
    fn frame_display_has_file_line_and_function() {
        let frame = StackFrame {
            file: Some("src/users.rs".to_owned()),
            line: Some(42),
            function: "users::create".to_owned(),
        };
        assert_eq!(frame.to_string(), "src/users.rs:42:users::create");

        let unresolved = StackFrame {
            file: None,
            line: None,
            function: "<unknown>".to_owned(),
        };
        assert_eq!(unresolved.to_string(), "<unknown>:?:<unknown>");
    }
}
