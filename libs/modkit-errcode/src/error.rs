//! Structured error values built from registered codes.
//!
//! An [`ErrorValue`] carries the code it was built from, the resolved HTTP
//! status, a message, an optional cause, optional diagnostic fields and,
//! when capture is enabled, a call-stack snapshot.
//!
//! It renders three ways:
//! - `{}` prints the message only, the short text meant for API responses;
//! - `{:#}` (or [`ErrorValue::summary`]) prints the whole cause chain joined
//!   with `->`, for single-line logs;
//! - [`ErrorValue::verbose`] prints the message followed by one
//!   `file:line:function` line per captured frame.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::registry::{CodeRegistry, ErrorCode};
use crate::stack::{StackFrame, StackTrace};
use crate::status::HttpStatus;

/// Separator used by the chain summary.
pub const CHAIN_SEPARATOR: &str = "->";

/// Diagnostic key/value pairs, in attachment order.
pub type Fields = IndexMap<String, Value>;

/// Shared handle to the underlying error wrapped by an [`ErrorValue`].
///
/// Any `std::error::Error + Send + Sync + 'static` converts into a `Cause`,
/// including another [`ErrorValue`].
#[derive(Clone)]
pub struct Cause(Arc<dyn StdError + Send + Sync + 'static>);

impl Cause {
    /// The cause as a structured error value, if it is one.
    #[must_use]
    pub fn as_error_value(&self) -> Option<&ErrorValue> {
        self.0.downcast_ref::<ErrorValue>()
    }

    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self(Arc::new(err))
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

/// Runtime error instance.
///
/// Immutable once built, apart from [`ErrorValue::with_field`], which
/// consumes the value and returns it with the field attached. Clones taken
/// earlier keep their own field bag.
#[derive(Clone)]
pub struct ErrorValue {
    code: ErrorCode,
    status: HttpStatus,
    message: String,
    cause: Option<Cause>,
    fields: Fields,
    stack: Option<Arc<StackTrace>>,
}

impl ErrorCode {
    /// Error with `message`, or the registered default message if `message`
    /// is empty.
    #[must_use]
    pub fn error(self, message: impl Into<String>) -> ErrorValue {
        ErrorValue::build(self, message.into(), None)
    }

    /// Error with `message` (or the default message) wrapping `cause`.
    #[must_use]
    pub fn error_with_cause(self, message: impl Into<String>, cause: impl Into<Cause>) -> ErrorValue {
        ErrorValue::build(self, message.into(), Some(cause.into()))
    }

    /// Error with the registered default message wrapping `cause`.
    ///
    /// The message of `cause` is never promoted: the default message is the
    /// public explanation, the cause keeps the technical detail.
    #[must_use]
    pub fn wrap(self, cause: impl Into<Cause>) -> ErrorValue {
        ErrorValue::build(self, String::new(), Some(cause.into()))
    }

    /// Error with a formatted message and an optional cause.
    ///
    /// An empty formatted message falls back to the default message. The
    /// [`errorf!`](crate::errorf) macro is the usual way to call this.
    #[must_use]
    pub fn error_fmt(self, args: fmt::Arguments<'_>, cause: Option<Cause>) -> ErrorValue {
        ErrorValue::build(self, args.to_string(), cause)
    }
}

impl ErrorValue {
    fn build(code: ErrorCode, message: String, cause: Option<Cause>) -> Self {
        let registry = CodeRegistry::global();
        let message = if message.is_empty() {
            registry.default_message(code)
        } else {
            message
        };

        Self {
            code,
            status: registry.default_status(code),
            message,
            cause,
            fields: Fields::new(),
            stack: StackTrace::capture_configured(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Resolved HTTP status; never unset.
    #[must_use]
    pub fn status(&self) -> HttpStatus {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Attach a diagnostic field. Re-using a key overwrites its value in place.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attached fields, empty if none were attached.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn has_stack(&self) -> bool {
        self.stack.is_some()
    }

    /// Frames of the captured call stack, innermost first: the function that
    /// constructed the error, then its caller, and so on outwards. Empty when
    /// capture was disabled at construction time.
    #[must_use]
    pub fn stack(&self) -> Vec<StackFrame> {
        self.stack.as_deref().map_or_else(Vec::new, StackTrace::frames)
    }

    /// Messages along the cause chain, starting with this error's own.
    ///
    /// Structured causes contribute their message and the walk continues
    /// into their cause; the first foreign cause contributes its `Display`
    /// output and ends the walk.
    #[must_use]
    pub fn chain(&self) -> Vec<String> {
        let mut out = vec![self.message.clone()];
        let mut next = self.cause.as_ref();
        while let Some(cause) = next {
            if let Some(inner) = cause.as_error_value() {
                out.push(inner.message.clone());
                next = inner.cause.as_ref();
            } else {
                out.push(cause.to_string());
                break;
            }
        }
        out
    }

    /// The cause chain as one line, e.g. `param error->db error->io failure`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.chain().join(CHAIN_SEPARATOR)
    }

    /// Display adaptor for the message plus captured stack frames.
    ///
    /// Frames follow the message one per line in [`ErrorValue::stack`] order,
    /// so the first line after the message is the constructing function.
    #[must_use]
    pub fn verbose(&self) -> Verbose<'_> {
        Verbose(self)
    }

    /// Emit this error as a single `tracing` event at error level.
    pub fn log(&self) {
        let summary = self.summary();
        tracing::error!(
            code = self.code.as_u32(),
            status = self.status.as_u16(),
            fields = %serde_json::to_string(&self.fields).unwrap_or_default(),
            "{summary}"
        );
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.summary())
        } else {
            f.write_str(&self.message)
        }
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ErrorValue");
        d.field("code", &self.code)
            .field("status", &self.status)
            .field("message", &self.message)
            .field("cause", &self.cause);
        if !self.fields.is_empty() {
            d.field("fields", &self.fields);
        }
        if let Some(stack) = &self.stack {
            d.field("stack", stack);
        }
        d.finish()
    }
}

impl StdError for ErrorValue {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|c| c.as_error() as &(dyn StdError + 'static))
    }
}

/// Message followed by one `file:line:function` line per captured frame,
/// innermost frame first.
pub struct Verbose<'a>(&'a ErrorValue);

impl fmt::Display for Verbose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.message)?;
        for frame in self.0.stack() {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}
