//! Numeric error code registry and structured error values.
//!
//! Services declare their error catalog once at startup: every numeric code
//! is bound to a default HTTP status and a default message. Business code then
//! builds [`ErrorValue`]s from those codes, optionally wrapping a cause and
//! attaching diagnostic fields. The HTTP layer reads the status and the
//! four-key [`ErrorBody`]; logs use the cause-chain summary.
//!
//! ```ignore
//! let param = modkit_errcode::register(1000, 400, "param error");
//! let err = param.error("");
//! assert_eq!(err.status().as_u16(), 400);
//! assert_eq!(err.to_string(), "param error");
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod body;
pub mod catalog;
pub mod config;
pub mod error;
mod macros;
pub mod registry;
pub mod stack;
pub mod status;

pub use body::ErrorBody;
pub use config::StackConfig;
pub use error::{CHAIN_SEPARATOR, Cause, ErrorValue, Fields, Verbose};
pub use registry::{CodeRegistry, ErrorCode, RegistryEntry, RegistryError, lookup, register, try_register};
pub use stack::{StackFrame, StackTrace};
pub use status::{DEFAULT_STATUS, HttpStatus, resolve};
