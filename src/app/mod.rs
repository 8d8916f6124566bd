//! Application module - handles core application logic
//!
//! The form controller and the remote session are shared; the front ends
//! are platform specific.

pub mod form;
pub mod session;

// Platform-specific modules
#[cfg(feature = "no-wasm")]
pub mod request;

#[cfg(feature = "wasm")]
pub mod gloo;

pub use form::{run_submission, FormController};
pub use session::perform_request;
