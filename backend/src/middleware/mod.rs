//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns; currently
//! request correlation and completion logging.

pub mod trace;

pub use trace::Trace;
