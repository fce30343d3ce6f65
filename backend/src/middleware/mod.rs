//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap every handler, currently
//! trace identifier propagation and per-request logging.

pub mod trace;

pub use trace::Trace;
