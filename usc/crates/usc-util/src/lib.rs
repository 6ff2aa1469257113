//! usc-util - Core Utilities for the UniiScript Compiler
//!
//! This crate holds the small foundation types shared by every `usc` phase:
//!
//! - [`hash`] - the DJB2 string hash used to tag identifiers
//! - [`span`] - source locations ([`Span`], [`FileId`])
//! - [`diagnostic`] - diagnostics, the collecting [`Handler`] and error codes
//!
//! # Example
//!
//! ```
//! use usc_util::{hash, DiagnosticBuilder, DiagnosticCode, Handler, Span};
//!
//! assert_eq!(hash(""), 5381);
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("Illegal token")
//!     .code(DiagnosticCode::E_LEX_ILLEGAL_TOKEN)
//!     .span(Span::new(0, 1, 1, 1))
//!     .emit(&handler);
//! assert_eq!(handler.error_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod hash;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet,
};
pub use hash::hash;
pub use span::{FileId, Span};

