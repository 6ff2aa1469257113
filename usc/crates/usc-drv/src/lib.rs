//! usc-drv - Compiler Driver
//!
//! Loads UniiScript sources, lexes them and reports tokens and
//! diagnostics. The `usc` binary is a thin clap front end over this crate.
//!
//! ```
//! use usc_drv::{Session, SessionOptions};
//!
//! let mut session = Session::new(SessionOptions::default());
//! session.add_source("main.us", "var a = $;");
//! let reports = session.lex().unwrap();
//! session.report(&reports);
//!
//! assert_eq!(reports[0].tokens.len(), 5);
//! assert_eq!(session.handler().error_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use config::{Config, OutputFormat, PositionSetting, CONFIG_FILE_NAME};
pub use error::{DriverError, Result};
pub use output::{format_token, write_tokens, TokenRecord};
pub use session::{FileReport, Session, SessionOptions, SourceFile, SourceMap};
