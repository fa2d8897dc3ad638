//! Terminal host for the sentiment analysis form.
//!
//! # Overview
//! Owns a `sentiment_core::Controller`, executes the requests it issues
//! through a `Transport`, and prints the rendered form. Each input line is
//! the text box; pressing enter is the analyze button.

pub mod form;
pub mod logging;
pub mod transport;

pub use form::{parse_command, Command, Form};
pub use logging::LoggingOpts;
pub use transport::{analyze, HttpTransport, Transport};
