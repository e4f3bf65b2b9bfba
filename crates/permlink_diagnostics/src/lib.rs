//! Structured diagnostic events, severity management, and rendering.
//!
//! Link passes report every fatal condition and notable non-fatal event as a
//! [`Diagnostic`] with a stable code. The thread-safe [`DiagnosticSink`]
//! accumulates them across passes, and [`DiagnosticRenderer`] implementations
//! format them for the terminal or as JSON lines.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
