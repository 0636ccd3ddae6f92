//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, an optional origin (file path or module name), notes, and help text.
//! The thread-safe [`DiagnosticSink`] accumulates diagnostics while a design is
//! scanned, and [`DiagnosticRenderer`] implementations format them for output.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
