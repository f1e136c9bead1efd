// SPDX-License-Identifier: MPL-2.0
//! In-memory diagnostics for gallery transitions and playback coordination.
//!
//! - [`CircularBuffer`]: ring buffer with a validated [`BufferCapacity`]
//! - [`DiagnosticEvent`]: timestamped [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: channel-fed storage
//!   and the non-blocking sender handed to the gallery

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
