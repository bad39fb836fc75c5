//! Observability setup for Hireflow: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
