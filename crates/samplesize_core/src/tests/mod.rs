//! Integration tests for the sample size engine
//!
//! Tests are organized by topic:
//! - `properties` - Invariants that hold across the whole input space
//! - `scenarios` - Known published values and end-to-end reference tables
//! - `builder_dsl` - Fluent builder for assembling calculations

mod scenarios;
