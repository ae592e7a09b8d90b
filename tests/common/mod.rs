//! Shared test utilities for dpt integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything here is deterministic: no clocks, no random
//! ids in fixtures, and stores are in-memory unless a harness asks for a
//! temp file.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
