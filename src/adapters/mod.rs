//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process stores behind the repository ports
//! - `http` - axum REST endpoints

pub mod http;
pub mod memory;
