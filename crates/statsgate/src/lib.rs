//! Top-level facade crate for statsgate.
//!
//! Re-exports the core registry and the server library so users can depend on a single crate.

pub mod core {
    pub use statsgate_core::*;
}

pub mod server {
    pub use statsgate_server::*;
}
