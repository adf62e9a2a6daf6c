//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements the collaborator traits, loads site files and wires up services.

pub mod di;
pub mod error;
pub mod site;
pub mod traits;

pub use error::{InfraError, InfraResult};
