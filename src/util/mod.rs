//! Shared helpers

pub mod html;
pub mod testing;
