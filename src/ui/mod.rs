//! Presentation boundary: commands in, view rows and the last error out.

pub mod input;
pub mod list;
pub mod mvi;
