//! Flutter bridge crate for NewMe core.

pub mod api;
