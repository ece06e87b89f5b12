//! Engine core: the shared context and entity primitives

pub mod context;
pub mod entity;

pub use context::Context;
