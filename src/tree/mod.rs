//! Node model and tree construction.

pub mod builder;
pub mod node;
