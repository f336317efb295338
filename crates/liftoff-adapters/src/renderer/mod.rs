//! Renderer adapters.

mod erb;

pub use erb::ErbRenderer;
