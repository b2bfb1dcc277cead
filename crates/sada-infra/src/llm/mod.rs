//! Model provider implementations.
//!
//! Contains concrete implementations of the [`ModelGateway`] trait
//! defined in `sada-core`, currently Google Gemini only.
//!
//! [`ModelGateway`]: sada_core::model::ModelGateway

pub mod gemini;
