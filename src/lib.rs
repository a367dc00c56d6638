//! # MAAC Networks
//!
//! Function approximators for multi-agent actor-critic reinforcement learning,
//! built on the Burn ML framework. Training loops, replay buffers and
//! optimizers live elsewhere; these modules map input tensors to output
//! tensors and leave backpropagation to Burn's autodiff backend.
//!
//! ## Modules
//!
//! - [`networks`] — Actor, Critic, GActor, GCritic and ActorMaac
//! - [`graph`] — Dense graph attention and the PerceptGnn perception network
//! - [`encoding`] — Packing host-side observations into batched tensors
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

#![recursion_limit = "256"]

pub mod config;
pub mod encoding;
pub mod error;
pub mod graph;
pub mod networks;
