//! Dense graph attention and the perception network built from it.

mod dense_gat_conv;
mod percept_gnn;

pub use dense_gat_conv::{DenseGatConv, DenseGatConvConfig, DenseGraphConv};
pub use percept_gnn::{perceive, PerceptGnn, PerceptGnnConfig, EMBEDDING_WIDTH};
