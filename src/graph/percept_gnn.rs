use burn::prelude::*;

use super::dense_gat_conv::{DenseGatConv, DenseGatConvConfig, DenseGraphConv};
use crate::networks::elu;

const HEADS: usize = 8;

/// Per-node width of the perception output (16 channels x 8 heads).
pub const EMBEDDING_WIDTH: usize = 16 * HEADS;

/// Graph-attention perception network embedding each agent node.
///
/// ```text
/// x:    [batch, nodes, feature_dim]   adj: [batch, nodes, nodes]
/// GAT1: feature_dim -> 32 x 8 heads = 256  (node mask applied)
/// GAT2: 256 -> 32 x 8 = 256, ELU
/// GAT3: 256 -> 16 x 8 = 128
/// GAT4: 128 -> 16 x 8 = 128, ELU
/// out:  [batch, nodes, 128]
/// ```
#[derive(Module, Debug)]
pub struct PerceptGnn<B: Backend> {
    gnn1: DenseGatConv<B>,
    gnn2: DenseGatConv<B>,
    gnn3: DenseGatConv<B>,
    gnn4: DenseGatConv<B>,
    out_size: usize,
}

#[derive(Config, Debug)]
pub struct PerceptGnnConfig {
    /// Observation shape; the last axis is the node feature width, the
    /// leading axes enumerate nodes.
    pub observation_shape: Vec<usize>,
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl PerceptGnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PerceptGnn<B> {
        let feature_dim = self.observation_shape.last().copied().unwrap_or(0);
        let out_size = self.out_size();
        tracing::debug!(
            observation_shape = ?self.observation_shape,
            out_size,
            "initializing perception network"
        );

        let gat = |input: usize, channels: usize| {
            DenseGatConvConfig::new(input, channels)
                .with_heads(HEADS)
                .with_dropout(self.dropout)
                .init::<B>(device)
        };

        PerceptGnn {
            gnn1: gat(feature_dim, 32),
            gnn2: gat(32 * HEADS, 32),
            gnn3: gat(32 * HEADS, 16),
            gnn4: gat(16 * HEADS, 16),
            out_size,
        }
    }

    /// `128 * product(observation_shape[..-1])`: the width of the embedding
    /// once every node is flattened into one vector.
    pub fn out_size(&self) -> usize {
        let nodes: usize = match self.observation_shape.split_last() {
            Some((_, leading)) => leading.iter().product(),
            None => 1,
        };
        EMBEDDING_WIDTH * nodes
    }
}

impl<B: Backend> PerceptGnn<B> {
    /// Forward pass: `[batch, nodes, feature_dim]` plus `[batch, nodes, nodes]`
    /// adjacency -> `[batch, nodes, 128]`.
    ///
    /// `mask` (`[batch, nodes]`) is only given to the first layer, which zeroes
    /// padded nodes before attention spreads to later layers.
    pub fn forward(
        &self,
        x: Tensor<B, 3>,
        adj: Tensor<B, 3>,
        mask: Option<Tensor<B, 2, Bool>>,
    ) -> Tensor<B, 3> {
        perceive([&self.gnn1, &self.gnn2, &self.gnn3, &self.gnn4], x, adj, mask)
    }

    /// Flattened output width computed from the construction-time shape. Not
    /// checked against the tensors passed to `forward`.
    pub fn out_size(&self) -> usize {
        self.out_size
    }
}

/// The perception pipeline over any four dense graph convolutions.
pub fn perceive<B: Backend, C: DenseGraphConv<B>>(
    layers: [&C; 4],
    x: Tensor<B, 3>,
    adj: Tensor<B, 3>,
    mask: Option<Tensor<B, 2, Bool>>,
) -> Tensor<B, 3> {
    let [gnn1, gnn2, gnn3, gnn4] = layers;

    let x = gnn1.forward(x, adj.clone(), mask);
    let x = elu(gnn2.forward(x, adj.clone(), None));
    let x = gnn3.forward(x, adj.clone(), None);
    elu(gnn4.forward(x, adj, None))
}
