use burn::module::Ignored;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::activation::OutputActivation;

/// Actor over a graph-pooled observation embedding.
///
/// ```text
/// obs:  reshaped to [batch, dim_observation]
/// FC1:  dim_observation -> 256, ReLU
/// FC2:  256 -> dim_action, output activation (ReLU by default)
/// ```
///
/// Unlike [`Actor`](super::Actor), the default output is only rectified:
/// actions are non-negative and have no upper bound.
#[derive(Module, Debug)]
pub struct GActor<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
    output_activation: Ignored<OutputActivation>,
    dim_observation: usize,
}

#[derive(Config, Debug)]
pub struct GActorConfig {
    pub dim_observation: usize,
    pub dim_action: usize,
    #[config(default = "OutputActivation::Relu")]
    pub output_activation: OutputActivation,
}

impl GActorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GActor<B> {
        tracing::debug!(
            dim_observation = self.dim_observation,
            dim_action = self.dim_action,
            output_activation = ?self.output_activation,
            "initializing graph actor"
        );

        GActor {
            fc1: LinearConfig::new(self.dim_observation, 256).init(device),
            fc2: LinearConfig::new(256, self.dim_action).init(device),
            relu: Relu::new(),
            output_activation: Ignored(self.output_activation),
            dim_observation: self.dim_observation,
        }
    }
}

impl<B: Backend> GActor<B> {
    /// Forward pass: obs holding `dim_observation` values per sample -> `[batch, dim_action]`.
    pub fn forward<const D: usize>(&self, obs: Tensor<B, D>) -> Tensor<B, 2> {
        let obs: Tensor<B, 2> = obs.reshape([-1, self.dim_observation as i32]);

        let x = self.relu.forward(self.fc1.forward(obs));
        self.output_activation.apply(self.fc2.forward(x))
    }

    pub fn output_activation(&self) -> OutputActivation {
        *self.output_activation
    }
}
