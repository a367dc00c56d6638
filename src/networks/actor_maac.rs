use burn::module::Ignored;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::activation::OutputActivation;

/// Discrete-action actor producing a distribution over `dim_action` choices.
///
/// ```text
/// obs:  reshaped to [batch, dim_observation]
/// FC1:  dim_observation -> 500, ReLU
/// FC2:  500 -> 128, ReLU
/// FC3:  128 -> dim_action, softmax over actions
/// ```
///
/// FC2 is rectified before the final projection, so negative hidden features
/// never reach the logits.
#[derive(Module, Debug)]
pub struct ActorMaac<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    relu: Relu,
    output_activation: Ignored<OutputActivation>,
    dim_observation: usize,
}

#[derive(Config, Debug)]
pub struct ActorMaacConfig {
    pub dim_observation: usize,
    pub dim_action: usize,
    #[config(default = "OutputActivation::Softmax")]
    pub output_activation: OutputActivation,
}

impl ActorMaacConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ActorMaac<B> {
        tracing::debug!(
            dim_observation = self.dim_observation,
            dim_action = self.dim_action,
            output_activation = ?self.output_activation,
            "initializing discrete actor"
        );

        ActorMaac {
            fc1: LinearConfig::new(self.dim_observation, 500).init(device),
            fc2: LinearConfig::new(500, 128).init(device),
            fc3: LinearConfig::new(128, self.dim_action).init(device),
            relu: Relu::new(),
            output_activation: Ignored(self.output_activation),
            dim_observation: self.dim_observation,
        }
    }
}

impl<B: Backend> ActorMaac<B> {
    /// Forward pass: obs holding `dim_observation` values per sample ->
    /// `[batch, dim_action]` action probabilities.
    pub fn forward<const D: usize>(&self, obs: Tensor<B, D>) -> Tensor<B, 2> {
        let obs: Tensor<B, 2> = obs.reshape([-1, self.dim_observation as i32]);

        let x = self.relu.forward(self.fc1.forward(obs));
        let x = self.relu.forward(self.fc2.forward(x));
        self.output_activation.apply(self.fc3.forward(x))
    }

    pub fn output_activation(&self) -> OutputActivation {
        *self.output_activation
    }
}
