use burn::module::Ignored;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::activation::OutputActivation;

/// Decentralized continuous-action actor over one agent's observation.
///
/// ```text
/// Input: [batch, dim_observation]
/// FC0:   dim_observation -> 2048, ReLU
/// FC1:   2048 -> 1024, ReLU
/// FC2:   1024 -> 512, ReLU
/// FC3:   512 -> 128, ReLU
/// FC4:   128 -> dim_action, output activation (tanh by default)
/// ```
///
/// With the default activation every component lies in `(-1, 1)`. No scaling
/// is applied; callers that want a wider action range rescale the output.
#[derive(Module, Debug)]
pub struct Actor<B: Backend> {
    fc0: Linear<B>,
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    fc4: Linear<B>,
    relu: Relu,
    output_activation: Ignored<OutputActivation>,
}

#[derive(Config, Debug)]
pub struct ActorConfig {
    pub dim_observation: usize,
    pub dim_action: usize,
    #[config(default = "OutputActivation::Tanh")]
    pub output_activation: OutputActivation,
}

impl ActorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Actor<B> {
        tracing::debug!(
            dim_observation = self.dim_observation,
            dim_action = self.dim_action,
            output_activation = ?self.output_activation,
            "initializing actor"
        );

        Actor {
            fc0: LinearConfig::new(self.dim_observation, 2048).init(device),
            fc1: LinearConfig::new(2048, 1024).init(device),
            fc2: LinearConfig::new(1024, 512).init(device),
            fc3: LinearConfig::new(512, 128).init(device),
            fc4: LinearConfig::new(128, self.dim_action).init(device),
            relu: Relu::new(),
            output_activation: Ignored(self.output_activation),
        }
    }
}

impl<B: Backend> Actor<B> {
    /// Forward pass: `[batch, dim_observation]` -> `[batch, dim_action]`.
    pub fn forward(&self, obs: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc0.forward(obs));
        let x = self.relu.forward(self.fc1.forward(x));
        let x = self.relu.forward(self.fc2.forward(x));
        let x = self.relu.forward(self.fc3.forward(x));
        self.output_activation.apply(self.fc4.forward(x))
    }

    pub fn output_activation(&self) -> OutputActivation {
        *self.output_activation
    }
}
