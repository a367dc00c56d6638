use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

/// Critic over a graph-pooled observation embedding plus the joint action.
///
/// ```text
/// obs:  reshaped to [batch, dim_observation]
/// FC1:  dim_observation -> 512, ReLU
/// Concat with acts [batch, n_agent * dim_action]
/// FC2:  512 + act_dim -> 256, ReLU
/// FC3:  256 -> 128, ReLU
/// FC4:  128 -> 1
/// ```
#[derive(Module, Debug)]
pub struct GCritic<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    fc4: Linear<B>,
    relu: Relu,
    dim_observation: usize,
}

#[derive(Config, Debug)]
pub struct GCriticConfig {
    pub n_agent: usize,
    /// Width of the embedding fed in, usually the flattened perception output.
    pub dim_observation: usize,
    pub dim_action: usize,
}

impl GCriticConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GCritic<B> {
        let act_width = self.n_agent * self.dim_action;
        tracing::debug!(
            dim_observation = self.dim_observation,
            act_width,
            "initializing graph critic"
        );

        GCritic {
            fc1: LinearConfig::new(self.dim_observation, 512).init(device),
            fc2: LinearConfig::new(512 + act_width, 256).init(device),
            fc3: LinearConfig::new(256, 128).init(device),
            fc4: LinearConfig::new(128, 1).init(device),
            relu: Relu::new(),
            dim_observation: self.dim_observation,
        }
    }
}

impl<B: Backend> GCritic<B> {
    /// Forward pass: obs holding `dim_observation` values per sample, acts
    /// `[batch, n_agent * dim_action]` -> `[batch, 1]`.
    pub fn forward<const D: usize>(&self, obs: Tensor<B, D>, acts: Tensor<B, 2>) -> Tensor<B, 2> {
        let obs: Tensor<B, 2> = obs.reshape([-1, self.dim_observation as i32]);

        let x = self.relu.forward(self.fc1.forward(obs));
        let x = Tensor::cat(vec![x, acts], 1);
        let x = self.relu.forward(self.fc2.forward(x));
        let x = self.relu.forward(self.fc3.forward(x));
        self.fc4.forward(x)
    }
}
