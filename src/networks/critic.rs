use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

/// Centralized critic over the joint observation and joint action of all agents.
///
/// ```text
/// obs:  [batch, ...] reshaped to [batch, n_agent * dim_observation]
/// FC0:  obs_dim -> 4096, ReLU
/// Concat with acts [batch, n_agent * dim_action]
/// FC1:  4096 + act_dim -> 2048, ReLU
/// FC2:  2048 -> 1024, ReLU
/// FC3:  1024 -> 512, ReLU
/// FC4:  512 -> 300, ReLU
/// FC5:  300 -> 1  (unbounded value)
/// ```
#[derive(Module, Debug)]
pub struct Critic<B: Backend> {
    fc0: Linear<B>,
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    fc4: Linear<B>,
    fc5: Linear<B>,
    relu: Relu,
    obs_width: usize,
}

#[derive(Config, Debug)]
pub struct CriticConfig {
    pub n_agent: usize,
    pub dim_observation: usize,
    pub dim_action: usize,
}

impl CriticConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Critic<B> {
        let obs_width = self.n_agent * self.dim_observation;
        let act_width = self.n_agent * self.dim_action;
        tracing::debug!(obs_width, act_width, "initializing critic");

        Critic {
            fc0: LinearConfig::new(obs_width, 4096).init(device),
            fc1: LinearConfig::new(4096 + act_width, 2048).init(device),
            fc2: LinearConfig::new(2048, 1024).init(device),
            fc3: LinearConfig::new(1024, 512).init(device),
            fc4: LinearConfig::new(512, 300).init(device),
            fc5: LinearConfig::new(300, 1).init(device),
            relu: Relu::new(),
            obs_width,
        }
    }
}

impl<B: Backend> Critic<B> {
    /// Forward pass: obs of any rank holding `n_agent * dim_observation`
    /// values per sample, acts `[batch, n_agent * dim_action]` -> `[batch, 1]`.
    ///
    /// The observation is reshaped as-is; agents must already be in the same
    /// order as their actions.
    pub fn forward<const D: usize>(&self, obs: Tensor<B, D>, acts: Tensor<B, 2>) -> Tensor<B, 2> {
        let obs: Tensor<B, 2> = obs.reshape([-1, self.obs_width as i32]);

        let x = self.relu.forward(self.fc0.forward(obs));
        let x = Tensor::cat(vec![x, acts], 1);
        let x = self.relu.forward(self.fc1.forward(x));
        let x = self.relu.forward(self.fc2.forward(x));
        let x = self.relu.forward(self.fc3.forward(x));
        let x = self.relu.forward(self.fc4.forward(x));
        self.fc5.forward(x)
    }
}
