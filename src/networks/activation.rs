use burn::prelude::*;
use burn::tensor::activation::{relu, softmax, tanh};

/// Activation applied to the final layer of an actor network.
///
/// The actors disagree on how they bound their output, so each actor config
/// names its policy explicitly instead of hard-wiring it into `forward`:
///
/// | variant    | range                     | default for  |
/// |------------|---------------------------|--------------|
/// | `Identity` | unbounded                 |              |
/// | `Relu`     | `[0, inf)`                | `GActor`     |
/// | `Tanh`     | `(-1, 1)`                 | `Actor`      |
/// | `Softmax`  | probability simplex (row) | `ActorMaac`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputActivation {
    Identity,
    Relu,
    Tanh,
    Softmax,
}

impl OutputActivation {
    /// Apply the activation to a `[batch, features]` tensor. Softmax runs over
    /// the feature axis.
    pub fn apply<B: Backend>(self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            OutputActivation::Identity => x,
            OutputActivation::Relu => relu(x),
            OutputActivation::Tanh => tanh(x),
            OutputActivation::Softmax => softmax(x, 1),
        }
    }
}

/// Exponential linear unit with `alpha = 1`: `x` for `x > 0`, `exp(x) - 1` otherwise.
pub fn elu<B: Backend, const D: usize>(x: Tensor<B, D>) -> Tensor<B, D> {
    let positive = x.clone().clamp_min(0.0);
    let negative = x.clamp_max(0.0).exp().sub_scalar(1.0);
    positive + negative
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;

    fn row(values: &[f32]) -> Tensor<TestBackend, 2> {
        let device = NdArrayDevice::default();
        Tensor::<TestBackend, 1>::from_data(TensorData::from(values), &device)
            .reshape([1, values.len()])
    }

    fn to_vec(x: Tensor<TestBackend, 2>) -> Vec<f32> {
        x.into_data().to_vec().unwrap()
    }

    #[test]
    fn test_identity_passes_through() {
        let out = to_vec(OutputActivation::Identity.apply(row(&[-3.0, 0.5, 7.0])));
        assert_eq!(out, vec![-3.0, 0.5, 7.0]);
    }

    #[test]
    fn test_relu_clamps_negatives() {
        let out = to_vec(OutputActivation::Relu.apply(row(&[-3.0, 0.5, 7.0])));
        assert_eq!(out, vec![0.0, 0.5, 7.0]);
    }

    #[test]
    fn test_tanh_stays_inside_unit_interval() {
        let out = to_vec(OutputActivation::Tanh.apply(row(&[-5.0, 0.0, 5.0])));
        for v in &out {
            assert!(*v > -1.0 && *v < 1.0, "tanh output {v} out of range");
        }
        assert!(out[1].abs() < 1e-6);
    }

    #[test]
    fn test_softmax_row_sums_to_one() {
        let out = to_vec(OutputActivation::Softmax.apply(row(&[1.0, 2.0, 3.0])));
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(out[2] > out[1] && out[1] > out[0]);
    }

    #[test]
    fn test_elu_values() {
        let out = to_vec(elu(row(&[-1.0, 0.0, 2.0])));
        assert!((out[0] - ((-1.0f32).exp() - 1.0)).abs() < 1e-6);
        assert!(out[1].abs() < 1e-6);
        assert!((out[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_activation_toml_names() {
        #[derive(serde::Deserialize)]
        struct Holder {
            act: OutputActivation,
        }
        let holder: Holder = toml::from_str("act = \"softmax\"").unwrap();
        assert_eq!(holder.act, OutputActivation::Softmax);
    }
}
