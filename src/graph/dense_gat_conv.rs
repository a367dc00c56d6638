use burn::module::Param;
use burn::nn::{Dropout, DropoutConfig, Initializer, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::{leaky_relu, softmax};
use burn::tensor::TensorData;

/// A graph convolution over dense, batched graphs.
///
/// `x` is `[batch, nodes, in_features]`, `adj` is `[batch, nodes, nodes]`
/// (non-zero entries are edges) and `mask` optionally marks the real nodes of
/// a padded batch. Returns `[batch, nodes, out_width()]`.
pub trait DenseGraphConv<B: Backend> {
    fn forward(
        &self,
        x: Tensor<B, 3>,
        adj: Tensor<B, 3>,
        mask: Option<Tensor<B, 2, Bool>>,
    ) -> Tensor<B, 3>;

    /// Feature width of every output node.
    fn out_width(&self) -> usize;
}

#[derive(Config, Debug)]
pub struct DenseGatConvConfig {
    pub in_features: usize,
    /// Channels per attention head.
    pub out_features: usize,
    #[config(default = 1)]
    pub heads: usize,
    /// Concatenate heads (`heads * out_features` wide) instead of averaging them.
    #[config(default = true)]
    pub concat: bool,
    #[config(default = 0.2)]
    pub negative_slope: f64,
    /// Dropout on the attention coefficients, only active on autodiff backends.
    #[config(default = 0.0)]
    pub dropout: f64,
    #[config(default = true)]
    pub add_self_loops: bool,
    #[config(default = true)]
    pub bias: bool,
}

/// Multi-head graph attention on dense adjacency matrices.
///
/// ```text
/// z          = x W                                  [B, N, H, C]
/// e[i, j, h] = leaky_relu(a_src[h] . z[j, h] + a_dst[h] . z[i, h])
/// alpha      = softmax_j(e) over edges j -> i       (adj == 0 masked out)
/// out[i, h]  = sum_j alpha[i, j, h] z[j, h]
/// ```
///
/// Heads are concatenated or averaged, then the bias is added. Without self
/// loops a node with no neighbours gets an all-masked row and NaN output.
#[derive(Module, Debug)]
pub struct DenseGatConv<B: Backend> {
    lin: Linear<B>,
    att_src: Param<Tensor<B, 4>>,
    att_dst: Param<Tensor<B, 4>>,
    bias: Option<Param<Tensor<B, 1>>>,
    dropout: Dropout,
    heads: usize,
    out_features: usize,
    concat: bool,
    negative_slope: f64,
    add_self_loops: bool,
}

impl DenseGatConvConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DenseGatConv<B> {
        let glorot = Initializer::XavierUniform { gain: 1.0 };
        let projected = self.heads * self.out_features;
        let width = if self.concat {
            projected
        } else {
            self.out_features
        };

        let bias: Option<Param<Tensor<B, 1>>> = self
            .bias
            .then(|| Initializer::Zeros.init([width], device));

        DenseGatConv {
            lin: LinearConfig::new(self.in_features, projected)
                .with_bias(false)
                .with_initializer(glorot.clone())
                .init(device),
            att_src: glorot.init_with(
                [1, 1, self.heads, self.out_features],
                Some(self.heads),
                Some(self.out_features),
                device,
            ),
            att_dst: glorot.init_with(
                [1, 1, self.heads, self.out_features],
                Some(self.heads),
                Some(self.out_features),
                device,
            ),
            bias,
            dropout: DropoutConfig::new(self.dropout).init(),
            heads: self.heads,
            out_features: self.out_features,
            concat: self.concat,
            negative_slope: self.negative_slope,
            add_self_loops: self.add_self_loops,
        }
    }
}

impl<B: Backend> DenseGatConv<B> {
    pub fn forward(
        &self,
        x: Tensor<B, 3>,
        adj: Tensor<B, 3>,
        mask: Option<Tensor<B, 2, Bool>>,
    ) -> Tensor<B, 3> {
        let [batch, nodes, _] = x.dims();
        let (heads, channels) = (self.heads, self.out_features);

        let adj = if self.add_self_loops {
            with_self_loops(adj)
        } else {
            adj
        };

        let z: Tensor<B, 4> = self.lin.forward(x).reshape([batch, nodes, heads, channels]);

        // score[b, i, j, h]: source j attending into target i
        let src: Tensor<B, 4> = (z.clone() * self.att_src.val())
            .sum_dim(3)
            .reshape([batch, 1, nodes, heads]);
        let dst: Tensor<B, 4> = (z.clone() * self.att_dst.val())
            .sum_dim(3)
            .reshape([batch, nodes, 1, heads]);
        let shape = [batch, nodes, nodes, heads];
        let scores = leaky_relu(src.expand(shape) + dst.expand(shape), self.negative_slope);

        let no_edge = adj.equal_elem(0.0).unsqueeze_dim::<4>(3).expand(shape);
        let alpha = softmax(scores.mask_fill(no_edge, f32::NEG_INFINITY), 2);
        let alpha = self.dropout.forward(alpha);

        // [B, H, N, N] x [B, H, N, C] -> [B, N, H, C]
        let out = alpha
            .permute([0, 3, 1, 2])
            .matmul(z.swap_dims(1, 2))
            .swap_dims(1, 2);

        let out: Tensor<B, 3> = if self.concat {
            out.reshape([batch, nodes, heads * channels])
        } else {
            out.mean_dim(2).reshape([batch, nodes, channels])
        };

        let out = match &self.bias {
            Some(bias) => out + bias.val().unsqueeze::<3>(),
            None => out,
        };

        match mask {
            Some(mask) => out * mask.float().unsqueeze_dim::<3>(2),
            None => out,
        }
    }

    pub fn out_width(&self) -> usize {
        if self.concat {
            self.heads * self.out_features
        } else {
            self.out_features
        }
    }
}

impl<B: Backend> DenseGraphConv<B> for DenseGatConv<B> {
    fn forward(
        &self,
        x: Tensor<B, 3>,
        adj: Tensor<B, 3>,
        mask: Option<Tensor<B, 2, Bool>>,
    ) -> Tensor<B, 3> {
        DenseGatConv::forward(self, x, adj, mask)
    }

    fn out_width(&self) -> usize {
        DenseGatConv::out_width(self)
    }
}

/// Set the diagonal of every adjacency matrix in the batch to 1.
fn with_self_loops<B: Backend>(adj: Tensor<B, 3>) -> Tensor<B, 3> {
    let nodes = adj.dims()[1];
    let eye = identity::<B>(nodes, &adj.device()).unsqueeze::<3>();
    adj * eye.clone().neg().add_scalar(1.0) + eye
}

fn identity<B: Backend>(n: usize, device: &B::Device) -> Tensor<B, 2> {
    let mut data = vec![0.0f32; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    Tensor::<B, 1>::from_data(TensorData::from(data.as_slice()), device).reshape([n, n])
}
