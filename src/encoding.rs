use burn::prelude::*;
use burn::tensor::TensorData;

use crate::error::EncodingError;

/// One structured observation: a feature row per node and a dense adjacency.
///
/// Non-zero adjacency entries are edges. Self loops are optional; the
/// attention layers add them.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphObservation {
    pub features: Vec<Vec<f32>>,
    pub adjacency: Vec<Vec<f32>>,
}

impl GraphObservation {
    /// Graph over `features` where every node is connected to every other node.
    pub fn fully_connected(features: Vec<Vec<f32>>) -> Self {
        let adjacency = fully_connected_adjacency(features.len());
        GraphObservation {
            features,
            adjacency,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.features.len()
    }
}

/// A padded batch of graphs ready for the perception network.
///
/// `x` is `[batch, nodes, feature_dim]`, `adj` is `[batch, nodes, nodes]` and
/// `mask` is `[batch, nodes]`, `false` on padding.
#[derive(Debug, Clone)]
pub struct GraphBatch<B: Backend> {
    pub x: Tensor<B, 3>,
    pub adj: Tensor<B, 3>,
    pub mask: Tensor<B, 2, Bool>,
}

/// `n x n` adjacency with ones everywhere except the diagonal.
pub fn fully_connected_adjacency(n: usize) -> Vec<Vec<f32>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
        .collect()
}

/// Encode graphs of possibly different sizes into one padded batch.
///
/// Every graph is padded to the largest node count. Padded nodes have zero
/// features, no edges and a `false` mask entry. All feature rows must share
/// the width of the first graph's first row.
pub fn encode_graph_batch<B: Backend>(
    graphs: &[GraphObservation],
    device: &B::Device,
) -> Result<GraphBatch<B>, EncodingError> {
    let batch_size = graphs.len();
    let max_nodes = graphs.iter().map(GraphObservation::num_nodes).max().unwrap_or(0);
    if max_nodes == 0 {
        return Err(EncodingError::EmptyBatch);
    }
    let feature_dim = graphs
        .iter()
        .find_map(|g| g.features.first())
        .map(Vec::len)
        .unwrap_or(0);

    let mut x = vec![0.0f32; batch_size * max_nodes * feature_dim];
    let mut adj = vec![0.0f32; batch_size * max_nodes * max_nodes];
    let mut mask = vec![0.0f32; batch_size * max_nodes];

    for (sample, graph) in graphs.iter().enumerate() {
        let nodes = graph.num_nodes();
        if graph.adjacency.len() != nodes || graph.adjacency.iter().any(|r| r.len() != nodes) {
            return Err(EncodingError::AdjacencyShape { sample, nodes });
        }

        for (node, row) in graph.features.iter().enumerate() {
            if row.len() != feature_dim {
                return Err(EncodingError::FeatureWidth {
                    sample,
                    row: node,
                    expected: feature_dim,
                    actual: row.len(),
                });
            }
            let offset = (sample * max_nodes + node) * feature_dim;
            x[offset..offset + feature_dim].copy_from_slice(row);
            mask[sample * max_nodes + node] = 1.0;
        }

        for (i, row) in graph.adjacency.iter().enumerate() {
            let offset = (sample * max_nodes + i) * max_nodes;
            adj[offset..offset + nodes].copy_from_slice(row);
        }
    }

    let x = Tensor::<B, 1>::from_data(TensorData::from(x.as_slice()), device)
        .reshape([batch_size, max_nodes, feature_dim]);
    let adj = Tensor::<B, 1>::from_data(TensorData::from(adj.as_slice()), device)
        .reshape([batch_size, max_nodes, max_nodes]);
    let mask = Tensor::<B, 1>::from_data(TensorData::from(mask.as_slice()), device)
        .reshape([batch_size, max_nodes])
        .equal_elem(1.0);

    Ok(GraphBatch { x, adj, mask })
}

/// Stack per-agent vectors into `[batch, n_agent * dim]`.
///
/// `samples[b][agent]` is one agent's vector. Agent order is kept as given,
/// so observations and actions must be listed in the same agent order.
pub fn encode_joint_batch<B: Backend>(
    samples: &[Vec<Vec<f32>>],
    device: &B::Device,
) -> Result<Tensor<B, 2>, EncodingError> {
    let first = samples.first().ok_or(EncodingError::EmptyBatch)?;
    let n_agent = first.len();
    let dim = first.first().map(Vec::len).unwrap_or(0);
    if n_agent == 0 || dim == 0 {
        return Err(EncodingError::EmptyBatch);
    }

    let mut flat = Vec::with_capacity(samples.len() * n_agent * dim);
    for (sample, agents) in samples.iter().enumerate() {
        if agents.len() != n_agent {
            return Err(EncodingError::AgentCount {
                sample,
                expected: n_agent,
                actual: agents.len(),
            });
        }
        for (row, values) in agents.iter().enumerate() {
            if values.len() != dim {
                return Err(EncodingError::FeatureWidth {
                    sample,
                    row,
                    expected: dim,
                    actual: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
    }

    Ok(Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([samples.len(), n_agent * dim]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};

    type TestBackend = NdArray<f32>;

    fn graph(nodes: usize, width: usize) -> GraphObservation {
        let features = (0..nodes)
            .map(|n| (0..width).map(|f| (n * width + f) as f32 + 1.0).collect())
            .collect();
        GraphObservation::fully_connected(features)
    }

    #[test]
    fn test_fully_connected_adjacency() {
        assert_eq!(
            fully_connected_adjacency(3),
            vec![
                vec![0.0, 1.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0]
            ]
        );
    }

    #[test]
    fn test_encode_graph_batch_shapes() {
        let device = NdArrayDevice::default();
        let batch =
            encode_graph_batch::<TestBackend>(&[graph(3, 4), graph(3, 4)], &device).unwrap();
        assert_eq!(batch.x.dims(), [2, 3, 4]);
        assert_eq!(batch.adj.dims(), [2, 3, 3]);
        assert_eq!(batch.mask.dims(), [2, 3]);
    }

    #[test]
    fn test_encode_graph_batch_pads_smaller_graphs() {
        let device = NdArrayDevice::default();
        let batch =
            encode_graph_batch::<TestBackend>(&[graph(3, 2), graph(1, 2)], &device).unwrap();

        let mask: Vec<bool> = batch.mask.into_data().to_vec().unwrap();
        assert_eq!(mask, vec![true, true, true, true, false, false]);

        let x: Vec<f32> = batch.x.into_data().to_vec().unwrap();
        // Second graph: node 0 is real, nodes 1 and 2 are zero padding.
        assert_eq!(&x[6..12], &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);

        let adj: Vec<f32> = batch.adj.into_data().to_vec().unwrap();
        assert!(adj[9..18].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_encode_graph_batch_rejects_empty() {
        let device = NdArrayDevice::default();
        let err = encode_graph_batch::<TestBackend>(&[], &device).unwrap_err();
        assert!(matches!(err, EncodingError::EmptyBatch));
    }

    #[test]
    fn test_encode_graph_batch_rejects_ragged_features() {
        let device = NdArrayDevice::default();
        let mut bad = graph(2, 3);
        bad.features[1].pop();
        let err = encode_graph_batch::<TestBackend>(&[graph(2, 3), bad], &device).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::FeatureWidth { sample: 1, row: 1, expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_encode_graph_batch_rejects_bad_adjacency() {
        let device = NdArrayDevice::default();
        let mut bad = graph(3, 2);
        bad.adjacency.pop();
        let err = encode_graph_batch::<TestBackend>(&[bad], &device).unwrap_err();
        assert!(matches!(err, EncodingError::AdjacencyShape { sample: 0, nodes: 3 }));
    }

    #[test]
    fn test_encode_joint_batch_concatenates_agents() {
        let device = NdArrayDevice::default();
        let samples = vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]],
        ];
        let joint = encode_joint_batch::<TestBackend>(&samples, &device).unwrap();
        assert_eq!(joint.dims(), [2, 6]);

        let data: Vec<f32> = joint.into_data().to_vec().unwrap();
        assert_eq!(data, (1..=12).map(|v| v as f32).collect::<Vec<_>>());
    }

    #[test]
    fn test_encode_joint_batch_rejects_missing_agent() {
        let device = NdArrayDevice::default();
        let samples = vec![vec![vec![1.0], vec![2.0]], vec![vec![3.0]]];
        let err = encode_joint_batch::<TestBackend>(&samples, &device).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::AgentCount { sample: 1, expected: 2, actual: 1 }
        ));
    }
}
