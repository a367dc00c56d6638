#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use burn::prelude::*;
use burn::tensor::Distribution;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use maac_networks::config::AppConfig;
use maac_networks::encoding::{encode_graph_batch, GraphObservation};

#[cfg(not(feature = "wgpu"))]
type InspectBackend = burn::backend::NdArray<f32>;
#[cfg(feature = "wgpu")]
type InspectBackend = burn::backend::Wgpu<f32, i32>;

/// Build every network from a config and run one forward pass through each.
#[derive(Parser)]
#[command(name = "inspect", about = "Inspect MAAC network shapes and parameter counts")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Batch size of the random inputs
    #[arg(long, default_value_t = 4)]
    batch: usize,

    /// Print a TOML file with all default values and exit
    #[arg(long)]
    print_default: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if cli.print_default {
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }
    if cli.batch == 0 {
        bail!("--batch must be > 0");
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    config.validate().context("validating config")?;

    inspect::<InspectBackend>(&config, cli.batch)
}

fn inspect<B: Backend>(config: &AppConfig, batch: usize) -> Result<()> {
    let device = B::Device::default();
    let agents = &config.agents;
    let joint_obs = agents.n_agent * agents.dim_observation;
    let joint_act = agents.n_agent * agents.dim_action;

    let random = |dims: [usize; 2]| Tensor::<B, 2>::random(dims, Distribution::Default, &device);

    let critic = config.critic().init::<B>(&device);
    let value = critic.forward(random([batch, joint_obs]), random([batch, joint_act]));
    report("critic", critic.num_params(), &value.dims());

    let actor = config.actor().init::<B>(&device);
    let action = actor.forward(random([batch, agents.dim_observation]));
    report("actor", actor.num_params(), &action.dims());

    let actor_maac = config.actor_maac().init::<B>(&device);
    let probs = actor_maac.forward(random([batch, agents.dim_observation]));
    report("actor_maac", actor_maac.num_params(), &probs.dims());

    let shape = &config.graph.observation_shape;
    let nodes: usize = shape[..shape.len() - 1].iter().product();
    let feature_dim = shape[shape.len() - 1];
    let graphs: Vec<GraphObservation> = (0..batch)
        .map(|_| {
            let features = random([nodes, feature_dim])
                .into_data()
                .to_vec::<f32>()
                .map(|flat| flat.chunks(feature_dim).map(<[f32]>::to_vec).collect())
                .unwrap_or_default();
            GraphObservation::fully_connected(features)
        })
        .collect();
    let graph_batch = encode_graph_batch::<B>(&graphs, &device).context("encoding graphs")?;

    let percept = config.percept_gnn().init::<B>(&device);
    let embeddings = percept.forward(graph_batch.x, graph_batch.adj, Some(graph_batch.mask));
    report("percept_gnn", percept.num_params(), &embeddings.dims());

    let graph_actor = config.graph_actor().init::<B>(&device);
    let node_actions = graph_actor.forward(embeddings.clone());
    report("graph_actor", graph_actor.num_params(), &node_actions.dims());

    let graph_critic = config.graph_critic().init::<B>(&device);
    let graph_value = graph_critic.forward(embeddings, random([batch, joint_act]));
    report("graph_critic", graph_critic.num_params(), &graph_value.dims());

    Ok(())
}

fn report(name: &str, params: usize, output: &[usize]) {
    tracing::info!(network = name, params, output = ?output, "forward pass ok");
}
