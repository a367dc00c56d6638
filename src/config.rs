use std::path::Path;

use crate::error::ConfigError;
use crate::graph::PerceptGnnConfig;
use crate::networks::{
    ActorConfig, ActorMaacConfig, CriticConfig, GActorConfig, GCriticConfig, OutputActivation,
};

/// Agent-count and per-agent widths shared by every network.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub n_agent: usize,
    pub dim_observation: usize,
    pub dim_action: usize,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        AgentsConfig {
            n_agent: 3,
            dim_observation: 4,
            dim_action: 2,
        }
    }
}

/// Shape of the structured observation fed to the perception network.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Leading axes enumerate nodes, the last axis is the node feature width.
    pub observation_shape: Vec<usize>,
    pub dropout: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            observation_shape: vec![3, 4],
            dropout: 0.0,
        }
    }
}

/// Output activation of each actor.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub actor: OutputActivation,
    pub graph_actor: OutputActivation,
    pub actor_maac: OutputActivation,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        BoundsConfig {
            actor: OutputActivation::Tanh,
            graph_actor: OutputActivation::Relu,
            actor_maac: OutputActivation::Softmax,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agents: AgentsConfig,
    pub graph: GraphConfig,
    pub bounds: BoundsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.n_agent == 0 {
            return Err(ConfigError::Validation(
                "agents.n_agent must be > 0".into(),
            ));
        }
        if self.agents.dim_observation == 0 {
            return Err(ConfigError::Validation(
                "agents.dim_observation must be > 0".into(),
            ));
        }
        if self.agents.dim_action == 0 {
            return Err(ConfigError::Validation(
                "agents.dim_action must be > 0".into(),
            ));
        }

        if self.graph.observation_shape.len() < 2 {
            return Err(ConfigError::Validation(
                "graph.observation_shape needs a node axis and a feature axis".into(),
            ));
        }
        if self.graph.observation_shape.contains(&0) {
            return Err(ConfigError::Validation(
                "graph.observation_shape axes must be > 0".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.graph.dropout) {
            return Err(ConfigError::Validation(
                "graph.dropout must be in [0, 1)".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }

    pub fn critic(&self) -> CriticConfig {
        let a = &self.agents;
        CriticConfig::new(a.n_agent, a.dim_observation, a.dim_action)
    }

    pub fn actor(&self) -> ActorConfig {
        ActorConfig::new(self.agents.dim_observation, self.agents.dim_action)
            .with_output_activation(self.bounds.actor)
    }

    pub fn actor_maac(&self) -> ActorMaacConfig {
        ActorMaacConfig::new(self.agents.dim_observation, self.agents.dim_action)
            .with_output_activation(self.bounds.actor_maac)
    }

    pub fn percept_gnn(&self) -> PerceptGnnConfig {
        PerceptGnnConfig::new(self.graph.observation_shape.clone()).with_dropout(self.graph.dropout)
    }

    /// The graph actor consumes one node embedding of the perception network.
    pub fn graph_actor(&self) -> GActorConfig {
        GActorConfig::new(crate::graph::EMBEDDING_WIDTH, self.agents.dim_action)
            .with_output_activation(self.bounds.graph_actor)
    }

    /// The graph critic consumes every node embedding flattened together.
    pub fn graph_critic(&self) -> GCriticConfig {
        GCriticConfig::new(
            self.agents.n_agent,
            self.percept_gnn().out_size(),
            self.agents.dim_action,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[agents]
n_agent = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.n_agent, 5);
        assert_eq!(config.agents.dim_observation, 4);
        assert_eq!(config.graph.observation_shape, vec![3, 4]);
        assert_eq!(config.bounds.actor, OutputActivation::Tanh);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.agents.n_agent, default.agents.n_agent);
        assert_eq!(config.bounds.graph_actor, OutputActivation::Relu);
    }

    #[test]
    fn test_bounds_override() {
        let toml_str = r#"
[bounds]
graph_actor = "tanh"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.graph_actor().output_activation, OutputActivation::Tanh);
        assert_eq!(config.actor().output_activation, OutputActivation::Tanh);
    }

    #[test]
    fn test_validation_rejects_zero_agents() {
        let mut config = AppConfig::default();
        config.agents.n_agent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_action_dim() {
        let mut config = AppConfig::default();
        config.agents.dim_action = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_flat_observation_shape() {
        let mut config = AppConfig::default();
        config.graph.observation_shape = vec![4];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_axis() {
        let mut config = AppConfig::default();
        config.graph.observation_shape = vec![0, 4];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_dropout_of_one() {
        let mut config = AppConfig::default();
        config.graph.dropout = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.agents.n_agent, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[graph]
observation_shape = [6, 5]
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.graph.observation_shape, vec![6, 5]);
        assert_eq!(config.percept_gnn().out_size(), 768);
        assert_eq!(config.graph_critic().dim_observation, 768);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[agents]\ndim_observation = 0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_network_configs_follow_agents() {
        let config = AppConfig::default();
        let critic = config.critic();
        assert_eq!(
            (critic.n_agent, critic.dim_observation, critic.dim_action),
            (3, 4, 2)
        );
        assert_eq!(config.actor_maac().output_activation, OutputActivation::Softmax);
        assert_eq!(config.graph_actor().dim_observation, 128);
    }
}
