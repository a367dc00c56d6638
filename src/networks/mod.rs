//! Fully-connected actor and critic networks.

mod activation;
mod actor;
mod actor_maac;
mod critic;
mod graph_actor;
mod graph_critic;

pub use activation::{elu, OutputActivation};
pub use actor::{Actor, ActorConfig};
pub use actor_maac::{ActorMaac, ActorMaacConfig};
pub use critic::{Critic, CriticConfig};
pub use graph_actor::{GActor, GActorConfig};
pub use graph_critic::{GCritic, GCriticConfig};
