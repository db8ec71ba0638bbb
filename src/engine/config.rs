//! Agent configuration from string policy tags.
//!
//! Scenario drivers (and JSON config files) describe agents with a string
//! policy tag plus loose optional parameters. Validation happens here,
//! once, turning a tag into a typed [`Policy`]: unknown tags and a missing
//! threshold surface as [`AgentError`]s before any game is played.

use serde::{Deserialize, Serialize};

use crate::engine::agent::{AdaptiveAgent, AgentError, Policy, normalize};

/// Recognized policy tags, in the form scenario configs use them.
pub const POLICY_TAGS: [&str; 5] = [
    "fixed_mixed",
    "best_response",
    "fictitious_play",
    "epsilon_greedy",
    "threshold",
];

/// Default exploration rate for `epsilon_greedy` when none is given.
pub const DEFAULT_EPSILON: f64 = 0.05;

/// Declarative description of an agent, deserializable from JSON.
///
/// # Example
/// ```
/// use privacy_games::engine::config::AgentConfig;
///
/// let config: AgentConfig = serde_json::from_str(
///     r#"{"name": "P1", "policy": "epsilon_greedy", "epsilon": 0.1, "seed": 7}"#,
/// ).unwrap();
/// let agent = config.build().unwrap();
/// assert_eq!(agent.name(), "P1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name for the agent.
    pub name: String,
    /// Policy tag; see [`POLICY_TAGS`].
    pub policy: String,
    /// Mixed strategy for `fixed_mixed` (normalized on build; uniform if
    /// absent).
    #[serde(default)]
    pub mix: Option<[f64; 2]>,
    /// Exploration rate for `epsilon_greedy`.
    #[serde(default)]
    pub epsilon: Option<f64>,
    /// Cutoff for `threshold` (required by that policy).
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Initial private value `u`.
    #[serde(default)]
    pub initial_private_value: Option<f64>,
    /// Decay rate for the private value.
    #[serde(default)]
    pub decay_rate: Option<f64>,
    /// Random seed; entropy-seeded if absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// A minimal config with just a name and policy tag.
    pub fn new(name: impl Into<String>, policy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: policy.into(),
            mix: None,
            epsilon: None,
            threshold: None,
            initial_private_value: None,
            decay_rate: None,
            seed: None,
        }
    }

    /// Resolve the string tag into a typed [`Policy`].
    ///
    /// # Errors
    /// [`AgentError::UnknownPolicy`] for an unrecognized tag;
    /// [`AgentError::MissingThreshold`] for `threshold` without a value.
    pub fn resolve_policy(&self) -> Result<Policy, AgentError> {
        match self.policy.as_str() {
            "fixed_mixed" => Ok(Policy::Fixed {
                mix: normalize(self.mix.unwrap_or([0.5, 0.5])),
            }),
            "best_response" => Ok(Policy::BestResponse),
            "fictitious_play" => Ok(Policy::FictitiousPlay),
            "epsilon_greedy" => Ok(Policy::EpsilonGreedy {
                epsilon: self.epsilon.unwrap_or(DEFAULT_EPSILON),
            }),
            "threshold" => match self.threshold {
                Some(threshold) => Ok(Policy::Threshold { threshold }),
                None => Err(AgentError::MissingThreshold),
            },
            other => Err(AgentError::UnknownPolicy(other.to_string())),
        }
    }

    /// Validate the config and construct the agent.
    pub fn build(&self) -> Result<AdaptiveAgent, AgentError> {
        let policy = self.resolve_policy()?;
        let mut agent = AdaptiveAgent::new(self.name.clone(), policy);
        if let Some(seed) = self.seed {
            agent = agent.with_seed(seed);
        }
        if let Some(u) = self.initial_private_value {
            agent = agent.with_private_value(u);
        }
        if let Some(rate) = self.decay_rate {
            agent = agent.with_decay_rate(rate);
        }
        Ok(agent)
    }
}
