use crate::error::SimError;

/// The tunable limits of the duel and batch engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// The amount of turns after which a duel, in which both fighters are
    /// still standing, is called a draw
    pub max_turns: u32,
    /// The largest amount of duels a single batch is allowed to run
    pub max_batch_size: u32,
}

impl SimulationConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 1000;
    pub const DEFAULT_MAX_BATCH_SIZE: u32 = 10_000;

    #[must_use]
    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            max_batch_size: Self::DEFAULT_MAX_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn with_max_batch_size(mut self, max_batch_size: u32) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Checks, that the engines can actually run with these limits
    ///
    /// # Errors
    ///
    /// Will return `Err`, if either limit is zero
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_turns == 0 {
            return Err(SimError::InvalidConfig("max_turns must be at least 1"));
        }
        if self.max_batch_size == 0 {
            return Err(SimError::InvalidConfig(
                "max_batch_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parses a config from json. Fields, that are missing, keep their
    /// default value
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the json is malformed, or describes a config,
    /// that does not pass [`SimulationConfig::validate`]
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimulationConfig = serde_json::from_str(json)
            .map_err(|_| SimError::InvalidConfig("malformed json"))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
