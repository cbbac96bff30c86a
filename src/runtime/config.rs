//! Runtime configuration.

use smol_str::SmolStr;

use crate::base::SourceId;

/// Settings for one script run.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Name of the script, for log output.
    pub script_name: SmolStr,
    /// The source the running script was compiled from.
    pub source: SourceId,
    /// Seed for `some item` selection. Unseeded runs draw from entropy.
    pub rng_seed: Option<u64>,
    /// Relocate errors raised in other sources to the current location.
    pub rewrite_foreign_locations: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            script_name: SmolStr::new_static("untitled"),
            source: SourceId(0),
            rng_seed: None,
            rewrite_foreign_locations: true,
        }
    }
}

impl RuntimeConfig {
    pub fn with_script_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.script_name = name.into();
        self
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_rewrite_foreign_locations(mut self, rewrite: bool) -> Self {
        self.rewrite_foreign_locations = rewrite;
        self
    }
}
