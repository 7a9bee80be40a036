use camino::{Utf8Path, Utf8PathBuf};
use ltlf::{compiler::DEFAULT_MAX_STATES, Compiler, EventSemantics, Literal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Knobs of one analysis run, usually read from a TOML file:
///
/// ```toml
/// semantics = "single"
/// max-states = 100000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnalysisOptions {
    pub semantics: EventSemantics,
    pub max_states: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            semantics: EventSemantics::default(),
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid analysis options: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AnalysisOptions {
    pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&src)
    }

    /// A compiler configured with these options over `universe`.
    pub fn compiler<L: Into<Literal>>(&self, universe: impl IntoIterator<Item = L>) -> Compiler {
        Compiler::new(universe)
            .with_semantics(self.semantics)
            .with_max_states(self.max_states)
    }
}
