use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Fill character used by the `pad_*` functions when none is given
pub const DEFAULT_PAD_CHAR: char = ' ';
/// Mask character used by `mask_string`
pub const DEFAULT_MASK_CHAR: char = '*';
/// Mask character used by `censor`
pub const DEFAULT_CENSOR_MASK: char = '*';
pub const DEFAULT_HIGHLIGHT_OPEN: &str = "**";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "**";
pub const DEFAULT_QUOTE: char = '"';
pub const DEFAULT_CURRENCY: &str = "USD";
/// Marker appended by `truncate` and `truncate_words`
pub const ELLIPSIS: char = '…';

const DEFAULT_MAX_STRING_SIZE: usize = 1024 * 1024;
const DEFAULT_MAX_ARRAY_SIZE: usize = 100_000;

/// Function family, used to select what gets registered into a script engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Case,
    Trim,
    Search,
    Extract,
    Validate,
    Encoding,
    Analysis,
    Random,
    Edit,
    Clean,
    Format,
}

impl Family {
    pub const ALL: [Family; 11] = [
        Family::Case,
        Family::Trim,
        Family::Search,
        Family::Extract,
        Family::Validate,
        Family::Encoding,
        Family::Analysis,
        Family::Random,
        Family::Edit,
        Family::Clean,
        Family::Format,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Case => "case",
            Family::Trim => "trim",
            Family::Search => "search",
            Family::Extract => "extract",
            Family::Validate => "validate",
            Family::Encoding => "encoding",
            Family::Analysis => "analysis",
            Family::Random => "random",
            Family::Edit => "edit",
            Family::Clean => "clean",
            Family::Format => "format",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Family::ALL
            .iter()
            .copied()
            .find(|family| family.name() == wanted)
            .ok_or_else(|| Error::Config(format!("unknown function family '{}'", s)))
    }
}

/// Settings for the scripting surface.
///
/// The pure functions never read this; it only shapes what
/// [`crate::scripting::register_all_functions`] puts into an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringcraftConfig {
    pub families: Vec<Family>,
    pub random_seed: Option<u64>,
    /// Maximum string length a script may build, 0 for unlimited
    pub max_string_size: usize,
    /// Maximum array length a script may build, 0 for unlimited
    pub max_array_size: usize,
}

impl Default for StringcraftConfig {
    fn default() -> Self {
        Self {
            families: Family::ALL.to_vec(),
            random_seed: None,
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_array_size: DEFAULT_MAX_ARRAY_SIZE,
        }
    }
}

impl StringcraftConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StringcraftConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            return Err(Error::Config(
                "at least one function family must be enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_families(mut self, families: &[Family]) -> Self {
        self.families = families.to_vec();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn enables(&self, family: Family) -> bool {
        self.families.contains(&family)
    }
}
