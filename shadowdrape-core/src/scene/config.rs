use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::foundation::error::{ShadeError, ShadeResult};
use crate::scene::light::LightParams;
use crate::scene::params::{ShadowParams, Tunables};
use crate::scene::transform::SceneTransform;

/// Everything a control surface persists about a shot, loadable from JSON.
///
/// Missing sections fall back to their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Subject placement.
    pub transform: SceneTransform,
    /// Light direction.
    pub light: LightParams,
    /// Shadow look.
    pub physics: ShadowParams,
    /// Empirical constants.
    pub tunables: Tunables,
}

impl ShadowConfig {
    /// Read a config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ShadeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShadeError::validation(format!("open shadow config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a config from any JSON reader.
    pub fn from_reader(r: impl Read) -> ShadeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShadeError::serde(format!("parse shadow config JSON: {e}")))
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> ShadeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ShadeError::serde(format!("parse shadow config JSON: {e}")))
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> ShadeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShadeError::serde(format!("serialize shadow config: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
