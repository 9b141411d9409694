use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{BokehError, BokehResult};

/// JSON-facing bokeh node record, as authored in a node editor.
///
/// This is the unvalidated boundary object. Convert it with
/// [`BokehParams::from_node`](crate::BokehParams::from_node) before rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BokehImageNode {
    /// Number of aperture blades, i.e. polygon vertices.
    pub flaps: u32,
    /// Polygon rotation in radians.
    pub angle: f32,
    /// 0 keeps the polygon, 1 morphs it into a circle.
    pub rounding: f32,
    /// Radius of the central hole as a fraction of the circumradius.
    pub catadioptric: f32,
    /// Chromatic lens shift in `[-1, 1]`, used by the dispersion output.
    #[serde(alias = "lensshift")]
    pub lens_shift: f32,
}

impl Default for BokehImageNode {
    fn default() -> Self {
        Self {
            flaps: 5,
            angle: 0.0,
            rounding: 0.0,
            catadioptric: 0.0,
            lens_shift: 0.0,
        }
    }
}

impl BokehImageNode {
    /// Parse a node record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BokehResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BokehError::serde(format!("parse bokeh node JSON: {e}")))
    }

    /// Parse a node record from a JSON string.
    pub fn from_json_str(s: &str) -> BokehResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a node record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BokehResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BokehError::validation(format!("open bokeh node JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize the record as pretty-printed JSON.
    pub fn to_json_string(&self) -> BokehResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BokehError::serde(format!("serialize bokeh node JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/node.rs"]
mod tests;
