use crate::foundation::error::FxResult;

pub const DEFAULT_DATA_ROOT: &str = "data/";
pub const DEFAULT_PREFIX: &str = "SixLoves_VideoDrug/";
pub const DEFAULT_INDEX_NAME: &str = "EffectList.json";

/// Where effect documents live, relative to the document source root.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataManagerConfig {
    /// Root directory of game data.
    pub data_root: String,
    /// Namespace directory for this plugin's documents.
    pub prefix: String,
    /// File name of the effect index inside the namespace.
    pub index_name: String,
}

impl Default for DataManagerConfig {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

impl DataManagerConfig {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn index_path(&self) -> String {
        format!("{}{}{}", self.data_root, self.prefix, self.index_name)
    }

    pub fn effect_path(&self, name: &str) -> String {
        format!("{}{}{name}.json", self.data_root, self.prefix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/config.rs"]
mod tests;
