use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the fetched JSON snapshots.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}
