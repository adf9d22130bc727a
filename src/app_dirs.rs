use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn db_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("phrasediff");
            Some(state_dir.join("phrases.db"))
        } else {
            ProjectDirs::from("", "", "phrasediff")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("phrases.db"))
        }
    }

    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "phrasediff")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("phrasediff_config.json"))
    }
}
