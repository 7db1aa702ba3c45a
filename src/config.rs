use std::path::{Path, PathBuf};

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;

/// Relative path of the registry file when the user configures nothing.
pub const DEFAULT_LOAD_CLASSES_PATH: &str = "./src/rooms/schema/LoadClasses.ts";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// Path to the registry file enumerating component modules,
    /// relative to the workspace root
    pub load_classes_path: String,
    pub hover: bool,
    pub field_completions: bool,
}

impl Settings {
    pub fn new(root_dir: &Path) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/comyaml/settings");
        let settings = Config::builder()
            .add_source(File::with_name(&expanded).required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/.comyaml",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            )
            .set_default("load_classes_path", DEFAULT_LOAD_CLASSES_PATH)?
            .set_default("hover", true)?
            .set_default("field_completions", true)?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }

    /// The registry file's absolute path, resolved against the workspace root.
    pub fn registry_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.load_classes_path)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            load_classes_path: DEFAULT_LOAD_CLASSES_PATH.to_string(),
            hover: true,
            field_completions: true,
        }
    }
}
