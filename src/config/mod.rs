use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub items_per_page: Option<usize>,
    pub mode: Option<String>,
    pub with_images: Option<bool>,
    pub timeout: Option<u64>,
    pub rate: Option<u32>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".metbrowse").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# Metbrowse config
#
# Location (default):
#   ~/.metbrowse/config.yml

# Catalog API
# api_base: https://collectionapi.metmuseum.org/public/collection/v1

# Browsing
items_per_page: 9
mode: grid
# Use the search endpoint as the id source (pre-filtered to objects with images):
with_images: false

# HTTP
timeout: 10
rate: 50

# Output (optional)
# output: ./page.json
# output_format: json

# Output styling
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = default_config_yaml();
    std::fs::write(path, contents)
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}
