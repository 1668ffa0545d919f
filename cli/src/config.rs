use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

use cookwise_core::backend::DEFAULT_API_URL;

const API_URL_ENV: &str = "COOKWISE_API_URL";

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
    pub api_url: String,
}

impl Config {
    /// Resolve paths and the backend URL. `api_url_flag` wins over the
    /// environment, which wins over the default.
    pub fn load(api_url_flag: Option<String>) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "cookwise").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("cookwise.db");
        let api_url = resolve_api_url(api_url_flag, std::env::var(API_URL_ENV).ok());

        Ok(Config {
            db_path,
            data_dir,
            api_url,
        })
    }
}

fn resolve_api_url(flag: Option<String>, env: Option<String>) -> String {
    let non_blank = |u: Option<String>| {
        u.map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
    };
    non_blank(flag)
        .or_else(|| non_blank(env))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
