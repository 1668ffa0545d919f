use anyhow::Result;
use serde::Serialize;

use cookwise_core::service::CookwiseService;

use crate::config::Config;
use crate::render::RenderConfig;

use super::helpers::{parse_switch, print_json};

pub(crate) fn cmd_settings_show(
    svc: &CookwiseService,
    config: &Config,
    cfg: &RenderConfig,
) -> Result<()> {
    #[derive(Serialize)]
    struct Settings<'a> {
        dark_mode: bool,
        data_dir: String,
        db_path: String,
        api_url: &'a str,
    }

    let settings = Settings {
        dark_mode: svc.dark_mode()?,
        data_dir: config.data_dir.display().to_string(),
        db_path: config.db_path.display().to_string(),
        api_url: &config.api_url,
    };

    if cfg.json {
        return print_json(&settings);
    }
    let on_off = if settings.dark_mode { "on" } else { "off" };
    println!("{}", cfg.heading("Settings"));
    println!("  Dark mode: {on_off}");
    println!("  Backend:   {}", settings.api_url);
    println!("  Data dir:  {}", cfg.muted(&settings.data_dir));
    println!("  Database:  {}", cfg.muted(&settings.db_path));
    Ok(())
}

pub(crate) fn cmd_settings_dark_mode(
    svc: &CookwiseService,
    value: &str,
    cfg: &RenderConfig,
) -> Result<()> {
    let enabled = parse_switch(value)?;
    svc.set_dark_mode(enabled)?;

    if cfg.json {
        println!(r#"{{"dark_mode":{enabled}}}"#);
    } else {
        println!("Dark mode {}", if enabled { "on" } else { "off" });
    }
    Ok(())
}
