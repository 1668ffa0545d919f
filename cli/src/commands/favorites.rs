use anyhow::Result;
use serde::Serialize;
use std::process;

use cookwise_core::service::CookwiseService;

use crate::render::{RenderConfig, print_recipe_detail, print_recipe_table};

use super::helpers::print_json;

pub(crate) fn cmd_favorites_list(svc: &CookwiseService, cfg: &RenderConfig) -> Result<()> {
    let favorites = svc.favorites().list()?;

    if favorites.is_empty() {
        if cfg.json {
            println!("[]");
        } else {
            eprintln!("No favorites yet");
        }
        process::exit(2);
    }

    if cfg.json {
        print_json(&favorites)
    } else {
        print_recipe_table(&favorites);
        Ok(())
    }
}

pub(crate) fn cmd_favorites_show(svc: &CookwiseService, id: u64, cfg: &RenderConfig) -> Result<()> {
    let mut session = svc.session();
    let selection = session.open_favorite(id)?;

    if cfg.json {
        print_json(selection)
    } else {
        print_recipe_detail(cfg, &selection.recipe, selection.favorite);
        Ok(())
    }
}

pub(crate) fn cmd_favorites_remove(
    svc: &CookwiseService,
    id: u64,
    cfg: &RenderConfig,
) -> Result<()> {
    #[derive(Serialize)]
    struct Removed {
        id: u64,
        removed: bool,
    }

    let favorites = svc.favorites();
    let existed = favorites.contains(id);
    favorites.remove(id)?;

    if cfg.json {
        print_json(&Removed {
            id,
            removed: existed,
        })
    } else {
        if existed {
            println!("Removed favorite {id}");
        } else {
            println!("Recipe {id} was not a favorite");
        }
        Ok(())
    }
}
