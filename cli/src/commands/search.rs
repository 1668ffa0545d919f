use anyhow::{Context, Result};
use std::process;
use tracing::warn;

use cookwise_core::error::SessionError;
use cookwise_core::models::RecipeRecord;
use cookwise_core::service::{CookwiseService, RecipeSearchProvider};

use crate::render::{RenderConfig, print_recipe_detail, print_recipe_table};

use super::helpers::{json_error, print_json, prompt_choice};

pub(crate) struct SearchArgs<'a> {
    pub ingredients: &'a [String],
    pub portions: Option<&'a str>,
    pub pick: Option<&'a str>,
    pub favorite: bool,
}

pub(crate) fn cmd_search(
    svc: &CookwiseService,
    provider: &dyn RecipeSearchProvider,
    args: &SearchArgs<'_>,
    cfg: &RenderConfig,
) -> Result<()> {
    let mut session = svc.session();
    for ingredient in args.ingredients {
        if !session.push_ingredient(ingredient.as_str()) {
            warn!("ignoring blank ingredient");
        }
    }
    if let Some(portions) = args.portions {
        session.set_portions(portions);
    }

    let results = match session.search(provider) {
        Ok(results) => results.to_vec(),
        Err(e) if e.is_validation() || e == SessionError::NoRecipes => {
            if cfg.json {
                println!("{}", json_error(&e.to_string()));
            } else {
                eprintln!("{e}");
            }
            process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let name = match args.pick {
        Some(pick) => resolve_pick(&results, pick),
        None if results.len() == 1 => results[0].name.clone(),
        None if cfg.json => return print_json(&results),
        None => {
            print_recipe_table(&results);
            let idx = prompt_choice(results.len())?;
            results[idx].name.clone()
        }
    };

    session.select_recipe(&name)?;
    if args.favorite {
        let change = session.toggle_favorite()?;
        if !cfg.json {
            eprintln!("{change}");
        }
    }

    let selection = session.selected().context("No recipe is open")?;
    if cfg.json {
        print_json(selection)
    } else {
        print_recipe_detail(cfg, &selection.recipe, selection.favorite);
        Ok(())
    }
}

/// `--pick` takes either a recipe name or its 1-based row number.
fn resolve_pick(results: &[RecipeRecord], pick: &str) -> String {
    if results.iter().any(|r| r.name == pick) {
        return pick.to_string();
    }
    pick.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| results.get(i))
        .map_or_else(|| pick.to_string(), |r| r.name.clone())
}
