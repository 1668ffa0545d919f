use anyhow::Result;
use std::process;

use cookwise_core::service::CookwiseService;

use crate::render::{RenderConfig, print_recipe_detail, print_recipe_table};

use super::helpers::{parse_position, print_json};

pub(crate) fn cmd_history_list(svc: &CookwiseService, cfg: &RenderConfig) -> Result<()> {
    let history = svc.history().list();

    if history.is_empty() {
        if cfg.json {
            println!("[]");
        } else {
            eprintln!("No recently viewed recipes");
        }
        process::exit(2);
    }

    if cfg.json {
        print_json(&history)
    } else {
        print_recipe_table(&history);
        Ok(())
    }
}

/// Reopen the `position`-th most recent recipe (1-based). Reopening counts as
/// a visit, so the entry moves to the top.
pub(crate) fn cmd_history_show(
    svc: &CookwiseService,
    position: usize,
    favorite: bool,
    cfg: &RenderConfig,
) -> Result<()> {
    let index = parse_position(position)?;
    let mut session = svc.session();
    session.open_from_history(index)?;

    if favorite {
        let change = session.toggle_favorite()?;
        if !cfg.json {
            eprintln!("{change}");
        }
    }

    let Some(selection) = session.selected() else {
        return Ok(());
    };
    if cfg.json {
        print_json(selection)
    } else {
        print_recipe_detail(cfg, &selection.recipe, selection.favorite);
        Ok(())
    }
}

pub(crate) fn cmd_history_clear(svc: &CookwiseService, cfg: &RenderConfig) -> Result<()> {
    svc.history().clear()?;
    if cfg.json {
        println!(r#"{{"cleared":true}}"#);
    } else {
        println!("History cleared");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookwise_core::error::SessionError;
    use cookwise_core::models::RecipeRecord;

    use crate::render::LIGHT;

    fn plain() -> RenderConfig {
        RenderConfig {
            palette: LIGHT,
            color: false,
            json: false,
        }
    }

    fn seeded() -> CookwiseService {
        let svc = CookwiseService::new_in_memory().unwrap();
        for name in ["Soup", "Salad", "Stew"] {
            svc.history().record_visit(&RecipeRecord::new(name)).unwrap();
        }
        svc
    }

    #[test]
    fn test_show_moves_entry_to_top() {
        let svc = seeded();
        cmd_history_show(&svc, 3, false, &plain()).unwrap();

        let names: Vec<String> = svc.history().list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Soup", "Stew", "Salad"]);
    }

    #[test]
    fn test_show_and_favorite() {
        let svc = seeded();
        cmd_history_show(&svc, 1, true, &plain()).unwrap();

        let favorites = svc.favorites().list().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Stew");
    }

    #[test]
    fn test_show_out_of_range() {
        let svc = seeded();
        let err = cmd_history_show(&svc, 4, false, &plain()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::HistoryEntryNotFound(3))
        );
        assert!(cmd_history_show(&svc, 0, false, &plain()).is_err());
    }

    #[test]
    fn test_clear() {
        let svc = seeded();
        cmd_history_clear(&svc, &plain()).unwrap();
        assert!(svc.history().list().is_empty());
    }
}
