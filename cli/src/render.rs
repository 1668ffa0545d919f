use std::io::IsTerminal;

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use cookwise_core::models::RecipeRecord;

/// Colors of one theme, as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub primary: &'static str,
    pub muted: &'static str,
}

pub(crate) const LIGHT: Palette = Palette {
    primary: "#E81B0E",
    muted: "#777777",
};

pub(crate) const DARK: Palette = Palette {
    primary: "#FF6B6B",
    muted: "#CCCCCC",
};

/// Everything a view needs to know about how to draw itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderConfig {
    pub palette: Palette,
    pub color: bool,
    pub json: bool,
}

impl RenderConfig {
    pub(crate) fn new(dark_mode: bool, json: bool) -> Self {
        Self {
            palette: if dark_mode { DARK } else { LIGHT },
            color: std::io::stdout().is_terminal(),
            json,
        }
    }

    pub(crate) fn heading(&self, text: &str) -> String {
        self.paint(self.palette.primary, text)
    }

    pub(crate) fn muted(&self, text: &str) -> String {
        self.paint(self.palette.muted, text)
    }

    fn paint(&self, hex: &str, text: &str) -> String {
        match (self.color, hex_to_rgb(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[1;38;2;{r};{g};{b}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub(crate) fn print_recipe_table(recipes: &[RecipeRecord]) {
    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Steps")]
        steps: usize,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .enumerate()
        .map(|(i, r)| RecipeRow {
            idx: i + 1,
            id: r.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            name: truncate(&r.name, 40),
            calories: truncate(&r.calories_label(), 20),
            steps: r.preparation.len(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..5)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_recipe_detail(cfg: &RenderConfig, recipe: &RecipeRecord, favorite: bool) {
    let marker = if favorite { " ♥" } else { "" };
    println!("{}{marker}", cfg.heading(&recipe.name));
    if let Some(id) = recipe.id {
        println!("{}", cfg.muted(&format!("id: {id}")));
    }
    println!("Calories: {}", recipe.calories_label());

    let ingredients = recipe.ingredients();
    if !ingredients.is_empty() {
        println!("\n{}", cfg.heading("Ingredients:"));
        for ingredient in ingredients {
            println!("  - {ingredient}");
        }
    }

    println!("\n{}", cfg.heading("Steps:"));
    let steps = recipe.steps();
    if steps.is_empty() {
        println!("  {}", cfg.muted("(no preparation steps)"));
    }
    for (number, text) in steps {
        println!("  {number}. {text}");
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#E81B0E"), Some((0xE8, 0x1B, 0x0E)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("E81B0E"), None);
        assert_eq!(hex_to_rgb("#GG0000"), None);
    }

    #[test]
    fn test_palette_follows_dark_mode() {
        assert_eq!(RenderConfig::new(true, false).palette, DARK);
        assert_eq!(RenderConfig::new(false, false).palette, LIGHT);
    }

    #[test]
    fn test_plain_output_without_color() {
        let cfg = RenderConfig {
            palette: LIGHT,
            color: false,
            json: false,
        };
        assert_eq!(cfg.heading("Steps:"), "Steps:");

        let colored = RenderConfig { color: true, ..cfg };
        assert_eq!(
            colored.heading("Steps:"),
            "\x1b[1;38;2;232;27;14mSteps:\x1b[0m"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
        assert_eq!(truncate("Crème brûlée maison", 10), "Crème b...");
    }
}
