use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Largest id that survives a round-trip through an IEEE-754 double.
pub const MAX_SYNTHESIZED_ID: u64 = (1 << 53) - 1;

/// Calorie information as the backend reports it: sometimes a number,
/// sometimes free text like "180 per slice".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Calories {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calories::Number(n) => write!(f, "{n}"),
            Calories::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Calories>,
    #[serde(default)]
    pub preparation: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

impl RecipeRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            calories: None,
            preparation: BTreeMap::new(),
            ingredients: None,
        }
    }

    /// Return the record's id, synthesizing and storing one if it has none.
    pub fn ensure_id(&mut self) -> u64 {
        *self.id.get_or_insert_with(|| synthesize_id(&self.name))
    }

    /// Preparation steps in cooking order (numeric key order, not string order).
    #[must_use]
    pub fn steps(&self) -> Vec<(&str, &str)> {
        let mut steps: Vec<(&str, &str)> = self
            .preparation
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        steps.sort_by(|a, b| compare_step_keys(a.0, b.0));
        steps
    }

    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        self.ingredients.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn calories_label(&self) -> String {
        self.calories
            .as_ref()
            .map_or_else(|| "Unknown".to_string(), ToString::to_string)
    }
}

/// Deterministic id for a record that arrived without one: the first eight
/// bytes of SHA-256 over the name, masked to 53 bits, never zero.
#[must_use]
pub fn synthesize_id(name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(bytes) & MAX_SYNTHESIZED_ID).max(1)
}

/// Leading integer of a step key, the way a lenient integer parse reads it:
/// `"10"` → 10, `" 3."` → 3, `"step"` → `None`.
#[must_use]
pub fn step_number(key: &str) -> Option<i64> {
    let key = key.trim_start();
    let (sign, digits) = match key.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, key.strip_prefix('+').unwrap_or(key)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Numbered keys first in numeric order, everything else after in string order.
#[must_use]
pub fn compare_step_keys(a: &str, b: &str) -> Ordering {
    match (step_number(a), step_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pancakes() -> RecipeRecord {
        let mut r = RecipeRecord::new("Pancakes");
        r.preparation.insert("10".to_string(), "x".to_string());
        r.preparation.insert("2".to_string(), "y".to_string());
        r.preparation.insert("1".to_string(), "z".to_string());
        r
    }

    #[test]
    fn test_steps_sorted_numerically() {
        let r = pancakes();
        let keys: Vec<&str> = r.steps().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_steps_non_numeric_keys_last() {
        let mut r = pancakes();
        r.preparation
            .insert("serve".to_string(), "Serve warm".to_string());
        r.preparation.insert("9".to_string(), "Flip".to_string());
        let keys: Vec<&str> = r.steps().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["1", "2", "9", "10", "serve"]);
    }

    #[test]
    fn test_step_number_lenient() {
        assert_eq!(step_number("10"), Some(10));
        assert_eq!(step_number(" 3."), Some(3));
        assert_eq!(step_number("4a"), Some(4));
        assert_eq!(step_number("-1"), Some(-1));
        assert_eq!(step_number("step"), None);
        assert_eq!(step_number(""), None);
    }

    #[test]
    fn test_ensure_id_is_stable() {
        let mut r = RecipeRecord::new("Omelette");
        let first = r.ensure_id();
        let second = r.ensure_id();
        assert_eq!(first, second);
        assert_eq!(r.id, Some(first));
        assert!(first > 0);
        assert!(first <= MAX_SYNTHESIZED_ID);
    }

    #[test]
    fn test_ensure_id_keeps_existing() {
        let mut r = RecipeRecord::new("Omelette");
        r.id = Some(7);
        assert_eq!(r.ensure_id(), 7);
    }

    #[test]
    fn test_synthesize_id_deterministic() {
        assert_eq!(synthesize_id("Omelette"), synthesize_id("Omelette"));
        assert_ne!(synthesize_id("Omelette"), synthesize_id("Frittata"));
    }

    #[test]
    fn test_deserialize_legacy_record() {
        // Old entries may lack id and ingredients, or carry a null id
        let r: RecipeRecord = serde_json::from_str(
            r#"{"id": null, "name": "Toast", "calories": "180 per slice", "preparation": {"1": "Toast bread"}}"#,
        )
        .unwrap();
        assert!(r.id.is_none());
        assert!(r.ingredients().is_empty());
        assert_eq!(r.calories_label(), "180 per slice");
    }

    #[test]
    fn test_calories_pass_through() {
        let r: RecipeRecord =
            serde_json::from_str(r#"{"name": "Soup", "calories": 250}"#).unwrap();
        assert_eq!(r.calories_label(), "250");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["calories"], serde_json::json!(250));
        assert!(json.get("id").is_none());
        assert!(json.get("ingredients").is_none());
    }

    #[test]
    fn test_missing_calories_label() {
        assert_eq!(RecipeRecord::new("Water").calories_label(), "Unknown");
    }
}
