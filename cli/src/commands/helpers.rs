use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::{self, BufRead, Write};

pub(crate) fn prompt_choice(count: usize) -> Result<usize> {
    eprint!("\nSelect a recipe (1-{count}): ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let n: usize = line.trim().parse().context("Invalid number")?;
    if n < 1 || n > count {
        bail!("Selection out of range");
    }
    Ok(n - 1)
}

/// Convert a 1-based position typed by the user into an index.
pub(crate) fn parse_position(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .context("Positions start at 1 (1 = most recent)")
}

/// Parse "on"/"off" style switches.
pub(crate) fn parse_switch(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => bail!("Invalid value '{s}'. Use 'on' or 'off'"),
    }
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(1).unwrap(), 0);
        assert_eq!(parse_position(20).unwrap(), 19);
        assert!(parse_position(0).is_err());
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("on").unwrap());
        assert!(parse_switch(" ON ").unwrap());
        assert!(!parse_switch("off").unwrap());
        assert!(!parse_switch("false").unwrap());
        assert!(parse_switch("dim").is_err());
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("boom"), r#"{"error":"boom"}"#);
        assert_eq!(json_error(r#"say "hi""#), r#"{"error":"say \"hi\""}"#);
    }
}
