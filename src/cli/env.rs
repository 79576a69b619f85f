//! `env` command

use anyhow::Result;

use super::output::Output;
use crate::storage::Settings;

/// Name/value pairs to print: every known setting, or just `names`.
/// Unknown names map to an empty value.
pub fn entries(settings: &Settings, names: &[String]) -> Vec<(String, String)> {
    if names.is_empty() {
        settings
            .iter()
            .map(|(key, value)| (key.name().to_string(), value.to_string()))
            .collect()
    } else {
        names
            .iter()
            .map(|name| (name.clone(), settings.value(name).to_string()))
            .collect()
    }
}

/// Prints settings as `NAME="value"` lines, suitable for sourcing in a shell
pub fn run(output: &Output, settings: &Settings, names: &[String]) -> Result<()> {
    for path in settings.loaded_from() {
        output.verbose_ctx("env", &format!("Loaded {}", path.display()));
    }

    let entries = entries(settings, names);

    if output.is_json() {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        output.data(&map)?;
    } else {
        for (name, value) in entries {
            output.line(&format!("{}=\"{}\"", name, value));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_entries_in_order() {
        let entries = entries(&Settings::default(), &[]);
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0], ("TODO_DIR".to_string(), String::new()));
        assert_eq!(entries[7], ("TODOTXT_DATE_ON_ADD".to_string(), "0".to_string()));
    }

    #[test]
    fn named_entries() {
        let names = vec!["TODOTXT_FORCE".to_string(), "NOT_A_SETTING".to_string()];
        let entries = entries(&Settings::default(), &names);
        assert_eq!(
            entries,
            vec![
                ("TODOTXT_FORCE".to_string(), "0".to_string()),
                ("NOT_A_SETTING".to_string(), String::new()),
            ]
        );
    }
}
