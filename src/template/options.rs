//! Directive option-string grammar.
//!
//! Per spec §6's wire grammar: `option := '--' ident (SP value)*`. Bare
//! tokens before the first `--option` are positional (used by `orderby`'s
//! column name); everything after an `--option` up to the next `--option`
//! (or end of string) is that option's value list.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionString {
    pub positional: Vec<String>,
    entries: Vec<(String, Vec<String>)>,
}

impl OptionString {
    pub fn parse(text: &str) -> Self {
        let mut positional = Vec::new();
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();

        for token in text.split_whitespace() {
            if let Some(name) = token.strip_prefix("--") {
                entries.push((name.to_string(), Vec::new()));
            } else if let Some((_, values)) = entries.last_mut() {
                values.push(token.to_string());
            } else {
                positional.push(token.to_string());
            }
        }

        Self { positional, entries }
    }

    /// First value of the first occurrence of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Whether `--name` appears at all, with or without values (e.g. the
    /// `--desc`/`--asc` flags on `orderby`).
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// All values across every occurrence of `name`, each further split on
    /// commas, matching `--exclude A,B` and repeated `--exclude A --exclude
    /// B` being equivalent per spec §4.3.
    pub fn get_all_comma_split(&self, name: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .flat_map(|(_, values)| values.iter())
            .flat_map(|v| v.split(','))
            .map(str::to_string)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// All `(key, value)` pairs for a repeatable `--inline K=expr` style
    /// option, where each value is itself `K=expr`.
    pub fn get_all_key_value(&self, name: &str) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .flat_map(|(_, values)| values.iter())
            .filter_map(|raw| raw.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_before_first_option() {
        let opts = OptionString::parse("name --desc");
        assert_eq!(opts.positional, vec!["name".to_string()]);
        assert!(opts.has("desc"));
    }

    #[test]
    fn repeated_and_comma_separated_exclude_are_equivalent() {
        let repeated = OptionString::parse("--exclude Id --exclude CreatedAt");
        let comma = OptionString::parse("--exclude Id,CreatedAt");
        assert_eq!(
            repeated.get_all_comma_split("exclude"),
            comma.get_all_comma_split("exclude")
        );
    }

    #[test]
    fn single_option_value() {
        let opts = OptionString::parse("--param id");
        assert_eq!(opts.get("param"), Some("id"));
    }

    #[test]
    fn key_value_inline_option() {
        let opts = OptionString::parse("--exclude Id --inline Version=Version+1");
        assert_eq!(
            opts.get_all_key_value("inline"),
            vec![("Version".to_string(), "Version+1".to_string())]
        );
    }
}
