//! Static hostname override rules.
//!
//! A [`RuleTable`] maps hostnames to override targets (typically IP
//! literals). It is seeded once at startup from a rule string of the form
//! accepted by Chromium's `--host-resolver-rules` flag:
//!
//! ```text
//! MAP foo.com 1.1.1.1, bar.com 2.2.2.2
//! ```
//!
//! The leading `MAP ` on each entry is optional and fields may be separated
//! by arbitrary whitespace. After startup the table gains entries in exactly
//! one other way: the resolution engine records a hostname→IP mapping when
//! the fallback lookup discovers one.

use dashmap::DashMap;

/// The flag whose value carries the rule string on a process command line.
pub const HOST_RESOLVER_RULES_FLAG: &str = "--host-resolver-rules";

/// Concurrent hostname → override-target table.
///
/// Writes are single-entry inserts (bulk load at parse time, then at most
/// one discovery write per hostname), so no read-modify-write coordination
/// is needed beyond what [`DashMap`] provides.
#[derive(Debug, Default)]
pub struct RuleTable {
    entries: DashMap<String, String>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a comma-separated rule string.
    ///
    /// Each entry is `MAP <host> <ip>` (the `MAP ` prefix is optional).
    /// Malformed entries missing either token are silently skipped; an empty
    /// input yields an empty table. When the same hostname appears more than
    /// once, the last entry wins.
    pub fn parse(rules: &str) -> Self {
        let table = Self::new();
        for entry in rules.split(',') {
            let entry = entry.trim();
            let entry = entry.strip_prefix("MAP ").unwrap_or(entry);
            let mut fields = entry.split_whitespace();
            if let (Some(host), Some(target)) = (fields.next(), fields.next()) {
                table.entries.insert(host.to_string(), target.to_string());
            }
        }
        table
    }

    /// Returns the override target for `host`, if one is known.
    pub fn get(&self, host: &str) -> Option<String> {
        self.entries.get(host).map(|entry| entry.value().clone())
    }

    /// Records an override for `host`, replacing any previous entry.
    pub fn insert(&self, host: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(host.into(), target.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extracts the rule string from an argument sequence.
///
/// Scans for [`HOST_RESOLVER_RULES_FLAG`] and returns the argument that
/// follows it. Returns an empty string when the flag is absent or is the
/// final argument.
pub fn rules_from_args<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    args.iter()
        .position(|arg| arg == HOST_RESOLVER_RULES_FLAG)
        .and_then(|idx| args.get(idx + 1))
        .cloned()
        .unwrap_or_default()
}

/// Extracts the rule string from the current process's command line.
pub fn rules_from_process() -> String {
    rules_from_args(std::env::args())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_entries() {
        let table = RuleTable::parse("MAP foo.com 1.1.1.1, bar.com 2.2.2.2");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("foo.com").as_deref(), Some("1.1.1.1"));
        assert_eq!(table.get("bar.com").as_deref(), Some("2.2.2.2"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(RuleTable::parse("").is_empty());
    }

    #[test]
    fn test_parse_skips_malformed_entries() {
        // Entries missing a host or target token are dropped.
        let table = RuleTable::parse("MAP, onlyhost.com, MAP ok.com 3.3.3.3,");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ok.com").as_deref(), Some("3.3.3.3"));
    }

    #[test]
    fn test_parse_all_malformed_yields_empty() {
        assert!(RuleTable::parse("MAP, ,nospace").is_empty());
    }

    #[test]
    fn test_parse_map_prefix_optional() {
        let table = RuleTable::parse("plain.com 4.4.4.4");
        assert_eq!(table.get("plain.com").as_deref(), Some("4.4.4.4"));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let table = RuleTable::parse("MAP dup.com 1.1.1.1, MAP dup.com 2.2.2.2");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("dup.com").as_deref(), Some("2.2.2.2"));
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let table = RuleTable::parse("  MAP spaced.com   5.5.5.5  ,MAP tight.com 6.6.6.6");
        assert_eq!(table.get("spaced.com").as_deref(), Some("5.5.5.5"));
        assert_eq!(table.get("tight.com").as_deref(), Some("6.6.6.6"));
    }

    #[test]
    fn test_insert_and_get() {
        let table = RuleTable::new();
        assert_eq!(table.get("later.com"), None);
        table.insert("later.com", "7.7.7.7");
        assert_eq!(table.get("later.com").as_deref(), Some("7.7.7.7"));
    }

    #[test]
    fn test_rules_from_args_present() {
        let rules = rules_from_args(["app", "--host-resolver-rules", "MAP a.com 1.1.1.1"]);
        assert_eq!(rules, "MAP a.com 1.1.1.1");
    }

    #[test]
    fn test_rules_from_args_absent() {
        assert_eq!(rules_from_args(["app", "--verbose"]), "");
    }

    #[test]
    fn test_rules_from_args_flag_is_last() {
        assert_eq!(rules_from_args(["app", "--host-resolver-rules"]), "");
    }
}
