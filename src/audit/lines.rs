//! Configuration line normalisation.

const COMMAND_VERBS: &[&str] = &["set", "activate", "deactivate", "delete"];

/// True if a trimmed line is `<verb> <rest>` with a recognised verb.
pub fn is_command_line(line: &str) -> bool {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => COMMAND_VERBS.contains(&verb) && !rest.trim().is_empty(),
        None => false,
    }
}

/// Trim every line and keep only command lines, in their original order.
pub fn config_lines<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|line| {
            let line: &str = line.as_ref();
            line.trim()
        })
        .filter(|line| is_command_line(line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_filter() {
        assert!(is_command_line("set system host-name sw1"));
        assert!(is_command_line("deactivate interfaces ge-0/0/1"));
        assert!(is_command_line("delete\tsnmp community public"));
        assert!(!is_command_line("set"));
        assert!(!is_command_line("set   "));
        assert!(!is_command_line("settings foo"));
        assert!(!is_command_line("## Last commit: 2024-05-01 10:00:00 UTC by admin"));
        assert!(!is_command_line("version 20.4R3.8;"));
    }

    #[test]
    fn test_config_lines_trims_and_filters() {
        let raw = [
            "## Last changed: 2024-05-01",
            "   set system host-name sw1   ",
            "",
            "interfaces {",
            "activate system syslog",
        ];

        assert_eq!(
            config_lines(&raw),
            vec!["set system host-name sw1".to_string(), "activate system syslog".to_string()]
        );
    }
}
