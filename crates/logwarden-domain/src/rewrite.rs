//! Stanza rewriting
//!
//! Applies a retention policy and optional per-path override to every stanza
//! of a logrotate file and re-serializes it with canonical spacing:
//! one leading blank line, one blank line between stanzas, one trailing
//! newline. Running the rewrite on its own output with the same inputs
//! yields the same bytes. Once an override's period is in place, the count
//! written by the first pass is kept (see [`keeps_existing_count`]).

use crate::error::{DomainError, Result};
use crate::interval::{calculate_count, Interval};
use crate::overrides::{EffectivePolicy, OverrideSet, Period};
use crate::stanza::{directive, indent, is_script_start, parse_stanzas, Stanza};

/// One indentation level for inserted lines
const INDENT_STEP: &str = "  ";

/// Indentation used when a stanza body has no lines to copy it from
const DEFAULT_INDENT: &str = "  ";

/// Rewrite the content of one logrotate file
///
/// `path` is the location of the file and selects the override rule.
/// The rewrite is all-or-nothing: any stanza failing to parse or lacking an
/// interval (without an explicit rotate override) fails the whole file.
pub fn rewrite(
    raw_content: &str,
    path: &str,
    retention_days: u32,
    overrides: &OverrideSet,
) -> Result<String> {
    let stanzas = parse_stanzas(raw_content)?;
    let policy = overrides.resolve(path);

    let blocks = stanzas
        .iter()
        .map(|stanza| rewrite_stanza(stanza, retention_days, policy.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(assemble(&blocks))
}

fn assemble(blocks: &[String]) -> String {
    if blocks.is_empty() {
        return "\n".to_string();
    }
    let mut out = String::from("\n");
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    out
}

/// Rewrite a single stanza into its output text (no trailing newline)
pub fn rewrite_stanza(
    stanza: &Stanza,
    retention_days: u32,
    policy: Option<&EffectivePolicy>,
) -> Result<String> {
    // Count always comes from the original interval, never the override's.
    let rotate = match policy.and_then(|p| p.rotate) {
        Some(count) => count,
        None if keeps_existing_count(stanza, policy) => {
            existing_rotate(stanza).ok_or(DomainError::UnrecognizedInterval)?
        }
        None => calculate_count(&stanza.text(), retention_days)?,
    };

    let period = policy
        .and_then(EffectivePolicy::period)
        .or_else(|| stanza.interval().map(Period::Interval));

    let mut body: Vec<String> = Vec::with_capacity(stanza.body.len() + 1);
    let mut in_script = false;
    let mut saw_rotate = false;
    let mut period_written = false;
    let mut endscript_indent: Option<&str> = None;

    for line in &stanza.body {
        let key = directive(line);

        if key == "rotate" {
            body.push(format!("{}rotate {}", indent(line), rotate));
            saw_rotate = true;
            continue;
        }

        if in_script {
            if key == "endscript" {
                in_script = false;
                endscript_indent = Some(indent(line));
            }
            body.push(line.clone());
            continue;
        }

        if is_script_start(key) {
            in_script = true;
            body.push(line.clone());
            continue;
        }

        if is_period_key(key) {
            match &period {
                Some(period) if !period_written => {
                    body.push(format!("{}{}", indent(line), period.directive()));
                    period_written = true;
                }
                Some(_) => {}
                None => body.push(line.clone()),
            }
            continue;
        }

        body.push(line.clone());
    }

    let body_indent = stanza
        .body
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| indent(line))
        .unwrap_or(DEFAULT_INDENT);

    if let Some(period) = period.filter(|_| !period_written) {
        body.push(format!("{}{}", body_indent, period.directive()));
    }

    if !saw_rotate {
        let line = match endscript_indent {
            Some(end) => format!("{}{}rotate {}", end, INDENT_STEP, rotate),
            None => format!("{}rotate {}", body_indent, rotate),
        };
        body.push(line);
    }

    let mut lines: Vec<&str> = stanza.header.iter().map(String::as_str).collect();
    lines.extend(body.iter().map(String::as_str));
    lines.push(&stanza.footer);
    Ok(lines.join("\n"))
}

/// Whether the stanza's current `rotate` value is kept as is
///
/// True when the override (without an explicit count) has already put its
/// period in place on a prior pass: the original interval the count was
/// computed from is gone, so the written count is kept. Retention changes
/// do not reach such a stanza until the override is removed or given a
/// `rotate`.
pub fn keeps_existing_count(stanza: &Stanza, policy: Option<&EffectivePolicy>) -> bool {
    let Some(policy) = policy else {
        return false;
    };
    if policy.rotate.is_some() || existing_rotate(stanza).is_none() {
        return false;
    }
    match policy.period() {
        Some(Period::Size(_)) => stanza.interval().is_none(),
        Some(Period::Interval(interval)) => stanza.interval() == Some(interval),
        None => false,
    }
}

/// Value of the first parsable `rotate` line
fn existing_rotate(stanza: &Stanza) -> Option<u32> {
    stanza.body.iter().find_map(|line| {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some("rotate"), Some(value)) => value.parse().ok(),
            _ => None,
        }
    })
}

fn is_period_key(key: &str) -> bool {
    key == "size" || Interval::parse(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::OverrideRule;
    use proptest::prelude::*;

    const APT: &str = "/etc/logrotate.d/apt";

    fn no_overrides() -> OverrideSet {
        OverrideSet::default()
    }

    #[test]
    fn test_modify_content() {
        let contents = "/log/some.log {\n  rotate 123\n  daily\n}\n/log/other.log {\n  rotate 456\n  weekly\n}";
        let out = rewrite(contents, "/var/log/myrandom", 42, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/log/some.log {\n  rotate 42\n  daily\n}\n\n/log/other.log {\n  rotate 6\n  weekly\n}\n"
        );
    }

    #[test]
    fn test_empty_line_additions() {
        let contents = "\n\n\n\n\n/var/log/apt/history.log {\n  rotate 123\n  daily\n}\n\n\n\n\n/var/log/apt/term.log {\n  rotate 456\n  weekly\n}\n";
        let out = rewrite(contents, APT, 42, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/var/log/apt/history.log {\n  rotate 42\n  daily\n}\n\n/var/log/apt/term.log {\n  rotate 6\n  weekly\n}\n"
        );
    }

    #[test]
    fn test_postrotate_substitutes_in_place() {
        let contents = "/var/log/apt/history.log {\n  postrotate\n    /bin/script\n  endscript\n  rotate 123\n  daily\n}\n";
        let out = rewrite(contents, APT, 42, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/var/log/apt/history.log {\n  postrotate\n    /bin/script\n  endscript\n  rotate 42\n  daily\n}\n"
        );
    }

    #[test]
    fn test_postrotate_appends_deeper() {
        let contents = "/var/log/apt/history.log {\n  daily\n  postrotate\n    /bin/script\n  endscript\n}\n";
        let out = rewrite(contents, APT, 42, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/var/log/apt/history.log {\n  daily\n  postrotate\n    /bin/script\n  endscript\n    rotate 42\n}\n"
        );
    }

    #[test]
    fn test_postrotate_without_interval_fails() {
        let contents = "/var/log/apt/history.log {\n  postrotate\n    /bin/script\n  endscript\n}\n";
        let err = rewrite(contents, APT, 42, &no_overrides()).unwrap_err();
        assert_eq!(err, DomainError::UnrecognizedInterval);
    }

    #[test]
    fn test_rotate_inserted_without_script_block() {
        let contents = "/var/log/x.log {\n    weekly\n    compress\n}";
        let out = rewrite(contents, "/etc/logrotate.d/x", 28, &no_overrides()).unwrap();
        assert_eq!(out, "\n/var/log/x.log {\n    weekly\n    compress\n    rotate 4\n}\n");
    }

    #[test]
    fn test_zero_count_emitted_verbatim() {
        let contents = "/var/log/x.log {\n  rotate 12\n  yearly\n}";
        let out = rewrite(contents, "/etc/logrotate.d/x", 30, &no_overrides()).unwrap();
        assert_eq!(out, "\n/var/log/x.log {\n  rotate 0\n  yearly\n}\n");
    }

    #[test]
    fn test_other_directives_untouched() {
        let contents = "/var/log/x.log {\n  daily\n  missingok\n  maxsize 10M\n  rotate 3\n  compress\n  create 0640 root adm\n}";
        let out = rewrite(contents, "/etc/logrotate.d/x", 7, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/var/log/x.log {\n  daily\n  missingok\n  maxsize 10M\n  rotate 7\n  compress\n  create 0640 root adm\n}\n"
        );
    }

    #[test]
    fn test_comments_between_stanzas_dropped() {
        let contents = "# Configuration file maintained by Juju. Local changes may be overwritten\n/log/a {\n  daily\n  rotate 1\n}\n# aside\n/log/b {\n  daily\n  rotate 1\n}\n";
        let out = rewrite(contents, "/etc/logrotate.d/x", 3, &no_overrides()).unwrap();
        assert_eq!(
            out,
            "\n/log/a {\n  daily\n  rotate 3\n}\n\n/log/b {\n  daily\n  rotate 3\n}\n"
        );
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(rewrite("", APT, 30, &no_overrides()).unwrap(), "\n");
    }

    fn two_daily() -> &'static str {
        "/var/log/apt/history.log {\n  rotate 12\n  daily\n}\n/var/log/apt/term.log {\n  rotate 12\n  daily\n}"
    }

    fn expected(rotate: u32, period: &str) -> String {
        format!(
            "\n/var/log/apt/history.log {{\n  rotate {rotate}\n  {period}\n}}\n\n/var/log/apt/term.log {{\n  rotate {rotate}\n  {period}\n}}\n"
        )
    }

    fn overrides(rule: OverrideRule) -> OverrideSet {
        OverrideSet::new(vec![rule])
    }

    #[test]
    fn test_override_for_other_path_ignored() {
        let set = overrides(OverrideRule::new("/etc/logrotate.d/rsyslog").with_rotate(5));
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(12, "daily"));
    }

    #[test]
    fn test_override_rotate() {
        let set = overrides(OverrideRule::new(APT).with_rotate(5));
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(5, "daily"));
    }

    #[test]
    fn test_override_interval_keeps_computed_count() {
        let set = overrides(OverrideRule::new(APT).with_interval(Interval::Monthly));
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(12, "monthly"));
    }

    #[test]
    fn test_override_rotate_and_interval() {
        let set = overrides(
            OverrideRule::new(APT)
                .with_rotate(5)
                .with_interval(Interval::Monthly),
        );
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(5, "monthly"));
    }

    #[test]
    fn test_override_size() {
        let set = overrides(OverrideRule::new(APT).with_rotate(5).with_size("100"));
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(5, "size 100"));
    }

    #[test]
    fn test_override_size_beats_interval() {
        let set = overrides(
            OverrideRule::new(APT)
                .with_rotate(5)
                .with_interval(Interval::Monthly)
                .with_size("1G"),
        );
        assert_eq!(rewrite(two_daily(), APT, 12, &set).unwrap(), expected(5, "size 1G"));
    }

    #[test]
    fn test_override_size_replaces_existing_size_and_interval() {
        let contents = "/var/log/x.log {\n  size 10M\n  daily\n  rotate 2\n}";
        let set = overrides(OverrideRule::new("/etc/logrotate.d/x").with_size("1G"));
        let out = rewrite(contents, "/etc/logrotate.d/x", 14, &set).unwrap();
        assert_eq!(out, "\n/var/log/x.log {\n  size 1G\n  rotate 14\n}\n");
    }

    #[test]
    fn test_explicit_rotate_without_interval() {
        let contents = "/var/log/x.log {\n  size 10M\n}";
        let set = overrides(OverrideRule::new("/etc/logrotate.d/x").with_rotate(3));
        let out = rewrite(contents, "/etc/logrotate.d/x", 14, &set).unwrap();
        assert_eq!(out, "\n/var/log/x.log {\n  size 10M\n  rotate 3\n}\n");
    }

    #[test]
    fn test_size_override_keeps_prior_count_on_second_pass() {
        let set = overrides(OverrideRule::new(APT).with_size("1G"));
        let once = rewrite(two_daily(), APT, 12, &set).unwrap();
        assert_eq!(once, expected(12, "size 1G"));
        assert_eq!(rewrite(&once, APT, 12, &set).unwrap(), once);
    }

    #[test]
    fn test_interval_override_keeps_prior_count_on_second_pass() {
        let set = overrides(OverrideRule::new(APT).with_interval(Interval::Monthly));
        let once = rewrite(two_daily(), APT, 12, &set).unwrap();
        assert_eq!(once, expected(12, "monthly"));
        assert_eq!(rewrite(&once, APT, 12, &set).unwrap(), once);
    }

    #[test]
    fn test_kept_count_ignores_retention_change() {
        let set = overrides(OverrideRule::new(APT).with_size("1G"));
        let once = rewrite(two_daily(), APT, 12, &set).unwrap();
        assert_eq!(rewrite(&once, APT, 90, &set).unwrap(), once);
    }

    #[test]
    fn test_keeps_existing_count() {
        let stanzas = parse_stanzas("/a {\n  rotate 4\n  weekly\n}\n/b {\n  rotate 4\n  size 1G\n}\n").unwrap();
        let weekly = EffectivePolicy {
            interval: Some(Interval::Weekly),
            ..Default::default()
        };
        let daily = EffectivePolicy {
            interval: Some(Interval::Daily),
            ..Default::default()
        };
        let size = EffectivePolicy {
            size: Some("1G".to_string()),
            ..Default::default()
        };
        let explicit = EffectivePolicy {
            rotate: Some(2),
            size: Some("1G".to_string()),
            ..Default::default()
        };

        assert!(!keeps_existing_count(&stanzas[0], None));
        assert!(keeps_existing_count(&stanzas[0], Some(&weekly)));
        assert!(!keeps_existing_count(&stanzas[0], Some(&daily)));
        assert!(!keeps_existing_count(&stanzas[0], Some(&size)));
        assert!(keeps_existing_count(&stanzas[1], Some(&size)));
        assert!(!keeps_existing_count(&stanzas[1], Some(&explicit)));
    }

    #[test]
    fn test_size_without_override_or_interval_fails() {
        let contents = "/var/log/x.log {\n  rotate 2\n  size 10M\n}";
        let err = rewrite(contents, APT, 12, &no_overrides()).unwrap_err();
        assert_eq!(err, DomainError::UnrecognizedInterval);
    }

    #[test]
    fn test_rewrite_is_idempotent_with_overrides() {
        let set = overrides(OverrideRule::new(APT).with_rotate(5).with_size("1G"));
        let once = rewrite(two_daily(), APT, 12, &set).unwrap();
        assert_eq!(rewrite(&once, APT, 12, &set).unwrap(), once);
    }

    fn stanza_strategy() -> impl Strategy<Value = String> {
        (
            "[a-z]{1,8}",
            0usize..4,
            0u32..500,
            any::<bool>(),
        )
            .prop_map(|(name, idx, rotate, script)| {
                let mut s = format!("/var/log/{}.log {{\n  rotate {}\n  {}\n", name, rotate, Interval::ALL[idx]);
                if script {
                    s.push_str("  postrotate\n    /usr/lib/rsyslog/rsyslog-rotate\n  endscript\n");
                }
                s.push('}');
                s
            })
    }

    proptest! {
        #[test]
        fn rewrite_is_idempotent(
            stanzas in prop::collection::vec(stanza_strategy(), 1..5),
            gaps in prop::collection::vec(0usize..4, 5),
            retention in 0u32..1000,
        ) {
            let mut input = String::new();
            for (i, stanza) in stanzas.iter().enumerate() {
                input.push_str(&"\n".repeat(gaps[i]));
                input.push_str(stanza);
                input.push('\n');
            }
            let once = rewrite(&input, APT, retention, &OverrideSet::default()).unwrap();
            let twice = rewrite(&once, APT, retention, &OverrideSet::default()).unwrap();
            prop_assert_eq!(&once, &twice);
        }

        #[test]
        fn spacing_is_canonical(
            stanzas in prop::collection::vec(stanza_strategy(), 1..5),
            gaps in prop::collection::vec(0usize..6, 5),
        ) {
            let mut input = String::new();
            for (i, stanza) in stanzas.iter().enumerate() {
                input.push_str(&"\n".repeat(gaps[i]));
                input.push_str(stanza);
                input.push('\n');
            }
            let out = rewrite(&input, APT, 90, &OverrideSet::default()).unwrap();
            prop_assert!(out.starts_with("\n/"));
            prop_assert!(out.ends_with("}\n"), "output must end with a closing brace line");
            prop_assert!(!out.ends_with("\n\n"));
            prop_assert!(!out.contains("\n\n\n"));
            prop_assert_eq!(out.matches("}\n\n/").count(), stanzas.len() - 1);
        }
    }
}
