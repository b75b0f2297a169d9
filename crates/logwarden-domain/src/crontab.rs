//! Targeted patch of the system crontab's cron.daily entry
//!
//! The contract is narrow: find the one line that runs the daily anacron
//! trigger, replace the fields before its first tab, leave every other byte
//! alone.

use crate::error::{DomainError, Result};

/// Command fragment identifying the daily rotation trigger
pub const DAILY_TRIGGER: &str = "run-parts --report /etc/cron.daily";

/// Result of patching crontab content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrontabPatch {
    /// Full new crontab content
    pub content: String,

    /// The rewritten line, without its line ending
    pub line: String,

    /// 1-based line number of the rewritten line
    pub line_number: usize,

    /// How many lines ran the trigger (only the first is rewritten)
    pub matches: usize,
}

/// Whether a crontab line is an active entry running the daily trigger
///
/// Only lines whose text before the first tab is exactly the minute and hour
/// fields qualify.
fn is_daily_entry(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || !line.contains(DAILY_TRIGGER) {
        return false;
    }
    match line.split_once('\t') {
        Some((time, _)) => time.split_whitespace().count() == 2,
        None => false,
    }
}

/// Replace the minute/hour fields of the cron.daily entry with `pattern`
///
/// Line endings and all other lines are preserved byte for byte.
pub fn patch_daily_entry(content: &str, pattern: &str) -> Result<CrontabPatch> {
    let mut out = String::with_capacity(content.len() + pattern.len());
    let mut patched: Option<(String, usize)> = None;
    let mut matches = 0;

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let (line, ending) = match raw.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (raw, ""),
        };

        if !is_daily_entry(line) {
            out.push_str(raw);
            continue;
        }

        matches += 1;
        if patched.is_some() {
            out.push_str(raw);
            continue;
        }

        let (_, command) = line
            .split_once('\t')
            .ok_or_else(|| DomainError::CrontabEntryNotFound(DAILY_TRIGGER.to_string()))?;
        let new_line = format!("{}\t{}", pattern, command);
        out.push_str(&new_line);
        out.push_str(ending);
        patched = Some((new_line, idx + 1));
    }

    let (line, line_number) =
        patched.ok_or_else(|| DomainError::CrontabEntryNotFound(DAILY_TRIGGER.to_string()))?;

    Ok(CrontabPatch {
        content: out,
        line,
        line_number,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crontab(daily_fields: &str) -> String {
        format!(
            "\n# some comment\n\
             17 *\t* * * root cd / && run-parts --report /etc/cron.hourly\n\
             {}\t* * root test -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.daily )\n\
             47 6\t* * 7 root test -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.weekly )\n\
             52 6\t1 * * root test -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.monthly )\n\
             #\n",
            daily_fields
        )
    }

    #[test]
    fn test_write_patterns() {
        for pattern in ["00 08", "25 6", "00~50 06~07"] {
            let patch = patch_daily_entry(&crontab("25 6"), pattern).unwrap();
            assert_eq!(patch.content, crontab(pattern));
            assert_eq!(patch.line_number, 4);
            assert_eq!(patch.matches, 1);
            assert_eq!(patch.line.split('\t').next(), Some(pattern));
        }
    }

    #[test]
    fn test_only_daily_line_changes() {
        let before = crontab("25 6");
        let patch = patch_daily_entry(&before, "00~50 06~07").unwrap();

        let old: Vec<&str> = before.lines().collect();
        let new: Vec<&str> = patch.content.lines().collect();
        assert_eq!(old.len(), new.len());
        for (i, (a, b)) in old.iter().zip(&new).enumerate() {
            if i == 3 {
                assert_eq!(a.split_once('\t').unwrap().1, b.split_once('\t').unwrap().1);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_missing_entry() {
        let content = "# empty\n17 *\t* * * root cd / && run-parts --report /etc/cron.hourly\n";
        let err = patch_daily_entry(content, "00 08").unwrap_err();
        assert!(matches!(err, DomainError::CrontabEntryNotFound(_)));
    }

    #[test]
    fn test_commented_entry_ignored() {
        let content = "#25 6\t* * root test -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.daily )\n";
        assert!(patch_daily_entry(content, "00 08").is_err());
    }

    #[test]
    fn test_entry_needs_exactly_minute_and_hour_before_tab() {
        for prefix in ["25 6 * *", "25", "@daily", ""] {
            let content = format!(
                "{}\t* root test -x /usr/sbin/anacron || ( cd / && run-parts --report /etc/cron.daily )\n",
                prefix
            );
            let err = patch_daily_entry(&content, "00 08").unwrap_err();
            assert!(matches!(err, DomainError::CrontabEntryNotFound(_)), "prefix {:?}", prefix);
        }
    }

    #[test]
    fn test_malformed_entry_skipped_for_valid_one() {
        let content = "25 6 * *\t* root run-parts --report /etc/cron.daily\n25 6\t* * root run-parts --report /etc/cron.daily\n";
        let patch = patch_daily_entry(content, "00 08").unwrap();
        assert_eq!(patch.line_number, 2);
        assert_eq!(patch.matches, 1);
    }

    #[test]
    fn test_no_trailing_newline_preserved() {
        let content = "25 6\t* * root run-parts --report /etc/cron.daily";
        let patch = patch_daily_entry(content, "00 08").unwrap();
        assert_eq!(patch.content, "00 08\t* * root run-parts --report /etc/cron.daily");
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        let content = "# c\r\n25 6\t* * root run-parts --report /etc/cron.daily\r\n";
        let patch = patch_daily_entry(content, "00 08").unwrap();
        assert_eq!(patch.content, "# c\r\n00 08\t* * root run-parts --report /etc/cron.daily\r\n");
    }

    #[test]
    fn test_first_of_several_matches() {
        let line = "25 6\t* * root run-parts --report /etc/cron.daily\n";
        let content = format!("{}{}", line, line);
        let patch = patch_daily_entry(&content, "00 08").unwrap();
        assert_eq!(patch.matches, 2);
        assert_eq!(
            patch.content,
            format!("00 08\t* * root run-parts --report /etc/cron.daily\n{}", line)
        );
    }
}
