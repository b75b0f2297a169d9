//! Stanza scanner
//!
//! Splits logrotate file content into brace-delimited stanzas with a single
//! pass over the lines. Scanner states:
//!
//! | State | Leaves on |
//! |-------|-----------|
//! | `OutsideStanza` | first non-blank, non-comment line |
//! | `InStanzaHeader` | line holding `{` |
//! | `InBody` | `}` line (back outside) or script keyword |
//! | `InPostrotate` | `endscript` |
//!
//! Braces inside script blocks are shell text and are not counted.

use crate::error::{DomainError, Result};
use crate::interval::{find_interval, Interval};

/// Directives that open a script block closed by `endscript`
pub const SCRIPT_KEYWORDS: [&str; 5] = [
    "prerotate",
    "postrotate",
    "firstaction",
    "lastaction",
    "preremove",
];

/// First whitespace-separated token of a line, or `""`
pub(crate) fn directive(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

pub(crate) fn is_script_start(key: &str) -> bool {
    SCRIPT_KEYWORDS.contains(&key)
}

/// Leading whitespace of a line
pub(crate) fn indent(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// One brace-delimited logrotate block, kept line by line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    /// Lines up to and including the one holding `{`
    pub header: Vec<String>,

    /// Lines between the braces
    pub body: Vec<String>,

    /// The closing `}` line, verbatim
    pub footer: String,

    /// 1-based line number of the first header line
    pub first_line: usize,
}

impl Stanza {
    /// Path globs named before the opening brace
    pub fn paths(&self) -> Vec<&str> {
        self.header
            .iter()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(|line| line.split('{').next().unwrap_or("").split_whitespace())
            .collect()
    }

    /// Original text of the stanza
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = self.header.iter().map(String::as_str).collect();
        lines.extend(self.body.iter().map(String::as_str));
        lines.push(&self.footer);
        lines.join("\n")
    }

    /// Interval directive of the body, if any
    pub fn interval(&self) -> Option<Interval> {
        find_interval(&self.body.join("\n"))
    }

    /// Whether the body holds a script block
    pub fn has_script_block(&self) -> bool {
        self.body.iter().any(|line| is_script_start(directive(line)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideStanza,
    InStanzaHeader,
    InBody,
    InPostrotate,
}

/// Split file content into stanzas
///
/// Blank lines and comments outside any stanza are dropped. Fails with
/// [`DomainError::MalformedStanza`] on unbalanced braces, a nested block, or
/// content sharing a line with a brace.
pub fn parse_stanzas(content: &str) -> Result<Vec<Stanza>> {
    let mut stanzas = Vec::new();
    let mut state = ScanState::OutsideStanza;
    let mut header: Vec<String> = Vec::new();
    let mut body: Vec<String> = Vec::new();
    let mut first_line = 0;
    let mut last_line = 0;

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        last_line = lineno;
        let trimmed = line.trim();

        match state {
            ScanState::OutsideStanza => {
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                if trimmed.contains('}') {
                    return Err(DomainError::malformed(
                        lineno,
                        "closing brace without an open stanza",
                    ));
                }
                first_line = lineno;
                header.push(line.to_string());
                state = if opens_block(line, lineno)? {
                    ScanState::InBody
                } else {
                    ScanState::InStanzaHeader
                };
            }
            ScanState::InStanzaHeader => {
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.contains('}') {
                    return Err(DomainError::malformed(
                        lineno,
                        "closing brace before opening brace",
                    ));
                }
                header.push(line.to_string());
                if opens_block(line, lineno)? {
                    state = ScanState::InBody;
                }
            }
            ScanState::InBody => {
                if trimmed == "}" {
                    stanzas.push(Stanza {
                        header: std::mem::take(&mut header),
                        body: std::mem::take(&mut body),
                        footer: line.to_string(),
                        first_line,
                    });
                    state = ScanState::OutsideStanza;
                    continue;
                }
                if trimmed.contains('{') {
                    return Err(DomainError::malformed(lineno, "nested opening brace"));
                }
                if trimmed.contains('}') {
                    return Err(DomainError::malformed(
                        lineno,
                        "closing brace must be on its own line",
                    ));
                }
                if is_script_start(directive(trimmed)) {
                    state = ScanState::InPostrotate;
                }
                body.push(line.to_string());
            }
            ScanState::InPostrotate => {
                if directive(trimmed) == "endscript" {
                    state = ScanState::InBody;
                }
                body.push(line.to_string());
            }
        }
    }

    match state {
        ScanState::OutsideStanza => Ok(stanzas),
        ScanState::InStanzaHeader => Err(DomainError::malformed(
            last_line,
            "missing opening brace",
        )),
        ScanState::InBody => Err(DomainError::malformed(last_line, "missing closing brace")),
        ScanState::InPostrotate => Err(DomainError::malformed(
            last_line,
            "script block without endscript",
        )),
    }
}

/// Whether a header line opens the block; text after `{` is rejected
fn opens_block(line: &str, lineno: usize) -> Result<bool> {
    match line.split_once('{') {
        None => Ok(false),
        Some((_, rest)) if rest.trim().is_empty() => Ok(true),
        Some(_) => Err(DomainError::malformed(
            lineno,
            "unexpected content after opening brace",
        )),
    }
}
