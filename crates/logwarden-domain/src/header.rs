//! Managed-file banner

/// Banner written at the top of every rewritten logrotate file
pub const DEFAULT_BANNER: &str =
    "# Configuration file maintained by logwarden. Local changes may be overwritten";

/// Prefix shared by current and older banner versions
pub const BANNER_PREFIX: &str = "# Configuration file maintained by";

/// Ensure exactly one banner line precedes `content`
///
/// Leading banner lines (this banner, or any older one starting with
/// [`BANNER_PREFIX`]) and the blank lines around them are stripped before the
/// banner is prepended. The remaining body is kept byte for byte.
pub fn ensure_header(content: &str, banner: &str) -> String {
    let mut rest = content;
    while !rest.is_empty() {
        let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
        let is_banner = line == banner || line.starts_with(BANNER_PREFIX);
        if is_banner || line.trim().is_empty() {
            rest = tail;
        } else {
            break;
        }
    }
    format!("{}\n{}", banner, rest)
}
