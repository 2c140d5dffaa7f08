/// Charset labels that denote an ASCII-compatible or UTF-8 byte interpretation.
///
/// Generators disagree on how to spell "plain ASCII/UTF-8", so every
/// registered alias is accepted. Compared ASCII case-insensitively.
const CHARSET_ALIASES: &[&str] = &[
    "iso-ir-6",
    "ANSI_X3.4-1968",
    "ANSI_X3.4-1986",
    "ISO_646.irv:1991",
    "ISO646-US",
    "US-ASCII",
    "us",
    "IBM367",
    "cp367",
    "csASCII",
    "ascii",
    "UTF-8",
    "utf8",
    "csUTF8",
    "csUTF-8",
];

/// Checks whether a charset token declared in a data url can be read as UTF-8.
///
/// ```
/// assert!(smaplink::is_acceptable_charset("utf-8"));
/// assert!(!smaplink::is_acceptable_charset("latin1"));
/// ```
pub fn is_acceptable_charset(token: &str) -> bool {
    CHARSET_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(token))
}
