//! Positional classification of lines in a YAML scene document.
//!
//! Everything here is a pure function over the document's lines; no state,
//! no I/O. The scanning rules are deliberately simple: walk upward from the
//! cursor line and stop at the first blank line, so each classification is
//! bounded to the current list item's contiguous block.

use once_cell::sync::Lazy;
use regex::Regex;

/// The literal header that opens a components block.
pub const COMPONENTS_BLOCK_HEADER: &str = "components:";

/// The literal key prefix of a component list item, as typed before the name.
pub const COMPONENT_ITEM_PREFIX: &str = "- type:";

/// Matches a list item declaring a component: a dash, a space, the literal
/// `type:` key, and the component name. Unanchored, so the extra-indent
/// form `- - type:` matches too. The space after the dash is load-bearing:
/// without it a mapping key like `damage-type:` would pass for an item.
static COMPONENT_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"- type:\s*(\w+)").unwrap());

/// True if `line_number` sits inside a `components:` block.
///
/// Scans upward from the previous line; finding the block header wins,
/// hitting a blank line first loses. A single blank line therefore
/// delimits the block.
pub fn is_within_components_block(lines: &[String], line_number: usize) -> bool {
    for line in lines[..line_number.min(lines.len())].iter().rev() {
        let trimmed = line.trim();
        if trimmed == COMPONENTS_BLOCK_HEADER {
            return true;
        }
        if trimmed.is_empty() {
            break;
        }
    }
    false
}

/// True if `line_number` sits inside the field block of some component
/// list item. Same upward scan and blank-line cutoff as
/// [`is_within_components_block`], but the terminator we look for is the
/// item line itself (`- type: Name` or `- - type: Name`).
pub fn is_within_component_field_block(lines: &[String], line_number: usize) -> bool {
    for line in lines[..line_number.min(lines.len())].iter().rev() {
        let trimmed = line.trim();
        if COMPONENT_ITEM.is_match(trimmed) {
            return true;
        }
        if trimmed.is_empty() {
            break;
        }
    }
    false
}

/// The component name governing `line_number`: the name captured from the
/// nearest item line above it. Subject to the same blank-line cutoff as the
/// block predicates; returns `None` at the document start or when a blank
/// line intervenes.
pub fn governing_component_name(lines: &[String], line_number: usize) -> Option<String> {
    for line in lines[..line_number.min(lines.len())].iter().rev() {
        let trimmed = line.trim();
        if let Some(name) = component_name_on_line(trimmed) {
            return Some(name);
        }
        if trimmed.is_empty() {
            break;
        }
    }
    None
}

/// Extracts the component name declared on `line` itself, if any.
/// Used by hover and goto-definition, which act on the current line only.
pub fn component_name_on_line(line: &str) -> Option<String> {
    COMPONENT_ITEM
        .captures(line.trim())
        .map(|caps| caps[1].to_string())
}
