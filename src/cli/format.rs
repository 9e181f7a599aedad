//! Output formatting for CLI display.

use crate::format::{format_position, strip_codes};
use crate::lang::Locale;
use crate::model::Warp;

/// One line per warp for `list`: 1-based index, name, position, creator.
pub(super) fn format_warp_row(index: usize, warp: &Warp, locale: Locale) -> String {
    let pos = strip_codes(&format_position(&warp.pos, locale));
    format!("{:>3}. {}  [{pos}]  by {}", index + 1, warp.name, warp.player.name)
}

/// Indents every line after the first, so multi-line labels line up under a number.
pub(super) fn indent_continuation(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines().collect::<Vec<_>>().join(&format!("\n{pad}"))
}
