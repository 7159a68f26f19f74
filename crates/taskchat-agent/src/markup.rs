// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markup stripping for chat message bodies.

use std::sync::LazyLock;

use regex::Regex;

/// Any tag-like substring, shortest match, single line.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Removes tag-like substrings, then decodes HTML character entities.
///
/// Tags are not parsed: nesting, attributes containing `>` and unterminated
/// tags produce imperfect text, never a panic. Entities need their closing
/// `;` to decode, numeric references map straight to their code point, and
/// references to NUL or other C0 controls are kept as written.
pub fn strip_markup(raw: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(raw, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}
