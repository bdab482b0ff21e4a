//! Host-to-Python literal token translation
//!
//! Test-case inputs are authored in JSON-flavoured literal syntax, so
//! boolean and null tokens arrive as `true`/`false`/`null`. Python wants
//! `True`/`False`/`None`. The translator rewrites those tokens in
//! `key: value` and `, value` positions, plus bare `null` anywhere, with
//! word-boundary matching so identifiers that merely contain the token
//! text (`trueness`, `nullable`) are left alone.
//!
//! The transform is idempotent: the replacements produce capitalized
//! tokens that no pattern matches again, so downstream paths may apply
//! it to overlapping text more than once.

use regex::{Captures, Regex};

/// Rewrites host literal tokens into Python literal tokens.
pub struct LiteralTranslator {
    /// `true`/`false`/`null` directly after a `:` or `,` separator.
    after_separator: Regex,
    /// Bare `null` in any remaining position.
    bare_null: Regex,
}

impl Default for LiteralTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralTranslator {
    pub fn new() -> Self {
        Self {
            after_separator: Regex::new(r"([:,]\s*)(true|false|null)\b")
                .expect("hard-coded pattern"),
            bare_null: Regex::new(r"\bnull\b").expect("hard-coded pattern"),
        }
    }

    /// Translate all host literal tokens in `input`.
    pub fn translate(&self, input: &str) -> String {
        let pass = self
            .after_separator
            .replace_all(input, |caps: &Captures<'_>| {
                let python = match &caps[2] {
                    "true" => "True",
                    "false" => "False",
                    _ => "None",
                };
                format!("{}{}", &caps[1], python)
            });
        self.bare_null.replace_all(&pass, "None").into_owned()
    }
}
