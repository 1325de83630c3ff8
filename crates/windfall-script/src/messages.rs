//! Message templates and colour codes
//!
//! Templates use positional `{0}`, `{1}`... placeholders and `&` colour codes
//! (`&6`, `&l`, ...), translated to the `§` section sign the host renders.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Section sign used by the host for formatting codes
pub const SECTION_SIGN: char = '§';

const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Translate `&x` colour codes into `§x`
///
/// Only valid code characters are translated, so a literal `&` in text survives.
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if let Some(&next) = chars.peek() {
                if COLOR_CODES.contains(next) {
                    out.push(SECTION_SIGN);
                    out.push(next.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Remove `§x` formatting codes, leaving plain text
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == SECTION_SIGN {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("general.no_permission", "&cYou do not have permission to do that."),
    ("general.not_a_player", "&cYou must be a player to run this command."),
    ("general.invalid_usage", "&cUsage: {0}"),
    ("general.not_found", "&c{0} '{1}' does not exist!"),
    ("airdrop.spawned", "&aA &d{0} &aairdrop has been spawned!"),
    (
        "airdrop.announcement",
        "&6&lAirdrop &8> &fA {0} airdrop has landed near &eX: {1} Z: {2}",
    ),
    (
        "airdrop.teleport_click",
        "&c[STAFF] Click here to teleport to the airdrop!",
    ),
    ("airdrop.teleport_hover", "&dClick to teleport to the airdrop."),
    ("airdrop.failed", "&cFailed to find a valid airdrop location!"),
    ("event.start", "&e⚡ {0} has begun for {1}!"),
    ("event.success", "&aSuccessfully triggered event {0} for {1}."),
    ("event.everyone", "everyone"),
    ("chat.global", "&6&lGLOBAL &8> &f{0}"),
    ("chat.local", "&2&lLOCAL &8> &f{0}"),
    ("chat.staff", "&d[STAFF] {0}"),
    ("chat.civilisation", "&6[CIV] {0}"),
    ("chat.success", "&aYou have switched to &d{0} &achat."),
];

/// Message templates by dotted key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    templates: IndexMap<String, String>,
}

impl MessageTable {
    /// A table holding only the built-in defaults
    pub fn with_defaults() -> Self {
        let mut table = Self::default();
        table.fill_defaults();
        table
    }

    /// Insert built-in defaults for keys the table lacks
    ///
    /// Returns how many keys were added.
    pub fn fill_defaults(&mut self) -> usize {
        let mut added = 0;
        for (key, template) in DEFAULT_MESSAGES {
            if !self.templates.contains_key(*key) {
                self.templates.insert((*key).to_string(), (*template).to_string());
                added += 1;
            }
        }
        added
    }

    /// Set a template
    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Raw template for a key
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render a template with positional arguments and colour codes applied
    ///
    /// Unknown keys render as a visible `[Missing message: key]` marker.
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        let mut message = match self.templates.get(key) {
            Some(template) => template.clone(),
            None => format!("&c[Missing message: {}]", key),
        };
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), &arg.to_string());
        }
        colorize(&message)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if the table is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
