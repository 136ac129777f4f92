//! Commit message templates
//!
//! A template is literal text with two kinds of placeholders:
//!
//! - `{message}`, replaced by the trimmed message body
//! - `{bN}`, replaced by the N-th branch part (1-based)
//!
//! Wrapping `{bN}` in extra brace pairs (`{{bN}}`, `{{{bN}}}`) keeps exactly one
//! literal pair around the substituted value.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::branch_naming::BranchParts;
use crate::config::MessageConfig;

/// Placeholder replaced by the message body
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

static BRANCH_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\{+)b(\d+)(\}+)").expect("branch placeholder pattern is valid")
});

/// Fill a template with branch parts and a message body
///
/// Placeholders pointing past the available parts stay in the output as
/// written. Brace runs of unequal length around `bN` are plain text.
pub fn fill(template: &str, parts: &BranchParts, message: &str) -> String {
    let with_message = template.replace(MESSAGE_PLACEHOLDER, message.trim());

    BRANCH_PLACEHOLDER
        .replace_all(&with_message, |caps: &Captures| {
            let open = caps[1].len();
            let close = caps[3].len();
            if open != close {
                return caps[0].to_string();
            }

            let digits = &caps[2];
            let part = digits
                .parse::<usize>()
                .ok()
                .and_then(|n| parts.placeholder(n));

            match (open, part) {
                (1, Some(part)) => part.to_string(),
                (1, None) => caps[0].to_string(),
                (_, Some(part)) => format!("{{{}}}", part),
                (_, None) => format!("{{b{}}}", digits),
            }
        })
        .into_owned()
}

/// Check whether a message already carries the template's decoration
///
/// The template is split around its single `{message}` placeholder. The
/// trimmed message must start with the trimmed filled prefix and end with
/// the trimmed filled suffix. Templates with zero or several `{message}`
/// placeholders are never compatible.
pub fn is_compatible(template: &str, parts: &BranchParts, message: &str) -> bool {
    let mut pieces = template.split(MESSAGE_PLACEHOLDER);
    let (Some(prefix_template), Some(suffix_template), None) =
        (pieces.next(), pieces.next(), pieces.next())
    else {
        return false;
    };

    let prefix = fill(prefix_template, parts, "");
    let suffix = fill(suffix_template, parts, "");
    let trimmed = message.trim();

    trimmed.starts_with(prefix.trim()) && trimmed.ends_with(suffix.trim())
}

/// Produce the structured message for `message`
///
/// A compatible message comes back verbatim, whitespace included.
pub fn generate_message(config: &MessageConfig, parts: &BranchParts, message: &str) -> String {
    if is_compatible(&config.template, parts, message) {
        tracing::trace!("message already matches template");
        return message.to_string();
    }

    fill(&config.template, parts, message)
}
