//! Parser for the Graph API "invalid fields" error message.
//!
//! The API reports rejected field names inside a natural-language message:
//! `Fields foo, bar are not valid for fields param.` The shape is fixed for
//! the pinned API version; a message that deviates is handed back unparsed
//! rather than guessed at, since the wording is not contractual and may
//! change upstream.

/// Leading text before the rejected field list.
const PREFIX: &str = "Fields ";
/// Literal terminator after the rejected field list.
const SUFFIX: &str = " are not valid for fields param.";
const SEPARATOR: &str = ", ";

/// Extracts the rejected field names, or `None` when the message does not
/// match the expected shape.
pub fn parse_rejected_fields(message: &str) -> Option<Vec<String>> {
    let body = message.strip_prefix(PREFIX)?;
    let end = body.find(SUFFIX)?;
    let names: Vec<String> = body[..end]
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
