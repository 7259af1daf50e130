//! Form input validation: target URL and optional custom alias.

// ── Types ──────────────────────────────────────────────────────────────────

/// A single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AliasInvalidCharacters,
    AliasReserved,
    AliasTooShort,
    TargetEmpty,
    TargetNotUrl,
}

/// The form input an error refers to, so a view can highlight it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Target,
    Alias,
}

impl ErrorKind {
    /// Fixed user-visible message.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::TargetNotUrl => "Please provide a valid http or https URL to shorten.",
            ErrorKind::TargetEmpty => "Please provide a URL to shorten",
            ErrorKind::AliasInvalidCharacters => {
                "Only a-z, A-Z, 0-9 and - are accepted for custom short links."
            }
            ErrorKind::AliasReserved => "You cannot use that short link, it is in use.",
            ErrorKind::AliasTooShort => "Custom short links must be longer than 3 characters.",
        }
    }

    pub fn field(self) -> Field {
        match self {
            ErrorKind::TargetEmpty | ErrorKind::TargetNotUrl => Field::Target,
            _ => Field::Alias,
        }
    }
}

// ── Rules ──────────────────────────────────────────────────────────────────

/// Custom aliases may not start with any of these; they collide with files
/// served from the site root.
pub const RESERVED_ALIASES: &[&str] = &[
    "index.html",
    "js",
    "style",
    "about.html",
    "api.html",
    "stats.html",
    "data",
    "favicon",
    "robots",
];

pub const MIN_ALIAS_LEN: usize = 3;

type AliasRule = (ErrorKind, fn(&str) -> bool);

/// Checked in order; the first rule that fires is the only alias error.
const ALIAS_RULES: &[AliasRule] = &[
    (ErrorKind::AliasInvalidCharacters, has_invalid_characters),
    (ErrorKind::AliasReserved, is_reserved),
    (ErrorKind::AliasTooShort, is_too_short),
];

fn has_invalid_characters(alias: &str) -> bool {
    !alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.iter().any(|name| alias.starts_with(name))
}

fn is_too_short(alias: &str) -> bool {
    alias.chars().count() < MIN_ALIAS_LEN
}

// ── Public API ─────────────────────────────────────────────────────────────

/// Validate a (normalized) target URL and an optional custom alias.
///
/// An empty `alias` means no custom alias was requested. The result holds at
/// most one alias error followed by at most one target error; an empty
/// vector means the input is acceptable.
pub fn validate(target: &str, alias: &str) -> Vec<ErrorKind> {
    let mut errors = Vec::with_capacity(2);

    if !alias.is_empty() {
        if let Some((kind, _)) = ALIAS_RULES.iter().find(|(_, fires)| fires(alias)) {
            errors.push(*kind);
        }
    }

    let without_scheme = target.strip_prefix("http://").unwrap_or(target);
    if target.is_empty() || without_scheme.chars().count() <= 1 {
        errors.push(ErrorKind::TargetEmpty);
    } else if !(target.starts_with("http://") || target.starts_with("https://")) {
        errors.push(ErrorKind::TargetNotUrl);
    }

    errors
}

/// Prefix `http://` onto raw input that does not already start with `http`.
pub fn normalize_target(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http") {
        raw.to_owned()
    } else {
        format!("http://{raw}")
    }
}
