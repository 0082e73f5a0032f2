//! Client-side option validation.
//!
//! Identifiers are validated syntactically before they are placed into a URL
//! path or payload; a failure never reaches the transport. The accepted shape
//! is chosen per call site through [`IdPattern`], since identifier namespaces
//! differ between resource families (`env-…`, `ws-…`, bare system role names).
//!
//! # Example
//!
//! ```rust
//! use scalr_api::jsonapi::{is_valid_identifier, is_valid_name, IdPattern};
//!
//! assert!(is_valid_identifier("env-svrcnhs5", IdPattern::Prefixed("env")));
//! assert!(!is_valid_identifier("ws-svrcnhs5", IdPattern::Prefixed("env")));
//! assert!(is_valid_identifier("admin", IdPattern::Opaque));
//! assert!(!is_valid_identifier("", IdPattern::Opaque));
//!
//! assert!(is_valid_name("production"));
//! assert!(!is_valid_name("   "));
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::jsonapi::errors::ResourceError;

/// The accepted shape of an identifier at a given call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPattern {
    /// Any non-empty run of `[A-Za-z0-9._-]`.
    Opaque,
    /// A lower-case alphabetic namespace, a dash, and an alphanumeric suffix
    /// (`^[a-z]+-[A-Za-z0-9]+$`).
    Namespaced,
    /// [`Namespaced`](Self::Namespaced) with a fixed namespace, e.g. `"env"`.
    Prefixed(&'static str),
}

impl IdPattern {
    /// Returns `true` if `id` has this shape.
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Opaque => opaque_regex().is_match(id),
            Self::Namespaced => namespaced_regex().is_match(id),
            Self::Prefixed(prefix) => {
                namespaced_regex().is_match(id)
                    && id
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

fn opaque_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("static regex is valid"))
}

fn namespaced_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-z]+-[A-Za-z0-9]+$").expect("static regex is valid"))
}

/// Returns `true` if `id` is non-empty and matches `pattern`.
#[must_use]
pub fn is_valid_identifier(id: &str, pattern: IdPattern) -> bool {
    !id.is_empty() && pattern.matches(id)
}

/// Returns `true` if `name` contains at least one non-whitespace character.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Checks an identifier, returning [`ResourceError::InvalidIdentifier`] on failure.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidIdentifier`] naming `resource` and `field`.
pub fn validate_identifier(
    resource: &'static str,
    field: &'static str,
    id: &str,
    pattern: IdPattern,
) -> Result<(), ResourceError> {
    if is_valid_identifier(id, pattern) {
        Ok(())
    } else {
        Err(ResourceError::InvalidIdentifier {
            resource,
            field,
            value: id.to_string(),
        })
    }
}

/// Checks an optional identifier; `None` is accepted.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidIdentifier`] if the value is present and malformed.
pub fn validate_optional_identifier(
    resource: &'static str,
    field: &'static str,
    id: Option<&str>,
    pattern: IdPattern,
) -> Result<(), ResourceError> {
    id.map_or(Ok(()), |id| validate_identifier(resource, field, id, pattern))
}

/// Checks every identifier in a collection.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidIdentifier`] for the first malformed element.
pub fn validate_identifiers<S: AsRef<str>>(
    resource: &'static str,
    field: &'static str,
    ids: &[S],
    pattern: IdPattern,
) -> Result<(), ResourceError> {
    ids.iter()
        .try_for_each(|id| validate_identifier(resource, field, id.as_ref(), pattern))
}

/// Checks a human-supplied name.
///
/// # Errors
///
/// Returns [`ResourceError::Validation`] if the name is empty or whitespace.
pub fn validate_name(field: &str, name: &str) -> Result<(), ResourceError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ResourceError::validation(format!(
            "invalid value for {field}: must not be empty"
        )))
    }
}

/// Checks that a required option is present.
///
/// # Errors
///
/// Returns [`ResourceError::Validation`] if `value` is `None`.
pub fn require<'a, T: ?Sized>(field: &str, value: Option<&'a T>) -> Result<&'a T, ResourceError> {
    value.ok_or_else(|| ResourceError::validation(format!("{field} is required")))
}

/// Checks that a required collection has at least one element.
///
/// # Errors
///
/// Returns [`ResourceError::Validation`] if `values` is empty.
pub fn require_non_empty<T>(field: &str, values: &[T]) -> Result<(), ResourceError> {
    if values.is_empty() {
        Err(ResourceError::validation(format!(
            "at least one {field} must be provided"
        )))
    } else {
        Ok(())
    }
}

/// Checks that exactly one of several mutually exclusive options is set.
///
/// `fields` pairs each wire name with whether it is present.
///
/// # Errors
///
/// Returns [`ResourceError::Validation`] with
/// `"one of: a,b,c must be provided"` when none is set, or
/// `"only one of: a,b,c can be provided"` when several are.
pub fn require_one_of(fields: &[(&str, bool)]) -> Result<(), ResourceError> {
    let names = fields
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",");

    match fields.iter().filter(|(_, present)| *present).count() {
        1 => Ok(()),
        0 => Err(ResourceError::validation(format!(
            "one of: {names} must be provided"
        ))),
        _ => Err(ResourceError::validation(format!(
            "only one of: {names} can be provided"
        ))),
    }
}

/// Local validation of an options value, run before any request is built.
pub trait Validate {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] or
    /// [`ResourceError::InvalidIdentifier`] describing the first problem.
    fn validate(&self) -> Result<(), ResourceError> {
        Ok(())
    }
}

impl Validate for () {}
