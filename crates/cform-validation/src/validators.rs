#![forbid(unsafe_code)]

//! The `Validator` trait, its result types and the string validators a
//! contact form needs.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Code of [`Required`] failures.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Code of [`MinLength`] failures.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Code of [`Email`] failures.
pub const ERROR_CODE_EMAIL: &str = "email";

const REQUIRED_MESSAGE: &str = "This field is required";
const MIN_LENGTH_MESSAGE: &str = "Must be at least {min} characters";
const EMAIL_MESSAGE: &str = "Invalid email address";

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// Why a value was rejected.
///
/// `message` may contain `{name}` placeholders filled from `params` by
/// [`format_message`](Self::format_message); `code` never changes between
/// releases and is what callers should match on.
///
/// ```rust
/// use cform_validation::ValidationError;
///
/// let error = ValidationError::new("too_short", "Must be at least {min} characters")
///     .with_param("min", 5);
///
/// assert_eq!(error.format_message(), "Must be at least 5 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    pub params: BTreeMap<String, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a placeholder value.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// `message` with every `{key}` replaced by its param.
    #[must_use]
    pub fn format_message(&self) -> String {
        self.params
            .iter()
            .fold(self.message.clone(), |text, (key, value)| {
                text.replace(&format!("{{{key}}}"), value)
            })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_message())
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a single [`Validator::validate`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    /// `Valid` when `ok`, otherwise `Invalid` with the error built by `error`.
    pub fn check(ok: bool, error: impl FnOnce() -> ValidationError) -> Self {
        if ok { Self::Valid } else { Self::Invalid(error()) }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(e) => Some(e),
            Self::Valid => None,
        }
    }

    /// Formatted message of the error, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// Short-circuiting conjunction: keeps `self` if it already failed.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self.is_valid() { other } else { self }
    }
}

// ---------------------------------------------------------------------------
// Validator trait
// ---------------------------------------------------------------------------

/// Checks values of type `T`.
///
/// Implementations must be pure: equal inputs give equal results.
///
/// ```rust
/// use cform_validation::{ValidationError, ValidationResult, Validator};
///
/// struct NoSpaces;
///
/// impl Validator<str> for NoSpaces {
///     fn validate(&self, value: &str) -> ValidationResult {
///         ValidationResult::check(!value.contains(' '), || {
///             ValidationError::new("no_spaces", self.error_message())
///         })
///     }
///
///     fn error_message(&self) -> &str {
///         "Value must not contain spaces"
///     }
/// }
///
/// assert!(NoSpaces.validate("a b").is_invalid());
/// ```
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;

    /// Message template reported on failure.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// String validators
// ---------------------------------------------------------------------------

/// Rejects empty strings, and whitespace-only strings unless
/// `allow_whitespace` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required {
    pub allow_whitespace: bool,
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the empty string fails.
    #[must_use]
    pub fn allow_whitespace(self) -> Self {
        Self {
            allow_whitespace: true,
        }
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        let content = if self.allow_whitespace {
            value
        } else {
            value.trim()
        };
        ValidationResult::check(!content.is_empty(), || {
            ValidationError::new(ERROR_CODE_REQUIRED, REQUIRED_MESSAGE)
        })
    }

    fn error_message(&self) -> &str {
        REQUIRED_MESSAGE
    }
}

/// Requires at least `min` characters (Unicode scalar values, not bytes).
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    pub min: usize,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        ValidationResult::check(len >= self.min, || {
            ValidationError::new(ERROR_CODE_MIN_LENGTH, MIN_LENGTH_MESSAGE)
                .with_param("min", self.min)
                .with_param("actual", len)
        })
    }

    fn error_message(&self) -> &str {
        MIN_LENGTH_MESSAGE
    }
}

/// Accepts `local@domain.tld`.
///
/// - local: one or more of `A-Z a-z 0-9 . _ % + -`
/// - domain: two or more dot-separated, non-empty labels of `A-Z a-z 0-9 -`
/// - the last label: at least two ASCII letters
///
/// Surrounding whitespace is not trimmed and fails. The empty string passes;
/// pair with [`Required`] to reject it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_well_formed(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        let local_ok = !local.is_empty() && local.chars().all(is_local_char);
        let labels: Vec<&str> = domain.split('.').collect();
        let labels_ok = labels.len() >= 2
            && labels
                .iter()
                .all(|label| !label.is_empty() && label.chars().all(is_domain_char));
        let tld_ok = labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
        local_ok && labels_ok && tld_ok
    }
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        ValidationResult::check(value.is_empty() || Self::is_well_formed(value), || {
            ValidationError::new(ERROR_CODE_EMAIL, EMAIL_MESSAGE)
        })
    }

    fn error_message(&self) -> &str {
        EMAIL_MESSAGE
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// `first`, then `second`; reports whichever fails first.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> And<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, A, B> Validator<T> for And<A, B>
where
    A: Validator<T>,
    B: Validator<T>,
{
    fn validate(&self, value: &T) -> ValidationResult {
        self.first
            .validate(value)
            .and(self.second.validate(value))
    }

    fn error_message(&self) -> &str {
        self.first.error_message()
    }
}

/// A list of validators run in order, stopping at the first failure.
/// Empty lists accept everything.
pub struct All<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> All<T> {
    #[must_use]
    pub fn new(validators: Vec<Box<dyn Validator<T>>>) -> Self {
        Self { validators }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Validator<T> for All<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        self.validators
            .iter()
            .map(|v| v.validate(value))
            .find(ValidationResult::is_invalid)
            .unwrap_or_default()
    }

    fn error_message(&self) -> &str {
        self.validators
            .first()
            .map_or("Validation failed", |v| v.error_message())
    }
}

impl<T: ?Sized> fmt::Debug for All<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "All([{} validators])", self.validators.len())
    }
}

/// Collects validators into an [`All`].
///
/// ```rust
/// use cform_validation::{Validator, ValidatorBuilder};
///
/// let validator = ValidatorBuilder::<str>::new()
///     .required()
///     .email()
///     .build();
///
/// assert!(validator.validate("fido@mail.com").is_valid());
/// assert!(!validator.validate("fido").is_valid());
/// assert!(!validator.validate("").is_valid());
/// ```
pub struct ValidatorBuilder<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
    _phantom: PhantomData<T>,
}

impl<T: ?Sized> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ValidatorBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Append any validator.
    #[must_use]
    pub fn custom(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub fn build(self) -> All<T> {
        All::new(self.validators)
    }
}

impl ValidatorBuilder<str> {
    /// [`Required`]: whitespace-only counts as empty.
    #[must_use]
    pub fn required(self) -> Self {
        self.custom(Required::new())
    }

    /// [`Required`] with `allow_whitespace`.
    #[must_use]
    pub fn non_empty(self) -> Self {
        self.custom(Required::new().allow_whitespace())
    }

    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.custom(MinLength::new(min))
    }

    #[must_use]
    pub fn email(self) -> Self {
        self.custom(Email::new())
    }
}
