#![forbid(unsafe_code)]

//! Form validation framework with composable validators.
//!
//! - A core `Validator` trait for validating values
//! - Built-in validators for required values, minimum length and email
//! - Composition (`And`, `All`) and a fluent `ValidatorBuilder`
//! - Error messages with `{param}` interpolation
//!
//! # Example
//!
//! ```rust
//! use cform_validation::{And, MinLength, Required, Validator};
//!
//! let required = Required::new();
//! assert!(required.validate("hello").is_valid());
//! assert!(!required.validate("").is_valid());
//!
//! let first_name = And::new(Required::new(), MinLength::new(5));
//! assert!(first_name.validate("Andrew").is_valid());
//! assert!(!first_name.validate("abc").is_valid());
//! ```

mod validators;

pub use validators::{
    // Composition
    All,
    And,
    // Error codes
    ERROR_CODE_EMAIL,
    ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_REQUIRED,
    // Built-in validators
    Email,
    MinLength,
    Required,
    // Core types
    ValidationError,
    ValidationResult,
    Validator,
    // Builder
    ValidatorBuilder,
};
