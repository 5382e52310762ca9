//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures (stock, lookups)        │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  stockbook-db errors (separate crate)                                  │
//! │  └── DbError          - Database failures, wraps CoreError raised      │
//! │                         inside a transaction                           │
//! │                                                                         │
//! │  Handler errors (apps/stockbook)                                       │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced record does not exist.
    ///
    /// ## When This Occurs
    /// - Bill line for a product name with no stock rows
    /// - Purchase line pointing at a company id that was never created
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// Insufficient stock to complete a sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to bill (qty: 6)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Rice 5kg", available: 5, requested: 6 }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Bill has exceeded maximum allowed lines.
    #[error("Bill cannot have more than {max} lines")]
    BillTooLarge { max: usize },

    /// Finalize was called with nothing on the bill.
    #[error("Bill has no line items")]
    EmptyBill,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for an entity and its lookup key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any store mutation, so a failing call leaves the store
/// untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not a number, or has the wrong shape (e.g. a malformed GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A batch operation was given no items.
    #[error("{field} must contain at least one item")]
    Empty { field: String },

    /// A batch operation was given more items than it accepts.
    #[error("{field} cannot have more than {max} lines")]
    TooManyLines { field: String, max: usize },

    /// A batch line failed; `line` is 1-based as shown to the user.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Tags this error with the 1-based batch line it came from.
    pub fn at_line(self, line: usize) -> Self {
        ValidationError::Line {
            line,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
