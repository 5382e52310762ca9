//! # Validation Module
//!
//! Form input parsing and field rules for Stockbook.
//!
//! Every form value arrives as text. This module turns that text into
//! typed values (quantities, [`Money`], [`TaxRate`]) or rejects it, before
//! anything touches the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer (external)                                │
//! │  └── Whatever the form does, text still arrives raw                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Handler (apps/stockbook)                                     │
//! │  └── THIS MODULE: parse + business rule validation                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (quantity >= 0) constraints                      │
//! │  └── Foreign key constraints (products.company_id)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal Parsing
//! Prices and rates are parsed exactly into hundredths: `"12.5"` becomes
//! 1250 paise and `"9"` becomes 900 basis points. No floats are involved,
//! and more than two fractional digits is an error rather than a rounding.
//!
//! ## Usage
//! ```rust
//! use stockbook_core::validation::{parse_money, parse_quantity, parse_rate};
//!
//! assert_eq!(parse_quantity("quantity", "12").unwrap(), 12);
//! assert_eq!(parse_money("unit price", "118.5").unwrap().paise(), 11_850);
//! assert_eq!(parse_rate("cgst", "9").unwrap().bps(), 900);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewCompany, NewCustomer, TaxRate};
use crate::{MAX_LINE_QUANTITY, MAX_UNIT_PRICE_PAISE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name, brand, address or contact field.
pub const MAX_TEXT_LEN: usize = 200;

/// GSTIN length (2-digit state code, PAN, entity code, Z, checksum).
pub const GSTIN_LEN: usize = 15;

// =============================================================================
// String Validators
// =============================================================================

/// Requires a non-blank field and returns it trimmed.
///
/// ```rust
/// use stockbook_core::validation::require;
///
/// assert_eq!(require("brand", "  Tata ").unwrap(), "Tata");
/// assert!(require("brand", "   ").is_err());
/// ```
pub fn require(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(value.to_string())
}

/// Trims an optional field; blank becomes `None`.
pub fn optional(field: &str, value: Option<&str>) -> ValidationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => require(field, v).map(Some),
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a GSTIN and returns it upper-cased.
///
/// ## Rules
/// - Exactly 15 characters
/// - ASCII letters and digits only
///
/// ```rust
/// use stockbook_core::validation::validate_gstin;
///
/// assert_eq!(validate_gstin("29abcde1234f1z5").unwrap(), "29ABCDE1234F1Z5");
/// assert!(validate_gstin("29ABCDE1234").is_err());
/// ```
pub fn validate_gstin(gstin: &str) -> ValidationResult<String> {
    let gstin = gstin.trim();

    if gstin.len() != GSTIN_LEN || !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "GST number".to_string(),
            reason: format!("must be {} letters and digits", GSTIN_LEN),
        });
    }

    Ok(gstin.to_ascii_uppercase())
}

/// Validates the add-company form.
pub fn validate_company(
    name: &str,
    gst_number: Option<&str>,
    contact: Option<&str>,
) -> ValidationResult<NewCompany> {
    let name = require("company name", name)?;
    let gst_number = optional("GST number", gst_number)?
        .map(|g| validate_gstin(&g))
        .transpose()?;
    let contact = optional("contact", contact)?;

    Ok(NewCompany {
        name,
        gst_number,
        contact,
    })
}

/// Validates the add-customer form. Name, contact and address are required.
pub fn validate_customer(
    name: &str,
    contact: &str,
    address: &str,
    gst_number: Option<&str>,
) -> ValidationResult<NewCustomer> {
    let name = require("customer name", name)?;
    let contact = require("contact", contact)?;
    let address = require("address", address)?;
    let gst_number = optional("GST number", gst_number)?
        .map(|g| validate_gstin(&g))
        .transpose()?;

    Ok(NewCustomer {
        name,
        address,
        gst_number,
        contact,
    })
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a quantity field.
///
/// ## Rules
/// - Digits only (no sign, no decimal point)
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Bill form: Add Line                                                    │
/// │                                                                         │
/// │  User types quantity: "5"                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("quantity", "5") ← THIS FUNCTION                       │
/// │       │                                                                 │
/// │       ├── "" → Error: "quantity is required"                           │
/// │       ├── "2.5" / "-1" / "five" → Error: invalid format                │
/// │       ├── "0" → Error: "quantity must be positive"                     │
/// │       │                                                                 │
/// │       └── OK(5) → Proceed with add_line_item                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    let qty: i64 = raw.parse().map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 1,
        max: MAX_LINE_QUANTITY,
    })?;
    validate_quantity(field, qty)?;

    Ok(qty)
}

/// Validates an already-typed quantity.
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Parses a non-negative decimal with at most two fractional digits into
/// hundredths.
///
/// Accepts `"12"`, `"12.5"`, `"12.50"`, `"12."` and `".5"`.
fn parse_hundredths(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if raw.starts_with('-') {
        return Err(invalid("must not be negative"));
    }

    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return Err(invalid("must be a number"));
    }

    if frac.len() > 2 {
        return Err(invalid("must have at most two decimal places"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("is too large"))?
    };
    // "5" → 50 hundredths, "05" → 5
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
        _ => frac.parse().map_err(|_| invalid("must be a number"))?,
    };

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| invalid("is too large"))
}

/// Parses a rupee amount ("118.50") into [`Money`], at most
/// [`MAX_UNIT_PRICE_PAISE`].
pub fn parse_money(field: &str, raw: &str) -> ValidationResult<Money> {
    let price = Money::from_paise(parse_hundredths(field, raw)?);
    validate_price(field, price)?;
    Ok(price)
}

/// Checks an already-typed price against `0..=MAX_UNIT_PRICE_PAISE`.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.paise() > MAX_UNIT_PRICE_PAISE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_PAISE / 100,
        });
    }
    Ok(())
}

/// Parses a percentage ("9", "2.5") into a [`TaxRate`]. Must be at most 100%.
pub fn parse_rate(field: &str, raw: &str) -> ValidationResult<TaxRate> {
    let bps = parse_hundredths(field, raw)?;

    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(TaxRate::from_bps(bps as u32))
}

/// Like [`parse_rate`], but a blank field means 0%.
pub fn parse_optional_rate(field: &str, raw: &str) -> ValidationResult<TaxRate> {
    if raw.trim().is_empty() {
        return Ok(TaxRate::zero());
    }
    parse_rate(field, raw)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("brand", " Amul ").unwrap(), "Amul");
        assert!(matches!(
            require("brand", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            require("brand", &"A".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("contact", None).unwrap(), None);
        assert_eq!(optional("contact", Some("  ")).unwrap(), None);
        assert_eq!(
            optional("contact", Some(" 98450 12345 ")).unwrap(),
            Some("98450 12345".to_string())
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("quantity", "1").unwrap(), 1);
        assert_eq!(parse_quantity("quantity", " 250 ").unwrap(), 250);
        assert_eq!(parse_quantity("quantity", "1000000").unwrap(), 1_000_000);

        assert!(matches!(
            parse_quantity("quantity", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "-3"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "five"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "1000001"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "99999999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("price", "100").unwrap().paise(), 10_000);
        assert_eq!(parse_money("price", "100.5").unwrap().paise(), 10_050);
        assert_eq!(parse_money("price", "100.05").unwrap().paise(), 10_005);
        assert_eq!(parse_money("price", "0").unwrap().paise(), 0);
        assert_eq!(parse_money("price", ".5").unwrap().paise(), 50);
        assert_eq!(parse_money("price", "7.").unwrap().paise(), 700);

        assert!(parse_money("price", "").is_err());
        assert!(parse_money("price", ".").is_err());
        assert!(parse_money("price", "12.345").is_err());
        assert!(parse_money("price", "-1").is_err());
        assert!(parse_money("price", "1e3").is_err());
        assert!(parse_money("price", "1.2.3").is_err());
        assert!(parse_money("price", "99999999999999999999").is_err());
    }

    #[test]
    fn test_price_upper_bound() {
        assert_eq!(
            parse_money("price", "100000000").unwrap().paise(),
            MAX_UNIT_PRICE_PAISE
        );

        let err = parse_money("price", "100000000.01").unwrap_err();
        assert_eq!(err.to_string(), "price must be between 0 and 100000000");
        assert!(matches!(
            parse_money("price", "100000000000000"),
            Err(ValidationError::OutOfRange { .. })
        ));

        assert!(validate_price("price", Money::from_paise(-1)).is_err());
        assert!(validate_price("price", Money::zero()).is_ok());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("cgst", "9").unwrap().bps(), 900);
        assert_eq!(parse_rate("cgst", "2.5").unwrap().bps(), 250);
        assert_eq!(parse_rate("cgst", "100").unwrap().bps(), 10_000);
        assert!(matches!(
            parse_rate("cgst", "100.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_rate("cgst", "abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_optional_rate() {
        assert!(parse_optional_rate("cess", "").unwrap().is_zero());
        assert!(parse_optional_rate("cess", "  ").unwrap().is_zero());
        assert_eq!(parse_optional_rate("cess", "12").unwrap().bps(), 1200);
        assert!(parse_optional_rate("cess", "x").is_err());
    }

    #[test]
    fn test_validate_gstin() {
        assert_eq!(
            validate_gstin(" 27aapfu0939f1zv ").unwrap(),
            "27AAPFU0939F1ZV"
        );
        assert!(validate_gstin("27AAPFU0939F1Z").is_err());
        assert!(validate_gstin("27AAPFU0939F1Z-").is_err());
    }

    #[test]
    fn test_validate_company() {
        let company = validate_company("Hindustan Unilever", Some(""), None).unwrap();
        assert_eq!(company.name, "Hindustan Unilever");
        assert_eq!(company.gst_number, None);

        assert!(validate_company("", None, None).is_err());
        assert!(validate_company("HUL", Some("bad"), None).is_err());
    }

    #[test]
    fn test_validate_customer() {
        let customer =
            validate_customer("Ravi Stores", "98450 12345", "12 MG Road", None).unwrap();
        assert_eq!(customer.address, "12 MG Road");

        assert!(matches!(
            validate_customer("Ravi Stores", "", "12 MG Road", None),
            Err(ValidationError::Required { field }) if field == "contact"
        ));
        assert!(validate_customer("Ravi Stores", "98450", "  ", None).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  ravi ").unwrap(), "ravi");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
