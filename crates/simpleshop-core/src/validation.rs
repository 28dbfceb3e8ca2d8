//! # Validation Module
//!
//! Input validation rules for SimpleShop CRM forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Shared rules the form screens invoke before submitting            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage (SQLite)                                             │
//! │  └── NOT NULL / type constraints                                       │
//! │                                                                         │
//! │  The entity services themselves do NOT validate: the service layer    │
//! │  is a thin pass-through, and validation belongs to the form layer.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{LineItem, SaleDraft};
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LEN, MAX_NOTES_LEN, MAX_SALE_LINE_ITEMS};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer or product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use simpleshop_core::validation::validate_name;
///
/// assert!(validate_name("Acme Anvils").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a customer email.
///
/// ## Rules
/// - May be empty (email is optional on the customer form)
/// - When present, must contain exactly one `@` with text on both sides
///
/// Deliberately loose: real mail validation happens when mail bounces.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Ok(());
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next();

    match domain {
        Some(d) if !local.is_empty() && !d.is_empty() && !d.contains('@') => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        }),
    }
}

/// Validates the free-text notes field.
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product's unit price.
///
/// ## Rules
/// - Must be strictly positive (free products are not a thing here)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (zero means out of stock, which is valid)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a low-stock threshold.
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "lowStockThreshold".to_string(),
        });
    }

    Ok(())
}

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates the line items of a sale draft.
///
/// ## Rules
/// - At least one line item
/// - At most MAX_SALE_LINE_ITEMS (100)
/// - Every quantity positive, every unit price positive
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_SALE_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_LINE_ITEMS as i64,
        });
    }

    for item in items {
        validate_quantity(item.quantity)?;
        validate_price(item.unit_price)?;
    }

    Ok(())
}

/// Checks that a sale draft's stated total equals the sum of its line totals.
///
/// The invariant holds at creation time only; stored sales are never
/// re-validated.
pub fn validate_sale_total(draft: &SaleDraft) -> ValidationResult<()> {
    let computed = draft.computed_total();
    if computed != draft.total {
        return Err(ValidationError::TotalMismatch {
            stated: draft.total.cents(),
            computed: computed.cents(),
        });
    }

    Ok(())
}

/// Runs every rule a sale form must pass before submission.
pub fn validate_sale_draft(draft: &SaleDraft) -> ValidationResult<()> {
    validate_line_items(&draft.items)?;
    validate_sale_total(draft)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, cents: i64) -> LineItem {
        LineItem {
            product_id: 1,
            quantity,
            unit_price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Acme Anvils").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("").is_ok()); // optional
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(5).is_ok());
        assert!(validate_threshold(-1).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes("prefers email").is_ok());
        assert!(validate_notes(&"x".repeat(3000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        assert!(validate_line_items(&[]).is_err());
        assert!(validate_line_items(&[line(2, 1000)]).is_ok());
        assert!(validate_line_items(&[line(0, 1000)]).is_err());
        assert!(validate_line_items(&[line(1, 0)]).is_err());
    }

    #[test]
    fn test_validate_sale_total() {
        let good = SaleDraft {
            customer_id: 1,
            items: vec![line(2, 1000)],
            total: Money::from_cents(2000),
        };
        assert!(validate_sale_total(&good).is_ok());

        let bad = SaleDraft {
            total: Money::from_cents(1999),
            ..good
        };
        assert_eq!(
            validate_sale_total(&bad),
            Err(ValidationError::TotalMismatch {
                stated: 1999,
                computed: 2000,
            })
        );
    }
}
