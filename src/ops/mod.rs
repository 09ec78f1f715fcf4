//! CRUD operation handlers.
//!
//! Stateless functions over `(store, owner, input)`. Each validates its input
//! struct at the boundary, applies the owner filter on every store call, and
//! treats missing or unowned target rows as silent no-ops: the call returns
//! without effect and without error, so callers cannot distinguish "not
//! there" from "not yours".

pub mod ingredients;
pub mod instructions;
pub mod publish;
pub mod recipes;
pub mod schedule;
pub mod shopping;
pub mod tips;

use crate::error::DashboardError;

/// Boundary validation for required text fields.
fn required(value: &str, field: &str) -> Result<String, DashboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Boundary validation for optional quantities.
fn checked_amount(amount: Option<f64>) -> Result<Option<f64>, DashboardError> {
    match amount {
        Some(a) if !a.is_finite() || a < 0.0 => Err(DashboardError::Validation(
            "amount must be a non-negative number".to_string(),
        )),
        other => Ok(other),
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Bolo  ", "title").unwrap(), "Bolo");
        assert!(required("   ", "title").is_err());
    }

    #[test]
    fn test_checked_amount() {
        assert_eq!(checked_amount(Some(1.5)).unwrap(), Some(1.5));
        assert_eq!(checked_amount(None).unwrap(), None);
        assert!(checked_amount(Some(-1.0)).is_err());
        assert!(checked_amount(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(Some("  ".to_string())), None);
        assert_eq!(
            clean_optional(Some(" x ".to_string())),
            Some("x".to_string())
        );
        assert_eq!(clean_optional(None), None);
    }
}
