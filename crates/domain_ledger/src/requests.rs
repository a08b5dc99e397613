//! Request types accepted by [`crate::LedgerService`]

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Currency;
use crate::split::SplitDetails;
use crate::transaction::SplitType;

/// Request for creating a group
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 120, message = "group title must be 1-120 characters"))]
    pub title: String,
    /// Falls back to the configured currency
    pub currency: Option<Currency>,
}

impl CreateGroupRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }
}

/// Request for adding a member to a group
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(length(min = 1, max = 80, message = "member name must be 1-80 characters"))]
    pub name: String,
}

impl AddMemberRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordTransactionRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Positive total at the group currency's precision
    pub amount: Decimal,
    /// Display name of the paying member
    #[validate(length(min = 1, message = "payer name is required"))]
    pub paid_by: String,
    pub split_type: SplitType,
    /// Percentages or exact amounts keyed by member id
    pub split_details: Option<SplitDetails>,
}

impl RecordTransactionRequest {
    /// Creates an equal-split request
    pub fn equal(title: impl Into<String>, amount: Decimal, paid_by: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount,
            paid_by: paid_by.into(),
            split_type: SplitType::Equal,
            split_details: None,
        }
    }

    /// Creates a percentage-split request
    pub fn percentage(
        title: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<String>,
        percentages: SplitDetails,
    ) -> Self {
        Self {
            split_type: SplitType::Percentage,
            split_details: Some(percentages),
            ..Self::equal(title, amount, paid_by)
        }
    }

    /// Creates a dynamic (exact amount) request
    pub fn dynamic(
        title: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<String>,
        amounts: SplitDetails,
    ) -> Self {
        Self {
            split_type: SplitType::Dynamic,
            split_details: Some(amounts),
            ..Self::equal(title, amount, paid_by)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_title_fails_validation() {
        let request = RecordTransactionRequest::equal("", dec!(10), "Alice");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_request_passes() {
        let request = RecordTransactionRequest::equal("Dinner", dec!(10), "Alice");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_split_type_deserializes_lowercase() {
        let json = r#"{"title":"Taxi","amount":"12.40","paid_by":"Bob","split_type":"dynamic","split_details":null}"#;
        let request: RecordTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.split_type, SplitType::Dynamic);
        assert_eq!(request.amount, dec!(12.40));
    }
}
