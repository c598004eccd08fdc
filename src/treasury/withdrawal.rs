use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inline validation messages for the withdrawal form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WithdrawalError {
    #[error("Enter an amount greater than zero")]
    NonPositiveAmount,

    #[error("Amount ${amount:.2} exceeds available balance ${available:.2}")]
    ExceedsAvailable { amount: f64, available: f64 },

    #[error("Select a destination account")]
    MissingDestination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub amount: f64,
    #[serde(default)]
    pub destination: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidWithdrawal {
    pub amount: f64,
    pub destination: String,
}

impl WithdrawalRequest {
    pub fn new(amount: f64, destination: impl Into<String>) -> Self {
        Self {
            amount,
            destination: Some(destination.into()),
        }
    }

    /// Parse the raw amount field. Unparseable text becomes 0 so that
    /// validation reports it as non-positive.
    pub fn from_form(amount_text: &str, destination: Option<&str>) -> Self {
        let cleaned: String = amount_text
            .trim()
            .chars()
            .filter(|c| *c != '$' && *c != ',')
            .collect();
        Self {
            amount: cleaned.parse().unwrap_or(0.0),
            destination: destination.map(str::to_string),
        }
    }

    pub fn validate(&self, available: f64) -> Result<ValidWithdrawal, WithdrawalError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(WithdrawalError::NonPositiveAmount);
        }
        if self.amount > available {
            return Err(WithdrawalError::ExceedsAvailable {
                amount: self.amount,
                available,
            });
        }
        let destination = match self.destination.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => return Err(WithdrawalError::MissingDestination),
        };
        Ok(ValidWithdrawal {
            amount: self.amount,
            destination,
        })
    }
}
