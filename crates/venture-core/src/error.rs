use thiserror::Error;

/// Validation failures for the add-expense / add-revenue forms.
///
/// These never surface as error messages; the submit affordance is simply
/// unavailable while the guard fails, and a rejected submit leaves both
/// the entry list and the form contents untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("amount is missing or not a number")]
    InvalidAmount,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("a reason is required")]
    MissingReason,
}
