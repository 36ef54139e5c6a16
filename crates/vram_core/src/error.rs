use thiserror::Error;

/// Validation failures raised at the estimator/planner boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} is too large to plan or report ({value})")]
    TooLarge { field: &'static str, value: f64 },

    #[error("{field} must be at least 1")]
    MustBePositive { field: &'static str },

    #[error("kv_heads ({kv_heads}) cannot exceed attention_heads ({attention_heads})")]
    InvalidGrouping { kv_heads: u32, attention_heads: u32 },

    #[error("unknown precision '{0}' (expected one of FP32, FP16, BF16, INT8, INT4)")]
    UnknownPrecision(String),
}

pub type Result<T> = std::result::Result<T, EstimateError>;

/// Rejects NaN, infinities and negative values.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EstimateError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(EstimateError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn check_positive(field: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(EstimateError::MustBePositive { field });
    }
    Ok(())
}
