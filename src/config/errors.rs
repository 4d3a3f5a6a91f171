use thiserror::Error;

use crate::models::Category;
use crate::types::CustomerId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Category table is empty")]
    EmptyCategoryTable,
    #[error("Category weights sum to zero")]
    ZeroTotalWeight,
    #[error("Category weights were rejected by the sampler: {reason}")]
    WeightTable {
        reason: String
    },
    #[error("Customer id range [{start}..={end}] is empty")]
    EmptyCustomerRange {
        start: CustomerId,
        end: CustomerId
    },
    #[error("Anomaly probability [{value}] must lie in [0, 1]")]
    InvalidAnomalyProbability {
        value: f64
    },
    #[error("Amount range [{min}, {max}] for category [{category:?}] is degenerate")]
    InvalidAmountRange {
        category: Category,
        min: f64,
        max: f64
    },
    #[error("Anomaly amount range [{min}, {max}] is degenerate")]
    InvalidAnomalyRange {
        min: f64,
        max: f64
    },
    #[error("Anomaly range floor [{anomaly_min}] does not clear category [{category:?}] ceiling [{category_max}]")]
    AnomalyRangeOverlap {
        category: Category,
        category_max: f64,
        anomaly_min: f64
    }
}
