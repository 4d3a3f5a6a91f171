mod errors;
#[cfg(test)]
mod tests;

use std::ops::RangeInclusive;

use crate::models::Category;
use crate::types::CustomerId;

pub use errors::ConfigError;

/// Fallback amount range for a category missing from the table.
pub const DEFAULT_AMOUNT_RANGE: (f64, f64) = (50.0, 500.0);

/// One row of the category table: selection weight plus the amount range
/// legitimate transactions of this category are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    pub category: Category,
    pub weight: u32,
    pub min_amount: f64,
    pub max_amount: f64
}

impl CategorySpec {
    pub const fn new(category: Category, weight: u32, min_amount: f64, max_amount: f64) -> Self {
        Self { category, weight, min_amount, max_amount }
    }
}

/// Plain-value configuration consumed by the generator at construction.
///
/// Mutable only between generation calls, never mid-call. Validation happens
/// once, in [`GeneratorConfig::validate`]; the generation operations
/// themselves have no failure modes under a valid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Closed interval customers are drawn from.
    pub customer_id_range: RangeInclusive<CustomerId>,
    /// Ordered category table; weights are relative, not percentages,
    /// though the default table happens to sum to 100.
    pub categories: Vec<CategorySpec>,
    /// Bernoulli probability that a transaction is flagged anomalous.
    pub anomaly_probability: f64,
    /// Amount range for anomalous transactions. Must sit strictly above
    /// every category ceiling so anomalies are recognizable by magnitude.
    pub anomaly_amount_range: (f64, f64)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customer_id_range: 1001..=1100,
            categories: vec![
                CategorySpec::new(Category::LeisurePayment, 40, 50.0, 500.0),
                CategorySpec::new(Category::SubscriptionFee, 15, 10.0, 100.0),
                CategorySpec::new(Category::TravelExpense, 10, 200.0, 2000.0),
                CategorySpec::new(Category::Shopping, 10, 30.0, 800.0),
                CategorySpec::new(Category::Dining, 7, 20.0, 200.0),
                CategorySpec::new(Category::Entertainment, 5, 25.0, 300.0),
                CategorySpec::new(Category::FitnessWellness, 5, 50.0, 500.0),
                CategorySpec::new(Category::Education, 3, 100.0, 1000.0),
                CategorySpec::new(Category::LuxuryPurchase, 3, 500.0, 5000.0),
                CategorySpec::new(Category::Miscellaneous, 2, 20.0, 300.0),
            ],
            anomaly_probability: 0.05,
            anomaly_amount_range: (25000.0, 75000.0)
        }
    }
}

impl GeneratorConfig {
    /// Looks up the amount range configured for a category.
    pub fn amount_range(&self, category: Category) -> Option<(f64, f64)> {
        self.categories
            .iter()
            .find(|spec| spec.category == category)
            .map(|spec| (spec.min_amount, spec.max_amount))
    }

    /// Checks every construction-time contract. No partial construction:
    /// the generator refuses a configuration that fails any of these.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCategoryTable);
        }

        let total_weight: u64 = self.categories.iter().map(|spec| u64::from(spec.weight)).sum();
        if total_weight == 0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        if self.customer_id_range.is_empty() {
            return Err(ConfigError::EmptyCustomerRange {
                start: *self.customer_id_range.start(),
                end: *self.customer_id_range.end()
            });
        }

        if !self.anomaly_probability.is_finite() || !(0.0..=1.0).contains(&self.anomaly_probability) {
            return Err(ConfigError::InvalidAnomalyProbability {
                value: self.anomaly_probability
            });
        }

        for spec in &self.categories {
            if !is_valid_range(spec.min_amount, spec.max_amount) {
                return Err(ConfigError::InvalidAmountRange {
                    category: spec.category,
                    min: spec.min_amount,
                    max: spec.max_amount
                });
            }
        }

        let (anomaly_min, anomaly_max) = self.anomaly_amount_range;
        if !is_valid_range(anomaly_min, anomaly_max) {
            return Err(ConfigError::InvalidAnomalyRange {
                min: anomaly_min,
                max: anomaly_max
            });
        }

        for spec in &self.categories {
            if spec.max_amount >= anomaly_min {
                return Err(ConfigError::AnomalyRangeOverlap {
                    category: spec.category,
                    category_max: spec.max_amount,
                    anomaly_min
                });
            }
        }

        Ok(())
    }
}

fn is_valid_range(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && min > 0.0 && min < max
}
