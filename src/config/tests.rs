use super::{CategorySpec, ConfigError, GeneratorConfig};

use crate::models::Category;

#[test]
fn test_default_configuration_is_valid() {
    assert!(GeneratorConfig::default().validate().is_ok());
}

#[test]
fn test_default_weights_sum_to_one_hundred() {
    let config = GeneratorConfig::default();
    let total: u32 = config.categories.iter().map(|spec| spec.weight).sum();

    assert_eq!(config.categories.len(), 10);
    assert_eq!(total, 100);
}

#[test]
fn test_empty_category_table_is_rejected() {
    let config = GeneratorConfig {
        categories: Vec::new(),
        ..GeneratorConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::EmptyCategoryTable)));
}

#[test]
fn test_zero_total_weight_is_rejected() {
    let config = GeneratorConfig {
        categories: vec![
            CategorySpec::new(Category::Dining, 0, 20.0, 200.0),
            CategorySpec::new(Category::Shopping, 0, 30.0, 800.0),
        ],
        ..GeneratorConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::ZeroTotalWeight)));
}

#[test]
fn test_single_zero_weight_is_allowed_when_total_stays_positive() {
    let config = GeneratorConfig {
        categories: vec![
            CategorySpec::new(Category::Dining, 0, 20.0, 200.0),
            CategorySpec::new(Category::Shopping, 10, 30.0, 800.0),
        ],
        ..GeneratorConfig::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_customer_range_is_rejected() {
    let config = GeneratorConfig {
        customer_id_range: 2000..=1001,
        ..GeneratorConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::EmptyCustomerRange { start: 2000, end: 1001 })));
}

#[test]
fn test_out_of_bounds_anomaly_probability_is_rejected() {
    for value in [-0.1, 1.5, f64::NAN] {
        let config = GeneratorConfig {
            anomaly_probability: value,
            ..GeneratorConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::InvalidAnomalyProbability { .. })));
    }
}

#[test]
fn test_degenerate_category_range_is_rejected() {
    let inverted = GeneratorConfig {
        categories: vec![CategorySpec::new(Category::Dining, 10, 200.0, 20.0)],
        ..GeneratorConfig::default()
    };
    assert!(matches!(inverted.validate(), Err(ConfigError::InvalidAmountRange { category: Category::Dining, .. })));

    let non_positive = GeneratorConfig {
        categories: vec![CategorySpec::new(Category::Dining, 10, 0.0, 200.0)],
        ..GeneratorConfig::default()
    };
    assert!(matches!(non_positive.validate(), Err(ConfigError::InvalidAmountRange { .. })));
}

#[test]
fn test_degenerate_anomaly_range_is_rejected() {
    let config = GeneratorConfig {
        anomaly_amount_range: (75000.0, 25000.0),
        ..GeneratorConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::InvalidAnomalyRange { .. })));
}

#[test]
fn test_anomaly_range_overlapping_a_category_is_rejected() {
    let config = GeneratorConfig {
        anomaly_amount_range: (4000.0, 75000.0),
        ..GeneratorConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::AnomalyRangeOverlap { category: Category::LuxuryPurchase, .. })
    ));
}

#[test]
fn test_amount_range_lookup_falls_back_to_none_for_missing_category() {
    let config = GeneratorConfig {
        categories: vec![CategorySpec::new(Category::Dining, 10, 20.0, 200.0)],
        ..GeneratorConfig::default()
    };

    assert_eq!(config.amount_range(Category::Dining), Some((20.0, 200.0)));
    assert_eq!(config.amount_range(Category::Education), None);
}
