mod record;

use serde::{Deserialize, Serialize};

pub use record::TransactionRecord;

/// The ten leisure/lifestyle spending categories a transaction can fall into.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LeisurePayment,
    SubscriptionFee,
    TravelExpense,
    Shopping,
    Dining,
    Entertainment,
    FitnessWellness,
    Education,
    LuxuryPurchase,
    Miscellaneous
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::LeisurePayment,
        Category::SubscriptionFee,
        Category::TravelExpense,
        Category::Shopping,
        Category::Dining,
        Category::Entertainment,
        Category::FitnessWellness,
        Category::Education,
        Category::LuxuryPurchase,
        Category::Miscellaneous
    ];
}

/// Provenance tag attached to streamed records so warehouse views can
/// separate live data from the historical back-fill.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "STREAMING")]
    Streaming,
    #[serde(rename = "HISTORICAL")]
    Historical
}
