
use std::io::Write;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sink::SinkError;
use crate::types::CustomerId;

/// One customer row for the warehouse's customer dimension, with enough PII
/// to exercise masking policies downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    /// Mortgage loan this customer is attached to. Stored as a string to
    /// match the mortgage ingest format; several customers may share one
    /// loan (co-signers).
    pub loan_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
    "William", "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Christopher", "Karen", "Charles", "Nancy", "Daniel", "Lisa",
    "Matthew", "Betty", "Anthony", "Helen", "Mark", "Sandra", "Donald", "Donna",
    "Steven", "Carol", "Paul", "Ruth", "Andrew", "Sharon", "Joshua", "Michelle",
    "Kenneth", "Laura", "Kevin", "Amy", "Brian", "Kimberly", "George", "Deborah"
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
    "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores",
    "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell"
];

const AREA_CODES: &[&str] = &[
    "212", "646", "917", "718", "347", "929",
    "415", "628", "650", "925", "510",
    "213", "323", "310", "424", "747",
    "305", "786", "954", "561", "239",
    "312", "773", "630", "708", "847",
    "617", "857", "781", "339", "508",
    "206", "253", "425", "303", "720",
    "404", "678", "770", "512", "713"
];

/// Loan ids follow the mortgage table's `361xxx` pattern.
const LOAN_ID_BASE: u32 = 361_100;
const LOAN_ID_POOL: u32 = 120;

/// Fabricates customer dimension records compatible with the transaction
/// generator's customer id range.
pub struct CustomerGenerator {
    rng: StdRng
}

impl CustomerGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Generates `count` customers with sequential ids starting at
    /// `first_customer_id`, each attached to a loan from a pool deliberately
    /// smaller than the customer count.
    pub fn generate_customers(&mut self, first_customer_id: CustomerId, count: usize) -> Vec<CustomerRecord> {
        let loan_ids = self.sample_loan_ids(count * 4 / 5);

        (0..count)
            .map(|offset| {
                let customer_id = first_customer_id + offset as CustomerId;
                let loan_id = loan_ids
                    .choose(&mut self.rng)
                    .cloned()
                    .unwrap_or_else(|| LOAN_ID_BASE.to_string());

                CustomerRecord {
                    customer_id,
                    loan_id,
                    first_name: pick(&mut self.rng, FIRST_NAMES),
                    last_name: pick(&mut self.rng, LAST_NAMES),
                    phone_number: self.generate_phone_number()
                }
            })
            .collect()
    }

    fn generate_phone_number(&mut self) -> String {
        let area_code = pick(&mut self.rng, AREA_CODES);
        let exchange: u32 = self.rng.random_range(200..=999);
        let number: u32 = self.rng.random_range(1000..=9999);
        format!("({area_code}) {exchange}-{number}")
    }

    /// Draws a unique sample of loan ids from the `361xxx` pool.
    fn sample_loan_ids(&mut self, count: usize) -> Vec<String> {
        let mut pool: Vec<u32> = (LOAN_ID_BASE..LOAN_ID_BASE + LOAN_ID_POOL).collect();
        pool.shuffle(&mut self.rng);
        pool.truncate(count.max(1));
        pool.into_iter().map(|loan_id| loan_id.to_string()).collect()
    }
}

impl Default for CustomerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(rng: &mut StdRng, pool: &[&str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

/// Writes customer records as newline-delimited JSON.
pub fn write_ndjson<W: Write>(records: &[CustomerRecord], mut writer: W) -> Result<(), SinkError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    info!("Wrote {} customer records", records.len());

    Ok(())
}
