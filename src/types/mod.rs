/// Customer identifiers live in a small configured interval (e.g. 1001-1100).
pub type CustomerId = u32;

/// Transaction identifiers must hold both millisecond-epoch derived values
/// and `YYYYMMDDNNNN` batch sequence ids, hence the wide integer.
pub type TransactionId = i64;
