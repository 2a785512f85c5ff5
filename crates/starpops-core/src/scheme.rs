//! # Split Scheme Module
//!
//! The percentage split calculator: partitions a sale's total revenue into
//! named buckets according to a configured allocation table.
//!
//! ## Why Configuration, Not Constants?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The business has changed its allocation policy three times:            │
//! │                                                                         │
//! │  classic-v1   70 / 20 / 10          businessFund, employeeShare,        │
//! │                                     investorShare                       │
//! │  savings-v2   60 / 15 / 15 / 10     + savings                           │
//! │  payroll-v3   63 / 12 / 6.944 /     productionCost, investorShare,      │
//! │               6.944 / 5.556 / 5.556 salesPayroll, packagingPayroll,     │
//! │                                     savings, reinvestment               │
//! │                                                                         │
//! │  Sales persisted under an old scheme must keep aggregating with the     │
//! │  bucket values they were stored with. The active scheme is therefore    │
//! │  swappable configuration, and every Sale records its scheme name plus   │
//! │  the literal bucket amounts.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use starpops_core::money::Money;
//! use starpops_core::scheme::SplitScheme;
//!
//! let scheme = SplitScheme::payroll_v3();
//! let split = scheme.split(Money::from_cents(5000));
//! assert_eq!(split[0].name, "productionCost");
//! assert_eq!(split[0].amount.cents(), 3150);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemeError;
use crate::money::{Money, Rate, PPM_FULL};

// =============================================================================
// Bucket Role
// =============================================================================

/// What a bucket is *for*, independent of what it is named.
///
/// Summary aggregation groups by role at the policy level (payroll buckets
/// feed employee rollups, the investor bucket feeds investor rollups), while
/// the stored data stays keyed by bucket name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketRole {
    /// The primary operating fund (cost of production / business fund).
    Production,
    /// Return owed to the investor.
    Investor,
    /// A payroll pool credited to staff.
    Payroll,
    /// Set aside, untouched by operations.
    Savings,
    /// Earmarked for growing the business.
    Reinvestment,
    /// Anything else a future policy introduces.
    Other,
}

// =============================================================================
// Bucket
// =============================================================================

/// One named percentage bucket within a split scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket name as stored on Sale records (e.g. "salesPayroll").
    pub name: String,
    /// Allocation rate.
    pub rate: Rate,
    /// Role for summary aggregation.
    pub role: BucketRole,
}

impl Bucket {
    /// Creates a bucket.
    pub fn new(name: impl Into<String>, rate: Rate, role: BucketRole) -> Self {
        Bucket {
            name: name.into(),
            rate,
            role,
        }
    }
}

// =============================================================================
// Bucket Amount
// =============================================================================

/// A computed monetary allocation: the calculator's output, and the shape
/// in which splits are stored on Sale records (self-describing history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAmount {
    pub name: String,
    pub amount: Money,
}

impl BucketAmount {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        BucketAmount {
            name: name.into(),
            amount,
        }
    }
}

// =============================================================================
// Split Scheme
// =============================================================================

/// An ordered, validated set of percentage buckets.
///
/// ## Invariants (enforced at construction AND deserialization)
/// - At least one bucket
/// - Bucket names unique within the scheme
/// - Rates sum to at most 100%
///
/// Fields are private so no code path can hold an unvalidated scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemeConfig", into = "SchemeConfig")]
pub struct SplitScheme {
    name: String,
    buckets: Vec<Bucket>,
}

impl SplitScheme {
    /// Creates a validated scheme.
    ///
    /// ## Errors
    /// - [`SchemeError::Empty`] if `buckets` is empty
    /// - [`SchemeError::DuplicateBucket`] on a repeated bucket name
    /// - [`SchemeError::OverAllocated`] if rates sum past 100%
    pub fn new(name: impl Into<String>, buckets: Vec<Bucket>) -> Result<Self, SchemeError> {
        let name = name.into();

        if buckets.is_empty() {
            return Err(SchemeError::Empty { scheme: name });
        }

        for (i, bucket) in buckets.iter().enumerate() {
            if buckets[..i].iter().any(|b| b.name == bucket.name) {
                return Err(SchemeError::DuplicateBucket {
                    scheme: name,
                    bucket: bucket.name.clone(),
                });
            }
        }

        let total_ppm: u64 = buckets.iter().map(|b| b.rate.ppm() as u64).sum();
        if total_ppm > PPM_FULL as u64 {
            return Err(SchemeError::OverAllocated {
                scheme: name,
                percent: total_ppm as f64 / 10_000.0,
            });
        }

        Ok(SplitScheme { name, buckets })
    }

    /// The original 3-way policy: 70% business fund, 20% employee share,
    /// 10% investor share.
    pub fn classic_v1() -> Self {
        Self::preset(
            "classic-v1",
            vec![
                Bucket::new("businessFund", Rate::from_percent(70.0), BucketRole::Production),
                Bucket::new("employeeShare", Rate::from_percent(20.0), BucketRole::Payroll),
                Bucket::new("investorShare", Rate::from_percent(10.0), BucketRole::Investor),
            ],
        )
    }

    /// The 4-way revision that introduced a savings bucket: 60/15/15/10.
    pub fn savings_v2() -> Self {
        Self::preset(
            "savings-v2",
            vec![
                Bucket::new("businessFund", Rate::from_percent(60.0), BucketRole::Production),
                Bucket::new("employeeShare", Rate::from_percent(15.0), BucketRole::Payroll),
                Bucket::new("investorShare", Rate::from_percent(15.0), BucketRole::Investor),
                Bucket::new("savings", Rate::from_percent(10.0), BucketRole::Savings),
            ],
        )
    }

    /// The current 6-way policy: 63 / 12 / 6.944 / 6.944 / 5.556 / 5.556.
    pub fn payroll_v3() -> Self {
        Self::preset(
            "payroll-v3",
            vec![
                Bucket::new("productionCost", Rate::from_percent(63.0), BucketRole::Production),
                Bucket::new("investorShare", Rate::from_percent(12.0), BucketRole::Investor),
                Bucket::new("salesPayroll", Rate::from_percent(6.944), BucketRole::Payroll),
                Bucket::new("packagingPayroll", Rate::from_percent(6.944), BucketRole::Payroll),
                Bucket::new("savings", Rate::from_percent(5.556), BucketRole::Savings),
                Bucket::new("reinvestment", Rate::from_percent(5.556), BucketRole::Reinvestment),
            ],
        )
    }

    /// Builds a preset that is valid by construction.
    fn preset(name: &str, buckets: Vec<Bucket>) -> Self {
        SplitScheme {
            name: name.to_string(),
            buckets,
        }
    }

    /// The scheme's name, recorded on every Sale built under it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered buckets.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Looks up a bucket by name.
    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Total allocated percentage (≤ 100 by construction).
    pub fn allocated_percent(&self) -> f64 {
        self.buckets
            .iter()
            .map(|b| b.rate.ppm() as u64)
            .sum::<u64>() as f64
            / 10_000.0
    }

    /// Partitions `total` across the scheme's buckets.
    ///
    /// ## Contract
    /// - Deterministic: no hidden state, no time dependency
    /// - `total == 0` yields every bucket at 0.00
    /// - Each amount is `round2(total * percent / 100)`; the sum never
    ///   exceeds `total` by more than accumulated per-bucket rounding
    pub fn split(&self, total: Money) -> Vec<BucketAmount> {
        self.buckets
            .iter()
            .map(|b| BucketAmount::new(b.name.clone(), total.allocate(b.rate)))
            .collect()
    }
}

/// Free-function form of [`SplitScheme::split`], the calculator entry point
/// consumed by the API layer.
pub fn compute_split(total: Money, scheme: &SplitScheme) -> Vec<BucketAmount> {
    scheme.split(total)
}

// =============================================================================
// Serde Bridge
// =============================================================================

/// Raw serde shape; conversion into `SplitScheme` re-runs validation so a
/// malformed configuration file is rejected at load time.
#[derive(Clone, Serialize, Deserialize)]
struct SchemeConfig {
    name: String,
    buckets: Vec<Bucket>,
}

impl TryFrom<SchemeConfig> for SplitScheme {
    type Error = SchemeError;

    fn try_from(config: SchemeConfig) -> Result<Self, Self::Error> {
        SplitScheme::new(config.name, config.buckets)
    }
}

impl From<SplitScheme> for SchemeConfig {
    fn from(scheme: SplitScheme) -> Self {
        SchemeConfig {
            name: scheme.name,
            buckets: scheme.buckets,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
