//! Costs and cost policies
//!
//! A strategy's cost is the sum, over every target, of the policy's cost for
//! the attempt on which that target gets guessed. Infeasibility is a cost
//! value, not an error.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Total cost of a (sub)strategy
#[derive(Debug, Clone, Copy)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Self = Self(0.0);
    /// No strategy within the attempt budget solves every target
    pub const INFEASIBLE: Self = Self(f64::INFINITY);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_feasible(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_feasible() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "inf")
        }
    }
}

/// Errors from building or parsing a cost policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostPolicyError {
    #[error("cost table is empty")]
    EmptyTable,
    #[error("cost table decreases at attempt {attempt}")]
    Decreasing { attempt: usize },
    #[error("unknown cost policy '{0}' (use flat, penalized:FROM:PENALTY or table:W1,W2,...)")]
    Unknown(String),
    #[error("invalid number '{0}' in cost policy")]
    InvalidNumber(String),
}

/// Explicit per-attempt weights, validated non-decreasing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CostTable(Vec<u64>);

impl CostTable {
    /// # Errors
    /// Returns `CostPolicyError` if `weights` is empty or decreases anywhere.
    pub fn new(weights: Vec<u64>) -> Result<Self, CostPolicyError> {
        if weights.is_empty() {
            return Err(CostPolicyError::EmptyTable);
        }
        if let Some(position) = weights.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(CostPolicyError::Decreasing {
                attempt: position + 2,
            });
        }
        Ok(Self(weights))
    }

    #[must_use]
    pub fn weights(&self) -> &[u64] {
        &self.0
    }
}

/// How much solving a target on attempt `n` (1-based) costs
///
/// Policies are plain values so they can take part in cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CostPolicy {
    /// `n`: minimizes the total number of attempts
    #[default]
    Flat,
    /// `n`, plus `penalty` once `n ≥ from_attempt`
    Penalized { from_attempt: u32, penalty: u64 },
    /// `weights[n - 1]`; attempts past the table are not allowed
    Table(CostTable),
}

impl CostPolicy {
    /// Cost of solving one target on attempt `attempt`
    #[must_use]
    pub fn cost(&self, attempt: u32) -> Cost {
        match self {
            Self::Flat => Cost::new(f64::from(attempt)),
            Self::Penalized {
                from_attempt,
                penalty,
            } => {
                let extra = if attempt >= *from_attempt {
                    *penalty as f64
                } else {
                    0.0
                };
                Cost::new(f64::from(attempt) + extra)
            }
            Self::Table(table) => attempt
                .checked_sub(1)
                .and_then(|index| table.weights().get(index as usize))
                .map_or(Cost::INFEASIBLE, |&weight| Cost::new(weight as f64)),
        }
    }

    /// Cost of solving `count` targets one after another, the first on
    /// attempt `first_attempt`
    #[must_use]
    pub fn chain_cost(&self, first_attempt: u32, count: u32) -> Cost {
        (0..count).map(|i| self.cost(first_attempt + i)).sum()
    }
}

impl FromStr for CostPolicy {
    type Err = CostPolicyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_ascii_lowercase();
        let (name, args) = text.split_once(':').unwrap_or((text.as_str(), ""));

        match name {
            "flat" if args.is_empty() => Ok(Self::Flat),
            "penalized" => {
                let (from, penalty) = args
                    .split_once(':')
                    .ok_or_else(|| CostPolicyError::Unknown(text.clone()))?;
                Ok(Self::Penalized {
                    from_attempt: parse_number(from)?,
                    penalty: parse_number(penalty)?,
                })
            }
            "table" => {
                let weights = args
                    .split(',')
                    .filter(|w| !w.trim().is_empty())
                    .map(parse_number)
                    .collect::<Result<Vec<u64>, _>>()?;
                Ok(Self::Table(CostTable::new(weights)?))
            }
            _ => Err(CostPolicyError::Unknown(text.clone())),
        }
    }
}

impl fmt::Display for CostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Penalized {
                from_attempt,
                penalty,
            } => write!(f, "penalized:{from_attempt}:{penalty}"),
            Self::Table(table) => {
                let weights: Vec<String> = table.weights().iter().map(u64::to_string).collect();
                write!(f, "table:{}", weights.join(","))
            }
        }
    }
}

fn parse_number<T: FromStr>(text: &str) -> Result<T, CostPolicyError> {
    text.trim()
        .parse()
        .map_err(|_| CostPolicyError::InvalidNumber(text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn cost_ordering_puts_infeasible_last() {
        assert!(Cost::new(3.0) < Cost::new(4.0));
        assert!(Cost::new(1e9) < Cost::INFEASIBLE);
        assert_eq!(Cost::INFEASIBLE, Cost::INFEASIBLE);
        assert!(!(Cost::new(2.0) + Cost::INFEASIBLE).is_feasible());
        assert_eq!(Cost::INFEASIBLE.to_string(), "inf");
        assert_eq!(Cost::new(7.0).to_string(), "7");
    }

    #[test]
    fn flat_policy_counts_attempts() {
        let policy = CostPolicy::Flat;
        assert_eq!(policy.cost(1), Cost::new(1.0));
        assert_eq!(policy.cost(6), Cost::new(6.0));
        assert_eq!(policy.chain_cost(2, 3), Cost::new(2.0 + 3.0 + 4.0));
        assert_eq!(policy.chain_cost(2, 0), Cost::ZERO);
    }

    #[test]
    fn penalized_policy_kicks_in_at_threshold() {
        let policy = CostPolicy::Penalized {
            from_attempt: 4,
            penalty: 1_000_000,
        };
        assert_eq!(policy.cost(3), Cost::new(3.0));
        assert_eq!(policy.cost(4), Cost::new(1_000_004.0));
    }

    #[test]
    fn table_policy_rejects_attempts_past_the_end() {
        let policy = CostPolicy::Table(CostTable::new(vec![1, 2, 10]).unwrap());
        assert_eq!(policy.cost(3), Cost::new(10.0));
        assert!(!policy.cost(4).is_feasible());
        assert!(!policy.cost(0).is_feasible());
    }

    #[test]
    fn table_validation() {
        assert_eq!(CostTable::new(vec![]), Err(CostPolicyError::EmptyTable));
        assert_eq!(
            CostTable::new(vec![1, 3, 2]),
            Err(CostPolicyError::Decreasing { attempt: 3 })
        );
        assert!(CostTable::new(vec![1, 1, 5]).is_ok());
    }

    #[test_case("flat", CostPolicy::Flat ; "flat")]
    #[test_case(" FLAT ", CostPolicy::Flat ; "flat any case")]
    #[test_case("penalized:4:100", CostPolicy::Penalized { from_attempt: 4, penalty: 100 } ; "penalized")]
    fn policy_parses(text: &str, expected: CostPolicy) {
        assert_eq!(text.parse::<CostPolicy>().unwrap(), expected);
    }

    #[test]
    fn policy_parse_round_trips_through_display() {
        let table: CostPolicy = "table:1,2,3,10".parse().unwrap();
        assert_eq!(table.to_string(), "table:1,2,3,10");
        assert_eq!(table.to_string().parse::<CostPolicy>().unwrap(), table);
    }

    #[test]
    fn policy_parse_errors() {
        assert!(matches!(
            "linear".parse::<CostPolicy>(),
            Err(CostPolicyError::Unknown(_))
        ));
        assert!(matches!(
            "penalized:x:1".parse::<CostPolicy>(),
            Err(CostPolicyError::InvalidNumber(_))
        ));
        assert!(matches!(
            "table:3,2".parse::<CostPolicy>(),
            Err(CostPolicyError::Decreasing { attempt: 2 })
        ));
        assert!(matches!(
            "table:".parse::<CostPolicy>(),
            Err(CostPolicyError::EmptyTable)
        ));
    }
}
