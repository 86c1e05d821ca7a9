//! Metrics snapshot: the fixed set of forecast numbers shown on the page.
//!
//! The snapshot is built once at startup and never mutated afterwards. The
//! layout looks keys up by name; a lookup for an absent key is a hard error.

use crate::error::{CoreError, CoreResult};
use crate::format::{group_decimal, group_thousands, plain_decimal};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of a quantity in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey(&'static str);

impl MetricKey {
    /// Employed workforce at the start of the forecast window
    pub const INITIAL_WORKFORCE: Self = Self("initial_workforce");
    /// Projected workforce at the end of the forecast window
    pub const FINAL_WORKFORCE: Self = Self("final_workforce");
    /// Shortage projected for 2030
    pub const PROJECTED_SHORTAGE_2030: Self = Self("projected_shortage_2030");
    /// Average number of positions left vacant per month
    pub const AVG_MONTHLY_SHORTAGE: Self = Self("avg_monthly_shortage");
    /// Unfilled positions summed over the forecast window
    pub const TOTAL_CUMULATIVE_SHORTAGE: Self = Self("total_cumulative_shortage");
    /// Training capacity multiplier that closes the gap
    pub const TRAINING_MULTIPLIER_NEEDED: Self = Self("training_multiplier_needed");
    /// Mobility inflow multiplier that closes the gap
    pub const MOBILITY_MULTIPLIER_NEEDED: Self = Self("mobility_multiplier_needed");

    /// Every known key, in display order
    pub const ALL: [Self; 7] = [
        Self::INITIAL_WORKFORCE,
        Self::FINAL_WORKFORCE,
        Self::PROJECTED_SHORTAGE_2030,
        Self::AVG_MONTHLY_SHORTAGE,
        Self::TOTAL_CUMULATIVE_SHORTAGE,
        Self::TRAINING_MULTIPLIER_NEEDED,
        Self::MOBILITY_MULTIPLIER_NEEDED,
    ];

    /// Get the key as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single numeric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Whole count (workers, positions)
    Integer(i64),
    /// Ratio or multiplier
    Decimal(f64),
}

impl MetricValue {
    /// Display with comma thousands separators (`4,555`)
    #[must_use]
    pub fn grouped(&self) -> String {
        match self {
            Self::Integer(n) => group_thousands(*n),
            Self::Decimal(x) => group_decimal(*x),
        }
    }

    /// Display without grouping (`2.84`, `21`)
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Decimal(x) => plain_decimal(*x),
        }
    }

    fn check(&self, key: &str) -> CoreResult<()> {
        match self {
            Self::Decimal(x) if !x.is_finite() => Err(CoreError::InvalidMetric {
                key: key.to_string(),
                reason: format!("value {} is not finite", x),
            }),
            _ => Ok(()),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for MetricValue {
    fn from(x: f64) -> Self {
        Self::Decimal(x)
    }
}

static BUILT_IN: Lazy<MetricsSnapshot> = Lazy::new(|| {
    MetricsSnapshot::from_pairs([
        (MetricKey::INITIAL_WORKFORCE.as_str(), MetricValue::Integer(4555)),
        (MetricKey::FINAL_WORKFORCE.as_str(), MetricValue::Integer(5071)),
        (MetricKey::PROJECTED_SHORTAGE_2030.as_str(), MetricValue::Integer(847)),
        (MetricKey::AVG_MONTHLY_SHORTAGE.as_str(), MetricValue::Integer(21)),
        (MetricKey::TOTAL_CUMULATIVE_SHORTAGE.as_str(), MetricValue::Integer(1513)),
        (MetricKey::TRAINING_MULTIPLIER_NEEDED.as_str(), MetricValue::Decimal(2.84)),
        (MetricKey::MOBILITY_MULTIPLIER_NEEDED.as_str(), MetricValue::Decimal(3.21)),
    ])
});

/// Immutable mapping from metric names to values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsSnapshot {
    values: IndexMap<String, MetricValue>,
}

impl MetricsSnapshot {
    /// The forecast results published with the dashboard
    #[must_use]
    pub fn built_in() -> Self {
        BUILT_IN.clone()
    }

    /// Create from key/value pairs, keeping insertion order
    #[must_use]
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MetricValue)>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parse a JSON object of `name -> number`
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a value is not a finite number
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        for (key, value) in &snapshot.values {
            value.check(key)?;
        }
        Ok(snapshot)
    }

    /// Load a JSON snapshot from disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, &e))?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            metrics = snapshot.len(),
            "loaded metrics snapshot"
        );
        Ok(snapshot)
    }

    /// Return a copy with one value replaced or added
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Return a copy with one key removed
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.values.shift_remove(key);
        self
    }

    /// Look up a metric
    ///
    /// # Errors
    ///
    /// Returns `MissingMetric` if the key is absent
    pub fn get(&self, key: &str) -> CoreResult<&MetricValue> {
        self.values.get(key).ok_or_else(|| CoreError::MissingMetric {
            key: key.to_string(),
        })
    }

    /// Look up a well-known metric
    ///
    /// # Errors
    ///
    /// Returns `MissingMetric` if the key is absent
    pub fn metric(&self, key: MetricKey) -> CoreResult<&MetricValue> {
        self.get(key.as_str())
    }

    /// Check that every key is present
    ///
    /// # Errors
    ///
    /// Returns `MissingMetric` for the first absent key
    pub fn require_all<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> CoreResult<()> {
        for key in keys {
            self.get(key)?;
        }
        Ok(())
    }

    /// Check if a key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of metrics
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
