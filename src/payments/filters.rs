//! List filters and their query-string encoding
//!
//! The gateway's query grammar has two shapes: `key=value` for plain filters
//! and `key.mode=value` for range filters such as `created_at.gte=...`. Entries
//! are emitted in field declaration order and values are sent unencoded.

use crate::payments::types::{PaymentStatus, ReceiptStatus, RefundStatus};
use chrono::{DateTime, SecondsFormat, Utc};

/// Comparison applied by a range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    Gte,
    Gt,
    Lte,
    Lt,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gte => "gte",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Lt => "lt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter {
    pub mode: RangeMode,
    pub value: String,
}

impl RangeFilter {
    pub fn new(mode: RangeMode, value: impl Into<String>) -> Self {
        Self {
            mode,
            value: value.into(),
        }
    }

    pub fn gte(value: impl Into<String>) -> Self {
        Self::new(RangeMode::Gte, value)
    }

    pub fn gt(value: impl Into<String>) -> Self {
        Self::new(RangeMode::Gt, value)
    }

    pub fn lte(value: impl Into<String>) -> Self {
        Self::new(RangeMode::Lte, value)
    }

    pub fn lt(value: impl Into<String>) -> Self {
        Self::new(RangeMode::Lt, value)
    }

    /// Range bound on a timestamp, rendered as RFC 3339 with a `Z` suffix
    pub fn at(mode: RangeMode, timestamp: DateTime<Utc>) -> Self {
        Self::new(mode, timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// A single filter value, plain or ranged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Plain(String),
    Range(RangeFilter),
}

/// Filters that can be rendered into a list endpoint's query string
pub trait QueryFilter {
    /// Set entries in emission order
    fn entries(&self) -> Vec<(&'static str, FilterValue)>;
}

/// Render filters as `?a=1&b.gte=2`, or an empty string when nothing is set.
pub fn build_query<F: QueryFilter + ?Sized>(filter: Option<&F>) -> String {
    let entries = match filter {
        Some(filter) => filter.entries(),
        None => return String::new(),
    };
    if entries.is_empty() {
        return String::new();
    }

    let pairs: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| match value {
            FilterValue::Range(range) if !range.value.is_empty() => {
                format!("{}.{}={}", key, range.mode.as_str(), range.value)
            }
            FilterValue::Range(range) => format!("{}={}", key, range.value),
            FilterValue::Plain(value) => format!("{}={}", key, value),
        })
        .collect();

    format!("?{}", pairs.join("&"))
}

fn push_range(
    entries: &mut Vec<(&'static str, FilterValue)>,
    key: &'static str,
    range: &Option<RangeFilter>,
) {
    if let Some(range) = range {
        entries.push((key, FilterValue::Range(range.clone())));
    }
}

fn push_plain<V: ToString>(
    entries: &mut Vec<(&'static str, FilterValue)>,
    key: &'static str,
    value: &Option<V>,
) {
    if let Some(value) = value {
        entries.push((key, FilterValue::Plain(value.to_string())));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentListFilter {
    pub created_at: Option<RangeFilter>,
    pub captured_at: Option<RangeFilter>,
    pub payment_method: Option<String>,
    pub status: Option<PaymentStatus>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl QueryFilter for PaymentListFilter {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        let mut entries = Vec::new();
        push_range(&mut entries, "created_at", &self.created_at);
        push_range(&mut entries, "captured_at", &self.captured_at);
        push_plain(&mut entries, "payment_method", &self.payment_method);
        push_plain(&mut entries, "status", &self.status.map(|s| s.as_str()));
        push_plain(&mut entries, "limit", &self.limit);
        push_plain(&mut entries, "cursor", &self.cursor);
        entries
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundListFilter {
    pub created_at: Option<RangeFilter>,
    pub payment_id: Option<String>,
    pub status: Option<RefundStatus>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl QueryFilter for RefundListFilter {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        let mut entries = Vec::new();
        push_range(&mut entries, "created_at", &self.created_at);
        push_plain(&mut entries, "payment_id", &self.payment_id);
        push_plain(&mut entries, "status", &self.status.map(|s| s.as_str()));
        push_plain(&mut entries, "limit", &self.limit);
        push_plain(&mut entries, "cursor", &self.cursor);
        entries
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptListFilter {
    pub created_at: Option<RangeFilter>,
    pub status: Option<ReceiptStatus>,
    pub payment_id: Option<String>,
    pub refund_id: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl QueryFilter for ReceiptListFilter {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        let mut entries = Vec::new();
        push_range(&mut entries, "created_at", &self.created_at);
        push_plain(&mut entries, "status", &self.status.map(|s| s.as_str()));
        push_plain(&mut entries, "payment_id", &self.payment_id);
        push_plain(&mut entries, "refund_id", &self.refund_id);
        push_plain(&mut entries, "limit", &self.limit);
        push_plain(&mut entries, "cursor", &self.cursor);
        entries
    }
}
