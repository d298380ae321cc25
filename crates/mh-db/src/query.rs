//! Predicate, sort and page composition for the meeting listing.
//!
//! Filters are collected as an explicit list of predicates first and
//! compiled into a single query afterwards, so no shared query value is
//! mutated while the filter set is still being decided.

use sqlx::{QueryBuilder, Sqlite};

/// One filter condition over the meeting listing.
///
/// Substring matches are case-insensitive; time bounds are millisecond epoch
/// instants applied to the meeting's start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingPredicate {
    StartsBefore(i64),
    StartsAfter(i64),
    StartsAtOrAfter(i64),
    CreatorEq(String),
    KindEq(String),
    NameContains(String),
    LocationContains(String),
    KindContains(String),
}

impl MeetingPredicate {
    /// Append this predicate to a query whose meetings table is aliased `m`.
    pub(crate) fn push_onto(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Self::StartsBefore(bound) => {
                builder.push(" AND m.start_time < ");
                builder.push_bind(*bound);
            }
            Self::StartsAfter(bound) => {
                builder.push(" AND m.start_time > ");
                builder.push_bind(*bound);
            }
            Self::StartsAtOrAfter(bound) => {
                builder.push(" AND m.start_time >= ");
                builder.push_bind(*bound);
            }
            Self::CreatorEq(creator) => {
                builder.push(" AND m.creator = ");
                builder.push_bind(creator.clone());
            }
            Self::KindEq(kind) => {
                builder.push(" AND m.kind = ");
                builder.push_bind(kind.clone());
            }
            Self::NameContains(value) => push_contains(builder, "m.name", value),
            Self::LocationContains(value) => push_contains(builder, "m.location", value),
            Self::KindContains(value) => push_contains(builder, "m.kind", value),
        }
    }
}

fn push_contains(builder: &mut QueryBuilder<'_, Sqlite>, column: &str, value: &str) {
    builder.push(format!(" AND {} LIKE ", column));
    builder.push_bind(format!("%{}%", escape_like(value)));
    builder.push(" ESCAPE '\\'");
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A resolved page request. Always 1-indexed with a bounded limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Resolve raw query-string values into a page request.
    ///
    /// Non-numeric or sub-1 values silently fall back to the defaults, and
    /// the limit is capped at `max_limit`.
    pub fn resolve(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let page = page
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|parsed| *parsed >= 1)
            .unwrap_or(1);

        let limit = limit
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|parsed| *parsed >= 1)
            .unwrap_or(default_limit)
            .min(max_limit);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

/// One page of results plus the metadata the listing endpoints return.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}
