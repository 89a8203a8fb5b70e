//! List-endpoint parameters: pagination, sorting, and equality filters.
//!
//! Callers hand in untrusted strings (query parameters, gRPC fields). They are
//! resolved against a static per-entity [`FieldSpec`] table, so the only
//! identifiers that ever reach SQL are the `&'static str` names in that table.
//! Values stay typed ([`FieldValue`]) and are bound as query parameters.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page size used when the caller omits `limit` or sends garbage.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Largest page a caller can ask for.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Default sort column.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Field tables
// ---------------------------------------------------------------------------

/// Column type, used to parse filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Text,
    Bool,
    /// RFC 3339 timestamp.
    Timestamp,
}

/// One allow-listed column of a listable entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub sortable: bool,
    pub filterable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            sortable: true,
            filterable: true,
        }
    }
}

/// A typed column value, either parsed from a filter or read off a record.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

impl FieldValue {
    /// Parse a raw string as the given column kind.
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Int => raw.trim().parse().ok().map(FieldValue::Int),
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Bool => raw.trim().parse().ok().map(FieldValue::Bool),
            FieldKind::Timestamp => chrono::DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| FieldValue::Timestamp(dt.with_timezone(&Utc))),
        }
    }
}

/// Records that can be filtered and sorted in memory with the same field
/// table the SQL builder uses.
pub trait Listable {
    /// Allow-listed columns for this entity.
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> DbId;

    /// Current value of an allow-listed column, `None` for unknown names.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive `asc` / `desc`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw request
// ---------------------------------------------------------------------------

/// Untrusted list parameters as they arrive from a transport.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListRequest {
    /// Split query-string pairs into pagination, sort, and filter parts.
    ///
    /// `offset` and `limit` that fail to parse are dropped silently and the
    /// defaults apply. Empty `sort_by` / `sort_order` count as absent.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = ListRequest::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "offset" => request.offset = value.trim().parse().ok(),
                "limit" => request.limit = value.trim().parse().ok(),
                "sort_by" => request.sort_by = non_empty(value),
                "sort_order" => request.sort_order = non_empty(value),
                _ => {
                    request.filters.insert(key.to_string(), value.to_string());
                }
            }
        }
        request
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Validated query
// ---------------------------------------------------------------------------

/// An equality filter on an allow-listed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: FieldValue,
}

/// A list request resolved against an entity's field table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub offset: i64,
    pub limit: i64,
    pub sort_by: &'static str,
    pub direction: SortDirection,
    pub filters: Vec<Filter>,
}

impl ListQuery {
    /// Resolve `request` against `fields`.
    ///
    /// Unknown sort or filter fields, unknown directions, and filter values
    /// that do not parse as the column type are validation errors.
    pub fn parse(request: &ListRequest, fields: &'static [FieldSpec]) -> Result<Self, CoreError> {
        let sort_name = request.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let sort_by = fields
            .iter()
            .find(|f| f.sortable && f.name == sort_name)
            .map(|f| f.name)
            .ok_or_else(|| CoreError::Validation(format!("unknown sort field '{sort_name}'")))?;

        let direction = match request.sort_order.as_deref() {
            None => SortDirection::Asc,
            Some(raw) => SortDirection::parse(raw).ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid sort order '{raw}' (expected asc or desc)"
                ))
            })?,
        };

        let mut filters = Vec::with_capacity(request.filters.len());
        for (key, raw) in &request.filters {
            let spec = fields
                .iter()
                .find(|f| f.filterable && f.name == key.as_str())
                .ok_or_else(|| CoreError::Validation(format!("unknown filter field '{key}'")))?;
            let value = FieldValue::parse(spec.kind, raw).ok_or_else(|| {
                CoreError::Validation(format!("invalid value '{raw}' for filter '{key}'"))
            })?;
            filters.push(Filter {
                field: spec.name,
                value,
            });
        }

        Ok(Self {
            offset: clamp_offset(request.offset),
            limit: clamp_limit(request.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            sort_by,
            direction,
            filters,
        })
    }

    /// Whether `record` satisfies every filter.
    pub fn matches<R: Listable>(&self, record: &R) -> bool {
        self.filters
            .iter()
            .all(|f| record.field_value(f.field).as_ref() == Some(&f.value))
    }

    /// Filter, sort, and paginate records in memory.
    ///
    /// Ordering matches the SQL builder: the sort column first, then `id`
    /// ascending as a tiebreaker.
    pub fn apply<R: Listable>(&self, records: impl IntoIterator<Item = R>) -> Vec<R> {
        let mut rows: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();
        rows.sort_by(|a, b| {
            let primary = a
                .field_value(self.sort_by)
                .partial_cmp(&b.field_value(self.sort_by))
                .unwrap_or(Ordering::Equal);
            let primary = match self.direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id().cmp(&b.id()))
        });
        rows.into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(0))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
