//! Dynamic `SELECT` builder for list endpoints.
//!
//! Only column names from the entity's allow-listed field table ever reach
//! the SQL text; filter values, limit and offset are always bound.

use roomdesk_core::listing::{FieldValue, ListQuery, DEFAULT_SORT_FIELD};
use sqlx::{Postgres, QueryBuilder};

/// Build `SELECT <columns> FROM <table> [WHERE ...] ORDER BY ... LIMIT $n OFFSET $m`.
///
/// Non-id sorts get `id ASC` appended so pagination is stable.
pub fn build_list_query(
    table: &'static str,
    columns: &'static str,
    query: &ListQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {columns} FROM {table}"));

    for (i, filter) in query.filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(filter.field);
        qb.push(" = ");
        match &filter.value {
            FieldValue::Int(v) => qb.push_bind(*v),
            FieldValue::Text(v) => qb.push_bind(v.clone()),
            FieldValue::Bool(v) => qb.push_bind(*v),
            FieldValue::Timestamp(v) => qb.push_bind(*v),
        };
    }

    qb.push(" ORDER BY ");
    qb.push(query.sort_by);
    qb.push(" ");
    qb.push(query.direction.as_sql());
    if query.sort_by != DEFAULT_SORT_FIELD {
        qb.push(", id ASC");
    }

    qb.push(" LIMIT ");
    qb.push_bind(query.limit);
    qb.push(" OFFSET ");
    qb.push_bind(query.offset);
    qb
}
