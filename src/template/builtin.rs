//! Built-in rule set.
//!
//! One entry per operation: arity, fallback, and the dialects that need
//! something other than the fallback. Adding a dialect means adding a row,
//! never editing an existing renderer.

use crate::dialect::Dialect;

/// Operation names understood by the built-in registry.
pub mod ops {
    /// `[amount]` - integer cents to a two-decimal amount.
    pub const CENTS_TO_DOLLARS: &str = "cents-to-dollars";
    /// `[unit, expression]`
    pub const DATE_TRUNCATE: &str = "date-truncate";
    /// `[unit, count, expression]`
    pub const DATE_ADD: &str = "date-add";
    /// `[unit, start, end]`
    pub const DATE_DIFF: &str = "date-diff";
    /// `[numerator, denominator]` - NULL instead of a division-by-zero error.
    pub const SAFE_DIVIDE: &str = "safe-divide";
    /// `[left, right]`
    pub const CONCAT: &str = "concat";
    pub const CURRENT_TIMESTAMP: &str = "current-timestamp";
    /// `[expression]` - hex MD5 of the expression cast to text.
    pub const HASH: &str = "hash";
}

pub(super) type RenderFn = fn(&[&str]) -> String;

pub(super) struct OperationSpec {
    pub name: &'static str,
    pub arity: usize,
    pub fallback: RenderFn,
    pub dialects: &'static [(Dialect, RenderFn)],
}

pub(super) static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: ops::CENTS_TO_DOLLARS,
        arity: 1,
        fallback: cents_to_dollars_fallback,
        dialects: &[
            (Dialect::BigQuery, cents_to_dollars_bigquery),
            (Dialect::Postgres, cents_to_dollars_postgres),
            (Dialect::SqlServer, cents_to_dollars_sqlserver),
        ],
    },
    OperationSpec {
        name: ops::DATE_TRUNCATE,
        arity: 2,
        fallback: date_truncate_fallback,
        dialects: &[(Dialect::BigQuery, date_truncate_bigquery)],
    },
    OperationSpec {
        name: ops::DATE_ADD,
        arity: 3,
        fallback: date_add_fallback,
        dialects: &[
            (Dialect::BigQuery, date_add_bigquery),
            (Dialect::Postgres, date_add_postgres),
            (Dialect::SqlServer, date_add_fallback),
        ],
    },
    OperationSpec {
        name: ops::DATE_DIFF,
        arity: 3,
        fallback: date_diff_fallback,
        dialects: &[
            (Dialect::BigQuery, date_diff_bigquery),
            (Dialect::Postgres, date_diff_postgres),
        ],
    },
    OperationSpec {
        name: ops::SAFE_DIVIDE,
        arity: 2,
        fallback: safe_divide_fallback,
        dialects: &[(Dialect::BigQuery, safe_divide_bigquery)],
    },
    OperationSpec {
        name: ops::CONCAT,
        arity: 2,
        fallback: concat_fallback,
        dialects: &[(Dialect::SqlServer, concat_sqlserver)],
    },
    OperationSpec {
        name: ops::CURRENT_TIMESTAMP,
        arity: 0,
        fallback: current_timestamp_fallback,
        dialects: &[
            (Dialect::BigQuery, current_timestamp_bigquery),
            (Dialect::SqlServer, current_timestamp_sqlserver),
        ],
    },
    OperationSpec {
        name: ops::HASH,
        arity: 1,
        fallback: hash_fallback,
        dialects: &[
            (Dialect::BigQuery, hash_bigquery),
            (Dialect::SqlServer, hash_sqlserver),
            (Dialect::Databricks, hash_databricks),
        ],
    },
];

// =============================================================================
// Currency
// =============================================================================

fn cents_to_dollars_bigquery(o: &[&str]) -> String {
    format!("round(cast(({} / 100) as numeric), 2)", o[0])
}

fn cents_to_dollars_postgres(o: &[&str]) -> String {
    format!("({}::numeric(16,2) / 100)", o[0])
}

fn cents_to_dollars_sqlserver(o: &[&str]) -> String {
    format!("cast({} / 100 as numeric(16,2))", o[0])
}

fn cents_to_dollars_fallback(o: &[&str]) -> String {
    format!("({} / 100)::numeric(16,2)", o[0])
}

// =============================================================================
// Date/Time
// =============================================================================

// BigQuery takes date parts as bare keywords, everyone else as quoted strings
// or lower-case keywords.

fn date_truncate_bigquery(o: &[&str]) -> String {
    format!("DATE_TRUNC({}, {})", o[1], o[0].to_uppercase())
}

fn date_truncate_fallback(o: &[&str]) -> String {
    format!("DATE_TRUNC('{}', {})", o[0].to_lowercase(), o[1])
}

fn date_add_bigquery(o: &[&str]) -> String {
    format!("DATE_ADD({}, INTERVAL {} {})", o[2], o[1], o[0].to_uppercase())
}

fn date_add_postgres(o: &[&str]) -> String {
    format!("({} + ({} * INTERVAL '1 {}'))", o[2], o[1], o[0].to_lowercase())
}

fn date_add_fallback(o: &[&str]) -> String {
    format!("DATEADD({}, {}, {})", o[0].to_lowercase(), o[1], o[2])
}

fn date_diff_bigquery(o: &[&str]) -> String {
    format!("DATE_DIFF({}, {}, {})", o[2], o[1], o[0].to_uppercase())
}

fn date_diff_postgres(o: &[&str]) -> String {
    let unit = o[0].to_lowercase();
    if unit == "day" {
        format!("(({})::date - ({})::date)", o[2], o[1])
    } else {
        format!(
            "DATE_PART('{}', AGE(({})::timestamp, ({})::timestamp))",
            unit, o[2], o[1]
        )
    }
}

fn date_diff_fallback(o: &[&str]) -> String {
    format!("DATEDIFF({}, {}, {})", o[0].to_lowercase(), o[1], o[2])
}

fn current_timestamp_bigquery(_: &[&str]) -> String {
    "CURRENT_TIMESTAMP()".to_string()
}

fn current_timestamp_sqlserver(_: &[&str]) -> String {
    "GETDATE()".to_string()
}

fn current_timestamp_fallback(_: &[&str]) -> String {
    "CURRENT_TIMESTAMP".to_string()
}

// =============================================================================
// Arithmetic / String
// =============================================================================

fn safe_divide_bigquery(o: &[&str]) -> String {
    format!("SAFE_DIVIDE({}, {})", o[0], o[1])
}

fn safe_divide_fallback(o: &[&str]) -> String {
    format!("({} / NULLIF({}, 0))", o[0], o[1])
}

fn concat_sqlserver(o: &[&str]) -> String {
    format!("CONCAT({}, {})", o[0], o[1])
}

fn concat_fallback(o: &[&str]) -> String {
    format!("({} || {})", o[0], o[1])
}

fn hash_bigquery(o: &[&str]) -> String {
    format!("TO_HEX(MD5(CAST({} AS STRING)))", o[0])
}

fn hash_sqlserver(o: &[&str]) -> String {
    format!(
        "CONVERT(VARCHAR(32), HASHBYTES('MD5', CAST({} AS VARCHAR(MAX))), 2)",
        o[0]
    )
}

fn hash_databricks(o: &[&str]) -> String {
    format!("MD5(CAST({} AS STRING))", o[0])
}

fn hash_fallback(o: &[&str]) -> String {
    format!("MD5(CAST({} AS VARCHAR))", o[0])
}
