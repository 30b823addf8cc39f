//! Data-access seam.
//!
//! The core never talks to a database directly: callers hand it a
//! [`ConnectorFactory`], which produces a [`DatabaseConnector`] per call.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DatabaseError;

pub mod sql;

/// A single column value, either returned by a query or bound as a parameter.
///
/// `False` is the "no row" sentinel returned by `fetch_scalar`. It is distinct
/// from `Int(0)`, which is a found row whose identifier happens to be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    False,
    Null,
    Int(i64),
    Text(String),
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<Option<String>> for Scalar {
    fn from(v: Option<String>) -> Self {
        v.map(Scalar::Text).unwrap_or(Scalar::Null)
    }
}

/// Named parameters, keyed without the leading `:`.
pub type Params = BTreeMap<String, Scalar>;

#[cfg_attr(test, mockall::automock)]
pub trait QueryResult {
    fn fetch_scalar(&mut self) -> Result<Scalar, DatabaseError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait DatabaseConnector {
    fn query(&self, sql: &str, params: &Params) -> Result<Box<dyn QueryResult>, DatabaseError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ConnectorFactory {
    fn database_connector(&self) -> Result<Box<dyn DatabaseConnector>, DatabaseError>;
}

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern"));

/// Names of the `:name` placeholders in `sql`, in order of first appearance.
pub fn placeholders(sql: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(sql) {
        let name = caps[1].to_string();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Checks that `params` binds exactly the placeholders used by `sql`.
pub fn check_bindings(sql: &str, params: &Params) -> Result<(), DatabaseError> {
    let names = placeholders(sql);

    if let Some(missing) = names.iter().find(|n| !params.contains_key(n.as_str())) {
        return Err(DatabaseError::MissingParameter(missing.clone()));
    }

    if let Some(unused) = params.keys().find(|k| !names.contains(k)) {
        return Err(DatabaseError::UnusedParameter(unused.clone()));
    }

    Ok(())
}

/// Collapses runs of whitespace so statements compare independent of layout.
pub fn canonical(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
