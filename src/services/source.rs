use std::collections::HashMap;

use log::debug;

use crate::db::{sql, ConnectorFactory, Params, Scalar};
use crate::error::{CoreError, DatabaseError};
use crate::model::record::{
    TranslationRecord, FIELD_CONTEXT, FIELD_LOCATION, FIELD_SOURCE, FIELD_TEXTGROUP,
    FIELD_VERSION,
};
use crate::services::fieldset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created { lid: i64 },
    AlreadyExists,
}

/// Reports whether `source` already has a row in `locales_source`.
///
/// Only the `False` sentinel means "no row"; a `lid` of zero or below is
/// still a found row. Errors from the factory or connector are returned
/// unchanged.
pub fn source_exists<F>(source: &str, factory: &F) -> Result<bool, DatabaseError>
where
    F: ConnectorFactory + ?Sized,
{
    let connector = factory.database_connector()?;

    let mut params = Params::new();
    params.insert(FIELD_SOURCE.to_string(), Scalar::from(source));

    let mut result = connector.query(sql::SELECT_LID_BY_SOURCE, &params)?;
    let lid = result.fetch_scalar()?;

    debug!("source lookup {source:?} -> {lid:?}");

    Ok(lid != Scalar::False)
}

/// Registers a new source unless one with the same string already exists.
pub fn add_source<F>(input: &HashMap<String, String>, factory: &F) -> Result<AddOutcome, CoreError>
where
    F: ConnectorFactory + ?Sized,
{
    let record = fieldset::init_fieldset(input)?;

    if source_exists(&record.source, factory)? {
        return Ok(AddOutcome::AlreadyExists);
    }

    let connector = factory.database_connector()?;
    let mut result = connector.query(sql::INSERT_SOURCE, &insert_params(&record))?;

    let lid = match result.fetch_scalar()? {
        Scalar::Int(lid) => lid,
        other => {
            return Err(DatabaseError::UnexpectedResult(format!(
                "insert returned {other:?} instead of a lid"
            ))
            .into())
        }
    };

    debug!("registered source {:?} as lid {lid}", record.source);

    Ok(AddOutcome::Created { lid })
}

fn insert_params(record: &TranslationRecord) -> Params {
    let mut params = Params::new();
    params.insert(FIELD_LOCATION.to_string(), Scalar::from(record.location.clone()));
    params.insert(FIELD_TEXTGROUP.to_string(), Scalar::from(record.textgroup.as_str()));
    params.insert(FIELD_SOURCE.to_string(), Scalar::from(record.source.as_str()));
    params.insert(FIELD_CONTEXT.to_string(), Scalar::from(record.context.as_str()));
    params.insert(FIELD_VERSION.to_string(), Scalar::from(record.version.as_str()));
    params
}
