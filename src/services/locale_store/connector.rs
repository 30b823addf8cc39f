use log::debug;

use super::model::SourceRow;
use super::store::LocaleStore;
use crate::db::{self, sql, ConnectorFactory, DatabaseConnector, Params, QueryResult, Scalar};
use crate::error::DatabaseError;
use crate::model::record::{FIELD_CONTEXT, FIELD_LOCATION, FIELD_SOURCE, FIELD_TEXTGROUP, FIELD_VERSION};

/// Hands out connectors bound to one JSON store file.
#[derive(Debug, Clone)]
pub struct JsonStoreFactory {
    store: LocaleStore,
}

impl JsonStoreFactory {
    pub fn new(store: LocaleStore) -> Self {
        JsonStoreFactory { store }
    }
}

impl ConnectorFactory for JsonStoreFactory {
    fn database_connector(&self) -> Result<Box<dyn DatabaseConnector>, DatabaseError> {
        if self.store.path().is_dir() {
            return Err(DatabaseError::Connection(format!(
                "{} is a directory",
                self.store.path().display()
            )));
        }

        Ok(Box::new(JsonStoreConnector {
            store: self.store.clone(),
        }))
    }
}

/// Executes the statements in [`db::sql`] against a [`LocaleStore`].
#[derive(Debug)]
pub struct JsonStoreConnector {
    store: LocaleStore,
}

impl DatabaseConnector for JsonStoreConnector {
    fn query(&self, raw: &str, params: &Params) -> Result<Box<dyn QueryResult>, DatabaseError> {
        let statement = db::canonical(raw);
        db::check_bindings(&statement, params)?;

        debug!("{} <- {statement} {params:?}", self.store.path().display());

        let value = match statement.as_str() {
            sql::SELECT_LID_BY_SOURCE => {
                let source = text_param(params, FIELD_SOURCE)?;
                self.store
                    .find_lid(&source)?
                    .map(Scalar::Int)
                    .unwrap_or(Scalar::False)
            }
            sql::INSERT_SOURCE => {
                let row = SourceRow {
                    lid: 0,
                    location: optional_text_param(params, FIELD_LOCATION)?,
                    textgroup: text_param(params, FIELD_TEXTGROUP)?,
                    source: text_param(params, FIELD_SOURCE)?,
                    context: text_param(params, FIELD_CONTEXT)?,
                    version: text_param(params, FIELD_VERSION)?,
                    hash: String::new(),
                };
                Scalar::Int(self.store.insert(row)?)
            }
            _ => return Err(DatabaseError::UnsupportedStatement(statement)),
        };

        Ok(Box::new(ScalarResult { value: Some(value) }))
    }
}

/// Single-value cursor; exhausted after the first fetch.
#[derive(Debug)]
struct ScalarResult {
    value: Option<Scalar>,
}

impl QueryResult for ScalarResult {
    fn fetch_scalar(&mut self) -> Result<Scalar, DatabaseError> {
        Ok(self.value.take().unwrap_or(Scalar::False))
    }
}

fn text_param(params: &Params, name: &str) -> Result<String, DatabaseError> {
    match params.get(name) {
        Some(Scalar::Text(s)) => Ok(s.clone()),
        Some(_) => Err(DatabaseError::InvalidParameter(name.to_string())),
        None => Err(DatabaseError::MissingParameter(name.to_string())),
    }
}

fn optional_text_param(params: &Params, name: &str) -> Result<Option<String>, DatabaseError> {
    match params.get(name) {
        Some(Scalar::Null) => Ok(None),
        _ => text_param(params, name).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::locale_store::store::STORE_FILE;
    use tempfile::TempDir;

    fn factory_in(dir: &TempDir) -> JsonStoreFactory {
        JsonStoreFactory::new(LocaleStore::new(dir.path().join(STORE_FILE)))
    }

    fn source_params(source: Scalar) -> Params {
        let mut p = Params::new();
        p.insert("source".into(), source);
        p
    }

    fn fetch(factory: &JsonStoreFactory, raw: &str, params: &Params) -> Result<Scalar, DatabaseError> {
        factory.database_connector()?.query(raw, params)?.fetch_scalar()
    }

    #[test]
    fn lookup_on_empty_store_returns_false_sentinel() {
        let dir = TempDir::new().expect("temp dir");
        let got = fetch(&factory_in(&dir), sql::SELECT_LID_BY_SOURCE, &source_params("tux".into()));
        assert_eq!(got, Ok(Scalar::False));
    }

    #[test]
    fn insert_then_lookup_returns_lid() {
        let dir = TempDir::new().expect("temp dir");
        let factory = factory_in(&dir);

        let mut p = Params::new();
        p.insert("location".into(), Scalar::Null);
        p.insert("textgroup".into(), "default".into());
        p.insert("source".into(), "tux".into());
        p.insert("context".into(), "".into());
        p.insert("version".into(), "none".into());

        assert_eq!(fetch(&factory, sql::INSERT_SOURCE, &p), Ok(Scalar::Int(1)));
        assert_eq!(
            fetch(&factory, sql::SELECT_LID_BY_SOURCE, &source_params("tux".into())),
            Ok(Scalar::Int(1))
        );
    }

    #[test]
    fn statement_layout_does_not_matter() {
        let dir = TempDir::new().expect("temp dir");
        let raw = "SELECT lid\n  FROM {locales_source}\n  WHERE source = :source";
        assert_eq!(
            fetch(&factory_in(&dir), raw, &source_params("tux".into())),
            Ok(Scalar::False)
        );
    }

    #[test]
    fn directory_store_path_refuses_connection() {
        let dir = TempDir::new().expect("temp dir");
        let factory = JsonStoreFactory::new(LocaleStore::new(dir.path()));
        assert!(matches!(
            factory.database_connector(),
            Err(DatabaseError::Connection(_))
        ));
    }

    #[test]
    fn unknown_statement_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let got = fetch(&factory_in(&dir), "DELETE FROM {locales_source}", &Params::new());
        assert!(matches!(got, Err(DatabaseError::UnsupportedStatement(_))));
    }

    #[test]
    fn non_text_source_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let got = fetch(&factory_in(&dir), sql::SELECT_LID_BY_SOURCE, &source_params(Scalar::Int(3)));
        assert_eq!(got, Err(DatabaseError::InvalidParameter("source".into())));
    }

    #[test]
    fn result_is_exhausted_after_one_fetch() {
        let dir = TempDir::new().expect("temp dir");
        let factory = factory_in(&dir);
        let connector = factory.database_connector().expect("connector");
        let mut result = connector
            .query(sql::SELECT_LID_BY_SOURCE, &source_params("tux".into()))
            .expect("query");

        assert_eq!(result.fetch_scalar(), Ok(Scalar::False));
        assert_eq!(result.fetch_scalar(), Ok(Scalar::False));
    }

    #[test]
    fn exists_and_add_work_against_the_store() {
        use crate::services::source::{add_source, source_exists, AddOutcome};
        use std::collections::HashMap;

        let dir = TempDir::new().expect("temp dir");
        let factory = factory_in(&dir);

        let mut input = HashMap::new();
        input.insert("source".to_string(), "tux".to_string());
        input.insert("location".to_string(), "modules/tux.module".to_string());

        assert_eq!(source_exists("tux", &factory), Ok(false));
        assert_eq!(add_source(&input, &factory), Ok(AddOutcome::Created { lid: 1 }));
        assert_eq!(source_exists("tux", &factory), Ok(true));
        assert_eq!(add_source(&input, &factory), Ok(AddOutcome::AlreadyExists));

        let rows = LocaleStore::new(dir.path().join(STORE_FILE)).load().expect("load");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location.as_deref(), Some("modules/tux.module"));
        assert_eq!(rows[0].version, "none");
    }
}
