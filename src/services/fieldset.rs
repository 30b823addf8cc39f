use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::record::{
    default_textgroup, default_version, TranslationRecord, FIELD_CONTEXT, FIELD_LOCATION,
    FIELD_SOURCE, FIELD_TEXTGROUP, FIELD_VERSION,
};

/// Builds a complete [`TranslationRecord`] from a partial fieldset.
///
/// Missing optional fields receive their defaults; present values are copied
/// as-is, without any format checks. `source` is the only required key.
pub fn init_fieldset(input: &HashMap<String, String>) -> Result<TranslationRecord, CoreError> {
    let source = input
        .get(FIELD_SOURCE)
        .cloned()
        .ok_or_else(|| CoreError::InvalidArgument("fieldset must contain a source".to_string()))?;

    Ok(TranslationRecord {
        location: input.get(FIELD_LOCATION).cloned(),
        textgroup: input
            .get(FIELD_TEXTGROUP)
            .cloned()
            .unwrap_or_else(default_textgroup),
        source,
        context: input.get(FIELD_CONTEXT).cloned().unwrap_or_default(),
        version: input
            .get(FIELD_VERSION)
            .cloned()
            .unwrap_or_else(default_version),
    })
}
