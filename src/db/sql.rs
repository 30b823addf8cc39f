// Statements are kept in canonical form (single spaces) so the JSON store
// can match them after `db::canonical`.

pub const SELECT_LID_BY_SOURCE: &str = "SELECT lid FROM {locales_source} WHERE source = :source";

pub const INSERT_SOURCE: &str = "INSERT INTO {locales_source} (location, textgroup, source, context, version) VALUES (:location, :textgroup, :source, :context, :version)";
