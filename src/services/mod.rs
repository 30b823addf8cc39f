pub mod fieldset;
pub mod locale_store;
pub mod source;
