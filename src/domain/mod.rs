pub mod errors;
pub mod sql_dialect;
pub mod template_record;
