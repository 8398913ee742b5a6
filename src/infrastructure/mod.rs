pub mod sql_insert_renderer;
pub mod sql_insert_verifier;
pub mod template_extractor;
