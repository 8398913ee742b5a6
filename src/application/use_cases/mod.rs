pub mod generate_template_sql;
