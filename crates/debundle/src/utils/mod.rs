pub mod ast_path;
pub mod config_file;
pub mod literal;
