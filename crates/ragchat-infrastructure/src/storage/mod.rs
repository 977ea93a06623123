//! File storage primitives.

mod toml_file;

pub use toml_file::TomlFile;
