pub mod output_format;
pub mod target;
