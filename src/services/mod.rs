pub mod downloader;
pub mod filename;
pub mod row_parser;

pub use downloader::DocumentDownloader;
pub use filename::FilenameBuilder;
pub use row_parser::parse_row;
