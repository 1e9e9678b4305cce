pub mod discovery;
pub mod error;
pub mod parser;
pub mod source;
pub mod structure;

pub use discovery::{MEASUREMENT_EXTENSION, is_measurement_file, list_measurement_files};
pub use error::{Result, SourceError};
pub use parser::{
    GrammarRule, LineCounts, LineMatch, LineOutcome, ParseOutcome, classify_line, match_line,
    parse_decimal, parse_source, parse_text,
};
pub use source::TextSource;
pub use structure::{canonicalize_codes, check_structure, partition_codes};
