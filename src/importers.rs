//! Statement workbook importers

pub mod header_parser;
pub mod statement_importer;

// Re-export commonly used items
pub use header_parser::{HeaderParseError, StatementHeader};
pub use statement_importer::{
    StatementFile, StatementImportError, StatementImporter, StatementRecord,
};
