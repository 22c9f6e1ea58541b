mod splitter;
mod csv_io;

pub use splitter::{parse_addresses, split_address, ParsedAddress};
pub use csv_io::{is_null_cell, to_csv_string, write_parsed, AddressIoError, UploadedTable, NULL_TOKENS, OUTPUT_FILE_NAME, PREVIEW_ROWS};
