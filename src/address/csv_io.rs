use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use log::debug;
use thiserror::Error;

use super::splitter::ParsedAddress;

pub const OUTPUT_FILE_NAME: &str = "parsed_addresses.csv";
pub const PREVIEW_ROWS: usize = 5;

/// Cell values read as missing, as spreadsheet and dataframe exports write them.
/// Matched exactly, without trimming.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_null_cell(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

#[derive(Error, Debug)]
pub enum AddressIoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("input has no columns; expected one column of full addresses")]
    MissingColumn,
}

/// An uploaded CSV: a header row followed by data rows. Only the first
/// column is treated as addresses; other columns are carried for preview.
#[derive(Debug, Clone)]
pub struct UploadedTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl UploadedTable {
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, AddressIoError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(AddressIoError::MissingColumn);
        }

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        debug!("Read {} rows with {} columns", records.len(), headers.len());
        Ok(Self { headers, records })
    }

    pub fn from_path(path: &Path) -> Result<Self, AddressIoError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First-column values in row order; rows whose first cell is missing,
    /// empty or one of [`NULL_TOKENS`] are skipped.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter_map(|record| record.get(0))
            .filter(|cell| !is_null_cell(cell))
    }

    /// The header plus the first `rows` data rows, as CSV text.
    pub fn preview(&self, rows: usize) -> Result<String, AddressIoError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for record in self.records.iter().take(rows) {
            writer.write_record(record)?;
        }
        into_string(writer)
    }

    pub fn preview_rows(&self, rows: usize) -> Vec<Vec<String>> {
        self.records
            .iter()
            .take(rows)
            .map(|record| record.iter().map(str::to_string).collect())
            .collect()
    }
}

/// Writes the two-column export: header row, then one row per address.
pub fn write_parsed<W: io::Write>(writer: W, parsed: &[ParsedAddress]) -> Result<(), AddressIoError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(["Street Address", "City, State, ZIP"])?;
    for address in parsed {
        writer.write_record([&address.street, &address.city_state_zip])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(parsed: &[ParsedAddress]) -> Result<String, AddressIoError> {
    let mut buffer = Vec::new();
    write_parsed(&mut buffer, parsed)?;
    Ok(String::from_utf8(buffer)?)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, AddressIoError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AddressIoError::Io(io::Error::new(e.error().kind(), e.to_string())))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::parse_addresses;
    use std::io::Write;

    const UPLOAD: &str = "Address,Notes\n\
        \"123 Main St, Springfield, IL 62704\",front door\n\
        ,no address here\n\
        PO Box 99\n\
        \"456 Oak Ave Apt 2, Springfield, IL 62704\",\n";

    #[test]
    fn first_column_is_read_and_blank_cells_dropped() {
        let table = UploadedTable::from_reader(UPLOAD.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        let addresses: Vec<&str> = table.addresses().collect();
        assert_eq!(
            addresses,
            vec![
                "123 Main St, Springfield, IL 62704",
                "PO Box 99",
                "456 Oak Ave Apt 2, Springfield, IL 62704",
            ]
        );
    }

    #[test]
    fn null_markers_are_dropped_like_blank_cells() {
        let input = "Address\n\n\"1 A, B, C\"\n\n\"\"\nN/A\nNA\n#N/A\nnull\nNULL\nNaN\nNone\n";
        let table = UploadedTable::from_reader(input.as_bytes()).unwrap();
        let parsed = parse_addresses(table.addresses());
        assert_eq!(
            parsed,
            vec![ParsedAddress {
                street: "1 A".to_string(),
                city_state_zip: "B, C".to_string(),
            }]
        );
    }

    #[test]
    fn near_null_text_is_still_an_address() {
        assert!(is_null_cell("N/A"));
        assert!(!is_null_cell(" N/A"));
        assert!(!is_null_cell("Nana Ln"));
        assert!(!is_null_cell("none"));
    }

    #[test]
    fn empty_input_has_no_column() {
        let err = UploadedTable::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, AddressIoError::MissingColumn));
    }

    #[test]
    fn header_only_input_yields_no_addresses() {
        let table = UploadedTable::from_reader("Address\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.addresses().count(), 0);
    }

    #[test]
    fn export_has_header_and_quotes_commas() {
        let table = UploadedTable::from_reader(UPLOAD.as_bytes()).unwrap();
        let csv = to_csv_string(&parse_addresses(table.addresses())).unwrap();
        assert_eq!(
            csv,
            "Street Address,\"City, State, ZIP\"\n\
             123 Main St,\"Springfield, IL 62704\"\n\
             PO Box 99,\n\
             456 Oak Ave Apt 2,\"Springfield, IL 62704\"\n"
        );
    }

    #[test]
    fn export_of_no_rows_is_just_the_header() {
        assert_eq!(to_csv_string(&[]).unwrap(), "Street Address,\"City, State, ZIP\"\n");
    }

    #[test]
    fn preview_limits_rows() {
        let mut input = String::from("Address\n");
        for i in 0..8 {
            input.push_str(&format!("\"{} Main St, Springfield, IL 62704\"\n", i));
        }
        let table = UploadedTable::from_reader(input.as_bytes()).unwrap();

        let preview = table.preview(PREVIEW_ROWS).unwrap();
        assert_eq!(preview.lines().count(), 1 + PREVIEW_ROWS);
        assert!(preview.starts_with("Address\n\"0 Main St"));
        assert_eq!(table.preview_rows(2).len(), 2);
    }

    #[test]
    fn reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Full Address\n\"1 Elm St, Salem, OR 97301\"\n").unwrap();

        let table = UploadedTable::from_path(file.path()).unwrap();
        assert_eq!(table.headers().get(0), Some("Full Address"));
        assert_eq!(table.addresses().collect::<Vec<_>>(), vec!["1 Elm St, Salem, OR 97301"]);
    }
}
