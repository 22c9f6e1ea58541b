use serde::Serialize;

/// A street line and its locality ("City, State ZIP"), as exported to a
/// spreadsheet. The serialized names are the export column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAddress {
    #[serde(rename = "Street Address")]
    pub street: String,
    #[serde(rename = "City, State, ZIP")]
    pub city_state_zip: String,
}

/// Splits on the last two commas only, so "123 Main St, Apt 4, Springfield, IL"
/// keeps "123 Main St, Apt 4" as the street. With fewer than two commas the
/// input comes back untouched as the street and the locality is empty.
///
/// The split is purely positional. "Springfield IL 62704 Main St" has no
/// commas and is not reinterpreted.
pub fn split_address(address: &str) -> ParsedAddress {
    let parts: Vec<&str> = address.rsplitn(3, ',').collect();
    match parts.as_slice() {
        [state_zip, city, street] => ParsedAddress {
            street: street.trim().to_string(),
            city_state_zip: format!("{}, {}", city.trim(), state_zip.trim()),
        },
        _ => ParsedAddress {
            street: address.to_string(),
            city_state_zip: String::new(),
        },
    }
}

/// Parses each non-empty address in order. Empty entries are dropped rather
/// than emitted as empty records.
pub fn parse_addresses<I, S>(addresses: I) -> Vec<ParsedAddress>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    addresses
        .into_iter()
        .filter(|address| !address.as_ref().is_empty())
        .map(|address| split_address(address.as_ref()))
        .collect()
}
