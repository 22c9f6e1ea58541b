use std::fs::File;
use std::io::Write;

use bizagent::address::{parse_addresses, split_address, write_parsed, UploadedTable};

fn comma_count(s: &str) -> usize {
    s.matches(',').count()
}

const SAMPLES: &[&str] = &[
    "123 Main St, Springfield, IL 62704",
    "456 Oak Ave Apt 2, Springfield, IL 62704",
    "123 Main St, Apt 4, Springfield, IL 62704",
    "A, B, C, D",
    "PO Box 99",
    "Springfield IL 62704 Main St",
    "12 Elm St, Salem",
    " 1 Way ,Town,ST 00000 ",
    ",,",
];

#[test]
fn comma_count_decides_the_shape() {
    for &addr in SAMPLES {
        let parsed = split_address(addr);
        match comma_count(addr) {
            0 | 1 => {
                assert_eq!(parsed.street, addr);
                assert!(parsed.city_state_zip.is_empty());
            }
            2 => {
                let normalized: Vec<&str> = addr.split(',').map(str::trim).collect();
                assert_eq!(
                    format!("{}, {}", parsed.street, parsed.city_state_zip),
                    normalized.join(", ")
                );
            }
            _ => {
                let cut = addr.rmatch_indices(',').nth(1).map(|(i, _)| i).unwrap();
                assert_eq!(parsed.street, addr[..cut].trim());
                assert_eq!(comma_count(&parsed.city_state_zip), 1);
            }
        }
    }
}

#[test]
fn csv_file_to_csv_file_keeps_order_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("addresses.csv");
    let output_path = dir.path().join("parsed_addresses.csv");

    let mut input = File::create(&input_path).unwrap();
    writeln!(input, "Full Address").unwrap();
    for addr in SAMPLES {
        writeln!(input, "\"{}\"", addr).unwrap();
    }
    writeln!(input, ",").unwrap();
    drop(input);

    let table = UploadedTable::from_path(&input_path).unwrap();
    let parsed = parse_addresses(table.addresses());
    assert_eq!(parsed.len(), SAMPLES.len());

    write_parsed(File::create(&output_path).unwrap(), &parsed).unwrap();

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["Street Address", "City, State, ZIP"]
    );
    let rows: Vec<(String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string())
        })
        .collect();

    assert_eq!(rows.len(), SAMPLES.len());
    for (row, addr) in rows.iter().zip(SAMPLES) {
        let expected = split_address(addr);
        assert_eq!(row.0, expected.street);
        assert_eq!(row.1, expected.city_state_zip);
    }
    assert_eq!(rows[0], ("123 Main St".to_string(), "Springfield, IL 62704".to_string()));
    assert_eq!(rows[4], ("PO Box 99".to_string(), String::new()));
}
