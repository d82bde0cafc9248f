//! CSV tables in and out
//!
//! - Input records: `Handler,Pattern[,Test Case,Expected]`
//! - Example values and unknown-regex rows: `RegEx,Name,Example`
//!
//! Cells are trimmed; a row with an empty `Example` cell contributes no value.

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Deserialize;

use crate::batch::InputRecord;
use crate::error::Result;
use crate::report::UnknownRegex;
use crate::synth::ExampleTable;

#[derive(Debug, Deserialize)]
struct ExampleRow {
    #[serde(rename = "RegEx")]
    regex: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Example", default)]
    example: String,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// Reads pattern rows
///
/// # Examples
///
/// ```
/// use routeconv::io::read_records;
///
/// let data = "Handler,Pattern\nviews.groups,groups/<gid>\n";
/// let records = read_records(data.as_bytes()).unwrap();
/// assert_eq!(records[0].pattern, "groups/<gid>");
/// ```
pub fn read_records<R: Read>(source: R) -> Result<Vec<InputRecord>> {
    let records = reader(source)
        .deserialize()
        .collect::<std::result::Result<Vec<InputRecord>, _>>()?;
    tracing::debug!("Read {} pattern rows", records.len());
    Ok(records)
}

/// Reads an example-value table; repeated keys append in file order
pub fn read_examples<R: Read>(source: R) -> Result<ExampleTable> {
    let mut table = ExampleTable::new();
    for row in reader(source).deserialize() {
        let row: ExampleRow = row?;
        if row.example.is_empty() {
            continue;
        }
        table.insert(row.regex, row.name, row.example);
    }
    tracing::debug!("Read example values for {} regexes", table.len());
    Ok(table)
}

/// Writes unknown-regex rows; the header is written even for an empty report
pub fn write_unknown_regexes<W: Write>(sink: W, rows: &[UnknownRegex]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(["RegEx", "Name", "Example"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
