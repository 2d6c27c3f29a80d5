// Primitives for reading CSV files.

use std::io::Read;

use crate::forms::*;

pub fn read_csv_table(path: &str) -> FormsResult<FormTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_records(rdr)
}

/// Reads an export held in memory, or any other reader.
pub fn read_csv_bytes<R: Read>(reader: R) -> FormsResult<FormTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    read_records(rdr)
}

fn read_records<R: Read>(rdr: csv::Reader<R>) -> FormsResult<FormTable> {
    let mut records = rdr.into_records();
    let header: Vec<String> = match records.next() {
        Some(line_r) => {
            let line = line_r.context(CsvLineParseSnafu { lineno: 1usize })?;
            line.iter()
                .map(|s| s.trim_start_matches('\u{feff}').to_string())
                .collect()
        }
        None => return EmptyInputSnafu {}.fail(),
    };
    debug!("read_csv: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    // The header is line 1.
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv: lineno: {:?} row: {:?}", lineno, line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(FormTable { header, rows })
}
