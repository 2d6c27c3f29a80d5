use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::forms::*;

/// Reads the grid of an Excel export. Without a worksheet name, the workbook
/// must hold a single worksheet.
pub fn read_xlsx_table(path: &str, worksheet_name_o: Option<&str>) -> FormsResult<FormTable> {
    let wrange = get_range(path, worksheet_name_o)?;
    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => row.iter().map(cell_to_label).collect(),
        None => return EmptyInputSnafu {}.fail(),
    };
    debug!("read_xlsx: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells: Vec<String> = row.iter().map(cell_to_label).collect();
        debug!("read_xlsx: lineno: {:?} row: {:?}", lineno, cells);
        rows.push(cells);
    }
    Ok(FormTable { header, rows })
}

/// The text of a cell. Whole numbers are written without decimals, so that a
/// preference typed as 2 reads as "2". Error cells keep their Excel text
/// (`#N/A`), which only fails the count when it sits in a vote column.
fn cell_to_label(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => String::new(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Error(e) => e.to_string(),
        // Timestamps and booleans only appear in the columns that are not votes.
        x => format!("{:?}", x),
    }
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> FormsResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyInputSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!("read_xlsx: using worksheet {:?}", &worksheet_name);
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu {
                names: all_worksheets
                    .iter()
                    .map(|(n, _)| n.clone())
                    .collect::<Vec<String>>(),
            }
            .fail(),
        }
    }
}
