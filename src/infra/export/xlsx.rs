use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Workbook};

use crate::domain::entities::table::{CellValue, ProductionTable};
use crate::domain::errors::ExportError;

pub fn table_to_xlsx(table: &ProductionTable) -> Result<Vec<u8>, ExportError> {
    let too_large = || ExportError::TooLarge {
        rows: table.len(),
        columns: table.columns().len(),
    };

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let datetime_format = Format::new().set_num_format("dd/mm/yyyy hh:mm");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, &column.name, &header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let line = u32::try_from(row_idx + 1).map_err(|_| too_large())?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = u16::try_from(col_idx).map_err(|_| too_large())?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    worksheet.write_string(line, col, text)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(line, col, *value)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean(line, col, *value)?;
                }
                CellValue::DateTime(value) => {
                    let format = if value.time() == NaiveTime::MIN {
                        &date_format
                    } else {
                        &datetime_format
                    };
                    worksheet.write_datetime_with_format(line, col, value, format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
