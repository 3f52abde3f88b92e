// Shared helpers for integration tests: builds statement workbook fixtures
// with the layout the importer expects (20 header rows, column header row,
// then positional transaction rows).

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// One transaction row: card, date (d/m/Y), reference, description,
/// payment method, amount, deferred balance.
pub type FixtureRow<'a> = (
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    f64,
    Option<f64>,
);

/// Write a statement workbook with the given cutoff date (cell B7) and
/// transaction rows starting at row 22.
pub fn write_statement_fixture(path: &Path, cutoff_date: &str, rows: &[FixtureRow]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    // Header block: labels in column A, values in column B
    sheet.write_string(0, 0, "BANCO").unwrap();
    sheet.write_string(0, 1, "BANCO DEL AUSTRO").unwrap();
    sheet.write_string(1, 0, "CLIENTE").unwrap();
    sheet.write_string(1, 1, "J PEREZ").unwrap();
    // Label without a value, should surface as PLACEHOLDER
    sheet.write_string(2, 0, "SUCURSAL").unwrap();
    sheet.write_string(6, 0, "FECHA CORTE").unwrap();
    sheet.write_string(6, 1, cutoff_date).unwrap();

    // Column header row (row 21, discarded by the importer)
    let headers = [
        "TARJETA",
        "FECHA",
        "NUMERO_REFERENCIA",
        "DESCRIPCION",
        "FORMA_PAGO",
        "VALOR_DOLARES",
        "SALDO_DIFERIDO",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(20, col as u16, *header).unwrap();
    }

    for (i, row) in rows.iter().enumerate() {
        let r = 21 + i as u32;
        let (card, date, reference, description, payment, amount, deferred) = row;
        sheet.write_string(r, 0, *card).unwrap();
        sheet.write_string(r, 1, *date).unwrap();
        sheet.write_string(r, 2, *reference).unwrap();
        sheet.write_string(r, 3, *description).unwrap();
        sheet.write_string(r, 4, *payment).unwrap();
        sheet.write_number(r, 5, *amount).unwrap();
        if let Some(deferred) = deferred {
            sheet.write_number(r, 6, *deferred).unwrap();
        }
    }

    workbook.save(path).unwrap();
}
