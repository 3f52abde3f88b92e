// End-to-end pipeline test: statement workbooks in, chart and HTML report out

mod common;

use common::write_statement_fixture;
use statement_reporter::services::{ReportOptions, ReportService};

fn default_options() -> ReportOptions {
    ReportOptions {
        payment_filter_value: "CORRIENTE".to_string(),
        description_needle: "pizza".to_string(),
    }
}

#[test]
fn test_full_pipeline_produces_report_and_chart() {
    let dir = tempfile::tempdir().unwrap();

    write_statement_fixture(
        &dir.path().join("2024_06.xlsx"),
        "30/06/2024",
        &[
            ("4532", "05/06/2024", "R1", "PIZZA PLANET", "CORRIENTE", 25.50, None),
            ("4532", "10/06/2024", "R2", "SUPERMAXI", "CORRIENTE", 80.00, None),
            ("4532", "12/06/2024", "R3", "ND PAGO RECIBIDO", "CORRIENTE", -105.50, None),
        ],
    );
    write_statement_fixture(
        &dir.path().join("2024_07.xlsx"),
        "31/07/2024",
        &[
            ("4532", "03/07/2024", "R4", "PIZZERIA ROMA", "DIFERIDO", 14.75, Some(14.75)),
            ("4532", "09/07/2024", "R5", "FARMACIA FYBECA", "CORRIENTE", 30.25, None),
        ],
    );
    // Non-statement files in the directory are ignored
    std::fs::write(dir.path().join("notas.txt"), "no soy un estado de cuenta").unwrap();

    let plot_path = dir.path().join("monthly_totals.svg");
    let report_path = dir.path().join("financial_report.html");

    let service = ReportService::new(dir.path(), &plot_path, &report_path, default_options());
    let outcome = service.run().unwrap();

    assert_eq!(outcome.files_read, 2);
    assert_eq!(outcome.record_count, 5);
    assert_eq!(outcome.month_count, 2);

    let chart = std::fs::read_to_string(&plot_path).unwrap();
    assert!(chart.contains("<svg"));

    let html = std::fs::read_to_string(&report_path).unwrap();

    // Monthly totals: June nets to zero, July to 45.00
    assert!(html.contains("2024-06"));
    assert!(html.contains("2024-07"));
    assert!(html.contains("45.00"));

    // Every section heading made it into the document
    assert!(html.contains("<h2>Monthly Totals</h2>"));
    assert!(html.contains("<h2>Comprehensive Financial Records</h2>"));
    assert!(html.contains("Sorted by Amount (Descending)"));
    assert!(html.contains("Filtered by Payment Method = 'CORRIENTE'"));
    assert!(html.contains("Filtered by Description containing 'pizza'"));
    assert!(html.contains("Grouped by Month (Sum of Amounts)"));

    // Positive / negative sums
    assert!(html.contains("150.50"));
    assert!(html.contains("-105.50"));

    // The description group view catches both pizza merchants
    assert!(html.contains("PIZZA PLANET"));
    assert!(html.contains("PIZZERIA ROMA"));

    // Embedded machine-readable summary
    assert!(html.contains("\"record_count\":5"));

    // The chart is linked from the report
    assert!(html.contains("monthly_totals.svg"));
}

#[test]
fn test_empty_directory_yields_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let plot_path = dir.path().join("plot.svg");
    let report_path = dir.path().join("report.html");

    let service = ReportService::new(dir.path(), &plot_path, &report_path, default_options());
    let outcome = service.run().unwrap();

    assert_eq!(outcome.files_read, 0);
    assert_eq!(outcome.record_count, 0);
    assert_eq!(outcome.month_count, 0);

    assert!(plot_path.exists());
    let html = std::fs::read_to_string(&report_path).unwrap();
    assert!(html.contains("<h2>Monthly Totals</h2>"));
}

#[test]
fn test_broken_workbook_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    // An .xlsx that is not a zip archive at all
    std::fs::write(dir.path().join("roto.xlsx"), b"not a workbook").unwrap();

    let service = ReportService::new(
        dir.path(),
        dir.path().join("plot.svg"),
        dir.path().join("report.html"),
        default_options(),
    );
    assert!(service.run().is_err());
}
