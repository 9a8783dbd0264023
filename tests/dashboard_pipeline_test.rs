use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use ticket_dash::adapters::xlsx;
use ticket_dash::core::Pipeline;
use ticket_dash::{CliConfig, DashboardEngine, LocalStorage, TicketPipeline};

/// Write a ticket workbook the way an export from the ticketing system
/// looks: headers in row one, one ticket per row, timestamps as text.
fn write_fixture(dir: &TempDir, name: &str) {
    let rows: Vec<Vec<&str>> = vec![
        vec![
            "Priority",
            "TicketType",
            "ResolutionStatus",
            "CreatedTime",
            "ClosedTime",
        ],
        vec![
            "P1",
            "Bug",
            "Within SLA",
            "2024-03-01 09:00:00",
            "2024-03-01 15:00:00",
        ],
        vec!["P1", "Request", "Breached", "2024-03-02 10:00:00", ""],
        vec![
            "P4",
            "Bug",
            "Within SLA",
            "2024-03-03 11:00:00",
            "2024-03-03 13:00:00",
        ],
        // Unparsable CreatedTime; coerced to missing on load.
        vec!["P2", "Incident", "Within SLA", "garbage", "2024-03-04 09:00:00"],
    ];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(dir.path().join(name)).unwrap();
}

fn config(data_file: Option<&str>) -> CliConfig {
    CliConfig {
        data_file: data_file.map(str::to_string),
        output_path: "output".to_string(),
        export_file: "filtered_tickets.xlsx".to_string(),
        priority: vec![],
        ticket_type: vec![],
        resolution_status: vec![],
        created_from: None,
        created_to: None,
        list_filters: false,
        table_rows: 20,
        summary_json: false,
        verbose: false,
        monitor: false,
        config: None,
    }
}

#[tokio::test]
async fn test_end_to_end_refresh_and_export() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "input.xlsx");

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let cli = config(Some("input.xlsx"));
    let criteria = cli.criteria();
    let pipeline = TicketPipeline::new(storage, cli);
    let engine = DashboardEngine::new(pipeline, criteria);

    let exported = engine.run().await.unwrap();
    assert_eq!(exported.as_deref(), Some("output/filtered_tickets.xlsx"));

    let export_path = dir.path().join("output/filtered_tickets.xlsx");
    assert!(export_path.exists());

    // The default date range spans the dataset, so the row whose
    // CreatedTime failed to parse is excluded from the view.
    let bytes = std::fs::read(&export_path).unwrap();
    let round_trip = xlsx::read_dataset(&bytes).unwrap();
    assert_eq!(round_trip.len(), 3);
    assert_eq!(
        round_trip.columns(),
        &[
            "Priority",
            "TicketType",
            "ResolutionStatus",
            "CreatedTime",
            "ClosedTime"
        ]
    );
}

#[tokio::test]
async fn test_priority_filter_narrows_the_export() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "input.xlsx");

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let mut cli = config(Some("input.xlsx"));
    cli.priority = vec!["P1".to_string()];
    let criteria = cli.criteria();
    let pipeline = TicketPipeline::new(storage, cli);
    let engine = DashboardEngine::new(pipeline, criteria);

    engine.run().await.unwrap();

    let bytes = std::fs::read(dir.path().join("output/filtered_tickets.xlsx")).unwrap();
    let round_trip = xlsx::read_dataset(&bytes).unwrap();
    assert_eq!(round_trip.len(), 2);
    for row in round_trip.rows() {
        assert_eq!(row.label("Priority").unwrap(), "P1");
    }
}

#[tokio::test]
async fn test_everything_filtered_out_skips_the_export() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "input.xlsx");

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let mut cli = config(Some("input.xlsx"));
    cli.priority = vec!["P9".to_string()];
    let criteria = cli.criteria();
    let pipeline = TicketPipeline::new(storage, cli);
    let engine = DashboardEngine::new(pipeline, criteria);

    let exported = engine.run().await.unwrap();
    assert_eq!(exported, None);
    assert!(!dir.path().join("output/filtered_tickets.xlsx").exists());
}

#[tokio::test]
async fn test_fallback_data_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "data.xlsx");

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let cli = config(None);
    let pipeline = TicketPipeline::new(storage, cli);

    let dataset = pipeline.extract().await.unwrap();
    assert_eq!(dataset.len(), 4);
}

#[tokio::test]
async fn test_missing_data_file_does_not_run_the_pipeline() {
    let dir = TempDir::new().unwrap();

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let cli = config(None);
    let criteria = cli.criteria();
    let pipeline = TicketPipeline::new(storage, cli);
    let engine = DashboardEngine::new(pipeline, criteria);

    let result = engine.run().await;
    assert!(matches!(
        result,
        Err(ticket_dash::DashboardError::NoDataFile)
    ));
    assert!(!dir.path().join("output").exists());
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "input.xlsx");

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let cli = config(Some("input.xlsx"));
    let criteria = cli.criteria();
    let pipeline = TicketPipeline::new(storage, cli);
    let engine = DashboardEngine::new_with_monitoring(pipeline, criteria, true);

    assert!(engine.run().await.is_ok());
}
