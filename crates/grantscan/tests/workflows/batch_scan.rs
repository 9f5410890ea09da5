use super::*;

async fn scan_tree(dir: &TempDir) -> Vec<ProposalReport> {
  let scanner = Scanner::builder().with_config(Config::default()).with_ocr(false).build();
  let files = Discovery::new().with_directory(dir.path()).run(&scanner.config().files).unwrap();
  scanner.scan_all(files.accepted(), &AtomicBool::new(false)).await
}

#[traced_test]
#[tokio::test]
async fn test_batch_scan_to_csv() -> TestResult<()> {
  let dir = create_proposal_tree();
  let reports = scan_tree(&dir).await;
  assert_eq!(reports.len(), 3);

  let output = dir.path().join("report.csv");
  ReportFormat::from_path(&output).write_path(&reports, &output)?;

  let mut reader = csv::Reader::from_path(&output)?;
  let headers = reader.headers()?.clone();
  assert_eq!(headers.get(0), Some("file"));
  assert!(headers.iter().any(|column| column == "cert_small_business"));
  assert_eq!(headers.iter().last(), Some("error"));

  let column = |name: &str| headers.iter().position(|header| header == name).unwrap();
  let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
  assert_eq!(rows.len(), 3);

  let acme = &rows[0];
  assert!(acme[column("file")].ends_with("acme_proposal.pdf"));
  assert_eq!(&acme[column("budget_amount")], "1100000.00");
  assert_eq!(&acme[column("contacts")], "TPOC: Dr. Ada Lovelace");
  assert_eq!(&acme[column("cert_small_business")], "yes");
  assert_eq!(&acme[column("error")], "");

  let beta = &rows[1];
  assert_eq!(&beta[column("kind")], "pptx");
  assert_eq!(&beta[column("budget_exceeds_limit")], "true");
  assert_eq!(&beta[column("contacts")], "DAF Customer: Col. Jane Smith");
  assert_eq!(&beta[column("cert_small_business")], "");

  let legacy = &rows[2];
  assert!(legacy[column("error")].contains("binary .ppt"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_batch_scan_to_json() -> TestResult<()> {
  let dir = create_proposal_tree();
  let reports = scan_tree(&dir).await;

  let output = dir.path().join("report.json");
  ReportFormat::Json.write_path(&reports, &output)?;
  let parsed: Vec<ProposalReport> = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
  assert_eq!(parsed, reports);
  assert_eq!(parsed[0].signatures.len(), 2);
  assert_eq!(parsed[1].sections.missing, Vec::<String>::new());
  Ok(())
}
