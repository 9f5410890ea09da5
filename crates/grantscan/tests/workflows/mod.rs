use super::*;

mod batch_scan;

#[test]
fn test_discovery_over_proposal_tree() -> TestResult<()> {
  let dir = create_proposal_tree();
  let config = Config::default();

  let files = Discovery::new().with_directory(dir.path()).run(&config.files)?;
  let names: Vec<_> =
    files.accepted().map(|path| path.file_name().unwrap().to_string_lossy().to_string()).collect();
  assert_eq!(names, vec!["acme_proposal.pdf", "beta_proposal_slides.pptx", "legacy_proposal.ppt"]);

  let slides =
    Discovery::new().with_directory(dir.path()).with_keywords(["SLIDES"]).run(&config.files)?;
  assert_eq!(slides.len(), 1);

  let explicit = Discovery::new()
    .with_files([dir.path().join("topic-b/notes.txt"), dir.path().join("topic-a/acme_proposal.pdf")])
    .run(&config.files)?;
  assert_eq!(explicit.len(), 1);
  assert_eq!(explicit.skipped().len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_single_pdf_report() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("acme_proposal.pdf");
  create_acme_pdf(&path);

  let scanner = Scanner::default();
  let document = scanner.load(&path).await?;
  assert_eq!(document.pages.len(), 4);
  assert_eq!(document.metadata.author.as_deref(), Some("Acme Robotics"));

  let budget = BudgetExtractor.extract(&document, scanner.config()).unwrap();
  assert_eq!(budget.amount, Some(1_100_000.0));
  assert!(!budget.exceeds_limit);

  let contacts = ContactExtractor.extract(&document, scanner.config());
  assert_eq!(contacts.len(), 1);
  assert_eq!(contacts[0].name.as_deref(), Some("Dr. Ada Lovelace"));
  assert_eq!(contacts[0].email.as_deref(), Some("ada@acme.example"));
  assert_eq!(contacts[0].phone.as_deref(), Some("(555) 123-4567"));

  let answers: Vec<_> = CertificationExtractor
    .extract(&document, scanner.config())
    .into_iter()
    .map(|cert| cert.answer)
    .collect();
  assert_eq!(answers, vec![Answer::Yes, Answer::No, Answer::No, Answer::No]);

  let signatures = SignatureExtractor.extract(&document, scanner.config());
  assert_eq!(signatures.len(), 2);
  for signature in &signatures {
    assert_eq!(signature.signer.as_deref(), Some("Ada Lovelace"));
    let signed_at = signature.signed_at.map(|at| at.to_rfc3339());
    assert_eq!(signed_at.as_deref(), Some("2024-05-01T09:30:00-04:00"));
  }

  let sections = SectionExtractor.extract(&document, scanner.config());
  assert!(sections.is_complete());

  let report = ProposalReport::from_document(&document, scanner.config());
  assert!(report.issues().is_empty(), "{:?}", report.issues());
  Ok(())
}

#[test]
fn test_custom_config_file_changes_phrases() -> TestResult<()> {
  let dir = tempdir()?;
  let config_path = dir.path().join("config.toml");
  std::fs::write(
    &config_path,
    r#"
[budget]
keyphrase = "Total Cost"
max_value = 100000.0

[[certifications]]
id = "export_control"
phrase = "export controlled"
offset = 0

[sections]
required = ["Schedule"]
"#,
  )?;
  let config = Config::load_or_default(Some(&config_path))?;

  let page = grantscan::document::Page::from_text(
    1,
    "Schedule\nTotal Cost: $150,000\nIs the work export controlled? No",
  );
  let document = grantscan::document::Document::new(
    "custom.pdf",
    grantscan::document::DocumentKind::Pdf,
    vec![page],
  );
  let report = ProposalReport::from_document(&document, &config);

  assert!(report.budget.as_ref().unwrap().exceeds_limit);
  assert_eq!(report.certifications.len(), 1);
  assert_eq!(report.certifications[0].answer, Answer::No);
  assert!(report.sections.is_complete());
  Ok(())
}

#[test]
fn test_missing_config_file_is_an_error() {
  let result = Config::load_or_default(Some(Path::new("/nonexistent/grantscan.toml")));
  assert!(matches!(result, Err(GrantscanError::Io(_))));
}

#[test]
fn test_output_path_is_writable() -> TestResult<()> {
  let dir = tempdir()?;
  let output: PathBuf = dir.path().join("empty.json");
  ReportFormat::from_path(&output).write_path(&[], &output)?;
  assert_eq!(std::fs::read_to_string(&output)?.trim(), "[]");
  Ok(())
}
