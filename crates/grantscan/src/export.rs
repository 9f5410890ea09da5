//! Writing reports as CSV or JSON.
//!
//! CSV output is one row per document. Lists are joined with `"; "` and every
//! certification question gets its own `cert_<id>` column, so the columns
//! depend on which questions were configured. JSON output is the full list
//! of [`ProposalReport`]s.

use std::{fs::File, io::Write};

use super::*;
use crate::report::ProposalReport;

/// Columns before the certification columns.
const LEADING_COLUMNS: [&str; 15] = [
  "file",
  "kind",
  "pages",
  "text_source",
  "title",
  "budget",
  "budget_amount",
  "budget_exceeds_limit",
  "contacts",
  "emails",
  "phones",
  "signers",
  "signed_at",
  "sections_missing",
  "key_phrases",
];

/// Separator for list values inside one CSV cell.
const LIST_SEPARATOR: &str = "; ";

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
  /// One flattened row per document.
  #[default]
  Csv,
  /// A pretty-printed array of full reports.
  Json,
}

impl ReportFormat {
  /// Picks the format from an output path's extension, defaulting to CSV.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
      _ => Self::Csv,
    }
  }

  /// Writes `reports` to `writer`.
  pub fn write<W: Write>(&self, reports: &[ProposalReport], writer: W) -> Result<()> {
    match self {
      Self::Csv => write_csv(reports, writer),
      Self::Json => {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, reports)?;
        writeln!(writer)?;
        Ok(())
      },
    }
  }

  /// Creates (or truncates) the file at `path` and writes `reports` to it.
  pub fn write_path(&self, reports: &[ProposalReport], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    self.write(reports, std::io::BufWriter::new(file))?;
    info!("Wrote {} reports to {}", reports.len(), path.display());
    Ok(())
  }
}

impl FromStr for ReportFormat {
  type Err = GrantscanError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "csv" => Ok(Self::Csv),
      "json" => Ok(Self::Json),
      other => Err(GrantscanError::UnsupportedFormat(format!("report format \"{other}\""))),
    }
  }
}

impl Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Csv => write!(f, "csv"),
      Self::Json => write!(f, "json"),
    }
  }
}

fn write_csv<W: Write>(reports: &[ProposalReport], writer: W) -> Result<()> {
  // Certification columns in order of first appearance.
  let mut cert_ids: Vec<&str> = Vec::new();
  for cert in reports.iter().flat_map(|report| &report.certifications) {
    if !cert_ids.contains(&cert.id.as_str()) {
      cert_ids.push(&cert.id);
    }
  }

  let mut csv = csv::Writer::from_writer(writer);
  let header = LEADING_COLUMNS
    .iter()
    .map(|column| column.to_string())
    .chain(cert_ids.iter().map(|id| format!("cert_{id}")))
    .chain(std::iter::once("error".to_string()));
  csv.write_record(header)?;

  for report in reports {
    let answers: BTreeMap<&str, &Answer> =
      report.certifications.iter().map(|cert| (cert.id.as_str(), &cert.answer)).collect();
    let certs = cert_ids.iter().map(|id| answers.get(id).map(|a| a.to_string()).unwrap_or_default());

    let row = leading_cells(report)
      .into_iter()
      .chain(certs)
      .chain(std::iter::once(report.error.clone().unwrap_or_default()));
    csv.write_record(row)?;
  }

  csv.flush()?;
  Ok(())
}

fn leading_cells(report: &ProposalReport) -> [String; 15] {
  let budget = report.budget.as_ref();
  let contacts = join(report.contacts.iter().map(|contact| match &contact.name {
    Some(name) => format!("{}: {name}", contact.role),
    None => format!("{}: ?", contact.role),
  }));
  let emails = join(report.contacts.iter().filter_map(|contact| contact.email.clone()));
  let phones = join(report.contacts.iter().filter_map(|contact| contact.phone.clone()));
  let signers = join(report.signatures.iter().filter_map(|signature| signature.signer.clone()));
  let signed_at = join(
    report.signatures.iter().filter_map(|signature| signature.signed_at).map(|at| at.to_rfc3339()),
  );
  let key_phrases =
    join(report.key_phrases.iter().map(|hit| format!("{} (p. {})", hit.phrase, hit.page)));

  [
    report.file.display().to_string(),
    report.kind.map(|kind| kind.to_string()).unwrap_or_default(),
    report.pages.to_string(),
    report.text_source.to_string(),
    report.title.clone().unwrap_or_default(),
    budget.map(|budget| budget.raw.clone()).unwrap_or_default(),
    budget
      .and_then(|budget| budget.amount)
      .map(|amount| format!("{amount:.2}"))
      .unwrap_or_default(),
    budget.map(|budget| budget.exceeds_limit.to_string()).unwrap_or_default(),
    contacts,
    emails,
    phones,
    signers,
    signed_at,
    report.sections.missing.join(LIST_SEPARATOR),
    key_phrases,
  ]
}

fn join(values: impl Iterator<Item = String>) -> String {
  values.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::extract::{Budget, CertificationAnswer, Contact};

  fn reports() -> Vec<ProposalReport> {
    let mut ok = ProposalReport::failed(Path::new("a.pdf"), &GrantscanError::Interrupted);
    ok.error = None;
    ok.pages = 3;
    ok.text_source = TextSource::Native;
    ok.budget = Some(Budget {
      raw:           "$1,000,000".into(),
      amount:        Some(1_000_000.0),
      page:          1,
      exceeds_limit: false,
    });
    ok.contacts = vec![
      Contact {
        role:  "TPOC".into(),
        name:  Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        phone: None,
        page:  1,
      },
      Contact { role: "DAF Customer".into(), name: None, email: None, phone: None, page: 2 },
    ];
    ok.certifications = vec![
      CertificationAnswer { id: "small_business".into(), answer: Answer::Yes, page: Some(1) },
      CertificationAnswer { id: "human_subjects".into(), answer: Answer::Missing, page: None },
    ];

    let failed = ProposalReport::failed(
      Path::new("b.ppt"),
      &GrantscanError::UnsupportedFormat("binary .ppt".into()),
    );
    vec![ok, failed]
  }

  #[test]
  fn test_csv_columns_and_rows() {
    let mut buffer = Vec::new();
    ReportFormat::Csv.write(&reports(), &mut buffer).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("file,kind,pages,text_source,title,budget,"));
    assert!(lines[0].ends_with("key_phrases,cert_small_business,cert_human_subjects,error"));
    assert_eq!(
      lines[1],
      "a.pdf,pdf,3,native,,\"$1,000,000\",1000000.00,false,TPOC: Ada Lovelace; DAF Customer: \
       ?,ada@example.com,,,,,,yes,,"
    );
    assert_eq!(lines[2], "b.ppt,ppt,0,none,,,,,,,,,,,,,,Unsupported document format: binary .ppt");
  }

  #[test]
  fn test_json_round_trip() {
    let mut buffer = Vec::new();
    ReportFormat::Json.write(&reports(), &mut buffer).unwrap();
    let parsed: Vec<ProposalReport> = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed, reports());
  }

  #[test]
  fn test_format_selection() {
    assert_eq!(ReportFormat::from_path(Path::new("out/report.JSON")), ReportFormat::Json);
    assert_eq!(ReportFormat::from_path(Path::new("report.csv")), ReportFormat::Csv);
    assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Csv);
    assert_eq!("Json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
    assert!("xlsx".parse::<ReportFormat>().is_err());
  }
}
