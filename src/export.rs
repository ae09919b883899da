//! Flat result rows, CSV export and the sample JSON preview.

use crate::errors::{AppError, ResultExt};
use crate::models::EnrichedLead;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const CSV_FILE_NAME: &str = "leadgen_results.csv";

/// One rendered result. Field names double as table and CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResultRow {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Body For Email")]
    pub body: String,
    #[serde(rename = "Tone")]
    pub tone: String,
    #[serde(rename = "Word Count")]
    pub word_count: Option<u32>,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "LLM Error")]
    pub llm_error: Option<String>,
    #[serde(rename = "Website")]
    pub website: Option<String>,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Employees")]
    pub employees: u32,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Insights")]
    pub insights: String,
}

impl ResultRow {
    pub const HEADERS: [&'static str; 12] = [
        "Company Name",
        "Subject",
        "Body For Email",
        "Tone",
        "Word Count",
        "Source",
        "LLM Error",
        "Website",
        "Industry",
        "Employees",
        "Location",
        "Insights",
    ];

    /// Cell values in [`ResultRow::HEADERS`] order, as they appear in the CSV.
    pub fn cells(&self) -> [String; 12] {
        [
            self.company_name.clone(),
            self.subject.clone(),
            self.body.clone(),
            self.tone.clone(),
            self.word_count.map(|n| n.to_string()).unwrap_or_default(),
            self.source.clone(),
            self.llm_error.clone().unwrap_or_default(),
            self.website.clone().unwrap_or_default(),
            self.industry.clone(),
            self.employees.to_string(),
            self.location.clone(),
            self.insights.clone(),
        ]
    }
}

impl From<&EnrichedLead> for ResultRow {
    fn from(enriched: &EnrichedLead) -> Self {
        Self {
            company_name: enriched.lead.name.clone(),
            subject: enriched.email.subject.clone(),
            body: enriched.email.body.clone(),
            tone: enriched.email.tone.clone(),
            word_count: enriched.email.word_count,
            source: enriched.email.source.as_str().to_string(),
            llm_error: enriched.email.error.clone(),
            website: enriched.lead.website.clone(),
            industry: enriched.lead.industry.clone(),
            employees: enriched.lead.size,
            location: enriched.lead.location.clone(),
            insights: enriched.insight.clone(),
        }
    }
}

pub fn to_rows(enriched: &[EnrichedLead]) -> Vec<ResultRow> {
    enriched.iter().map(ResultRow::from).collect()
}

/// Serializes rows as CSV with a header row, even when there are no rows.
pub fn to_csv(rows: &[ResultRow]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(ResultRow::HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer
        .flush()
        .map_err(|e| AppError::InternalError(format!("Failed to flush CSV: {}", e)))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to finish CSV: {}", e.error())))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("CSV was not UTF-8: {}", e)))
        .context("Building CSV export")
}

/// Parses CSV produced by [`to_csv`] back into rows.
pub fn from_csv(data: &str) -> Result<Vec<ResultRow>, AppError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<ResultRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

/// The first row as a key/value object, mirroring the JSON API shape.
pub fn sample_json(rows: &[ResultRow]) -> Option<Value> {
    rows.first().and_then(|row| serde_json::to_value(row).ok())
}
