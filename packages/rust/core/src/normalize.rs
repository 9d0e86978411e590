//! Raw sheet row → [`Job`] normalization.

use jobcarousel_sheet::{JobField, SchemaMapping};
use jobcarousel_shared::{AppConfig, Job};

use crate::cleanup::{clean_text, truncate_chars, validate_link};

pub const DEFAULT_LOCATION: &str = "Remote";
pub const DEFAULT_PAY_RANGE: &str = "Competitive";
pub const DEFAULT_EMPLOYMENT_TYPE: &str = "Full-time";
pub const DEFAULT_INSPECTION_TYPE: &str = "General Inspection";
pub const DEFAULT_SOURCE: &str = "Job Board";
pub const DEFAULT_POSTED_DATE: &str = "Recently posted";
pub const DEFAULT_DESCRIPTION: &str = "Exciting opportunity in field inspection services.";

/// Knobs for [`normalize_row`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Descriptions longer than this many characters are cut.
    pub description_max_chars: usize,
}

impl From<&AppConfig> for NormalizeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            description_max_chars: config.ingest.description_max_chars,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Build a [`Job`] from one tokenized row.
///
/// Returns `None` when the cleaned title or company is empty; every other
/// problem degrades a single field to its default.
pub fn normalize_row(row: &[String], mapping: &SchemaMapping, opts: &NormalizeOptions) -> Option<Job> {
    let text = |field: JobField| clean_text(mapping.cell(row, field));

    let title = text(JobField::Title);
    let company = text(JobField::Company);
    if title.is_empty() || company.is_empty() {
        return None;
    }

    let description = or_default(text(JobField::Description), DEFAULT_DESCRIPTION);

    Some(Job {
        title,
        company,
        location: or_default(text(JobField::Location), DEFAULT_LOCATION),
        pay_range: or_default(text(JobField::PayRange), DEFAULT_PAY_RANGE),
        employment_type: or_default(text(JobField::EmploymentType), DEFAULT_EMPLOYMENT_TYPE),
        inspection_type: or_default(text(JobField::InspectionType), DEFAULT_INSPECTION_TYPE),
        link: validate_link(mapping.cell(row, JobField::Link)),
        description: truncate_chars(&description, opts.description_max_chars),
        posted_date: or_default(text(JobField::PostedDate), DEFAULT_POSTED_DATE),
        source: or_default(text(JobField::Source), DEFAULT_SOURCE),
        benefits: text(JobField::Benefits),
        qualifications: text(JobField::Qualifications),
    })
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobcarousel_sheet::tokenize_line;

    const HEADER: &str = "Job Title,Company Name,Location,Pay Range,Employment Type,type of inspection,\
                          Link to Job Posting,Job Link,Description,Posted Date,Source,Benefits,Qualifications";

    fn mapping() -> SchemaMapping {
        SchemaMapping::from_header(&tokenize_line(HEADER))
    }

    fn normalize(line: &str) -> Option<Job> {
        normalize_row(&tokenize_line(line), &mapping(), &NormalizeOptions::default())
    }

    #[test]
    fn full_row_keeps_source_values() {
        let job = normalize(
            "Property Inspector,Guardian Inspection Services,\"Tampa, FL\",$45k - $65k,Contract,\
             Property Inspection,jobs.example.com/1,,Inspect homes.,2 days ago,Indeed,PTO,License",
        )
        .expect("valid row");

        assert_eq!(job.title, "Property Inspector");
        assert_eq!(job.company, "Guardian Inspection Services");
        assert_eq!(job.location, "Tampa, FL");
        assert_eq!(job.pay_range, "$45k - $65k");
        assert_eq!(job.employment_type, "Contract");
        assert_eq!(job.inspection_type, "Property Inspection");
        assert_eq!(job.link, "https://jobs.example.com/1");
        assert_eq!(job.description, "Inspect homes.");
        assert_eq!(job.posted_date, "2 days ago");
        assert_eq!(job.source, "Indeed");
        assert_eq!(job.benefits, "PTO");
        assert_eq!(job.qualifications, "License");
    }

    #[test]
    fn missing_fields_get_defaults() {
        let job = normalize("Inspector,Acme,,,,,,,,,,,").expect("valid row");

        assert_eq!(job.location, DEFAULT_LOCATION);
        assert_eq!(job.pay_range, DEFAULT_PAY_RANGE);
        assert_eq!(job.employment_type, DEFAULT_EMPLOYMENT_TYPE);
        assert_eq!(job.inspection_type, DEFAULT_INSPECTION_TYPE);
        assert_eq!(job.description, DEFAULT_DESCRIPTION);
        assert_eq!(job.posted_date, DEFAULT_POSTED_DATE);
        assert_eq!(job.source, DEFAULT_SOURCE);
        assert_eq!(job.link, "");
        assert_eq!(job.benefits, "");
        assert_eq!(job.qualifications, "");
    }

    #[test]
    fn short_row_is_padded_with_defaults() {
        let job = normalize("Inspector,Acme").expect("valid row");
        assert_eq!(job.location, DEFAULT_LOCATION);
        assert_eq!(job.source, DEFAULT_SOURCE);
    }

    #[test]
    fn missing_title_or_company_is_rejected() {
        assert!(normalize(",Acme,Remote").is_none());
        assert!(normalize("Inspector,,Remote").is_none());
        assert!(normalize("Inspector,\"   \",Remote").is_none());
    }

    #[test]
    fn posting_link_wins_over_job_link() {
        let job = normalize("Inspector,Acme,,,,,a.example.com,b.example.com,,,,,").unwrap();
        assert_eq!(job.link, "https://a.example.com/");
    }

    #[test]
    fn job_link_fills_in_when_posting_link_is_blank() {
        let job = normalize("Inspector,Acme,,,,,,b.example.com,,,,,").unwrap();
        assert_eq!(job.link, "https://b.example.com/");
    }

    #[test]
    fn secondary_aliases_resolve() {
        let mapping = SchemaMapping::from_header(&tokenize_line(
            "Job Title,Company name,pay,Role Type,Job Link,Date Added",
        ));
        let row = tokenize_line("Reviewer,Federal Services,$40/hr,Government Inspection,gov.example.com,3 days ago");
        let job = normalize_row(&row, &mapping, &NormalizeOptions::default()).unwrap();

        assert_eq!(job.company, "Federal Services");
        assert_eq!(job.pay_range, "$40/hr");
        assert_eq!(job.inspection_type, "Government Inspection");
        assert_eq!(job.link, "https://gov.example.com/");
        assert_eq!(job.posted_date, "3 days ago");
    }

    #[test]
    fn text_is_cleaned_and_description_truncated() {
        let long = "word ".repeat(60);
        let line = format!("  Senior   Inspector ,Acme,,,,,,,\"{long}\",,,,");
        let job = normalize(&line).unwrap();

        assert_eq!(job.title, "Senior Inspector");
        assert!(job.description.ends_with("..."));
        assert!(job.description.chars().count() <= 143);
    }

    #[test]
    fn invalid_link_degrades_to_empty() {
        let job = normalize("Inspector,Acme,,,,,not a url ###,,,,,,").unwrap();
        assert_eq!(job.link, "");
        assert!(!job.has_link());
    }
}
