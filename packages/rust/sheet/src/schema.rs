//! Header-row schema mapping.
//!
//! The sheet has been edited by hand over time, so one logical field may
//! appear under several historical column names. [`FIELD_ALIASES`] lists
//! them in priority order; [`SchemaMapping::from_header`] resolves them
//! against an actual header row once per ingestion run.

use std::fmt;

// ---------------------------------------------------------------------------
// Logical fields
// ---------------------------------------------------------------------------

/// A logical column of the job sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Company,
    Location,
    PayRange,
    EmploymentType,
    InspectionType,
    Link,
    Description,
    PostedDate,
    Source,
    Benefits,
    Qualifications,
}

/// Number of logical fields.
const FIELD_COUNT: usize = 12;

impl JobField {
    /// Every logical field, in declaration order.
    pub const ALL: [JobField; FIELD_COUNT] = [
        JobField::Title,
        JobField::Company,
        JobField::Location,
        JobField::PayRange,
        JobField::EmploymentType,
        JobField::InspectionType,
        JobField::Link,
        JobField::Description,
        JobField::PostedDate,
        JobField::Source,
        JobField::Benefits,
        JobField::Qualifications,
    ];

    /// Accepted header names for this field, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobField::Title => "title",
            JobField::Company => "company",
            JobField::Location => "location",
            JobField::PayRange => "pay_range",
            JobField::EmploymentType => "employment_type",
            JobField::InspectionType => "inspection_type",
            JobField::Link => "link",
            JobField::Description => "description",
            JobField::PostedDate => "posted_date",
            JobField::Source => "source",
            JobField::Benefits => "benefits",
            JobField::Qualifications => "qualifications",
        };
        f.write_str(name)
    }
}

/// Header aliases per logical field, in priority order.
pub const FIELD_ALIASES: &[(JobField, &[&str])] = &[
    (JobField::Title, &["Job Title"]),
    (JobField::Company, &["Company Name", "Company name"]),
    (JobField::Location, &["Location"]),
    (JobField::PayRange, &["Pay Range", "pay"]),
    (JobField::EmploymentType, &["Employment Type"]),
    (JobField::InspectionType, &["type of inspection", "Role Type"]),
    (JobField::Link, &["Link to Job Posting", "Job Link"]),
    (JobField::Description, &["Description"]),
    (JobField::PostedDate, &["Posted Date", "Date Added"]),
    (JobField::Source, &["Source"]),
    (JobField::Benefits, &["Benefits"]),
    (JobField::Qualifications, &["Qualifications"]),
];

// ---------------------------------------------------------------------------
// SchemaMapping
// ---------------------------------------------------------------------------

/// Column indices per logical field, resolved from one header row.
///
/// A field keeps every matching column in alias priority order; the first
/// one is its primary column, the rest fill in when a row leaves the
/// primary blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    columns: [Vec<usize>; FIELD_COUNT],
    width: usize,
}

impl SchemaMapping {
    /// Resolve [`FIELD_ALIASES`] against a tokenized header row.
    ///
    /// Aliases are tried in priority order; the first alias present in the
    /// header wins. Matching is case-sensitive after trimming.
    pub fn from_header(header: &[String]) -> Self {
        let mut columns: [Vec<usize>; FIELD_COUNT] = std::array::from_fn(|_| Vec::new());

        for field in JobField::ALL {
            columns[field.slot()] = field
                .aliases()
                .iter()
                .filter_map(|alias| header.iter().position(|cell| cell.trim() == *alias))
                .collect();
        }

        Self {
            columns,
            width: header.len(),
        }
    }

    /// Primary column index for a field, if the header had one of its aliases.
    pub fn index(&self, field: JobField) -> Option<usize> {
        self.columns[field.slot()].first().copied()
    }

    /// All matched columns for a field, highest priority first.
    pub fn columns(&self, field: JobField) -> &[usize] {
        &self.columns[field.slot()]
    }

    /// Cell for a field in `row`: the first non-blank matched column, or
    /// `""` when unmapped, out of bounds, or blank everywhere.
    pub fn cell<'a>(&self, row: &'a [String], field: JobField) -> &'a str {
        self.columns(field)
            .iter()
            .filter_map(|&i| row.get(i))
            .map(String::as_str)
            .find(|cell| !cell.trim().is_empty())
            .unwrap_or("")
    }

    /// Fields no header cell matched.
    pub fn unmapped(&self) -> Vec<JobField> {
        JobField::ALL
            .into_iter()
            .filter(|f| self.index(*f).is_none())
            .collect()
    }

    /// Number of cells in the header row.
    pub fn header_width(&self) -> usize {
        self.width
    }
}
