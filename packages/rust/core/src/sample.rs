//! Embedded fallback jobs shown whenever the live sheet can't be used.

use jobcarousel_shared::Job;

/// The fixed sample feed. Never empty.
pub fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            title: "Property Inspector - Residential".into(),
            company: "Guardian Inspection Services".into(),
            location: "Florida, USA".into(),
            pay_range: "$45,000 - $65,000".into(),
            employment_type: "Full-time".into(),
            inspection_type: "Property Inspection".into(),
            link: String::new(),
            description: "Conduct comprehensive property inspections for residential properties. \
                          Excellent opportunity for detail-oriented professionals with growth potential."
                .into(),
            posted_date: "2 days ago".into(),
            source: "Indeed".into(),
            benefits: "Health Insurance, Paid Time Off".into(),
            qualifications: "Inspector certification preferred".into(),
        },
        Job {
            title: "Insurance Field Inspector".into(),
            company: "Reliable Claims Solutions".into(),
            location: "Texas, USA".into(),
            pay_range: "$50 - $75 per inspection".into(),
            employment_type: "Contract".into(),
            inspection_type: "Insurance Inspection".into(),
            link: String::new(),
            description: "Investigate insurance claims and document property damages. \
                          Travel throughout assigned territory with flexible scheduling."
                .into(),
            posted_date: "1 day ago".into(),
            source: "ZipRecruiter".into(),
            benefits: "Flexible Schedule, Travel Reimbursement".into(),
            qualifications: "Valid drivers license required".into(),
        },
        Job {
            title: "USDA SNAP Reviewer".into(),
            company: "Federal Inspection Services".into(),
            location: "Remote".into(),
            pay_range: "$35 - $45 per hour".into(),
            employment_type: "Part-time".into(),
            inspection_type: "Government Inspection".into(),
            link: String::new(),
            description: "Review and process USDA SNAP applications remotely. \
                          Flexible work opportunity with competitive hourly rates."
                .into(),
            posted_date: "3 days ago".into(),
            source: "Government Jobs".into(),
            benefits: "Remote Work, Flexible Hours".into(),
            qualifications: "Background check required".into(),
        },
    ]
}
