//! Job catalog — the static dataset recommendations are drawn from.
//!
//! Loaded once at startup from a CSV file with columns
//! `Job_Title, Industry, Experience_Level, Job_Type, Location, Salary, Skills`.
//! The catalog is immutable after load and shared across sessions; similarity
//! scores are computed per request and never written back to it.

pub mod filter;

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of the job catalog.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job_title: String,
    pub industry: String,
    pub experience_level: String,
    pub job_type: String,
    pub location: String,
    /// Missing when the source cell was empty or not numeric.
    pub salary: Option<f64>,
    /// Comma-separated skill tokens, free text as stored.
    pub skills: String,
}

/// Raw CSV row. Salary stays a string here so coercion is explicit and the
/// malformed count can be reported once instead of per row.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Job_Title")]
    job_title: String,
    #[serde(rename = "Industry")]
    industry: String,
    #[serde(rename = "Experience_Level")]
    experience_level: String,
    #[serde(rename = "Job_Type")]
    job_type: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Salary")]
    salary: String,
    #[serde(rename = "Skills")]
    skills: String,
}

/// Distinct values observed for each categorical facet, sorted.
/// The presentation layer builds its selectors from this; there is no fixed
/// enum — the vocabulary is whatever the dataset contains.
#[derive(Debug, Clone, Serialize)]
pub struct FacetVocabulary {
    pub industries: Vec<String>,
    pub experience_levels: Vec<String>,
    pub job_types: Vec<String>,
    pub locations: Vec<String>,
}

impl FacetVocabulary {
    fn discover(jobs: &[JobRecord]) -> Self {
        Self {
            industries: distinct(jobs, |j| &j.industry),
            experience_levels: distinct(jobs, |j| &j.experience_level),
            job_types: distinct(jobs, |j| &j.job_type),
            locations: distinct(jobs, |j| &j.location),
        }
    }
}

fn distinct<F: Fn(&JobRecord) -> &String>(jobs: &[JobRecord], column: F) -> Vec<String> {
    jobs.iter()
        .map(column)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug)]
pub struct Catalog {
    jobs: Vec<JobRecord>,
    facets: FacetVocabulary,
    salary_range: Option<(f64, f64)>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalog file {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))
    }

    /// Reads the catalog from any CSV source. Rows with an empty title or an
    /// empty skills cell carry nothing to rank against and are dropped.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut jobs = Vec::new();
        let mut missing_salary = 0usize;
        let mut dropped = 0usize;

        for row in csv_reader.deserialize::<CsvRow>() {
            let row = row.context("Malformed catalog row")?;
            if row.job_title.trim().is_empty() || row.skills.trim().is_empty() {
                dropped += 1;
                continue;
            }

            let salary = parse_salary(&row.salary);
            if salary.is_none() {
                missing_salary += 1;
            }

            jobs.push(JobRecord {
                job_title: row.job_title,
                industry: row.industry,
                experience_level: row.experience_level,
                job_type: row.job_type,
                location: row.location,
                salary,
                skills: row.skills,
            });
        }

        // One summary line each, never per-row spam.
        if missing_salary > 0 {
            warn!("{missing_salary} catalog row(s) have a missing or non-numeric salary; they will fail any salary threshold");
        }
        if dropped > 0 {
            warn!("{dropped} catalog row(s) dropped: empty job title or skills");
        }

        let facets = FacetVocabulary::discover(&jobs);
        let salary_range = salary_bounds(&jobs);

        Ok(Self {
            jobs,
            facets,
            salary_range,
        })
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn facets(&self) -> &FacetVocabulary {
        &self.facets
    }

    /// (min, max) over rows with a present salary; `None` if no row has one.
    pub fn salary_range(&self) -> Option<(f64, f64)> {
        self.salary_range
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

fn parse_salary(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|s| s.is_finite())
}

fn salary_bounds(jobs: &[JobRecord]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for salary in jobs.iter().filter_map(|j| j.salary) {
        bounds = Some(match bounds {
            None => (salary, salary),
            Some((min, max)) => (min.min(salary), max.max(salary)),
        });
    }
    bounds
}
