//! Facet filtering — narrows the catalog before ranking.

use serde::Deserialize;

use crate::catalog::JobRecord;
use crate::errors::AppError;

/// Selector value meaning "no constraint" for a categorical facet.
/// The presentation layer sends it as the default option of each dropdown.
pub const ALL: &str = "All";

/// A set of optional facet constraints. Absent fields (or the literal
/// `"All"`) leave that dimension unconstrained; concrete values match by
/// exact, case-sensitive string equality against the stored column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetSelection {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_salary: Option<f64>,
}

impl FacetSelection {
    fn matches(&self, job: &JobRecord) -> bool {
        if let Some(v) = constraint(&self.industry) {
            if job.industry != v {
                return false;
            }
        }
        if let Some(v) = constraint(&self.experience_level) {
            if job.experience_level != v {
                return false;
            }
        }
        if let Some(v) = constraint(&self.job_type) {
            if job.job_type != v {
                return false;
            }
        }
        if let Some(v) = constraint(&self.location) {
            if job.location != v {
                return false;
            }
        }
        if let Some(threshold) = self.min_salary {
            // Rows with a missing salary fail the threshold rather than
            // slipping into the ranked results unpriced.
            match job.salary {
                Some(salary) if salary >= threshold => {}
                _ => return false,
            }
        }
        true
    }
}

fn constraint(selection: &Option<String>) -> Option<&str> {
    match selection.as_deref() {
        None => None,
        Some(v) if v == ALL => None,
        Some(v) => Some(v),
    }
}

/// Returns the rows satisfying every constraint, preserving catalog order.
/// Order stability matters downstream: the ranker breaks score ties by
/// pre-sort position, so identical inputs always produce identical output.
pub fn filter<'a>(
    jobs: &'a [JobRecord],
    selection: &FacetSelection,
) -> Result<Vec<&'a JobRecord>, AppError> {
    let matches: Vec<&JobRecord> = jobs.iter().filter(|job| selection.matches(job)).collect();
    if matches.is_empty() {
        return Err(AppError::NoMatch);
    }
    Ok(matches)
}
