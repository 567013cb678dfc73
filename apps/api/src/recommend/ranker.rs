//! Semantic ranking — orders a filtered job subset by cosine similarity
//! between the user's text and each job's skill list.
//!
//! Algorithm:
//! 1. Encode the user text.
//! 2. Encode every subset row's skills in one batch call.
//! 3. Cosine similarity per row, zero-norm vectors scoring 0.
//! 4. Stable sort descending; ties keep catalog order.
//! 5. Truncate to `top_k`, assign 1-based ranks.

use serde::Serialize;

use crate::catalog::JobRecord;
use crate::embed::Embedder;
use crate::errors::AppError;

/// One ranked job. `score` is cosine similarity in [-1, 1]; `rank` is
/// 1-based. Recomputed on every query, never cached or written back to the
/// catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub job: JobRecord,
    pub score: f32,
    pub rank: usize,
    /// Skill tokens from the job that appear verbatim (case-insensitive) in
    /// the user's text. Explainability signal, independent of `score`.
    pub matched_skills: Vec<String>,
}

/// Ranks `subset` against `user_text` and returns the `min(top_k, subset.len())`
/// best matches in descending score order.
pub async fn rank(
    embedder: &dyn Embedder,
    user_text: &str,
    subset: &[&JobRecord],
    top_k: usize,
) -> Result<Vec<Recommendation>, AppError> {
    if user_text.trim().is_empty() {
        return Err(AppError::Encoding(
            "cannot rank against empty user text".to_string(),
        ));
    }
    if subset.is_empty() || top_k == 0 {
        return Ok(Vec::new());
    }

    let user_vector = embedder.encode(user_text).await?;

    // One batch call for the whole subset, not one call per row.
    let skills: Vec<String> = subset.iter().map(|job| job.skills.clone()).collect();
    let job_vectors = embedder.encode_batch(&skills).await?;

    let mut scored: Vec<(usize, f32)> = job_vectors
        .iter()
        .enumerate()
        .map(|(i, vector)| (i, cosine_similarity(&user_vector, vector)))
        .collect();

    // Vec::sort_by is stable: equal scores keep catalog order, so identical
    // inputs always produce identical output.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(position, (i, score))| Recommendation {
            job: subset[i].clone(),
            score,
            rank: position + 1,
            matched_skills: matched_skills(&subset[i].skills, user_text),
        })
        .collect())
}

/// Splits the job's skills on commas and keeps the tokens that occur as
/// substrings of the lowercased user text.
pub fn matched_skills(skills: &str, user_text: &str) -> Vec<String> {
    let haystack = user_text.to_lowercase();
    skills
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty() && haystack.contains(token.as_str()))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1]; 0 if either vector has zero norm.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::testing::CountingEmbedder;

    fn make_job(title: &str, skills: &str) -> JobRecord {
        JobRecord {
            job_title: title.to_string(),
            industry: "Tech".to_string(),
            experience_level: "Mid".to_string(),
            job_type: "Full-Time".to_string(),
            location: "Remote".to_string(),
            salary: Some(100000.0),
            skills: skills.to_string(),
        }
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_norm_guard() {
        let zero = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[tokio::test]
    async fn test_rank_is_deterministic() {
        let jobs = vec![
            make_job("A", "Python, SQL"),
            make_job("B", "JavaScript, React"),
            make_job("C", "Rust, Tokio"),
        ];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let first = rank(&CountingEmbedder, "python and sql", &subset, 3)
            .await
            .unwrap();
        let second = rank(&CountingEmbedder, "python and sql", &subset, 3)
            .await
            .unwrap();

        let titles = |recs: &[Recommendation]| -> Vec<String> {
            recs.iter().map(|r| r.job.job_title.clone()).collect()
        };
        assert_eq!(titles(&first), titles(&second));
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.rank, b.rank);
        }
    }

    #[tokio::test]
    async fn test_scores_within_bounds_and_self_similarity_wins() {
        let jobs = vec![
            make_job("Exact", "Python, SQL, Excel"),
            make_job("Other", "Welding, Carpentry"),
        ];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        // User text identical to the first job's skill text.
        let recs = rank(&CountingEmbedder, "Python, SQL, Excel", &subset, 2)
            .await
            .unwrap();

        for rec in &recs {
            assert!(rec.score >= -1.0 && rec.score <= 1.0);
        }
        assert_eq!(recs[0].job.job_title, "Exact");
        assert!((recs[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_rank_returns_min_of_top_k_and_subset_len() {
        let jobs = vec![make_job("A", "Python"), make_job("B", "SQL")];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let recs = rank(&CountingEmbedder, "python", &subset, 10).await.unwrap();
        assert_eq!(recs.len(), 2);

        let recs = rank(&CountingEmbedder, "python", &subset, 1).await.unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[tokio::test]
    async fn test_ranks_are_one_based_and_descending() {
        let jobs = vec![
            make_job("A", "welding"),
            make_job("B", "python sql excel"),
            make_job("C", "python"),
        ];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let recs = rank(&CountingEmbedder, "python sql excel", &subset, 3)
            .await
            .unwrap();
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[1].rank, 2);
        assert_eq!(recs[2].rank, 3);
        assert!(recs[0].score >= recs[1].score);
        assert!(recs[1].score >= recs[2].score);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_catalog_order() {
        let jobs = vec![
            make_job("First", "Python, SQL"),
            make_job("Second", "Python, SQL"),
        ];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let recs = rank(&CountingEmbedder, "Python, SQL", &subset, 2)
            .await
            .unwrap();
        assert_eq!(recs[0].score, recs[1].score);
        assert_eq!(recs[0].job.job_title, "First");
        assert_eq!(recs[1].job.job_title, "Second");
    }

    #[tokio::test]
    async fn test_empty_user_text_is_rejected() {
        let jobs = vec![make_job("A", "Python")];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let err = rank(&CountingEmbedder, "   ", &subset, 3).await.unwrap_err();
        assert!(matches!(err, AppError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_empty_subset_returns_empty() {
        let recs = rank(&CountingEmbedder, "python", &[], 3).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_zero_norm_user_vector_scores_zero() {
        // "123" contains no letters, so the test embedder yields a zero
        // vector; every score must fall back to 0 instead of dividing by 0.
        let jobs = vec![make_job("A", "Python")];
        let subset: Vec<&JobRecord> = jobs.iter().collect();

        let recs = rank(&CountingEmbedder, "123", &subset, 1).await.unwrap();
        assert_eq!(recs[0].score, 0.0);
    }

    #[test]
    fn test_matched_skills_case_insensitive_substring() {
        let matched = matched_skills("Python, SQL, Excel", "I know python and excel");
        assert_eq!(matched, vec!["python", "excel"]);
    }

    #[test]
    fn test_matched_skills_empty_when_no_overlap() {
        let matched = matched_skills("Welding, Carpentry", "I know python");
        assert!(matched.is_empty());
    }

    #[test]
    fn test_matched_skills_trims_tokens() {
        let matched = matched_skills("  Python ,  SQL  ", "python and sql");
        assert_eq!(matched, vec!["python", "sql"]);
    }

    #[test]
    fn test_matched_skills_ignores_empty_tokens() {
        let matched = matched_skills("Python,,SQL", "python sql");
        assert_eq!(matched, vec!["python", "sql"]);
    }
}
