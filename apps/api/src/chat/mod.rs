//! Chat assistant — conversational job recommendations.
//!
//! A message is appended to the session transcript, ranked against the full
//! catalog (facet filters apply to the recommendation panel, not the
//! assistant), and the composed reply is appended as the assistant's turn.

pub mod handlers;

use crate::recommend::ranker::Recommendation;

/// Builds the assistant's reply text from the ranked matches.
pub(crate) fn compose_reply(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "I could not find any matching jobs for that. Tell me more about your skills."
            .to_string();
    }

    let mut reply = String::from("Here are some jobs you might like:\n\n");
    for rec in recommendations {
        reply.push_str(&format!(
            "{}. {} ({})\n   Required skills: {}\n",
            rec.rank, rec.job.job_title, rec.job.industry, rec.job.skills
        ));
    }
    reply
}
