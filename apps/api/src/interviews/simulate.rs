//! Deterministic transcript synthesis for the simulated answer flow.
//!
//! Each outstanding question gets one plausible spoken-answer transcript.
//! Template and vocabulary picks are driven by a stable hash of the
//! interview id and question index, so a given interview always simulates
//! the same answers.

use uuid::Uuid;

use crate::evaluator::canned::stable_hash;

const TEMPLATES: [&str; 5] = [
    "I have {years} years of experience with {skill}. In my previous role at {company}, I \
     worked extensively on {project_type} projects and carried them from design through \
     production rollout.",
    "Yes, I'm very familiar with {skill}. I've used it to {use_case}, and I particularly \
     enjoy the design side because it forces you to think about failure modes early. At \
     {company} that mindset saved us more than once.",
    "In my current position I handle {project_type} work using {skill}. My approach is to \
     write the tests alongside the implementation and to keep rollouts small so problems \
     surface in production gradually rather than all at once.",
    "The most challenging project I've worked on involved {use_case}. I had to balance a \
     hard deadline against reliability, and we landed it by cutting scope rather than \
     cutting testing. That experience shaped how I plan work today.",
    "My background covers {skill} and general {project_type} engineering over {years} \
     years. I'm strongest at debugging under pressure — at {company} I was usually the \
     person paged first when something broke in production.",
];

const YEARS: [&str; 4] = ["two", "three", "four", "five"];
const SKILLS: [&str; 6] = [
    "Rust",
    "Python",
    "SQL and schema design",
    "REST API design",
    "distributed systems",
    "cloud infrastructure",
];
const COMPANIES: [&str; 4] = [
    "a fintech startup",
    "an e-commerce company",
    "a healthcare firm",
    "a logistics company",
];
const PROJECT_TYPES: [&str; 4] = ["backend", "full-stack", "data pipeline", "platform"];
const USE_CASES: [&str; 4] = [
    "build scalable APIs",
    "optimize slow database queries",
    "migrate a monolith to services",
    "implement authentication and auditing",
];

fn pick<'a>(options: &'a [&'a str], seed: u64, slot: u32) -> &'a str {
    options[((seed >> (slot * 8)) % options.len() as u64) as usize]
}

/// One plausible transcript for question `q_idx` of `interview_id`.
pub fn transcript_for(interview_id: Uuid, q_idx: u32) -> String {
    let seed = stable_hash(&format!("{interview_id}:{q_idx}"));
    let template = TEMPLATES[(q_idx as usize) % TEMPLATES.len()];
    template
        .replace("{years}", pick(&YEARS, seed, 0))
        .replace("{skill}", pick(&SKILLS, seed, 1))
        .replace("{company}", pick(&COMPANIES, seed, 2))
        .replace("{project_type}", pick(&PROJECT_TYPES, seed, 3))
        .replace("{use_case}", pick(&USE_CASES, seed, 4))
}

/// Placeholder recording reference for a simulated answer. Points at a
/// reserved domain; nothing is ever fetched from it.
pub fn recording_url_for(interview_id: Uuid, q_idx: u32) -> String {
    format!("https://recordings.invalid/{interview_id}/q_{q_idx}.mp3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcripts_are_deterministic() {
        let id = Uuid::new_v4();
        assert_eq!(transcript_for(id, 0), transcript_for(id, 0));
        assert_eq!(transcript_for(id, 3), transcript_for(id, 3));
    }

    #[test]
    fn test_consecutive_questions_get_distinct_transcripts() {
        let id = Uuid::new_v4();
        assert_ne!(transcript_for(id, 0), transcript_for(id, 1));
    }

    #[test]
    fn test_transcripts_have_no_unfilled_placeholders() {
        let id = Uuid::new_v4();
        for q_idx in 0..7 {
            let transcript = transcript_for(id, q_idx);
            assert!(!transcript.contains('{'), "unfilled slot in: {transcript}");
            assert!(transcript.len() > 80);
        }
    }

    #[test]
    fn test_recording_url_names_interview_and_question() {
        let id = Uuid::new_v4();
        let url = recording_url_for(id, 2);
        assert!(url.contains(&id.to_string()));
        assert!(url.ends_with("q_2.mp3"));
    }
}
