//! Heuristic resume parsing: text extraction plus best-effort field pulls.
//! The output is advisory metadata, not a source of truth.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MAX_SKILLS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeMeta {
    pub name_guess: String,
    pub email: Option<String>,
    pub phone_guess: Option<String>,
    pub skills: Vec<String>,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\+?\d[\d\s\-()]{7,}").expect("valid phone regex"))
}

/// Extracts text from the uploaded file (PDF via pdf-extract, anything else
/// treated as UTF-8) and pulls candidate fields out of it.
pub fn parse_resume(bytes: &[u8], filename: &str) -> Result<ResumeMeta, AppError> {
    let text = if filename.to_lowercase().ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Could not extract text from PDF: {e}")))?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation("Resume contains no text".to_string()));
    }

    Ok(extract_fields(&text))
}

fn extract_fields(text: &str) -> ResumeMeta {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let name_guess = lines.first().copied().unwrap_or("Unknown").to_string();
    let email = email_re().find(text).map(|m| m.as_str().to_string());
    let phone_guess = phone_re().find(text).map(|m| m.as_str().trim().to_string());

    // First "Skills:" line wins; split on common separators.
    let skills = lines
        .iter()
        .take(50)
        .find(|l| l.to_lowercase().contains("skills"))
        .map(|l| {
            l.rsplit(':')
                .next()
                .unwrap_or("")
                .split(&[',', '|', '/'][..])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(MAX_SKILLS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ResumeMeta {
        name_guess,
        email,
        phone_guess,
        skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
Arjun Sharma
Bengaluru, India
arjun.sharma@example.com | +91 98765 43210

Skills: Rust, Python, PostgreSQL, Docker

Experience
Backend Engineer, Fintech Co (2021-2024)";

    #[test]
    fn test_extracts_name_from_first_line() {
        let meta = extract_fields(FIXTURE);
        assert_eq!(meta.name_guess, "Arjun Sharma");
    }

    #[test]
    fn test_extracts_email_and_phone() {
        let meta = extract_fields(FIXTURE);
        assert_eq!(meta.email.as_deref(), Some("arjun.sharma@example.com"));
        assert!(meta.phone_guess.unwrap().starts_with("+91"));
    }

    #[test]
    fn test_extracts_skills_list() {
        let meta = extract_fields(FIXTURE);
        assert_eq!(meta.skills, vec!["Rust", "Python", "PostgreSQL", "Docker"]);
    }

    #[test]
    fn test_missing_fields_are_none_not_errors() {
        let meta = extract_fields("Just a name\nand some text with nothing else");
        assert_eq!(meta.name_guess, "Just a name");
        assert!(meta.email.is_none());
        assert!(meta.phone_guess.is_none());
        assert!(meta.skills.is_empty());
    }

    #[test]
    fn test_plain_text_resume_parses_end_to_end() {
        let meta = parse_resume(FIXTURE.as_bytes(), "resume.txt").unwrap();
        assert_eq!(meta.name_guess, "Arjun Sharma");
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(matches!(
            parse_resume(b"   \n  ", "resume.txt"),
            Err(AppError::Validation(_))
        ));
    }
}
