//! Heuristic scorer — the deterministic, rule-based alternative to the
//! generative path. No network access, no failure modes of its own.
//!
//! Randomness is confined to filler padding and is injected by the caller
//! so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::models::{Eligibility, EvaluationDraft, ProfileInput};

const BASE_SCORE: i32 = 50;

const FRONTEND_SKILLS: &[&str] = &["javascript", "react", "vue", "angular", "html", "css"];
const BACKEND_SKILLS: &[&str] = &["node.js", "python", "java", "golang", "django", "express"];
const DATABASE_SKILLS: &[&str] = &["sql", "firebase", "mongodb", "postgresql", "mysql"];
const DEVOPS_SKILLS: &[&str] = &["docker", "kubernetes", "aws", "gcp", "azure", "git"];

const FILLER_STRENGTHS: &[&str] = &[
    "Problem-solving ability",
    "Learning aptitude",
    "Team collaboration potential",
    "Attention to detail",
];

const FILLER_WEAKNESSES: &[&str] = &[
    "Limited system design experience",
    "Need to strengthen data structures knowledge",
    "More projects needed for portfolio",
];

/// Scores a profile with fixed keyword and threshold rules.
///
/// All scoring contributions are deterministic; only the filler entries used
/// to pad short strength/weakness lists depend on `rng`.
pub fn score<R: Rng>(profile: &ProfileInput, rng: &mut R) -> EvaluationDraft {
    let skills: Vec<String> = profile
        .skills
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    let has_frontend = matches_family(&skills, FRONTEND_SKILLS);
    let has_backend = matches_family(&skills, BACKEND_SKILLS);
    let has_database = matches_family(&skills, DATABASE_SKILLS);
    let has_devops = matches_family(&skills, DEVOPS_SKILLS);

    let mut strengths: Vec<String> = Vec::new();
    let mut weaknesses: Vec<String> = Vec::new();
    let mut score = BASE_SCORE;

    if has_frontend {
        strengths.push("Strong frontend development skills".to_string());
        score += 15;
    } else {
        weaknesses.push("Limited frontend experience".to_string());
    }

    if has_backend {
        strengths.push("Backend development knowledge".to_string());
        score += 15;
    } else {
        weaknesses.push("No backend programming experience".to_string());
    }

    if has_database {
        strengths.push("Database management knowledge".to_string());
        score += 10;
    } else {
        weaknesses.push("Database experience needed".to_string());
    }

    // Missing devops is not penalized with a weakness — asymmetric on purpose
    if has_devops {
        strengths.push("DevOps and deployment experience".to_string());
        score += 10;
    }

    let experience_years = parse_experience_years(profile.experience.as_deref());
    if experience_years >= 3 {
        strengths.push("Solid professional experience".to_string());
        score += 15;
    } else if experience_years >= 1 {
        strengths.push("Growing professional experience".to_string());
        score += 8;
    } else {
        weaknesses.push("Needs more hands-on experience".to_string());
    }

    // Bachelor is checked first; the two branches never both fire
    if let Some(education) = profile.education.as_deref() {
        let education = education.to_lowercase();
        if education.contains("bachelor") {
            strengths.push("Bachelor degree qualification".to_string());
            score += 10;
        } else if education.contains("master") {
            strengths.push("Advanced degree qualification".to_string());
            score += 15;
        }
    }

    if profile.bio.as_deref().map_or(false, |bio| bio.len() > 50) {
        strengths.push("Clear communication and self-awareness".to_string());
        score += 5;
    }

    pad_with_fillers(&mut strengths, FILLER_STRENGTHS, 3, rng);
    pad_with_fillers(&mut weaknesses, FILLER_WEAKNESSES, 2, rng);

    let mut suggestions: Vec<String> = Vec::new();
    if !has_backend {
        suggestions.push("Learn backend development with Node.js or Python".to_string());
    }
    if !has_database {
        suggestions.push("Master database design and SQL/NoSQL technologies".to_string());
    }
    if !has_devops {
        suggestions.push("Build DevOps skills with Docker and cloud platforms".to_string());
    }
    if experience_years < 2 {
        suggestions.push("Build more real-world projects to strengthen portfolio".to_string());
    }
    suggestions.push("Contribute to open-source projects".to_string());

    let score = score.clamp(0, 100);
    let eligibility = Eligibility::from_score(score as u8);

    strengths.truncate(4);
    weaknesses.truncate(3);
    suggestions.truncate(4);

    EvaluationDraft {
        strengths,
        weaknesses,
        suggestions,
        readiness_score: score,
        eligibility: Some(eligibility),
    }
}

/// A family matches when any skill token contains any of its keywords.
fn matches_family(skills: &[String], family: &[&str]) -> bool {
    skills
        .iter()
        .any(|token| family.iter().any(|keyword| token.contains(keyword)))
}

/// Parses the leading integer of the experience field ("3 years" → 3).
/// Absence or parse failure both count as zero years.
fn parse_experience_years(experience: Option<&str>) -> u32 {
    let digits: String = experience
        .unwrap_or("0")
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Pads `items` up to `target` with distinct entries from `pool`, in an
/// rng-determined order. Deterministic contributions never collide with the
/// filler pools, so the shuffled pool always suffices.
fn pad_with_fillers<R: Rng>(items: &mut Vec<String>, pool: &[&str], target: usize, rng: &mut R) {
    if items.len() >= target {
        return;
    }
    let mut candidates: Vec<&str> = pool.to_vec();
    candidates.shuffle(rng);
    for candidate in candidates {
        if items.len() >= target {
            break;
        }
        if !items.iter().any(|existing| existing == candidate) {
            items.push(candidate.to_string());
        }
    }
}
