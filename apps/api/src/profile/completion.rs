//! Profile completion scoring.
//!
//! Each section awards its full weight or nothing; the weights sum to 100.
//! Deterministic and side-effect free.

use crate::models::profile::FullSeekerProfile;

const AVATAR: u32 = 10;
const HEADLINE: u32 = 10;
const SUMMARY: u32 = 15;
const RESUME: u32 = 15;
const EXPERIENCE: u32 = 20;
const EDUCATION: u32 = 15;
const SKILLS: u32 = 10;
const LANGUAGES: u32 = 5;

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Integer percentage in [0, 100].
pub fn completion_score(full: &FullSeekerProfile) -> u32 {
    let mut score = 0;

    if present(&full.profile.avatar_url) {
        score += AVATAR;
    }
    if present(&full.seeker.headline) {
        score += HEADLINE;
    }
    if present(&full.seeker.summary) {
        score += SUMMARY;
    }
    if present(&full.seeker.resume_url) {
        score += RESUME;
    }
    if !full.work_experiences.is_empty() {
        score += EXPERIENCE;
    }
    if !full.educations.is_empty() {
        score += EDUCATION;
    }
    if !full.skills.is_empty() {
        score += SKILLS;
    }
    if !full.languages.is_empty() {
        score += LANGUAGES;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{
        Education, JobSeekerProfile, Language, Profile, Skill, WorkExperience,
    };
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn empty_profile() -> FullSeekerProfile {
        let now = Utc::now();
        let profile_id = Uuid::new_v4();
        let seeker_id = Uuid::new_v4();
        FullSeekerProfile {
            profile: Profile {
                id: profile_id,
                full_name: "Aminata Diallo".to_string(),
                email: "aminata@example.sn".to_string(),
                avatar_url: None,
                user_type: "job_seeker".to_string(),
                company_id: None,
                created_at: now,
                updated_at: now,
            },
            seeker: JobSeekerProfile {
                id: seeker_id,
                profile_id,
                headline: None,
                summary: None,
                resume_url: None,
                availability: None,
            },
            work_experiences: vec![],
            educations: vec![],
            skills: vec![],
            languages: vec![],
        }
    }

    fn full_profile() -> FullSeekerProfile {
        let mut p = empty_profile();
        let seeker_id = p.seeker.id;
        p.profile.avatar_url = Some("https://cdn.example/avatars/a.png".to_string());
        p.seeker.headline = Some("Backend developer".to_string());
        p.seeker.summary = Some("Five years of Rust and Postgres.".to_string());
        p.seeker.resume_url = Some("https://cdn.example/resumes/a.pdf".to_string());
        p.work_experiences.push(WorkExperience {
            id: Uuid::new_v4(),
            job_seeker_profile_id: seeker_id,
            title: "Developer".to_string(),
            company_name: "Wari".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
            description: None,
        });
        p.educations.push(Education {
            id: Uuid::new_v4(),
            job_seeker_profile_id: seeker_id,
            school: "UCAD".to_string(),
            degree: Some("Licence".to_string()),
            field_of_study: None,
            start_date: None,
            end_date: None,
        });
        p.skills.push(Skill {
            id: Uuid::new_v4(),
            name: "Rust".to_string(),
        });
        p.languages.push(Language {
            id: Uuid::new_v4(),
            name: "Français".to_string(),
        });
        p
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(completion_score(&empty_profile()), 0);
    }

    #[test]
    fn test_full_profile_scores_hundred() {
        assert_eq!(completion_score(&full_profile()), 100);
    }

    #[test]
    fn test_each_section_adds_its_exact_weight() {
        let base = completion_score(&empty_profile());

        let mut p = empty_profile();
        p.profile.avatar_url = Some("x.png".to_string());
        assert_eq!(completion_score(&p) - base, 10);

        let mut p = empty_profile();
        p.seeker.headline = Some("Dev".to_string());
        assert_eq!(completion_score(&p) - base, 10);

        let mut p = empty_profile();
        p.seeker.summary = Some("...".to_string());
        assert_eq!(completion_score(&p) - base, 15);

        let mut p = empty_profile();
        p.seeker.resume_url = Some("cv.pdf".to_string());
        assert_eq!(completion_score(&p) - base, 15);
    }

    #[test]
    fn test_adding_a_section_strictly_increases() {
        let mut p = empty_profile();
        let mut last = completion_score(&p);

        p.seeker.headline = Some("Dev".to_string());
        let s = completion_score(&p);
        assert!(s > last);
        last = s;

        p.educations = full_profile().educations;
        let s = completion_score(&p);
        assert!(s > last);
        last = s;

        p.languages = full_profile().languages;
        assert!(completion_score(&p) > last);
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let mut p = empty_profile();
        p.seeker.headline = Some("   ".to_string());
        p.seeker.summary = Some(String::new());
        assert_eq!(completion_score(&p), 0);
    }

    #[test]
    fn test_never_exceeds_hundred() {
        let mut p = full_profile();
        // Extra entries beyond the first add nothing.
        let extra = p.work_experiences[0].clone();
        p.work_experiences.push(extra);
        assert_eq!(completion_score(&p), 100);
    }
}
