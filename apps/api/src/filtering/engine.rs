//! Filter Engine — combines profile skills, manual tag filters and the search box
//! into one match set over the catalog.
//!
//! Stateless: every call recomputes from scratch, so a newer result always
//! supersedes an older one.

use tracing::debug;

use crate::filtering::tags::TagSet;
use crate::models::job::Job;

// ────────────────────────────────────────────────────────────────────────────
// Inputs / outputs
// ────────────────────────────────────────────────────────────────────────────

/// The three independent filter sources.
#[derive(Debug, Clone, Copy)]
pub struct FilterInputs<'a> {
    pub profile_skills: &'a TagSet,
    pub manual_filters: &'a TagSet,
    pub search_term: &'a str,
}

impl FilterInputs<'_> {
    /// No source is engaged. The engine then matches nothing rather than everything.
    pub fn is_empty(&self) -> bool {
        self.profile_skills.is_empty()
            && self.manual_filters.is_empty()
            && self.search_term.trim().is_empty()
    }
}

/// The match set, in catalog order, plus the counts behind the stats line.
#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub matches: Vec<&'a Job>,
    pub match_count: usize,
    pub total_count: usize,
}

impl FilterResult<'_> {
    pub fn stats_message(&self) -> String {
        stats_message(self.match_count, self.total_count)
    }
}

pub fn stats_message(match_count: usize, total_count: usize) -> String {
    if match_count == 0 {
        "None match your skills or query".to_string()
    } else {
        format!("{match_count} out of {total_count} matches of your skills and query")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Applies all active filters to `jobs`.
///
/// Algorithm (all comparisons case-insensitive substring containment):
/// 1. No input engaged → empty result.
/// 2. Skill pass: every profile skill is contained in some job skill.
/// 3. Tag pass: every manual tag is contained in a job skill, position, company,
///    contract, description or location.
/// 4. Search pass: the trimmed term is contained in one of those same fields.
///
/// Passes intersect; the output keeps catalog order.
pub fn apply_filters<'a>(jobs: &'a [Job], inputs: &FilterInputs<'_>) -> FilterResult<'a> {
    let total_count = jobs.len();

    if inputs.is_empty() {
        return FilterResult {
            matches: Vec::new(),
            match_count: 0,
            total_count,
        };
    }

    let skills = lowered(inputs.profile_skills.iter());
    let tags = lowered(inputs.manual_filters.iter());
    let term = inputs.search_term.trim().to_lowercase();

    let matches: Vec<&Job> = jobs
        .iter()
        .filter(|job| {
            let view = LoweredJob::new(job);
            skills.iter().all(|s| view.has_skill_containing(s))
                && tags.iter().all(|t| view.any_field_contains(t))
                && (term.is_empty() || view.any_field_contains(&term))
        })
        .collect();

    debug!(
        "Filtered {total_count} jobs with {} skills, {} tags, term '{term}' -> {} matches",
        skills.len(),
        tags.len(),
        matches.len()
    );

    FilterResult {
        match_count: matches.len(),
        matches,
        total_count,
    }
}

fn lowered<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Lower-cased copy of the searchable parts of a job, built once per job per pass.
struct LoweredJob {
    skills: Vec<String>,
    text: Vec<String>,
}

impl LoweredJob {
    fn new(job: &Job) -> Self {
        Self {
            skills: job.fields.skills.iter().map(|s| s.trim().to_lowercase()).collect(),
            text: job
                .searchable_text()
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
        }
    }

    fn has_skill_containing(&self, needle: &str) -> bool {
        self.skills.iter().any(|s| s.contains(needle))
    }

    fn any_field_contains(&self, needle: &str) -> bool {
        self.has_skill_containing(needle) || self.text.iter().any(|t| t.contains(needle))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{sample_fields, Job};

    fn job(id: u32, company: &str, position: &str, location: &str, skills: &[&str]) -> Job {
        let mut fields = sample_fields(company, position, skills);
        fields.location = location.to_string();
        Job::new(id, fields)
    }

    fn ids(result: &FilterResult<'_>) -> Vec<u32> {
        result.matches.iter().map(|j| j.id).collect()
    }

    fn run<'a>(jobs: &'a [Job], skills: &[&str], tags: &[&str], term: &str) -> FilterResult<'a> {
        let skills: TagSet = skills.iter().copied().collect();
        let tags: TagSet = tags.iter().copied().collect();
        apply_filters(
            jobs,
            &FilterInputs {
                profile_skills: &skills,
                manual_filters: &tags,
                search_term: term,
            },
        )
    }

    fn catalog() -> Vec<Job> {
        vec![
            job(1, "Photosnap", "Senior Frontend Developer", "Remote", &["React", "CSS"]),
            job(2, "Insure", "Junior Frontend Developer", "USA Only", &["Vue"]),
            job(3, "Manage", "Senior Fullstack Developer", "USA Only", &["Python", "React"]),
            job(4, "Loop", "Junior Developer", "Remote", &["Ruby"]),
        ]
    }

    #[test]
    fn test_no_inputs_matches_nothing() {
        let jobs = catalog();
        let result = run(&jobs, &[], &[], "   ");
        assert!(result.matches.is_empty());
        assert_eq!(result.match_count, 0);
        assert_eq!(result.total_count, 4);
    }

    #[test]
    fn test_profile_skill_selects_matching_job() {
        let jobs = vec![
            job(1, "A", "Dev", "Remote", &["React", "CSS"]),
            job(2, "B", "Dev", "Remote", &["Vue"]),
        ];
        assert_eq!(ids(&run(&jobs, &["React"], &[], "")), vec![1]);
    }

    #[test]
    fn test_profile_skills_must_all_match() {
        let jobs = catalog();
        assert_eq!(ids(&run(&jobs, &["react", "python"], &[], "")), vec![3]);
    }

    #[test]
    fn test_profile_skill_is_substring_of_job_skill() {
        let jobs = vec![job(1, "A", "Dev", "Remote", &["JavaScript"])];
        assert_eq!(ids(&run(&jobs, &["script"], &[], "")), vec![1]);
    }

    #[test]
    fn test_profile_skills_ignore_non_skill_fields() {
        // "Senior" appears in the position but skills pass only looks at skills
        let jobs = catalog();
        assert!(run(&jobs, &["senior"], &[], "").matches.is_empty());
    }

    #[test]
    fn test_manual_tags_and_across_tags_or_across_fields() {
        let jobs = catalog();
        // job 4 matches only "remote"; job 1 matches both via location + position
        assert_eq!(ids(&run(&jobs, &[], &["remote", "senior"], "")), vec![1]);
    }

    #[test]
    fn test_manual_tag_matches_company_and_skill() {
        let jobs = catalog();
        assert_eq!(ids(&run(&jobs, &[], &["insure"], "")), vec![2]);
        assert_eq!(ids(&run(&jobs, &[], &["RUBY"], "")), vec![4]);
    }

    #[test]
    fn test_search_term_is_trimmed_and_case_insensitive() {
        let jobs = catalog();
        assert_eq!(ids(&run(&jobs, &[], &[], "  FRONTEND ")), vec![1, 2]);
    }

    #[test]
    fn test_all_three_sources_intersect() {
        let jobs = catalog();
        assert_eq!(ids(&run(&jobs, &["react"], &["usa"], "senior")), vec![3]);
        assert!(run(&jobs, &["react"], &["usa"], "junior").matches.is_empty());
    }

    #[test]
    fn test_result_keeps_catalog_order() {
        let jobs = catalog();
        assert_eq!(ids(&run(&jobs, &[], &[], "developer")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_description_is_searchable() {
        let mut jobs = catalog();
        jobs[1].fields.description = "Mentoring program included".to_string();
        assert_eq!(ids(&run(&jobs, &[], &[], "mentoring")), vec![2]);
    }

    #[test]
    fn test_stats_messages() {
        assert_eq!(stats_message(0, 10), "None match your skills or query");
        assert_eq!(
            stats_message(3, 10),
            "3 out of 10 matches of your skills and query"
        );
    }
}
