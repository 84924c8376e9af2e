use serde::{Deserialize, Serialize};

/// Catalog-issued job identifier. Monotonic, never reused.
pub type JobId = u32;

const LOGO_FALLBACK_BASE: &str = "https://api.dicebear.com/8.x/initials/svg?seed=";

/// Every mutable attribute of a job posting. The catalog pairs these with an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFields {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "new", default)]
    pub is_new: bool,
    #[serde(rename = "featured", default)]
    pub is_featured: bool,
    pub position: String,
    pub role: String,
    pub level: String,
    pub posted_at: String,
    pub contract: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A job posting as stored in the catalog and in the baseline dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub fields: JobFields,
}

impl Job {
    pub fn new(id: JobId, fields: JobFields) -> Self {
        Self { id, fields }
    }

    /// Logo to display; falls back to a generated initials avatar.
    pub fn logo_url(&self) -> String {
        match self.fields.logo.as_deref().map(str::trim) {
            Some(logo) if !logo.is_empty() => logo.to_string(),
            _ => format!("{LOGO_FALLBACK_BASE}{}", self.fields.company),
        }
    }

    /// Card tags: role, level, then the skill list.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = Vec::with_capacity(self.fields.skills.len() + 2);
        tags.push(self.fields.role.clone());
        tags.push(self.fields.level.clone());
        tags.extend(self.fields.skills.iter().cloned());
        tags
    }

    /// Free-text fields the tag and search passes look at (skills are matched separately).
    pub fn searchable_text(&self) -> [&str; 5] {
        [
            self.fields.position.as_str(),
            self.fields.company.as_str(),
            self.fields.contract.as_str(),
            self.fields.description.as_str(),
            self.fields.location.as_str(),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_fields(company: &str, position: &str, skills: &[&str]) -> JobFields {
    JobFields {
        company: company.to_string(),
        logo: None,
        is_new: false,
        is_featured: false,
        position: position.to_string(),
        role: "Frontend".to_string(),
        level: "Junior".to_string(),
        posted_at: "1d ago".to_string(),
        contract: "Full Time".to_string(),
        location: "Remote".to_string(),
        description: String::new(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserializes_dataset_shape() {
        let json = r#"{
            "id": 3,
            "company": "Account",
            "logo": "https://example.com/account.svg",
            "new": true,
            "featured": false,
            "position": "Junior Frontend Developer",
            "role": "Frontend",
            "level": "Junior",
            "postedAt": "2d ago",
            "contract": "Part Time",
            "location": "USA Only",
            "skills": ["JavaScript", "React", "Sass"]
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 3);
        assert!(job.fields.is_new);
        assert_eq!(job.fields.posted_at, "2d ago");
        assert_eq!(job.fields.description, "");
        assert_eq!(job.fields.skills.len(), 3);
    }

    #[test]
    fn test_job_serializes_with_dataset_keys() {
        let job = Job::new(1, sample_fields("Photosnap", "Senior Frontend Developer", &["HTML"]));
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["postedAt"], "1d ago");
        assert_eq!(value["new"], false);
        assert!(value.get("logo").is_none());
    }

    #[test]
    fn test_logo_url_falls_back_to_initials() {
        let mut job = Job::new(1, sample_fields("Manage", "Fullstack Developer", &[]));
        assert_eq!(
            job.logo_url(),
            "https://api.dicebear.com/8.x/initials/svg?seed=Manage"
        );
        job.fields.logo = Some("https://cdn.example.com/manage.svg".to_string());
        assert_eq!(job.logo_url(), "https://cdn.example.com/manage.svg");
    }

    #[test]
    fn test_tags_are_role_level_then_skills() {
        let job = Job::new(1, sample_fields("Loop", "Software Engineer", &["Ruby", "Sass"]));
        assert_eq!(job.tags(), vec!["Frontend", "Junior", "Ruby", "Sass"]);
    }
}
