//! Add/edit form validation for jobs and the profile identity form.
//!
//! All field errors are collected before returning so the client can flag every
//! bad input at once. A failed validation never touches catalog state.

use chrono::Local;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{AppError, FieldError};
use crate::filtering::tags::TagSet;
use crate::models::job::{Job, JobFields};

/// Raw add/edit job form as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobForm {
    pub company: String,
    pub position: String,
    pub logo: String,
    pub contract: String,
    pub location: String,
    pub role: String,
    pub level: String,
    /// Comma-separated skill list.
    pub skills: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    #[serde(rename = "new", skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(rename = "featured", skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl JobForm {
    /// Prefill for the edit form.
    pub fn from_job(job: &Job) -> Self {
        let f = &job.fields;
        Self {
            company: f.company.clone(),
            position: f.position.clone(),
            logo: f.logo.clone().unwrap_or_default(),
            contract: f.contract.clone(),
            location: f.location.clone(),
            role: f.role.clone(),
            level: f.level.clone(),
            skills: f.skills.join(", "),
            description: f.description.clone(),
            posted_at: Some(f.posted_at.clone()),
            is_new: Some(f.is_new),
            is_featured: Some(f.is_featured),
        }
    }
}

const REQUIRED_JOB_FIELDS: &[(&str, &str)] = &[
    ("company", "Company"),
    ("position", "Position"),
    ("contract", "Contract"),
    ("location", "Location"),
    ("role", "Role"),
    ("level", "Level"),
    ("description", "Description"),
];

/// Validates a job form into catalog fields.
///
/// `existing` is the job being edited; its posting date and badges are kept when the
/// form leaves them out. New jobs are stamped with today's date and marked new.
pub fn validate_job_form(form: &JobForm, existing: Option<&Job>) -> Result<JobFields, AppError> {
    let mut errors = Vec::new();

    for &(field, label) in REQUIRED_JOB_FIELDS {
        if form_value(form, field).trim().is_empty() {
            errors.push(FieldError::new(field, format!("{label} is required")));
        }
    }

    let logo = form.logo.trim();
    if !logo.is_empty() && !is_web_url(logo) {
        errors.push(FieldError::new("logo", "Logo must be a valid URL"));
    }

    if !errors.is_empty() {
        return Err(AppError::ValidationFailed(errors));
    }

    let skills: TagSet = form.skills.split(',').collect();
    let posted_at = form
        .posted_at
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| existing.map(|j| j.fields.posted_at.clone()))
        .unwrap_or_else(today_label);

    Ok(JobFields {
        company: form.company.trim().to_string(),
        logo: (!logo.is_empty()).then(|| logo.to_string()),
        is_new: form
            .is_new
            .or(existing.map(|j| j.fields.is_new))
            .unwrap_or(true),
        is_featured: form
            .is_featured
            .or(existing.map(|j| j.fields.is_featured))
            .unwrap_or(false),
        position: form.position.trim().to_string(),
        role: form.role.trim().to_string(),
        level: form.level.trim().to_string(),
        posted_at,
        contract: form.contract.trim().to_string(),
        location: form.location.trim().to_string(),
        description: form.description.trim().to_string(),
        skills: skills.into(),
    })
}

/// Validates the profile identity form. Both fields are required.
pub fn validate_identity(name: &str, position: &str) -> Result<(String, String), AppError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if position.trim().is_empty() {
        errors.push(FieldError::new("position", "Position is required"));
    }
    if !errors.is_empty() {
        return Err(AppError::ValidationFailed(errors));
    }
    Ok((name.trim().to_string(), position.trim().to_string()))
}

fn form_value<'a>(form: &'a JobForm, field: &str) -> &'a str {
    match field {
        "company" => &form.company,
        "position" => &form.position,
        "contract" => &form.contract,
        "location" => &form.location,
        "role" => &form.role,
        "level" => &form.level,
        "description" => &form.description,
        _ => "",
    }
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

fn today_label() -> String {
    Local::now().format("%b %d, %Y").to_string()
}
