use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::validation::validate_identity;
use crate::errors::AppError;
use crate::filtering::tags::TagSet;
use crate::models::profile::Profile;
use crate::store::{PersistentStore, PROFILE_KEY};

/// Outcome of adding a profile skill. A duplicate or blank skill is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillChange {
    Added,
    DuplicateIgnored,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    pub async fn load(store: &PersistentStore) -> Self {
        Self {
            profile: store.load(PROFILE_KEY).await.unwrap_or_default(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn skills(&self) -> &TagSet {
        &self.profile.skills
    }

    pub async fn add_skill(&mut self, skill: &str, store: &PersistentStore) -> SkillChange {
        if !self.profile.skills.insert(skill) {
            debug!("Ignoring blank or duplicate skill '{skill}'");
            return SkillChange::DuplicateIgnored;
        }
        store.commit(PROFILE_KEY, &self.profile).await;
        SkillChange::Added
    }

    /// Removes a skill ignoring case. Returns the stored spelling.
    pub async fn remove_skill(
        &mut self,
        skill: &str,
        store: &PersistentStore,
    ) -> Result<String, AppError> {
        let removed = self
            .profile
            .skills
            .remove(skill)
            .ok_or_else(|| AppError::NotFound(format!("Skill '{skill}' not in profile")))?;
        store.commit(PROFILE_KEY, &self.profile).await;
        Ok(removed)
    }

    pub async fn set_identity(
        &mut self,
        name: &str,
        position: &str,
        store: &PersistentStore,
    ) -> Result<(), AppError> {
        let (name, position) = validate_identity(name, position)?;
        self.profile.name = name;
        self.profile.position = position;
        store.commit(PROFILE_KEY, &self.profile).await;
        info!("Profile saved for {}", self.profile.name);
        Ok(())
    }
}
