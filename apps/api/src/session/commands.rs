use serde::{Deserialize, Serialize};

use crate::catalog::validation::JobForm;
use crate::models::job::JobId;
use crate::views::View;

/// Tabs whose views are rendered only while open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Profile,
    Favorites,
    Manage,
}

/// One discrete user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddSkill { skill: String },
    RemoveSkill { skill: String },
    SetIdentity { name: String, position: String },
    AddManualFilter { tag: String },
    RemoveManualFilter { tag: String },
    /// Clears manual filters and the search box.
    ClearFilters,
    SetSearchTerm { term: String },
    /// A tag clicked on a job card; becomes a manual filter.
    ClickTag { id: JobId, tag: String },
    ToggleFavorite { id: JobId },
    CreateJob { form: JobForm },
    UpdateJob { id: JobId, form: JobForm },
    DeleteJob { id: JobId },
    SwitchTab { tab: Tab },
}

impl Command {
    /// Views whose content can change when this command succeeds.
    pub fn affected_views(&self) -> &'static [View] {
        use crate::views::View::*;
        match self {
            Command::AddSkill { .. } | Command::RemoveSkill { .. } => &[Profile, JobList, Stats],
            Command::SetIdentity { .. } => &[Profile],
            Command::AddManualFilter { .. }
            | Command::RemoveManualFilter { .. }
            | Command::ClearFilters
            | Command::ClickTag { .. } => &[FilterChips, JobList, Stats],
            Command::SetSearchTerm { .. } => &[JobList, Stats],
            Command::ToggleFavorite { .. } => &[JobList, FavoritesCount, Favorites],
            Command::CreateJob { .. } | Command::UpdateJob { .. } => {
                &[JobList, Stats, Favorites, ManageList]
            }
            Command::DeleteJob { .. } => &[JobList, Stats, FavoritesCount, Favorites, ManageList],
            Command::SwitchTab { tab: Tab::Profile } => &[Profile],
            Command::SwitchTab { tab: Tab::Favorites } => &[FavoritesCount, Favorites],
            Command::SwitchTab { tab: Tab::Manage } => &[ManageList],
        }
    }
}

/// Drops tab-scoped views whose tab is not open.
pub fn scope_to_tab(views: &[View], active: Tab) -> Vec<View> {
    views
        .iter()
        .copied()
        .filter(|v| match v {
            View::Favorites => active == Tab::Favorites,
            View::ManageList => active == Tab::Manage,
            _ => true,
        })
        .collect()
}
