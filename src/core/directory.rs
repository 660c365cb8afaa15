use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::models::{
    announcement::Announcement,
    group::{FocusCategoryKey, Group, MeetingDay, MeetingTime, MeetingType, TargetAudience},
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChildcareFilter {
    Yes,
    No,
    #[default]
    Any,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Search and filter options for the public directory. Unset fields match everything.
#[derive(Clone, Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DirectoryQuery {
    /// Free text matched against name, description, leader and location.
    pub search: Option<String>,
    /// Matched as a substring of the location.
    pub area: Option<String>,
    pub primary_focus: Option<FocusCategoryKey>,
    pub target_audience: Option<TargetAudience>,
    pub meeting_day: Option<MeetingDay>,
    pub meeting_time: Option<MeetingTime>,
    pub meeting_type: Option<MeetingType>,
    pub childcare: Option<ChildcareFilter>,
    pub view: Option<ViewMode>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPage {
    pub view: ViewMode,
    pub total: usize,
    pub groups: Vec<Group>,
    pub announcements: Vec<Announcement>,
    /// Known neighbourhoods for the area filter.
    pub areas: Vec<String>,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl DirectoryQuery {
    pub fn matches(&self, group: &Group) -> bool {
        if let Some(term) = non_blank(&self.search) {
            let hit = contains_ci(&group.group_name, &term)
                || group.description.as_deref().is_some_and(|d| contains_ci(d, &term))
                || contains_ci(&group.leader_name, &term)
                || contains_ci(&group.location, &term);
            if !hit {
                return false;
            }
        }
        if let Some(area) = non_blank(&self.area) {
            if !contains_ci(&group.location, &area) {
                return false;
            }
        }
        if self.primary_focus.is_some_and(|f| f != group.primary_focus) {
            return false;
        }
        if self.target_audience.is_some_and(|a| a != group.target_audience) {
            return false;
        }
        if self.meeting_day.is_some_and(|d| d != group.meeting_day) {
            return false;
        }
        if self.meeting_time.is_some_and(|t| t != group.meeting_time) {
            return false;
        }
        if self.meeting_type.is_some_and(|t| t != group.meeting_type) {
            return false;
        }
        match self.childcare.unwrap_or_default() {
            ChildcareFilter::Yes => group.childcare_available,
            ChildcareFilter::No => !group.childcare_available,
            ChildcareFilter::Any => true,
        }
    }

    pub fn apply(&self, groups: Vec<Group>) -> Vec<Group> {
        groups.into_iter().filter(|g| self.matches(g)).collect()
    }
}
