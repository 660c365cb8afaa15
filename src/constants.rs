pub const APP_NAME: &str = "Kleingroepe";

pub const MEETING_FREQUENCIES: &[&str] = &["Weekliks", "Maandeliks"];

pub const AREAS: &[&str] = &[
    "Langenhovenpark",
    "Universitas",
    "Westdene",
    "Brandwag",
    "Fichardtpark",
    "Pellissier",
    "Wilgehof",
    "Gardenia Park",
];

pub const ANNOUNCEMENT_CATEGORIES: &[&str] = &["Event", "Training", "Group Needs", "General"];

pub const LEADER_NAME_MIN: usize = 2;
pub const GROUP_NAME_MIN: usize = 3;
pub const LOCATION_MIN: usize = 3;
pub const DESCRIPTION_MAX: usize = 500;
pub const ANNOUNCEMENT_TITLE_MIN: usize = 3;
pub const ANNOUNCEMENT_CONTENT_MIN: usize = 10;

// Audit actions
pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const ADMIN_BOOTSTRAPPED: &str = "ADMIN_BOOTSTRAPPED";
pub const GROUP_REGISTERED: &str = "GROUP_REGISTERED";
pub const GROUP_APPROVED: &str = "GROUP_APPROVED";
pub const GROUP_RETURNED_TO_PENDING: &str = "GROUP_RETURNED_TO_PENDING";
pub const GROUP_STATUS_UPDATED: &str = "GROUP_STATUS_UPDATED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const MEMBER_JOINED: &str = "MEMBER_JOINED";
pub const MEMBER_LEFT: &str = "MEMBER_LEFT";
pub const ANNOUNCEMENT_CREATED: &str = "ANNOUNCEMENT_CREATED";
pub const ANNOUNCEMENT_UPDATED: &str = "ANNOUNCEMENT_UPDATED";
pub const ANNOUNCEMENT_DELETED: &str = "ANNOUNCEMENT_DELETED";
