use crate::auth::jwt::{Claims, JwtService, ROLE_ADMIN, ROLE_USER};
use crate::constants::{
    ADMIN_BOOTSTRAPPED, ANNOUNCEMENT_CATEGORIES, AREAS, ANNOUNCEMENT_CONTENT_MIN, ANNOUNCEMENT_CREATED, ANNOUNCEMENT_DELETED,
    ANNOUNCEMENT_TITLE_MIN, ANNOUNCEMENT_UPDATED, DESCRIPTION_MAX, GROUP_APPROVED, GROUP_DELETED, GROUP_NAME_MIN,
    GROUP_REGISTERED, GROUP_RETURNED_TO_PENDING, GROUP_STATUS_UPDATED, LEADER_NAME_MIN, LOCATION_MIN,
    MEETING_FREQUENCIES, MEMBER_JOINED, MEMBER_LEFT, USER_REGISTERED,
};
use crate::core::directory::{DirectoryPage, DirectoryQuery};
use crate::core::errors::KleingroepeError;
use crate::core::export::groups_to_csv;
use crate::core::models::{
    announcement::{Announcement, AnnouncementInput},
    audit::{AppLog, GroupAudit},
    group::{Collection, Group, GroupRegistration, GroupStatus, ModerationGroup},
    user::{User, UserSummary},
};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

const PASSWORD_MIN: usize = 8;

/// An active group with its leader and members resolved from the `users` collection.
#[derive(Serialize, Debug, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub group: Group,
    pub leader: Option<UserSummary>,
    pub members: Vec<UserSummary>,
    /// `None` when capacity is unlimited.
    pub spots_left: Option<u32>,
    pub focus_name: String,
    pub focus_description: String,
    pub audience_label: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq, Eq)]
pub struct ApprovalResult {
    pub status: String,
    pub message: String,
}

pub struct KleingroepeService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    jwt_service: JwtService,
    directory_ttl: Duration,
    password_cost: u32,
}

impl<L: LoggingService, S: Storage, C: Cache> KleingroepeService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, jwt_secret: String) -> Self {
        KleingroepeService {
            storage,
            logging,
            cache,
            jwt_service: JwtService::new(jwt_secret),
            directory_ttl: Duration::from_secs(60),
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_directory_ttl(mut self, ttl: Duration) -> Self {
        self.directory_ttl = ttl;
        self
    }

    /// bcrypt work factor for new password hashes.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, KleingroepeError> {
        self.jwt_service.validate_token(token)
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), KleingroepeError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: log_details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    /// Audit entry for a write that has already committed; a failure here is logged, not returned.
    async fn record_committed(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) {
        if let Err(e) = self.log_and_audit(group_id, action, log_details, user_id).await {
            error!("Failed to record {} (group {:?}): {}", action, group_id, e);
        }
    }

    async fn invalidate_directory(&self) {
        if let Err(e) = self.cache.invalidate_active_groups().await {
            warn!("Failed to invalidate directory cache: {}", e);
        }
    }

    fn validate_length(&self, field: &str, value: &str, min: usize, max: usize) -> Result<(), KleingroepeError> {
        let len = value.trim().chars().count();
        if len < min {
            return Err(KleingroepeError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} must be at least {} characters", field, min),
            ));
        }
        if len > max {
            return Err(KleingroepeError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max),
            ));
        }
        if value.chars().any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t') {
            return Err(KleingroepeError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), KleingroepeError> {
        let email = email.trim();
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
            None => false,
        };
        if !valid || email.len() < 5 || email.chars().any(char::is_whitespace) {
            return Err(KleingroepeError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    fn authorize_admin(&self, user: &User) -> Result<(), KleingroepeError> {
        if user.is_admin {
            Ok(())
        } else {
            warn!("User {} attempted an admin action", user.id);
            Err(KleingroepeError::PermissionDenied(format!(
                "User {} is not an administrator",
                user.id
            )))
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, KleingroepeError> {
        bcrypt::hash(password, self.password_cost)
            .map_err(|e| KleingroepeError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    // USERS

    pub async fn register_user(&self, name: String, email: String, password: String) -> Result<User, KleingroepeError> {
        self.validate_length("name", &name, LEADER_NAME_MIN, usize::MAX)?;
        self.validate_email(&email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(KleingroepeError::invalid_input(
                "password",
                "Invalid password",
                format!("Password must be at least {} characters", PASSWORD_MIN),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: Some(email.trim().to_string()),
            avatar_url: None,
            is_admin: false,
            password_hash: self.hash_password(&password)?,
        };
        let user = self.storage.create_user(user).await?;
        info!("Registered user {}", user.id);

        self.record_committed(
            None,
            USER_REGISTERED,
            json!({ "user_id": user.id, "name": user.name }),
            Some(user.id.as_str()),
        )
        .await;
        Ok(user)
    }

    /// Creates the configured administrator, or promotes and re-keys an existing account with that email.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> Result<User, KleingroepeError> {
        self.validate_email(email)?;
        let password_hash = self.hash_password(password)?;

        let admin = match self.storage.get_user_by_email(email).await? {
            Some(mut existing) => {
                existing.is_admin = true;
                existing.password_hash = password_hash;
                self.storage.save_user(existing.clone()).await?;
                existing
            }
            None => {
                let user = User {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    email: Some(email.trim().to_string()),
                    avatar_url: None,
                    is_admin: true,
                    password_hash,
                };
                self.storage.create_user(user).await?
            }
        };
        info!("Administrator {} is available", admin.id);

        self.record_committed(None, ADMIN_BOOTSTRAPPED, json!({ "user_id": admin.id }), None)
            .await;
        Ok(admin)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, KleingroepeError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or(KleingroepeError::InvalidCredentials)?;

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| KleingroepeError::InternalServerError(format!("Password verification error: {}", e)))?;
        if !verified {
            warn!("Failed login for user {}", user.id);
            return Err(KleingroepeError::InvalidCredentials);
        }

        let role = if user.is_admin { ROLE_ADMIN } else { ROLE_USER };
        self.jwt_service.generate_token(&user.id, role)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, KleingroepeError> {
        self.storage.get_user(user_id).await
    }

    /// Resolves the caller behind a token; a token for a deleted user is no longer valid.
    pub async fn require_user(&self, user_id: &str) -> Result<User, KleingroepeError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| KleingroepeError::Unauthenticated(format!("Unknown user {}", user_id)))
    }

    // REGISTRATION

    pub async fn register_group(
        &self,
        registration: GroupRegistration,
        submitted_by: Option<&User>,
    ) -> Result<Group, KleingroepeError> {
        self.validate_length("leaderName", &registration.leader_name, LEADER_NAME_MIN, usize::MAX)?;
        self.validate_length("groupName", &registration.group_name, GROUP_NAME_MIN, usize::MAX)?;
        self.validate_length("location", &registration.location, LOCATION_MIN, usize::MAX)?;

        let email = registration
            .leader_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        if let Some(email) = email {
            self.validate_email(email)?;
        }
        let cellphone = registration
            .leader_cellphone
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let leader_contact = email.or(cellphone).ok_or_else(|| {
            KleingroepeError::invalid_input(
                "leaderContact",
                "Missing contact",
                "Provide an email address or a cellphone number",
            )
        })?;

        let frequency = registration.meeting_frequency.trim();
        if !MEETING_FREQUENCIES.contains(&frequency) {
            return Err(KleingroepeError::invalid_input(
                "meetingFrequency",
                "Invalid meetingFrequency",
                format!("meetingFrequency must be one of {}", MEETING_FREQUENCIES.join(", ")),
            ));
        }
        if registration.capacity < 1 {
            return Err(KleingroepeError::invalid_input(
                "capacity",
                "Invalid capacity",
                "capacity must be at least 1",
            ));
        }
        let description = registration
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        if let Some(description) = &description {
            self.validate_length("description", description, 0, DESCRIPTION_MAX)?;
        }

        let mut secondary_focus = Vec::new();
        for key in registration.secondary_focus {
            if !secondary_focus.contains(&key) {
                secondary_focus.push(key);
            }
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            leader_name: registration.leader_name.trim().to_string(),
            leader_contact: leader_contact.to_string(),
            leader_id: submitted_by.map(|u| u.id.clone()),
            group_name: registration.group_name.trim().to_string(),
            meeting_day: registration.meeting_day,
            meeting_time: registration.meeting_time,
            meeting_frequency: frequency.to_string(),
            meeting_type: registration.meeting_type,
            target_audience: registration.target_audience,
            childcare_available: registration.childcare_available,
            location: registration.location.trim().to_string(),
            primary_focus: registration.primary_focus,
            secondary_focus,
            capacity: registration.capacity,
            current_members: 0,
            description,
            expiry_date: registration.expiry_date,
            status: GroupStatus::Pending,
            image: registration.image.filter(|i| !i.trim().is_empty()),
            members: Vec::new(),
            created_at: Utc::now(),
        };

        self.storage.save_group(Collection::PendingGroups, group.clone()).await?;
        info!("Group {} submitted for approval", group.id);

        self.record_committed(
            Some(group.id.as_str()),
            GROUP_REGISTERED,
            json!({ "group_id": group.id, "group_name": group.group_name, "leader_name": group.leader_name }),
            submitted_by.map(|u| u.id.as_str()),
        )
        .await;
        Ok(group)
    }

    // PUBLIC DIRECTORY

    async fn active_groups(&self) -> Result<Vec<Group>, KleingroepeError> {
        match self.cache.get_active_groups().await {
            Ok(Some(groups)) => {
                debug!("Directory served from cache");
                return Ok(groups);
            }
            Ok(None) => {}
            Err(e) => warn!("Directory cache read failed: {}", e),
        }

        let generation = match self.cache.generation().await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!("Directory cache generation unavailable: {}", e);
                None
            }
        };
        let groups: Vec<Group> = self
            .storage
            .list_groups(Collection::Groups)
            .await?
            .into_iter()
            .filter(|g| g.status == GroupStatus::Active)
            .collect();
        if let Some(generation) = generation {
            match self.cache.save_active_groups(&groups, self.directory_ttl, generation).await {
                Ok(true) => {}
                Ok(false) => debug!("Directory changed while reading, listing not cached"),
                Err(e) => warn!("Directory cache write failed: {}", e),
            }
        }
        Ok(groups)
    }

    pub async fn directory(&self, query: &DirectoryQuery) -> Result<DirectoryPage, KleingroepeError> {
        let groups = query.apply(self.active_groups().await?);
        let announcements = self.storage.list_announcements().await?;
        Ok(DirectoryPage {
            view: query.view.unwrap_or_default(),
            total: groups.len(),
            groups,
            announcements,
            areas: AREAS.iter().map(|a| a.to_string()).collect(),
        })
    }

    // GROUP DETAIL & MEMBERSHIP

    async fn require_active_group(&self, group_id: &str) -> Result<Group, KleingroepeError> {
        match self.storage.get_group(Collection::Groups, group_id).await? {
            Some(group) if group.status == GroupStatus::Active => Ok(group),
            Some(_) => Err(KleingroepeError::GroupNotAvailable(group_id.to_string())),
            None => {
                if self.storage.get_group(Collection::PendingGroups, group_id).await?.is_some() {
                    Err(KleingroepeError::GroupNotAvailable(group_id.to_string()))
                } else {
                    Err(KleingroepeError::GroupNotFound(group_id.to_string(), Collection::Groups))
                }
            }
        }
    }

    async fn resolve_detail(&self, group: Group) -> Result<GroupDetail, KleingroepeError> {
        let leader = match &group.leader_id {
            Some(leader_id) => self.storage.get_user(leader_id).await?.as_ref().map(UserSummary::from),
            None => None,
        };

        let lookups = group.members.iter().map(|id| self.storage.get_user(id));
        let members = futures::future::try_join_all(lookups)
            .await?
            .iter()
            .flatten()
            .map(UserSummary::from)
            .collect();

        let spots_left = (group.capacity > 0).then(|| group.spots_left());
        Ok(GroupDetail {
            focus_name: group.primary_focus.name().to_string(),
            focus_description: group.primary_focus.description().to_string(),
            audience_label: group.target_audience.label().to_string(),
            group,
            leader,
            members,
            spots_left,
        })
    }

    pub async fn group_detail(&self, group_id: &str) -> Result<GroupDetail, KleingroepeError> {
        let group = self.require_active_group(group_id).await?;
        self.resolve_detail(group).await
    }

    pub async fn join_group(&self, group_id: &str, user: &User) -> Result<GroupDetail, KleingroepeError> {
        let before = self.require_active_group(group_id).await?;
        let group = self.storage.add_group_member(group_id, &user.id).await.map_err(|e| {
            warn!("User {} could not join group {}: {}", user.id, group_id, e);
            e
        })?;
        self.invalidate_directory().await;

        if !before.has_member(&user.id) {
            info!("User {} joined group {}", user.id, group_id);
            self.record_committed(
                Some(group_id),
                MEMBER_JOINED,
                json!({ "group_id": group_id, "current_members": group.current_members }),
                Some(user.id.as_str()),
            )
            .await;
        }
        self.resolve_detail(group).await
    }

    pub async fn leave_group(&self, group_id: &str, user: &User) -> Result<GroupDetail, KleingroepeError> {
        let before = self.require_active_group(group_id).await?;
        let group = self.storage.remove_group_member(group_id, &user.id).await?;
        self.invalidate_directory().await;

        if before.has_member(&user.id) {
            info!("User {} left group {}", user.id, group_id);
            self.record_committed(
                Some(group_id),
                MEMBER_LEFT,
                json!({ "group_id": group_id, "current_members": group.current_members }),
                Some(user.id.as_str()),
            )
            .await;
        }
        self.resolve_detail(group).await
    }

    // MODERATION

    pub async fn list_moderation_groups(&self, requested_by: &User) -> Result<Vec<ModerationGroup>, KleingroepeError> {
        self.authorize_admin(requested_by)?;
        let mut rows = Vec::new();
        for collection in [Collection::PendingGroups, Collection::Groups] {
            rows.extend(
                self.storage
                    .list_groups(collection)
                    .await?
                    .into_iter()
                    .map(|group| ModerationGroup {
                        group,
                        source_type: collection,
                    }),
            );
        }
        Ok(rows)
    }

    /// Approving a pending group and returning a listed group to pending are moves between
    /// collections; every other change is an in-place status update.
    pub async fn update_status(
        &self,
        group_id: &str,
        new_status: GroupStatus,
        source: Collection,
        updated_by: &User,
    ) -> Result<ModerationGroup, KleingroepeError> {
        self.authorize_admin(updated_by)?;

        let (group, target, action) = match (source, new_status) {
            (Collection::PendingGroups, GroupStatus::Active) => {
                let group = self
                    .storage
                    .move_group(group_id, Collection::PendingGroups, Collection::Groups, GroupStatus::Active)
                    .await?;
                (group, Collection::Groups, GROUP_APPROVED)
            }
            (Collection::Groups, GroupStatus::Pending) => {
                let group = self
                    .storage
                    .move_group(group_id, Collection::Groups, Collection::PendingGroups, GroupStatus::Pending)
                    .await?;
                (group, Collection::PendingGroups, GROUP_RETURNED_TO_PENDING)
            }
            _ => {
                let group = self.storage.update_group_status(source, group_id, new_status).await?;
                (group, source, GROUP_STATUS_UPDATED)
            }
        };

        if source == Collection::Groups || target == Collection::Groups {
            self.invalidate_directory().await;
        }
        info!("Group {} set to {} in {}", group_id, new_status, target);

        self.record_committed(
            Some(group_id),
            action,
            json!({ "group_id": group_id, "status": new_status, "from": source, "to": target }),
            Some(updated_by.id.as_str()),
        )
        .await;

        Ok(ModerationGroup {
            group,
            source_type: target,
        })
    }

    pub async fn delete_group(&self, group_id: &str, source: Collection, deleted_by: &User) -> Result<(), KleingroepeError> {
        self.authorize_admin(deleted_by)?;
        self.storage.delete_group(source, group_id).await?;
        if source == Collection::Groups {
            self.invalidate_directory().await;
        }
        info!("Group {} deleted from {}", group_id, source);

        self.record_committed(
            Some(group_id),
            GROUP_DELETED,
            json!({ "group_id": group_id, "collection": source }),
            Some(deleted_by.id.as_str()),
        )
        .await;
        Ok(())
    }

    pub async fn export_groups_csv(&self, requested_by: &User) -> Result<String, KleingroepeError> {
        let rows = self.list_moderation_groups(requested_by).await?;
        Ok(groups_to_csv(&rows))
    }

    /// Privileged approval: caller must be signed in and flagged admin in `users`,
    /// and the group must still be pending.
    pub async fn approve_group(
        &self,
        caller_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<ApprovalResult, KleingroepeError> {
        info!(caller = ?caller_id, group = ?group_id, "approveGroup called");

        let Some(caller_id) = caller_id else {
            warn!("approveGroup called by unauthenticated user");
            return Err(KleingroepeError::Unauthenticated(
                "Only authenticated users can approve groups.".to_string(),
            ));
        };

        match self.storage.get_user(caller_id).await {
            Ok(Some(user)) if user.is_admin => {}
            Ok(_) => {
                warn!("User {} is not an admin and attempted to approve group", caller_id);
                return Err(KleingroepeError::PermissionDenied(
                    "Only administrators can approve groups.".to_string(),
                ));
            }
            Err(e) => {
                error!("Error checking admin status for user {}: {}", caller_id, e);
                return Err(KleingroepeError::InternalServerError(
                    "Could not verify admin status.".to_string(),
                ));
            }
        }

        let Some(group_id) = group_id.map(str::trim).filter(|id| !id.is_empty()) else {
            warn!("approveGroup called with invalid or missing groupId");
            return Err(KleingroepeError::InvalidArgument(
                "The function must be called with a valid groupId.".to_string(),
            ));
        };

        let group = match self
            .storage
            .move_group(group_id, Collection::PendingGroups, Collection::Groups, GroupStatus::Active)
            .await
        {
            Ok(group) => group,
            Err(e @ KleingroepeError::GroupNotFound(..)) => {
                warn!("Pending group with ID {} not found", group_id);
                return Err(e);
            }
            Err(e) => {
                error!("Error approving group {}: {}", group_id, e);
                return Err(KleingroepeError::InternalServerError(
                    "An error occurred while approving the group.".to_string(),
                ));
            }
        };
        self.invalidate_directory().await;
        info!("Group {} approved successfully", group.id);

        self.record_committed(
            Some(group.id.as_str()),
            GROUP_APPROVED,
            json!({ "group_id": group.id, "via": "approveGroup" }),
            Some(caller_id),
        )
        .await;

        Ok(ApprovalResult {
            status: "success".to_string(),
            message: "Group approved successfully.".to_string(),
        })
    }

    // ANNOUNCEMENTS

    fn validate_announcement(&self, input: AnnouncementInput) -> Result<AnnouncementInput, KleingroepeError> {
        self.validate_length("title", &input.title, ANNOUNCEMENT_TITLE_MIN, usize::MAX)?;
        self.validate_length("content", &input.content, ANNOUNCEMENT_CONTENT_MIN, usize::MAX)?;

        let category = match input.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => Some(
                ANNOUNCEMENT_CATEGORIES
                    .iter()
                    .find(|known| known.eq_ignore_ascii_case(category))
                    .map(|known| known.to_string())
                    .ok_or_else(|| {
                        KleingroepeError::invalid_input(
                            "category",
                            "Invalid category",
                            format!("category must be one of {}", ANNOUNCEMENT_CATEGORIES.join(", ")),
                        )
                    })?,
            ),
            None => None,
        };

        Ok(AnnouncementInput {
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            category,
        })
    }

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, KleingroepeError> {
        self.storage.list_announcements().await
    }

    pub async fn create_announcement(
        &self,
        input: AnnouncementInput,
        created_by: &User,
    ) -> Result<Announcement, KleingroepeError> {
        self.authorize_admin(created_by)?;
        let input = self.validate_announcement(input)?;

        let announcement = Announcement {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            date: Utc::now(),
            category: input.category,
        };
        self.storage.save_announcement(announcement.clone()).await?;

        self.record_committed(
            None,
            ANNOUNCEMENT_CREATED,
            json!({ "announcement_id": announcement.id, "title": announcement.title }),
            Some(created_by.id.as_str()),
        )
        .await;
        Ok(announcement)
    }

    pub async fn update_announcement(
        &self,
        announcement_id: &str,
        input: AnnouncementInput,
        updated_by: &User,
    ) -> Result<Announcement, KleingroepeError> {
        self.authorize_admin(updated_by)?;
        let input = self.validate_announcement(input)?;

        let mut announcement = self
            .storage
            .get_announcement(announcement_id)
            .await?
            .ok_or_else(|| KleingroepeError::AnnouncementNotFound(announcement_id.to_string()))?;
        announcement.title = input.title;
        announcement.content = input.content;
        announcement.category = input.category;
        self.storage.save_announcement(announcement.clone()).await?;

        self.record_committed(
            None,
            ANNOUNCEMENT_UPDATED,
            json!({ "announcement_id": announcement.id }),
            Some(updated_by.id.as_str()),
        )
        .await;
        Ok(announcement)
    }

    pub async fn delete_announcement(&self, announcement_id: &str, deleted_by: &User) -> Result<(), KleingroepeError> {
        self.authorize_admin(deleted_by)?;
        self.storage.delete_announcement(announcement_id).await?;

        self.record_committed(
            None,
            ANNOUNCEMENT_DELETED,
            json!({ "announcement_id": announcement_id }),
            Some(deleted_by.id.as_str()),
        )
        .await;
        Ok(())
    }

    // AUDIT

    pub async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, KleingroepeError> {
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, KleingroepeError> {
        self.logging.get_logs().await
    }
}
