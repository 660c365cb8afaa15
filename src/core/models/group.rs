use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Document collections a group can live in. A group is in exactly one of them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Collection {
    #[serde(rename = "pendingGroups")]
    PendingGroups,
    #[serde(rename = "groups")]
    Groups,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::PendingGroups => "pendingGroups",
            Collection::Groups => "groups",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Older documents use `approved` / `declined`; both are read as the canonical names.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Pending,
    #[serde(alias = "approved")]
    Active,
    #[serde(alias = "declined")]
    Rejected,
}

impl GroupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupStatus::Pending => "pending",
            GroupStatus::Active => "active",
            GroupStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum MeetingDay {
    #[serde(rename = "Maandag")]
    Monday,
    #[serde(rename = "Dinsdag")]
    Tuesday,
    #[serde(rename = "Woensdag")]
    Wednesday,
    #[serde(rename = "Donderdag")]
    Thursday,
    #[serde(rename = "Vrydag")]
    Friday,
    #[serde(rename = "Saterdag")]
    Saturday,
    #[serde(rename = "Sondag")]
    Sunday,
}

impl MeetingDay {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingDay::Monday => "Maandag",
            MeetingDay::Tuesday => "Dinsdag",
            MeetingDay::Wednesday => "Woensdag",
            MeetingDay::Thursday => "Donderdag",
            MeetingDay::Friday => "Vrydag",
            MeetingDay::Saturday => "Saterdag",
            MeetingDay::Sunday => "Sondag",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum MeetingTime {
    #[serde(rename = "Oggend")]
    Morning,
    #[serde(rename = "Middag")]
    Afternoon,
    #[serde(rename = "Aand")]
    Evening,
    #[serde(rename = "Enige tyd")]
    Anytime,
}

impl MeetingTime {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingTime::Morning => "Oggend",
            MeetingTime::Afternoon => "Middag",
            MeetingTime::Evening => "Aand",
            MeetingTime::Anytime => "Enige tyd",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum MeetingType {
    #[serde(rename = "in persoon")]
    InPerson,
    #[serde(rename = "aanlyn")]
    Online,
}

impl MeetingType {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingType::InPerson => "in persoon",
            MeetingType::Online => "aanlyn",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum TargetAudience {
    #[serde(rename = "Men")]
    Men,
    #[serde(rename = "Women")]
    Women,
    #[serde(rename = "Mixed Adults")]
    MixedAdults,
    #[serde(rename = "Young Adults (18-25)")]
    YoungAdults,
    #[serde(rename = "Youth (12-17)")]
    Youth,
    #[serde(rename = "Seniors (60+)")]
    Seniors,
    #[serde(rename = "Families")]
    Families,
}

impl TargetAudience {
    /// Display label shown to visitors.
    pub fn label(self) -> &'static str {
        match self {
            TargetAudience::Men => "Mans",
            TargetAudience::Women => "Vroue",
            TargetAudience::MixedAdults => "Gemengde Volwassenes",
            TargetAudience::YoungAdults => "Jong Volwassenes (18-25)",
            TargetAudience::Youth => "Jeug (12-17)",
            TargetAudience::Seniors => "Seniors (60+)",
            TargetAudience::Families => "Gesinne",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FocusCategoryKey {
    Vryheid,
    Mekaar,
    GeestelikeGroei,
    Gaan,
}

impl FocusCategoryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FocusCategoryKey::Vryheid => "vryheid",
            FocusCategoryKey::Mekaar => "mekaar",
            FocusCategoryKey::GeestelikeGroei => "geestelike-groei",
            FocusCategoryKey::Gaan => "gaan",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FocusCategoryKey::Vryheid => "Vryheid Groep",
            FocusCategoryKey::Mekaar => "Mekaar Groep",
            FocusCategoryKey::GeestelikeGroei => "Geestelike Groei",
            FocusCategoryKey::Gaan => "Gaan Groep",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FocusCategoryKey::Vryheid => "Verdieping in God se Woord.",
            FocusCategoryKey::Mekaar => "Saam bid vir mekaar en die wêreld.",
            FocusCategoryKey::GeestelikeGroei => "Groei in geloof en volgelingskap.",
            FocusCategoryKey::Gaan => "Impak maak in die gemeenskap.",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub leader_name: String,
    pub leader_contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<String>,
    pub group_name: String,
    pub meeting_day: MeetingDay,
    pub meeting_time: MeetingTime,
    pub meeting_frequency: String,
    pub meeting_type: MeetingType,
    pub target_audience: TargetAudience,
    pub childcare_available: bool,
    pub location: String,
    pub primary_focus: FocusCategoryKey,
    #[serde(default)]
    pub secondary_focus: Vec<FocusCategoryKey>,
    pub capacity: u32,
    pub current_members: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: GroupStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    /// Zero capacity means unlimited.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.members.len() >= self.capacity as usize
    }

    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.current_members)
    }

    pub fn sync_member_count(&mut self) {
        self.current_members = self.members.len() as u32;
    }
}

/// Registration form submitted by a prospective group leader.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupRegistration {
    pub leader_name: String,
    #[serde(default)]
    pub leader_email: Option<String>,
    #[serde(default)]
    pub leader_cellphone: Option<String>,
    pub group_name: String,
    pub meeting_day: MeetingDay,
    pub meeting_time: MeetingTime,
    pub meeting_frequency: String,
    pub meeting_type: MeetingType,
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub childcare_available: bool,
    pub location: String,
    pub primary_focus: FocusCategoryKey,
    #[serde(default)]
    pub secondary_focus: Vec<FocusCategoryKey>,
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A group as seen from the admin table, tagged with the collection it came from.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModerationGroup {
    #[serde(flatten)]
    pub group: Group,
    pub source_type: Collection,
}
