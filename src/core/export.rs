use crate::core::models::group::ModerationGroup;

pub const CSV_FILE_NAME: &str = "kleingroepe_data.csv";

const HEADERS: [&str; 12] = [
    "ID",
    "Groepnaam",
    "Leier Naam",
    "Leier Kontak",
    "Status",
    "Bron",
    "Primêre Fokus",
    "Ligging",
    "Dag",
    "Tyd",
    "Kapasiteit",
    "Huidige Lede",
];

/// Always-quoted field with embedded quotes doubled.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders the admin table as CSV, one row per group, newline separated.
pub fn groups_to_csv(groups: &[ModerationGroup]) -> String {
    let mut lines = Vec::with_capacity(groups.len() + 1);
    lines.push(HEADERS.join(","));
    for row in groups {
        let group = &row.group;
        let fields = [
            group.id.clone(),
            quoted(&group.group_name),
            quoted(&group.leader_name),
            quoted(&group.leader_contact),
            group.status.as_str().to_string(),
            row.source_type.as_str().to_string(),
            group.primary_focus.as_str().to_string(),
            quoted(&group.location),
            group.meeting_day.as_str().to_string(),
            group.meeting_time.as_str().to_string(),
            group.capacity.to_string(),
            group.current_members.to_string(),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}
