pub fn active_groups_key() -> String {
    "directory:active_groups".to_string()
}
