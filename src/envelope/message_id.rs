use uuid::Uuid;

/// Fresh random message identifier in canonical v4 layout
/// (`xxxxxxxx-xxxx-4xxx-Nxxx-xxxxxxxxxxxx`, N in 8..=b), lowercase hex.
pub fn message_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
