use uuid::Uuid;

/// Derive a deterministic UUID (v3, DNS namespace) from the concatenation of `parts`
pub fn get_uuid(parts: &[&str]) -> String {
    Uuid::new_v3(&Uuid::NAMESPACE_DNS, parts.concat().as_bytes()).to_string()
}
