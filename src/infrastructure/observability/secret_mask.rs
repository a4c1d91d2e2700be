const VISIBLE_PREFIX: usize = 3;

/// Masks a credential for logging, keeping only a short prefix.
pub fn mask_secret(secret: &str) -> String {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let prefix: String = trimmed.chars().take(VISIBLE_PREFIX).collect();
    if prefix.chars().count() == trimmed.chars().count() {
        return String::from("***");
    }
    format!("{}***", prefix)
}
