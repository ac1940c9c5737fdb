use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - violation class
/// - path (repo-relative)
/// - line and column
pub fn fingerprint_for_finding(
    check_id: &str,
    class: &str,
    path: &str,
    line: u32,
    col: u32,
) -> String {
    let canonical = format!("{check_id}|{class}|{path}|{line}|{col}");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_position_sensitive() {
        let a = fingerprint_for_finding("closed_system", "v1_class_name", "src/a.tsx", 3, 5);
        let b = fingerprint_for_finding("closed_system", "v1_class_name", "src/a.tsx", 3, 5);
        let c = fingerprint_for_finding("closed_system", "v1_class_name", "src/a.tsx", 3, 6);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
