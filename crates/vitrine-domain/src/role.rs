//! Role tags and effective-role computation.

/// Baseline role granted to every authenticated account, stored or not.
pub const BASELINE: &str = "ROLE_USER";

/// Compute the effective role set from the stored role tags.
///
/// Stored order is preserved, the baseline role is appended, and duplicates
/// are dropped keeping the first occurrence. The result is deterministic for
/// a given input.
pub fn effective(stored: &[String]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::with_capacity(stored.len() + 1);
    for role in stored.iter().map(String::as_str).chain([BASELINE]) {
        if !roles.iter().any(|seen| seen == role) {
            roles.push(role.to_owned());
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_grant_baseline_when_no_roles_stored() {
        assert_eq!(effective(&[]), vec![BASELINE.to_owned()]);
    }

    #[test]
    fn should_append_baseline_after_stored_roles() {
        let stored = vec!["MODERATOR".to_owned()];
        assert_eq!(effective(&stored), vec!["MODERATOR", BASELINE]);
    }

    #[test]
    fn should_not_duplicate_explicitly_stored_baseline() {
        let stored = vec![BASELINE.to_owned(), "ADMIN".to_owned()];
        assert_eq!(effective(&stored), vec![BASELINE, "ADMIN"]);
    }

    #[test]
    fn should_drop_duplicates_keeping_first_occurrence() {
        let stored = vec![
            "ADMIN".to_owned(),
            "MODERATOR".to_owned(),
            "ADMIN".to_owned(),
        ];
        assert_eq!(effective(&stored), vec!["ADMIN", "MODERATOR", BASELINE]);
    }

    #[test]
    fn should_be_stable_across_repeated_calls() {
        let stored = vec!["MODERATOR".to_owned()];
        assert_eq!(effective(&stored), effective(&stored));
    }
}
