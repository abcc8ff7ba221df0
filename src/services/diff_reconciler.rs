//! Suggested fixes derived from the original and converged file sets.
//!
//! Files removed between the two sets are not reported. The model only ever
//! returns full replacements, so a missing file means it was never sent back,
//! not that it should be deleted.

use crate::domain::models::{FixKind, ProjectFileSet, SuggestedFix};

pub const MODIFIED_DESCRIPTION: &str = "Updated to resolve deployment issues";
pub const ADDED_DESCRIPTION: &str = "New file required for deployment";

/// List every file that was added or changed, in the final set's path order.
pub fn reconcile(original: &ProjectFileSet, converged: &ProjectFileSet) -> Vec<SuggestedFix> {
    if original.shares_storage_with(converged) {
        return Vec::new();
    }

    converged
        .iter()
        .filter_map(|(path, content)| {
            let (kind, description) = match original.get(path) {
                Some(before) if before == content => return None,
                Some(_) => (FixKind::Modified, MODIFIED_DESCRIPTION),
                None => (FixKind::Added, ADDED_DESCRIPTION),
            };
            Some(SuggestedFix {
                file_name: path.to_string(),
                description: description.to_string(),
                suggested_code: content.to_string(),
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_modified_added_and_deleted() {
        let original: ProjectFileSet = [("x.py", "a"), ("y.py", "b")].into_iter().collect();
        let converged: ProjectFileSet = [("x.py", "a2"), ("Dockerfile", "FROM python")]
            .into_iter()
            .collect();

        let fixes: HashSet<SuggestedFix> = reconcile(&original, &converged).into_iter().collect();
        let expected: HashSet<SuggestedFix> = [
            SuggestedFix {
                file_name: "x.py".to_string(),
                description: MODIFIED_DESCRIPTION.to_string(),
                suggested_code: "a2".to_string(),
                kind: FixKind::Modified,
            },
            SuggestedFix {
                file_name: "Dockerfile".to_string(),
                description: ADDED_DESCRIPTION.to_string(),
                suggested_code: "FROM python".to_string(),
                kind: FixKind::Added,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(fixes, expected);
    }

    #[test]
    fn test_identical_sets_have_no_fixes() {
        let original: ProjectFileSet = [("a", "1")].into_iter().collect();
        let rebuilt: ProjectFileSet = [("a", "1")].into_iter().collect();
        assert!(reconcile(&original, &original.clone()).is_empty());
        assert!(reconcile(&original, &rebuilt).is_empty());
    }

    #[test]
    fn test_order_follows_final_set() {
        let original = ProjectFileSet::new();
        let converged: ProjectFileSet = [("b", "2"), ("a", "1")].into_iter().collect();
        let names: Vec<String> = reconcile(&original, &converged)
            .into_iter()
            .map(|f| f.file_name)
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
