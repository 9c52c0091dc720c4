//! Repository grouping shared by the repository, collaboration, and
//! technology analyses.

use std::collections::HashMap;

use orgpulse_core::{RepoWork, RepositoryKey, UNKNOWN};

/// All repo-work rows for one repository, in input order.
#[derive(Debug)]
pub(crate) struct RepositoryGroup<'a> {
    /// Grouping key: the id or the name, depending on configuration.
    pub key: &'a str,
    /// Display name from the first row seen.
    pub name: &'a str,
    pub rows: Vec<&'a RepoWork>,
}

/// The key a row is grouped under.
///
/// With [`RepositoryKey::Id`], rows lacking an id fall back to the name so
/// that id-less rows do not all merge into one bucket.
pub(crate) fn repository_key(work: &RepoWork, key: RepositoryKey) -> &str {
    match key {
        RepositoryKey::Id if !work.repository_id.is_empty() && work.repository_id != UNKNOWN => {
            &work.repository_id
        }
        RepositoryKey::Id | RepositoryKey::Name => &work.repository_name,
    }
}

/// Group rows by repository, groups ordered by first appearance.
pub(crate) fn group_by_repository(
    works: &[RepoWork],
    key: RepositoryKey,
) -> Vec<RepositoryGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RepositoryGroup<'_>> = Vec::new();

    for work in works {
        let repo = repository_key(work, key);
        let slot = *index.entry(repo).or_insert_with(|| {
            groups.push(RepositoryGroup {
                key: repo,
                name: &work.repository_name,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(work);
    }

    groups
}

impl<'a> RepositoryGroup<'a> {
    /// Distinct contributor ids, in order of first appearance.
    pub fn contributors(&self) -> Vec<&'a str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|&w| w.contributor_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Union of technology tags across rows, in order of first appearance.
    pub fn technologies(&self) -> Vec<&'a str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .flat_map(|&w| w.technologies.iter().map(String::as_str))
            .filter(|tech| seen.insert(*tech))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(contributor: &str, id: &str, name: &str) -> RepoWork {
        RepoWork {
            repository_id: id.into(),
            repository_name: name.into(),
            ..RepoWork::new(contributor, id)
        }
    }

    #[test]
    fn groups_by_id_keep_first_appearance_order() {
        let works = vec![
            work("alice", "proj2", "project2"),
            work("alice", "proj1", "project1"),
            work("bob", "proj2", "project2"),
        ];
        let groups = group_by_repository(&works, RepositoryKey::Id);
        let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["proj2", "proj1"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[0].name, "project2");
    }

    #[test]
    fn same_name_different_ids_stay_separate_by_id() {
        let works = vec![
            work("alice", "org-a/api", "api"),
            work("bob", "org-b/api", "api"),
        ];
        assert_eq!(group_by_repository(&works, RepositoryKey::Id).len(), 2);
        assert_eq!(group_by_repository(&works, RepositoryKey::Name).len(), 1);
    }

    #[test]
    fn missing_id_falls_back_to_name() {
        let works = vec![work("alice", "", "docs"), work("bob", "unknown", "site")];
        let groups = group_by_repository(&works, RepositoryKey::Id);
        let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["docs", "site"]);
    }

    #[test]
    fn contributors_are_distinct() {
        let works = vec![
            work("alice", "p", "p"),
            work("bob", "p", "p"),
            work("alice", "p", "p"),
        ];
        let groups = group_by_repository(&works, RepositoryKey::Id);
        assert_eq!(groups[0].contributors(), vec!["alice", "bob"]);
    }
}
