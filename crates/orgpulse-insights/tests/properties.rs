//! Property tests for invariants that must hold on arbitrary inputs.

use std::collections::{HashMap, HashSet};

use orgpulse_core::{Contributor, LimitsConfig, RepoWork, RepositoryConfig, ThresholdConfig};
use orgpulse_insights::collaboration::detect_collaborations;
use orgpulse_insights::overview::overview_metrics;
use orgpulse_insights::productivity::calculate_productivity_metrics;
use orgpulse_insights::segments::segment_contributors;
use orgpulse_insights::skills::analyze_skill_distribution;
use proptest::prelude::*;

const SKILLS: [&str; 6] = ["Python", "Rust", "Go", "React", "SQL", "Docker"];

fn contributors(counts: Vec<(u64, u64)>) -> Vec<Contributor> {
    counts
        .into_iter()
        .enumerate()
        .map(|(i, (commits, repos))| Contributor {
            total_commits: commits,
            repositories_count: repos,
            ..Contributor::new(format!("dev{i}"))
        })
        .collect()
}

fn skilled(picks: Vec<Vec<usize>>) -> Vec<Contributor> {
    picks
        .into_iter()
        .enumerate()
        .map(|(i, idx)| Contributor {
            skills: idx.into_iter().map(|k| SKILLS[k].to_string()).collect(),
            ..Contributor::new(format!("dev{i}"))
        })
        .collect()
}

proptest! {
    /// Every contributor lands in exactly one segment.
    #[test]
    fn segmentation_is_a_partition(
        counts in prop::collection::vec((0u64..300, 0u64..10), 1..40)
    ) {
        let people = contributors(counts);
        let result = segment_contributors(&people).unwrap();

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for members in result.segments.values() {
            for name in members {
                *seen.entry(name.as_str()).or_default() += 1;
            }
        }
        prop_assert_eq!(seen.len(), people.len());
        prop_assert!(seen.values().all(|&n| n == 1));

        let counted: usize = result.segment_statistics.values().map(|s| s.count).sum();
        prop_assert_eq!(counted, people.len());
    }

    /// Totals are consistent with the per-contributor mean.
    #[test]
    fn overview_totals_are_consistent(
        counts in prop::collection::vec((0u64..1000, 0u64..20), 1..40)
    ) {
        let people = contributors(counts);
        let overview = overview_metrics(&people, &LimitsConfig::default()).unwrap();
        prop_assert_eq!(overview.total_contributors, people.len());
        let expected = overview.total_commits as f64 / people.len() as f64;
        prop_assert!((overview.commits_per_contributor - expected).abs() <= 0.005 + 1e-9);
    }

    /// Pairs are canonical and count distinct shared repositories.
    #[test]
    fn collaboration_pairs_are_canonical(
        rows in prop::collection::vec((0usize..6, 0usize..5), 0..40)
    ) {
        let works: Vec<RepoWork> = rows
            .iter()
            .map(|(who, repo)| RepoWork::new(format!("dev{who}"), format!("repo{repo}")))
            .collect();
        let pairs = detect_collaborations(&works, &RepositoryConfig::default());

        let mut repos_of: HashMap<String, HashSet<String>> = HashMap::new();
        for work in &works {
            repos_of
                .entry(work.contributor_id.clone())
                .or_default()
                .insert(work.repository_id.clone());
        }

        let mut keys = HashSet::new();
        for pair in &pairs {
            prop_assert!(pair.first < pair.second);
            prop_assert!(keys.insert((pair.first.clone(), pair.second.clone())));
            let shared = repos_of[&pair.first]
                .intersection(&repos_of[&pair.second])
                .count();
            prop_assert_eq!(pair.shared_repositories, shared);
        }

        // Every pair sharing a repository is reported.
        let names: Vec<&String> = repos_of.keys().collect();
        let mut expected = 0;
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                if !repos_of[*a].is_disjoint(&repos_of[*b]) {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(pairs.len(), expected);
    }

    /// Reordering contributors does not change skill frequencies.
    #[test]
    fn skill_counts_ignore_input_order(
        picks in prop::collection::vec(prop::collection::vec(0usize..SKILLS.len(), 0..5), 1..20)
    ) {
        let forward = skilled(picks);
        let mut reversed = forward.clone();
        reversed.reverse();

        let limits = LimitsConfig::default();
        let thresholds = ThresholdConfig::default();
        let a = analyze_skill_distribution(&forward, &limits, &thresholds).unwrap();
        let b = analyze_skill_distribution(&reversed, &limits, &thresholds).unwrap();

        prop_assert_eq!(a.total_unique_skills, b.total_unique_skills);
        prop_assert_eq!(&a.skill_distribution, &b.skill_distribution);
        let counts = |ranked: &[orgpulse_insights::stats::LabelCount]| {
            ranked.iter().map(|lc| lc.count).collect::<Vec<_>>()
        };
        prop_assert_eq!(counts(a.top_skills.as_slice()), counts(b.top_skills.as_slice()));
    }

    /// Contributors without repositories do not move productivity figures.
    #[test]
    fn zero_repository_contributor_is_ignored(
        counts in prop::collection::vec((0u64..500, 1u64..10), 1..30),
        extra_commits in 0u64..500
    ) {
        let mut people = contributors(counts);
        let limits = LimitsConfig::default();
        let before = calculate_productivity_metrics(&people, true, &limits).unwrap();

        people.push(Contributor {
            total_commits: extra_commits,
            ..Contributor::new("newcomer")
        });
        let after = calculate_productivity_metrics(&people, true, &limits).unwrap();

        prop_assert_eq!(before.avg_commits_per_repo, after.avg_commits_per_repo);
        prop_assert_eq!(&before.productivity_percentiles, &after.productivity_percentiles);
    }
}
