//! Bipartite contributor/repository network and its summary statistics.

use std::collections::{HashMap, HashSet};

use orgpulse_core::{Contributor, LimitsConfig, NetworkConfig, RepoWork, RepositoryConfig};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::ser::{Serialize, Serializer};
use tracing::debug;

use crate::grouping::repository_key;

/// Which side of the bipartite graph a node is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Contributor,
    Repository,
}

/// A node: a contributor username or a repository key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkNode {
    pub kind: NodeKind,
    pub label: String,
}

/// A node with its degree centrality. Serializes as `[label, centrality]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralNode {
    pub label: String,
    pub kind: NodeKind,
    pub centrality: f64,
}

impl Serialize for CentralNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.label, self.centrality).serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NetworkStatistics {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub average_clustering: f64,
    pub connected_components: usize,
    pub most_central_nodes: Vec<CentralNode>,
}

/// Undirected graph linking contributors to the repositories they worked on.
///
/// Edge weights are commit counts, floored at 1.
///
/// # Examples
///
/// ```
/// use orgpulse_core::{Contributor, NetworkConfig, RepoWork, RepositoryConfig};
/// use orgpulse_insights::network::CollaborationNetwork;
///
/// let contributors = vec![Contributor::new("alice"), Contributor::new("bob")];
/// let mut work = RepoWork::new("alice", "proj1");
/// work.commit_count = 60;
/// let works = vec![work, RepoWork::new("bob", "proj1")];
///
/// let network = CollaborationNetwork::build(
///     &contributors,
///     &works,
///     &NetworkConfig::default(),
///     &RepositoryConfig::default(),
/// );
/// assert_eq!(network.node_count(), 3);
/// assert_eq!(network.edge_count(), 2);
/// assert_eq!(network.edge_weight("alice", "proj1"), Some(60));
/// assert_eq!(network.edge_weight("bob", "proj1"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct CollaborationNetwork {
    graph: UnGraph<NetworkNode, u64>,
    contributor_index: HashMap<String, NodeIndex>,
    repository_index: HashMap<String, NodeIndex>,
}

impl CollaborationNetwork {
    /// Build the network.
    ///
    /// The first `max_nodes / 2` contributors become nodes. A repository
    /// node is added for every repository key with at least one row by a
    /// contributor node; rows by other contributors are ignored. Keys follow
    /// the same rules as the other repository analyses.
    pub fn build(
        contributors: &[Contributor],
        works: &[RepoWork],
        config: &NetworkConfig,
        repositories: &RepositoryConfig,
    ) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut contributor_index: HashMap<String, NodeIndex> = HashMap::new();

        for contributor in contributors.iter().take(config.max_nodes / 2) {
            if contributor_index.contains_key(&contributor.username) {
                continue;
            }
            let idx = graph.add_node(NetworkNode {
                kind: NodeKind::Contributor,
                label: contributor.username.clone(),
            });
            contributor_index.insert(contributor.username.clone(), idx);
        }

        let mut repository_index: HashMap<String, NodeIndex> = HashMap::new();
        let mut linked: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

        for work in works {
            let Some(&person) = contributor_index.get(&work.contributor_id) else {
                continue;
            };
            let key = repository_key(work, repositories.key);
            let repo = *repository_index.entry(key.to_string()).or_insert_with(|| {
                graph.add_node(NetworkNode {
                    kind: NodeKind::Repository,
                    label: key.to_string(),
                })
            });
            // First row for a (contributor, repository) pair sets the weight
            if linked.insert((person, repo)) {
                graph.add_edge(person, repo, work.commit_count.max(1));
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built collaboration network"
        );

        Self {
            graph,
            contributor_index,
            repository_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Weight of the edge between a contributor and a repository key.
    pub fn edge_weight(&self, username: &str, repository: &str) -> Option<u64> {
        let a = *self.contributor_index.get(username)?;
        let b = *self.repository_index.get(repository)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// `2m / (n(n-1))`; zero for graphs with fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.graph.node_count() as f64;
        if n < 2.0 {
            return 0.0;
        }
        2.0 * self.graph.edge_count() as f64 / (n * (n - 1.0))
    }

    /// Mean local clustering coefficient over all nodes.
    ///
    /// Nodes with fewer than two neighbors contribute zero.
    pub fn average_clustering(&self) -> f64 {
        let n = self.graph.node_count();
        if n == 0 {
            return 0.0;
        }
        let total: f64 = self
            .graph
            .node_indices()
            .map(|node| self.local_clustering(node))
            .sum();
        total / n as f64
    }

    fn local_clustering(&self, node: NodeIndex) -> f64 {
        let neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        let k = neighbors.len();
        if k < 2 {
            return 0.0;
        }
        let mut links = 0usize;
        for (i, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[i + 1..] {
                if self.graph.contains_edge(a, b) {
                    links += 1;
                }
            }
        }
        2.0 * links as f64 / (k * (k - 1)) as f64
    }

    pub fn connected_components(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Degree centrality `deg / (n - 1)` for every node, in node order.
    ///
    /// A single isolated node has centrality 1.
    pub fn degree_centrality(&self) -> Vec<CentralNode> {
        let n = self.graph.node_count();
        self.graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                let centrality = if n > 1 {
                    self.graph.neighbors(idx).count() as f64 / (n - 1) as f64
                } else {
                    1.0
                };
                CentralNode {
                    label: node.label.clone(),
                    kind: node.kind,
                    centrality,
                }
            })
            .collect()
    }

    /// Summary statistics, or `None` for an empty network.
    pub fn statistics(&self, central_nodes: usize) -> Option<NetworkStatistics> {
        if self.is_empty() {
            return None;
        }

        let mut central = self.degree_centrality();
        central.sort_by(|a, b| {
            b.centrality
                .partial_cmp(&a.centrality)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        central.truncate(central_nodes);

        Some(NetworkStatistics {
            nodes: self.node_count(),
            edges: self.edge_count(),
            density: self.density(),
            average_clustering: self.average_clustering(),
            connected_components: self.connected_components(),
            most_central_nodes: central,
        })
    }
}

/// Build the network and summarize it in one call.
pub fn network_statistics(
    contributors: &[Contributor],
    works: &[RepoWork],
    network: &NetworkConfig,
    repositories: &RepositoryConfig,
    limits: &LimitsConfig,
) -> Option<NetworkStatistics> {
    CollaborationNetwork::build(contributors, works, network, repositories)
        .statistics(limits.central_nodes)
}

#[cfg(test)]
mod tests {
    use orgpulse_core::RepositoryKey;

    use super::*;

    fn work(contributor: &str, repo: &str, commits: u64) -> RepoWork {
        RepoWork {
            commit_count: commits,
            ..RepoWork::new(contributor, repo)
        }
    }

    fn build(contributors: &[Contributor], works: &[RepoWork]) -> CollaborationNetwork {
        CollaborationNetwork::build(
            contributors,
            works,
            &NetworkConfig::default(),
            &RepositoryConfig::default(),
        )
    }

    fn sample() -> (Vec<Contributor>, Vec<RepoWork>) {
        let contributors = ["alice", "bob", "charlie"]
            .iter()
            .map(|name| Contributor::new(*name))
            .collect();
        let works = vec![
            work("alice", "proj1", 60),
            work("alice", "proj2", 40),
            work("bob", "proj1", 30),
            work("charlie", "proj3", 25),
        ];
        (contributors, works)
    }

    #[test]
    fn sample_network_shape() {
        let (contributors, works) = sample();
        let stats = network_statistics(
            &contributors,
            &works,
            &NetworkConfig::default(),
            &RepositoryConfig::default(),
            &LimitsConfig::default(),
        )
        .unwrap();
        assert_eq!(stats.nodes, 6);
        assert_eq!(stats.edges, 4);
        // 2 * 4 / (6 * 5)
        assert!((stats.density - 0.266_666_666_666_666_7).abs() < 1e-12);
        // Bipartite: no triangles
        assert_eq!(stats.average_clustering, 0.0);
        // {alice, bob, proj1, proj2} and {charlie, proj3}
        assert_eq!(stats.connected_components, 2);
        assert_eq!(stats.most_central_nodes[0].label, "alice");
        assert_eq!(stats.most_central_nodes[0].centrality, 0.4);
        assert_eq!(stats.most_central_nodes[1].label, "proj1");
    }

    #[test]
    fn node_budget_halves_to_contributors() {
        let (contributors, works) = sample();
        let config = NetworkConfig { max_nodes: 2 };
        let network =
            CollaborationNetwork::build(&contributors, &works, &config, &RepositoryConfig::default());
        // alice plus her two repositories
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_weight("bob", "proj1"), None);
    }

    #[test]
    fn first_row_sets_edge_weight() {
        let contributors = vec![Contributor::new("a")];
        let works = vec![work("a", "r", 0), work("a", "r", 50)];
        let network = build(&contributors, &works);
        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.edge_weight("a", "r"), Some(1));
    }

    #[test]
    fn repository_sharing_a_username_stays_distinct() {
        let contributors = vec![Contributor::new("tools")];
        let works = vec![work("tools", "tools", 3)];
        let network = build(&contributors, &works);
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn rows_without_id_key_on_name() {
        let contributors = vec![Contributor::new("alice"), Contributor::new("bob")];
        let works = vec![
            RepoWork {
                repository_id: "unknown".into(),
                ..RepoWork::new("alice", "docs")
            },
            RepoWork {
                repository_id: "unknown".into(),
                ..RepoWork::new("bob", "site")
            },
        ];
        let network = build(&contributors, &works);
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.connected_components(), 2);
        assert_eq!(network.edge_weight("alice", "docs"), Some(1));
        assert_eq!(network.edge_weight("alice", "unknown"), None);
    }

    #[test]
    fn name_key_merges_ids_sharing_a_name() {
        let contributors = vec![Contributor::new("alice"), Contributor::new("bob")];
        let works = vec![
            RepoWork {
                repository_name: "api".into(),
                ..RepoWork::new("alice", "org-a/api")
            },
            RepoWork {
                repository_name: "api".into(),
                ..RepoWork::new("bob", "org-b/api")
            },
        ];
        assert_eq!(build(&contributors, &works).connected_components(), 2);

        let by_name = RepositoryConfig {
            key: RepositoryKey::Name,
            ..RepositoryConfig::default()
        };
        let network =
            CollaborationNetwork::build(&contributors, &works, &NetworkConfig::default(), &by_name);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.connected_components(), 1);
    }

    #[test]
    fn single_node_statistics() {
        let contributors = vec![Contributor::new("solo")];
        let stats = network_statistics(
            &contributors,
            &[],
            &NetworkConfig::default(),
            &RepositoryConfig::default(),
            &LimitsConfig::default(),
        )
        .unwrap();
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.connected_components, 1);
        assert_eq!(stats.most_central_nodes[0].centrality, 1.0);
    }

    #[test]
    fn central_node_serializes_as_pair() {
        let node = CentralNode {
            label: "alice".into(),
            kind: NodeKind::Contributor,
            centrality: 0.5,
        };
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"["alice",0.5]"#);
    }

    #[test]
    fn empty_network_is_none() {
        assert!(network_statistics(
            &[],
            &[],
            &NetworkConfig::default(),
            &RepositoryConfig::default(),
            &LimitsConfig::default(),
        )
        .is_none());
    }
}
