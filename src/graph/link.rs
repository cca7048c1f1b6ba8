//! Link type and the link set.
//!
//! Links are the fixed connections between particles. Each link is an
//! unordered pair of distinct particle indices, canonicalized so `a < b`.
//! The set is generated once per batch and never simulated, only drawn.

use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rand::Rng;

use crate::rng::index;

/// Undirected connection between two particle indices, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    a: u32,
    b: u32,
}

impl Link {
    /// Create a canonical link. Returns `None` for a self-pair.
    pub fn new(i: u32, j: u32) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller endpoint.
    #[inline]
    pub fn a(self) -> u32 {
        self.a
    }

    /// Larger endpoint.
    #[inline]
    pub fn b(self) -> u32 {
        self.b
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({}-{})", self.a, self.b)
    }
}

/// The set of links for one particle batch.
///
/// Backed by an undirected petgraph graph with one node per particle, which
/// gives duplicate detection in either direction via `find_edge`.
#[derive(Debug, Clone)]
pub struct LinkSet {
    graph: StableUnGraph<(), ()>,
}

impl LinkSet {
    /// Create an empty link set over `count` particles.
    pub fn with_particles(count: u32) -> Self {
        let mut graph = StableUnGraph::with_capacity(count as usize, 0);
        for _ in 0..count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Sample `link_count` distinct links among `count` particles.
    ///
    /// Rejection sampling: draw two indices, drop self-pairs and pairs already
    /// present, repeat until the target is reached. The caller guarantees
    /// `link_count <= count * (count - 1) / 2`; `BannerConfig::validate`
    /// enforces this for external configurations.
    pub fn generate<R: Rng + ?Sized>(count: u32, link_count: u32, rng: &mut R) -> Self {
        let mut set = Self::with_particles(count);
        if count < 2 {
            return set;
        }

        while set.len() < link_count as usize {
            let i = index(rng, count);
            let j = index(rng, count);
            if let Some(link) = Link::new(i, j) {
                set.insert(link);
            }
        }

        set
    }

    /// Insert a link. Returns false if it was already present or refers to a
    /// particle outside this set.
    pub fn insert(&mut self, link: Link) -> bool {
        let (a, b) = (NodeIndex::new(link.a as usize), NodeIndex::new(link.b as usize));
        if !self.graph.contains_node(a) || !self.graph.contains_node(b) {
            return false;
        }
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the set has no links.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Number of particles this set was built over.
    pub fn particle_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Iterate over links in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Link::new(a.index() as u32, b.index() as u32)
        })
    }

    /// Flatten to `[a0, b0, a1, b1, ...]`.
    pub fn to_pairs(&self) -> Vec<u32> {
        let mut pairs = Vec::with_capacity(self.len() * 2);
        for link in self.iter() {
            pairs.push(link.a);
            pairs.push(link.b);
        }
        pairs
    }
}

impl Default for LinkSet {
    fn default() -> Self {
        Self::with_particles(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use std::collections::HashSet;

    #[test]
    fn test_link_canonical() {
        let link = Link::new(7, 3).unwrap();
        assert_eq!((link.a(), link.b()), (3, 7));
        assert_eq!(link, Link::new(3, 7).unwrap());
        assert_eq!(format!("{}", link), "Link(3-7)");
    }

    #[test]
    fn test_link_rejects_self_pair() {
        assert_eq!(Link::new(4, 4), None);
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut set = LinkSet::with_particles(5);
        assert!(set.insert(Link::new(0, 1).unwrap()));
        assert!(!set.insert(Link::new(1, 0).unwrap()));
        assert!(!set.insert(Link::new(2, 9).unwrap()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Link::new(1, 0).unwrap()]);
    }

    #[test]
    fn test_generate_exact_distinct() {
        for seed in 0..20 {
            let set = LinkSet::generate(30, 38, &mut seeded(seed));
            assert_eq!(set.len(), 38);

            let unique: HashSet<Link> = set.iter().collect();
            assert_eq!(unique.len(), 38);

            for link in set.iter() {
                assert!(link.a() < link.b());
                assert!(link.b() < 30);
            }
        }
    }

    #[test]
    fn test_generate_complete_graph() {
        // Every possible pair of 5 particles.
        let set = LinkSet::generate(5, 10, &mut seeded(11));
        assert_eq!(set.len(), 10);
        let links: HashSet<Link> = set.iter().collect();
        for i in 0..5 {
            for j in (i + 1)..5 {
                assert!(links.contains(&Link::new(i, j).unwrap()));
            }
        }
    }

    #[test]
    fn test_generate_too_few_particles() {
        let set = LinkSet::generate(1, 3, &mut seeded(0));
        assert!(set.is_empty());
        assert_eq!(set.particle_count(), 1);
    }

    #[test]
    fn test_to_pairs() {
        let mut set = LinkSet::with_particles(4);
        set.insert(Link::new(2, 1).unwrap());
        set.insert(Link::new(0, 3).unwrap());
        assert_eq!(set.to_pairs(), vec![1, 2, 0, 3]);
    }
}
