use pedigree_core::PedigreeNode;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Name lookups over one pedigree, built once per metrics pass.
///
/// Relationships in a pedigree are name references, so every relational
/// metric needs the same few name-keyed views. Nodes without a name are
/// kept in `nodes` but are absent from every name-keyed map.
#[derive(Debug)]
pub struct PedigreeIndex<'a> {
    nodes: &'a [PedigreeNode],
    by_name: HashMap<&'a str, Vec<usize>>,
    partners: BTreeMap<&'a str, BTreeSet<&'a str>>,
    siblings: BTreeMap<&'a str, BTreeSet<&'a str>>,
    children: HashMap<&'a str, usize>,
}

impl<'a> PedigreeIndex<'a> {
    pub fn build(nodes: &'a [PedigreeNode]) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut partners: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut siblings: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut children: HashMap<&str, usize> = HashMap::new();

        for (idx, node) in nodes.iter().enumerate() {
            for parent in node.parents() {
                *children.entry(parent).or_default() += 1;
            }

            let Some(name) = node.name() else {
                continue;
            };
            by_name.entry(name).or_default().push(idx);
            partners.entry(name).or_default().extend(
                node.partners
                    .iter()
                    .map(String::as_str)
                    .filter(|p| *p != name),
            );
            siblings
                .entry(name)
                .or_default()
                .extend(node.siblings.iter().map(String::as_str));
        }

        Self {
            nodes,
            by_name,
            partners,
            siblings,
            children,
        }
    }

    pub fn nodes(&self) -> &'a [PedigreeNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes carrying `name`; duplicates are legal.
    pub fn lookup(&self, name: &str) -> impl Iterator<Item = &'a PedigreeNode> + '_ {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.nodes[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names used more than once, with their occurrence count, in name order.
    pub fn duplicate_names(&self) -> Vec<(&'a str, usize)> {
        let mut dups: Vec<_> = self
            .by_name
            .iter()
            .filter(|(_, idxs)| idxs.len() > 1)
            .map(|(name, idxs)| (*name, idxs.len()))
            .collect();
        dups.sort_unstable();
        dups
    }

    /// Union of every partner list recorded under each name, self-references
    /// removed.
    pub fn partner_sets(&self) -> &BTreeMap<&'a str, BTreeSet<&'a str>> {
        &self.partners
    }

    pub fn partners_of(&self, name: &str) -> Option<&BTreeSet<&'a str>> {
        self.partners.get(name)
    }

    pub fn sibling_sets(&self) -> &BTreeMap<&'a str, BTreeSet<&'a str>> {
        &self.siblings
    }

    pub fn siblings_of(&self, name: &str) -> Option<&BTreeSet<&'a str>> {
        self.siblings.get(name)
    }

    /// Whether `name` is referenced as someone's father or mother.
    pub fn is_parent(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Child references per parent name. A parent name need not belong to a
    /// node in this pedigree.
    pub fn children_counts(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.children.iter().map(|(name, count)| (*name, *count))
    }

    /// Parent names that resolve to at least one node.
    pub fn resolved_parents(&self) -> HashSet<&'a str> {
        self.children
            .keys()
            .copied()
            .filter(|name| self.by_name.contains_key(name))
            .collect()
    }
}
