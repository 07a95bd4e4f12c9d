//! Family tree construction from a flat member list.
//!
//! Members reference their parent by id. [`build_tree`] turns the flat list
//! into nested [`TreeNode`]s in two passes (index, then attach), keeping the
//! input order among siblings. How parentless members are treated is
//! governed by [`RootPolicy`].
//!
//! Members whose parent id names nobody are *orphans*; members that can only
//! be reached through a parent cycle are *detached*. Neither appears in the
//! tree; both are reported by id on the returned [`FamilyTree`].

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// A record that can be placed in a parent/child hierarchy.
pub trait TreeRecord {
    fn record_id(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
}

/// What to do with members that have no parent id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootPolicy {
    /// Exactly one parentless member must exist; anything else is an error.
    Strict,
    /// Every parentless member starts its own tree.
    #[default]
    Forest,
}

impl RootPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Forest => "forest",
        }
    }
}

impl FromStr for RootPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "forest" => Ok(Self::Forest),
            other => Err(CoreError::Validation(format!(
                "Unknown tree mode '{other}'. Must be one of: strict, forest"
            ))),
        }
    }
}

/// A member plus its nested children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub member: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T: TreeRecord> TreeNode<T> {
    /// Depth-first search for a node by id, starting at (and including) `self`.
    pub fn find(&self, id: &str) -> Option<&TreeNode<T>> {
        if self.member.record_id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// The result of [`build_tree`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree<T> {
    /// Top-level nodes. Exactly one under [`RootPolicy::Strict`].
    pub roots: Vec<TreeNode<T>>,
    /// Ids of members whose parent id does not resolve.
    pub orphans: Vec<String>,
    /// Ids of members only reachable through a parent cycle.
    pub detached: Vec<String>,
}

impl<T: TreeRecord> FamilyTree<T> {
    /// Resolve the node behind a selected member id.
    pub fn find(&self, id: &str) -> Option<&TreeNode<T>> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Total number of nodes placed in the tree.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::node_count).sum()
    }
}

/// Errors raised while building a tree under [`RootPolicy::Strict`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("family tree has no root member")]
    NoRoot,
    #[error("family tree has {} root members ({}), expected exactly one", .0.len(), .0.join(", "))]
    MultipleRoots(Vec<String>),
}

impl From<TreeError> for CoreError {
    fn from(err: TreeError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Build the hierarchy for `members`.
///
/// Returns `Ok(None)` for an empty input.
pub fn build_tree<T>(members: &[T], policy: RootPolicy) -> Result<Option<FamilyTree<T>>, TreeError>
where
    T: TreeRecord + Clone,
{
    if members.is_empty() {
        return Ok(None);
    }

    // First pass: id -> position. Later duplicates shadow earlier ones.
    let index: HashMap<&str, usize> = members
        .iter()
        .enumerate()
        .map(|(i, m)| (m.record_id(), i))
        .collect();

    // Second pass: attach children to parents, collect roots and orphans.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for (i, member) in members.iter().enumerate() {
        if index.get(member.record_id()) != Some(&i) {
            tracing::warn!(id = member.record_id(), "Duplicate family member id skipped");
            continue;
        }
        match member.parent_id() {
            None => roots.push(i),
            Some(parent) => match index.get(parent) {
                Some(&p) => children[p].push(i),
                None => orphans.push(member.record_id().to_string()),
            },
        }
    }

    if policy == RootPolicy::Strict {
        match roots.len() {
            0 => return Err(TreeError::NoRoot),
            1 => {}
            _ => {
                return Err(TreeError::MultipleRoots(
                    roots
                        .iter()
                        .map(|&i| members[i].record_id().to_string())
                        .collect(),
                ))
            }
        }
    }

    let mut placed = HashSet::new();
    let roots: Vec<TreeNode<T>> = roots
        .into_iter()
        .map(|i| assemble(i, members, &children, &mut placed))
        .collect();

    let orphan_set: HashSet<&str> = orphans.iter().map(String::as_str).collect();
    let detached = members
        .iter()
        .enumerate()
        .filter(|(i, m)| {
            index.get(m.record_id()) == Some(i)
                && !placed.contains(i)
                && !orphan_set.contains(m.record_id())
        })
        .map(|(_, m)| m.record_id().to_string())
        .collect();

    Ok(Some(FamilyTree {
        roots,
        orphans,
        detached,
    }))
}

/// Materialize the subtree rooted at `i`. Roots have no parent, so a cycle
/// can never be entered from here; `placed` guards against it regardless.
fn assemble<T: Clone>(
    i: usize,
    members: &[T],
    children: &[Vec<usize>],
    placed: &mut HashSet<usize>,
) -> TreeNode<T> {
    placed.insert(i);
    let mut kids = Vec::with_capacity(children[i].len());
    for &c in &children[i] {
        if !placed.contains(&c) {
            kids.push(assemble(c, members, children, placed));
        }
    }
    TreeNode {
        member: members[i].clone(),
        children: kids,
    }
}

/// Would setting `member_id`'s parent to `new_parent` make the member its
/// own ancestor?
///
/// Walks up from `new_parent` following existing parent links. A walk that
/// hits an already existing cycle stops without reporting one, since that
/// cycle does not involve `member_id`.
pub fn would_create_cycle<T: TreeRecord>(members: &[T], member_id: &str, new_parent: &str) -> bool {
    let parents: HashMap<&str, Option<&str>> = members
        .iter()
        .map(|m| (m.record_id(), m.parent_id()))
        .collect();

    let mut seen = HashSet::new();
    let mut cursor = Some(new_parent);
    while let Some(current) = cursor {
        if current == member_id {
            return true;
        }
        if !seen.insert(current) {
            return false;
        }
        cursor = parents.get(current).copied().flatten();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct M {
        id: &'static str,
        parent: Option<&'static str>,
    }

    impl TreeRecord for M {
        fn record_id(&self) -> &str {
            self.id
        }
        fn parent_id(&self) -> Option<&str> {
            self.parent
        }
    }

    fn m(id: &'static str, parent: Option<&'static str>) -> M {
        M { id, parent }
    }

    fn child_ids(node: &TreeNode<M>) -> Vec<&str> {
        node.children.iter().map(|c| c.member.id).collect()
    }

    #[test]
    fn empty_input_is_no_tree() {
        let members: Vec<M> = Vec::new();
        assert!(build_tree(&members, RootPolicy::Strict).unwrap().is_none());
        assert!(build_tree(&members, RootPolicy::Forest).unwrap().is_none());
    }

    #[test]
    fn single_root_without_children() {
        let tree = build_tree(&[m("a", None)], RootPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(tree.roots.len(), 1);
        assert!(tree.roots[0].children.is_empty());
    }

    #[test]
    fn connected_hierarchy_contains_every_member() {
        let members = vec![
            m("c1", Some("root")),
            m("root", None),
            m("g1", Some("c1")),
            m("c2", Some("root")),
            m("g2", Some("c1")),
        ];
        let tree = build_tree(&members, RootPolicy::Strict).unwrap().unwrap();

        assert_eq!(tree.node_count(), members.len());
        let root = &tree.roots[0];
        assert_eq!(root.member.id, "root");
        assert_eq!(child_ids(root), vec!["c1", "c2"]);
        assert_eq!(child_ids(tree.find("c1").unwrap()), vec!["g1", "g2"]);
        assert!(tree.orphans.is_empty());
        assert!(tree.detached.is_empty());
    }

    #[test]
    fn children_match_parent_references() {
        let members = vec![
            m("r", None),
            m("a", Some("r")),
            m("b", Some("a")),
            m("c", Some("r")),
        ];
        let tree = build_tree(&members, RootPolicy::Forest).unwrap().unwrap();
        for member in &members {
            let node = tree.find(member.id).unwrap();
            let expected: Vec<&str> = members
                .iter()
                .filter(|x| x.parent == Some(member.id))
                .map(|x| x.id)
                .collect();
            assert_eq!(child_ids(node), expected);
        }
    }

    #[test]
    fn orphan_is_never_placed() {
        let members = vec![
            m("root", None),
            m("kid", Some("root")),
            m("lost", Some("nobody")),
            m("lost-kid", Some("lost")),
        ];
        let tree = build_tree(&members, RootPolicy::Strict).unwrap().unwrap();

        assert!(tree.find("lost").is_none());
        assert!(tree.find("lost-kid").is_none());
        assert_eq!(tree.orphans, vec!["lost".to_string()]);
        assert_eq!(tree.detached, vec!["lost-kid".to_string()]);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn orphan_listed_last_does_not_replace_root() {
        let members = vec![m("root", None), m("stray", Some("ghost"))];
        let tree = build_tree(&members, RootPolicy::Forest).unwrap().unwrap();
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].member.id, "root");
    }

    #[test]
    fn strict_rejects_multiple_roots() {
        let members = vec![m("a", None), m("b", None)];
        let err = build_tree(&members, RootPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            TreeError::MultipleRoots(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn strict_rejects_missing_root() {
        let members = vec![m("a", Some("b")), m("b", Some("a"))];
        assert_eq!(
            build_tree(&members, RootPolicy::Strict).unwrap_err(),
            TreeError::NoRoot
        );
    }

    #[test]
    fn forest_keeps_every_root_in_order() {
        let members = vec![m("a", None), m("a1", Some("a")), m("b", None)];
        let tree = build_tree(&members, RootPolicy::Forest).unwrap().unwrap();
        let ids: Vec<&str> = tree.roots.iter().map(|r| r.member.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn cycle_members_are_detached() {
        let members = vec![m("root", None), m("x", Some("y")), m("y", Some("x"))];
        let tree = build_tree(&members, RootPolicy::Forest).unwrap().unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.detached, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn cycle_detection() {
        let members = vec![m("r", None), m("a", Some("r")), m("b", Some("a"))];
        assert!(would_create_cycle(&members, "a", "b"));
        assert!(would_create_cycle(&members, "a", "a"));
        assert!(!would_create_cycle(&members, "b", "r"));
        assert!(!would_create_cycle(&members, "a", "missing"));
    }

    #[test]
    fn root_policy_parsing() {
        assert_eq!("strict".parse::<RootPolicy>().unwrap(), RootPolicy::Strict);
        assert_eq!(" Forest ".parse::<RootPolicy>().unwrap(), RootPolicy::Forest);
        assert!("last-wins".parse::<RootPolicy>().is_err());
    }
}
