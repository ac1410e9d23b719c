use crate::model::{ClusterId, DocId, RawCluster, RawClusters};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Index into `ClusterTree::nodes`.
pub type NodeId = usize;

/// The synthetic root ("show everything") is always node 0.
pub const TOP: NodeId = 0;

pub const TOP_CLUSTER: &str = "top";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldAction {
    Show,
    Hide,
    Toggle,
}

#[derive(Debug)]
pub struct ClusterNode {
    pub cluster: ClusterId,
    pub own_documents: Vec<DocId>,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
    /// Children hidden or shown.
    pub folded: bool,
    /// This cluster is the active document filter.
    pub selected: bool,
    /// Hidden by segmentation paging, independent of folding.
    pub concealed: bool,
}

/// In-memory cluster hierarchy. Built once per data load; only the per-node
/// flags mutate afterwards.
pub struct ClusterTree {
    nodes: Vec<ClusterNode>,
    by_cluster: FxHashMap<ClusterId, NodeId>,
}

impl ClusterTree {
    pub fn build(clusters: &RawClusters) -> Self {
        let mut tree = ClusterTree {
            nodes: Vec::new(),
            by_cluster: FxHashMap::default(),
        };

        tree.add_node(TOP_CLUSTER.to_string(), Vec::new(), None);
        for (id, cluster) in clusters {
            tree.add_subtree(id, cluster, TOP);
        }

        tree
    }

    fn add_subtree(&mut self, id: &str, cluster: &RawCluster, parent: NodeId) {
        let node = self.add_node(id.to_string(), cluster.document_ids.clone(), Some(parent));
        for (child_id, child) in &cluster.children {
            self.add_subtree(child_id, child, node);
        }
    }

    fn add_node(&mut self, cluster: ClusterId, documents: Vec<DocId>, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        if parent.is_some() {
            self.by_cluster.insert(cluster.clone(), id);
        }
        self.nodes.push(ClusterNode {
            cluster,
            own_documents: documents,
            parent,
            children: SmallVec::new(),
            folded: false,
            selected: false,
            concealed: false,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &ClusterNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ClusterNode {
        &mut self.nodes[id]
    }

    /// Looks up a real cluster by id; the synthetic root is not addressable
    /// this way.
    pub fn node_id(&self, cluster: &str) -> Option<NodeId> {
        self.by_cluster.get(cluster).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.nodes[id].parent {
            Some(parent) => self.nodes[parent]
                .children
                .iter()
                .copied()
                .filter(|&child| child != id)
                .collect_vec(),
            None => Vec::new(),
        }
    }

    /// Any node currently carrying the selected flag, the root included.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.selected)
    }

    /// Strict descendants only; a node never counts as its own descendant.
    pub fn selected_descendant(&self, id: NodeId) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.nodes[id].children.to_vec();
        while let Some(node) = stack.pop() {
            if self.nodes[node].selected {
                return Some(node);
            }
            stack.extend(self.nodes[node].children.iter().copied());
        }
        None
    }

    /// A node shows in the tree when it is not paged away and no ancestor is
    /// folded or paged away. Folding stays local per node, but a folded
    /// ancestor collapses the whole subtree below it.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if self.nodes[id].concealed {
            return false;
        }
        let mut current = self.nodes[id].parent;
        while let Some(ancestor) = current {
            if self.nodes[ancestor].folded || self.nodes[ancestor].concealed {
                return false;
            }
            current = self.nodes[ancestor].parent;
        }
        true
    }

    pub fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&child| self.is_visible(child))
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::from_json;

    fn sample() -> ClusterTree {
        let clusters = from_json(
            r#"{ "A": { "d": [0], "c": { "B": { "d": [1] }, "C": { "d": [2], "c": { "D": { "d": [3] } } } } } }"#,
        )
        .expect("parse failed");
        ClusterTree::build(&clusters)
    }

    #[test]
    fn test_build_links_parents_and_children() {
        let tree = sample();
        let a = tree.node_id("A").expect("A missing");
        let b = tree.node_id("B").expect("B missing");
        let d = tree.node_id("D").expect("D missing");

        assert_eq!(tree.node(a).parent, Some(TOP));
        assert_eq!(tree.node(b).parent, Some(a));
        assert_eq!(tree.children(TOP), &[a]);
        assert_eq!(tree.node(d).own_documents, vec![3]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_root_is_not_addressable_by_cluster_id() {
        let tree = sample();
        assert_eq!(tree.node_id(TOP_CLUSTER), None);
        assert_eq!(tree.node(TOP).cluster, TOP_CLUSTER);
    }

    #[test]
    fn test_siblings_excludes_self() {
        let tree = sample();
        let b = tree.node_id("B").expect("B missing");
        let c = tree.node_id("C").expect("C missing");

        assert_eq!(tree.siblings(b), vec![c]);
        assert_eq!(tree.siblings(TOP), Vec::<NodeId>::new());
    }

    #[test]
    fn test_selected_descendant_is_strict() {
        let mut tree = sample();
        let a = tree.node_id("A").expect("A missing");
        let d = tree.node_id("D").expect("D missing");

        tree.node_mut(a).selected = true;
        assert_eq!(tree.selected_descendant(a), None);

        tree.node_mut(a).selected = false;
        tree.node_mut(d).selected = true;
        assert_eq!(tree.selected_descendant(a), Some(d));
    }

    #[test]
    fn test_folded_ancestor_collapses_subtree() {
        let mut tree = sample();
        let a = tree.node_id("A").expect("A missing");
        let c = tree.node_id("C").expect("C missing");
        let d = tree.node_id("D").expect("D missing");

        assert!(tree.is_visible(d));

        tree.node_mut(a).folded = true;
        assert!(tree.is_visible(a), "folding is local, the node itself stays");
        assert!(!tree.is_visible(c));
        assert!(!tree.is_visible(d));

        // Unfolding the ancestor restores the subtree; C's own flag was never
        // touched.
        tree.node_mut(a).folded = false;
        assert!(tree.is_visible(d));
        assert!(!tree.node(c).folded);
    }

    #[test]
    fn test_concealed_node_hides_subtree() {
        let mut tree = sample();
        let c = tree.node_id("C").expect("C missing");
        let d = tree.node_id("D").expect("D missing");

        tree.node_mut(c).concealed = true;
        assert!(!tree.is_visible(c));
        assert!(!tree.is_visible(d));
    }

    #[test]
    fn test_empty_input_builds_root_only() {
        let tree = ClusterTree::build(&RawClusters::new());
        assert_eq!(tree.len(), 1);
        assert!(tree.children(TOP).is_empty());
    }
}
