use crate::tree::{ClusterTree, NodeId};
use itertools::Itertools;
use tracing::debug;

pub const DEFAULT_SEGMENT_SIZE: usize = 10;

/// One armed "reveal next page" control. Presence in the armed set is the
/// armed state; firing removes it, so a repeat activation has nothing left to
/// trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoreControl {
    pub id: usize,
    /// The cluster whose child list this control pages.
    pub node: NodeId,
    /// First concealed child index this control reveals.
    pub start: usize,
}

/// Paging state for the whole tree: armed controls plus the one-shot
/// "remember this choice" offer that follows a reveal-all.
#[derive(Debug, Default)]
pub struct Segmentation {
    size: usize,
    controls: Vec<MoreControl>,
    next_id: usize,
    remember_armed: bool,
}

impl Segmentation {
    pub fn new(size: usize) -> Self {
        Segmentation {
            size,
            controls: Vec::new(),
            next_id: 0,
            remember_armed: false,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn controls(&self) -> &[MoreControl] {
        &self.controls
    }

    pub fn controls_for(&self, node: NodeId) -> Vec<&MoreControl> {
        self.controls
            .iter()
            .filter(|control| control.node == node)
            .collect_vec()
    }

    pub fn remember_armed(&self) -> bool {
        self.remember_armed
    }

    /// Partitions every node's child list independently. Nodes with at most
    /// `size` children are left alone; everything beyond the first page is
    /// concealed and a control is armed at each page boundary.
    pub fn install(&mut self, tree: &mut ClusterTree) {
        if self.size == 0 {
            return;
        }
        for node in 0..tree.len() {
            self.segment_node(tree, node);
        }
    }

    fn segment_node(&mut self, tree: &mut ClusterTree, node: NodeId) {
        let children = tree.children(node).to_vec();
        if children.len() <= self.size {
            return;
        }

        for &child in &children[self.size..] {
            tree.node_mut(child).concealed = true;
        }

        for start in (self.size..children.len()).step_by(self.size) {
            self.controls.push(MoreControl {
                id: self.next_id,
                node,
                start,
            });
            self.next_id += 1;
        }
        debug!(node, children = children.len(), "segmented child list");
    }

    /// Consumes the control and reveals its page. Stale or unknown ids are a
    /// silent no-op. Returns the owning node when a reveal happened.
    pub fn reveal_more(&mut self, tree: &mut ClusterTree, control_id: usize) -> Option<NodeId> {
        let position = self
            .controls
            .iter()
            .position(|control| control.id == control_id)?;
        let control = self.controls.remove(position);

        let children = tree.children(control.node).to_vec();
        let end = usize::min(control.start + self.size, children.len());
        for &child in &children[control.start..end] {
            tree.node_mut(child).concealed = false;
        }
        debug!(node = control.node, start = control.start, "page revealed");
        Some(control.node)
    }

    /// Reveals every remaining child tree-wide and drops all paging controls,
    /// then arms the one-shot remember offer. A call with nothing armed is a
    /// no-op and does not re-arm the offer.
    pub fn reveal_all(&mut self, tree: &mut ClusterTree) -> bool {
        if self.controls.is_empty() {
            return false;
        }
        self.controls.clear();
        for node in 0..tree.len() {
            tree.node_mut(node).concealed = false;
        }
        self.remember_armed = true;
        debug!("all pages revealed, paging controls dropped");
        true
    }

    /// Consumes the remember offer if armed.
    pub fn take_remember(&mut self) -> bool {
        std::mem::take(&mut self.remember_armed)
    }
}
