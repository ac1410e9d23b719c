use crate::bus::{ClusterEvent, EventBus};
use crate::flatten::{FlattenedIndex, flatten};
use crate::model::{DocId, RawClusters};
use crate::prefs::{ALWAYS_SHOW_ALL_CLUSTERS, PreferenceStore};
use crate::segment::{DEFAULT_SEGMENT_SIZE, MoreControl, Segmentation};
use crate::tree::{ClusterTree, FoldAction, NodeId, TOP};
use crate::views::{self, DocumentViews};
use itertools::Itertools;
use tracing::debug;

/// The browser aggregate: tree, flattened index, event bus and paging state.
/// All operations run synchronously to completion; the flattened index is
/// immutable after construction.
///
/// Fold/select coupling:
/// 1. Clicking a cluster's label:
///    a. an unselected cluster gets selected and unfolded
///    b. a selected cluster stays selected and gets unfolded
///    c. a selected sibling gets unselected and folded
/// 2. Folding a cluster:
///    a. selection is untouched unless it sat on a descendant
///    b. a selected descendant hands its selection to the folded cluster
pub struct ClusterBrowser {
    tree: ClusterTree,
    index: FlattenedIndex,
    bus: EventBus,
    segmentation: Segmentation,
    document_count: usize,
}

impl ClusterBrowser {
    pub fn new(clusters: &RawClusters, document_count: usize) -> Self {
        Self::with_segmentation(clusters, document_count, DEFAULT_SEGMENT_SIZE, true)
    }

    /// `segment = false` skips paging entirely (the stored preference path).
    pub fn with_segmentation(
        clusters: &RawClusters,
        document_count: usize,
        segment_size: usize,
        segment: bool,
    ) -> Self {
        let index = flatten(clusters);
        let mut tree = ClusterTree::build(clusters);
        let mut segmentation = Segmentation::new(segment_size);
        if segment {
            segmentation.install(&mut tree);
        }
        // Nothing is filtered yet: the root starts out selected.
        tree.node_mut(TOP).selected = true;

        ClusterBrowser {
            tree,
            index,
            bus: EventBus::new(),
            segmentation,
            document_count,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ClusterEvent) + 'static,
    {
        self.bus.subscribe(listener);
    }

    pub fn tree(&self) -> &ClusterTree {
        &self.tree
    }

    pub fn index(&self) -> &FlattenedIndex {
        &self.index
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn documents(&self, cluster: &str) -> &[DocId] {
        self.index.documents(cluster)
    }

    pub fn controls(&self) -> &[MoreControl] {
        self.segmentation.controls()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.tree.selected_node()
    }

    pub fn selected_cluster(&self) -> Option<&str> {
        self.tree
            .selected_node()
            .map(|node| self.tree.node(node).cluster.as_str())
    }

    /// Folding state machine. Applies the fold flag, promotes a selected
    /// descendant up to the folded node, and notifies listeners. The visual
    /// collapse of the subtree is derived from ancestor flags via
    /// `ClusterTree::is_visible`, never written into the children.
    pub fn set_fold(&mut self, node: NodeId, action: FoldAction, views: &mut impl DocumentViews) {
        self.fold_with_sync(node, action, false, views);
    }

    fn fold_with_sync(
        &mut self,
        node: NodeId,
        action: FoldAction,
        sync_selection: bool,
        views: &mut impl DocumentViews,
    ) {
        {
            let state = self.tree.node_mut(node);
            match action {
                FoldAction::Show => state.folded = false,
                FoldAction::Hide => state.folded = true,
                FoldAction::Toggle => state.folded = !state.folded,
            }
        }

        let mut sync_target = if sync_selection { Some(node) } else { None };

        // Folding a node whose descendant is selected? The selection moves to
        // the folded node so the visible document set stays explained.
        if self.tree.node(node).folded {
            if let Some(inner) = self.tree.selected_descendant(node) {
                self.tree.node_mut(inner).selected = false;
                self.tree.node_mut(node).selected = true;
                sync_target = Some(node);
                debug!(node, from = inner, "selection promoted to folded ancestor");
            }
        }

        if let Some(target) = sync_target {
            let documents = self
                .index
                .documents(self.tree.node(target).cluster.as_str())
                .to_vec();
            views::sync(views, &documents);
            self.bus.emit(ClusterEvent::Selected { documents });
        }

        self.bus.emit(ClusterEvent::Folded { node, action });
    }

    /// Selection controller. Exactly one node (or the root) explains the
    /// visible document set at any time. Selected siblings are folded away;
    /// selection that was promoted to a non-sibling by an earlier fold is only
    /// cleared, not folded.
    pub fn select(&mut self, node: NodeId, views: &mut impl DocumentViews) {
        if node == TOP {
            return self.select_top(views);
        }

        if self.tree.node(node).selected {
            // Re-clicking keeps the selection and re-asserts the open state.
            debug!(node, "reselect, unfold only");
            self.fold_with_sync(node, FoldAction::Show, false, views);
            return;
        }

        let selected_siblings = self
            .tree
            .siblings(node)
            .into_iter()
            .filter(|&sibling| self.tree.node(sibling).selected)
            .collect_vec();

        if selected_siblings.is_empty() {
            // Selection was not on a sibling: clear it wherever it ended up.
            for other in 0..self.tree.len() {
                if other != node {
                    self.tree.node_mut(other).selected = false;
                }
            }
        } else {
            for sibling in selected_siblings {
                self.fold_with_sync(sibling, FoldAction::Hide, false, views);
                self.tree.node_mut(sibling).selected = false;
            }
        }

        debug!(node, cluster = %self.tree.node(node).cluster, "cluster selected");
        self.tree.node_mut(node).selected = true;
        self.fold_with_sync(node, FoldAction::Show, true, views);
    }

    pub fn select_by_cluster(&mut self, cluster: &str, views: &mut impl DocumentViews) -> bool {
        match self.tree.node_id(cluster) {
            Some(node) => {
                self.select(node, views);
                true
            }
            None => false,
        }
    }

    /// The synthetic root: no filter, every document shows.
    pub fn select_top(&mut self, views: &mut impl DocumentViews) {
        for node in 0..self.tree.len() {
            self.tree.node_mut(node).selected = false;
        }
        self.tree.node_mut(TOP).selected = true;
        views::show_all(views);
        debug!("top selected, full universe visible");
        self.bus.emit(ClusterEvent::SelectedTop);
    }

    /// Fires an armed paging control. Consumed or unknown ids do nothing.
    pub fn reveal_more(&mut self, control_id: usize) {
        if let Some(node) = self.segmentation.reveal_more(&mut self.tree, control_id) {
            self.bus.emit(ClusterEvent::More { node });
        }
    }

    /// Tree-wide reveal; returns whether any control was armed.
    pub fn reveal_all(&mut self) -> bool {
        self.segmentation.reveal_all(&mut self.tree)
    }

    pub fn remember_offered(&self) -> bool {
        self.segmentation.remember_armed()
    }

    /// Consumes the one-shot remember offer and persists the preference.
    pub fn remember_choice<P>(&mut self, prefs: &mut P) -> Result<bool, crate::error::ClustreeError>
    where
        P: PreferenceStore + ?Sized,
    {
        if self.segmentation.take_remember() {
            prefs.set_flag(ALWAYS_SHOW_ALL_CLUSTERS, true)?;
            debug!("always-show-all preference saved");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
