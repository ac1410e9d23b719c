use crate::model::DocId;
use fixedbitset::FixedBitSet;

/// Externally owned, zero-indexed, contiguous collection of document views.
/// The core only decides which indices should show; the owner draws them.
pub trait DocumentViews {
    fn len(&self) -> usize;
    fn is_visible(&self, index: usize) -> bool;
    fn show(&mut self, index: usize);
    fn hide(&mut self, index: usize);
}

/// Walks every index in `0..len` against the sorted document set, issuing a
/// show/hide instruction only where the current state differs.
pub fn sync(views: &mut impl DocumentViews, documents: &[DocId]) {
    let mut next = 0usize;
    for index in 0..views.len() {
        if next >= documents.len() || documents[next] > index {
            if views.is_visible(index) {
                views.hide(index);
            }
        } else {
            if !views.is_visible(index) {
                views.show(index);
            }
            next += 1;
        }
    }
}

pub fn show_all(views: &mut impl DocumentViews) {
    for index in 0..views.len() {
        if !views.is_visible(index) {
            views.show(index);
        }
    }
}

/// Bitset-backed view collection. Every document starts visible, matching the
/// unfiltered state right after a data load.
pub struct BitsetViews {
    visible: FixedBitSet,
}

impl BitsetViews {
    pub fn new(document_count: usize) -> Self {
        let mut visible = FixedBitSet::with_capacity(document_count);
        visible.insert_range(..);
        BitsetViews { visible }
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.ones()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.count_ones(..)
    }
}

impl DocumentViews for BitsetViews {
    fn len(&self) -> usize {
        self.visible.len()
    }

    fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(index)
    }

    fn show(&mut self, index: usize) {
        self.visible.insert(index);
    }

    fn hide(&mut self, index: usize) {
        self.visible.set(index, false);
    }
}
