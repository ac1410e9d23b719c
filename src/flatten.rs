use crate::model::{ClusterId, DocId, RawCluster, RawClusters};
use rustc_hash::FxHashMap;

const EMPTY: &[DocId] = &[];

/// Mapping from cluster id to the sorted, deduplicated document ids owned by
/// that cluster and all of its subclusters. Built once per data load and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct FlattenedIndex {
    documents: FxHashMap<ClusterId, Vec<DocId>>,
}

impl FlattenedIndex {
    /// Unknown ids yield an empty slice, never an error.
    pub fn documents(&self, cluster: &str) -> &[DocId] {
        self.documents
            .get(cluster)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Reduces the nested cluster structure bottom-up. Each cluster's set is
/// computed exactly once and reused by its parent; the sort/dedup pass runs
/// after the full traversal.
pub fn flatten(clusters: &RawClusters) -> FlattenedIndex {
    let mut flattened: FxHashMap<ClusterId, Vec<DocId>> = FxHashMap::default();

    for (id, cluster) in clusters {
        flatten_into(id, cluster, &mut flattened);
    }

    for docs in flattened.values_mut() {
        docs.sort_unstable();
        docs.dedup();
    }

    FlattenedIndex {
        documents: flattened,
    }
}

fn flatten_into(
    id: &str,
    cluster: &RawCluster,
    flattened: &mut FxHashMap<ClusterId, Vec<DocId>>,
) -> Vec<DocId> {
    let mut collected = cluster.document_ids.clone();

    for (child_id, child) in &cluster.children {
        collected.extend(flatten_into(child_id, child, flattened));
    }

    flattened.insert(id.to_string(), collected.clone());
    collected
}
