pub mod browser;
pub mod bus;
pub mod error;
pub mod flatten;
pub mod model;
pub mod prefs;
pub mod segment;
pub mod tree;
pub mod views;

pub use browser::ClusterBrowser;
pub use bus::{ClusterEvent, EventBus};
pub use error::*;
pub use flatten::{FlattenedIndex, flatten};
pub use model::{ClusterId, DocId, RawCluster, RawClusters, from_json};
pub use prefs::{ALWAYS_SHOW_ALL_CLUSTERS, FilePrefs, MemoryPrefs, PreferenceStore};
pub use segment::{DEFAULT_SEGMENT_SIZE, MoreControl, Segmentation};
pub use tree::{ClusterNode, ClusterTree, FoldAction, NodeId, TOP};
pub use views::{BitsetViews, DocumentViews, show_all, sync};
