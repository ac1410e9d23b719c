use crate::error::ClustreeError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Document ids are indices into the companion document list.
pub type DocId = usize;
pub type ClusterId = String;

/// One cluster as handed over by the external loader. Both the long field
/// names and the compact single-letter keys the loader historically emitted
/// are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCluster {
    #[serde(default, rename = "documentIds", alias = "d")]
    pub document_ids: Vec<DocId>,
    #[serde(default, alias = "c")]
    pub children: BTreeMap<ClusterId, RawCluster>,
}

/// Top-level clusters keyed by id. `BTreeMap` keeps child order deterministic.
pub type RawClusters = BTreeMap<ClusterId, RawCluster>;

pub fn from_json(text: &str) -> Result<RawClusters, ClustreeError> {
    Ok(serde_json::from_str(text)?)
}
