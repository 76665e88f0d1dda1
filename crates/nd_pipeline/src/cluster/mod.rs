//! Group documents by content similarity.

use std::collections::BTreeMap;

use tracing::debug;

use nd_core::Document;

pub mod kmeans;
pub mod vectorize;

pub use kmeans::kmeans_labels;
pub use vectorize::{tokenize, vectorize};

/// Default number of clusters for a digest batch.
pub const DEFAULT_NUM_CLUSTERS: usize = 5;

/// Fixed seed keeps cluster assignments reproducible per input.
const CLUSTER_SEED: u64 = 42;

/// Partition documents into up to `num_clusters` groups.
///
/// Returns a map from cluster id (`0..k`) to members in input order.
/// Every document lands in exactly one cluster. When fewer documents
/// than clusters are supplied, `k` is capped at the document count; an
/// empty input yields an empty map.
pub fn cluster_documents(
    documents: &[Document],
    num_clusters: usize,
) -> BTreeMap<usize, Vec<Document>> {
    let mut clustered: BTreeMap<usize, Vec<Document>> = BTreeMap::new();
    if documents.is_empty() || num_clusters == 0 {
        return clustered;
    }

    let k = num_clusters.min(documents.len());
    if k < num_clusters {
        debug!(
            requested = num_clusters,
            capped = k,
            "fewer documents than clusters; capping k"
        );
    }

    let texts: Vec<&str> = documents.iter().map(|d| d.page_content.as_str()).collect();
    let matrix = vectorize(&texts);
    let labels = kmeans_labels(&matrix, k, CLUSTER_SEED);

    for (label, doc) in labels.into_iter().zip(documents) {
        clustered.entry(label).or_default().push(doc.clone());
    }
    clustered
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::DocMetadata;

    fn doc(title: &str, content: &str) -> Document {
        Document {
            page_content: content.to_string(),
            metadata: DocMetadata {
                title: title.to_string(),
                url: None,
                published: None,
                source: "test".to_string(),
            },
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("q1", "quantum processors reached a new error correction milestone"),
            doc("q2", "quantum error correction milestone for superconducting processors"),
            doc("f1", "the football league final ended with a dramatic penalty shootout"),
            doc("f2", "penalty shootout decides the football league final"),
            doc("m1", "central bank raises interest rates amid inflation fears"),
        ]
    }

    #[test]
    fn clustering_is_deterministic() {
        let docs = corpus();
        let a = cluster_documents(&docs, 3);
        let b = cluster_documents(&docs, 3);
        assert_eq!(a.len(), b.len());
        for (id, members) in &a {
            let other = &b[id];
            let titles: Vec<&str> = members.iter().map(|d| d.metadata.title.as_str()).collect();
            let other_titles: Vec<&str> = other.iter().map(|d| d.metadata.title.as_str()).collect();
            assert_eq!(titles, other_titles);
        }
    }

    #[test]
    fn every_document_lands_in_exactly_one_cluster() {
        let docs = corpus();
        let clustered = cluster_documents(&docs, 3);

        let total: usize = clustered.values().map(Vec::len).sum();
        assert_eq!(total, docs.len());

        let mut seen: Vec<&str> = clustered
            .values()
            .flatten()
            .map(|d| d.metadata.title.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = docs.iter().map(|d| d.metadata.title.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn cluster_ids_stay_below_k() {
        let clustered = cluster_documents(&corpus(), 3);
        assert!(clustered.keys().all(|&id| id < 3));
    }

    #[test]
    fn k_larger_than_document_count_is_capped() {
        let docs = vec![doc("a", "one lonely document about science"), doc("b", "another one")];
        let clustered = cluster_documents(&docs, DEFAULT_NUM_CLUSTERS);
        let total: usize = clustered.values().map(Vec::len).sum();
        assert_eq!(total, 2);
        assert!(clustered.keys().all(|&id| id < 2));
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        assert!(cluster_documents(&[], 5).is_empty());
    }

    #[test]
    fn member_order_follows_input_order() {
        let docs = vec![
            doc("first", "identical text about the same topic"),
            doc("second", "identical text about the same topic"),
        ];
        let clustered = cluster_documents(&docs, 1);
        let members = &clustered[&0];
        assert_eq!(members[0].metadata.title, "first");
        assert_eq!(members[1].metadata.title, "second");
    }
}
