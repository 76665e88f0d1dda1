//! The digest pipeline: normalize fetched items into documents, clean
//! their text, and group related documents by similarity.

pub mod clean;
pub mod cluster;
pub mod normalize;
pub mod sentences;

pub use clean::clean_documents;
pub use cluster::cluster_documents;
pub use normalize::news_to_documents;
