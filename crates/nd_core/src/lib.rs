pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::{NewsSource, Summarizer};
pub use types::{DocMetadata, Document, NewsItem};

pub type Result<T> = std::result::Result<T, Error>;
