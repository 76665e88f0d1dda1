pub mod newsapi;

pub use newsapi::NewsApiClient;
