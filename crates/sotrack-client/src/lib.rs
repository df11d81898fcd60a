pub mod config;
pub mod fetcher;
pub mod submitter;

pub use config::CollectorConfig;
pub use fetcher::ReqwestFetcher;
pub use submitter::HttpSubmitter;
