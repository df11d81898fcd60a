pub mod aggregate;
pub mod answers;
pub mod api;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod question;
pub mod traits;
pub mod validate;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use aggregate::Aggregator;
pub use api::ApiConfig;
pub use error::AppError;
pub use models::{PageInfo, PageSource};
pub use pipeline::PageInfoService;
pub use traits::{Fetcher, NullSubmitter, Submitter};
pub use validate::PageInfoValidator;
