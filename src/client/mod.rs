pub mod cache;
pub mod http;

pub use cache::{CachedQuery, InvalidationPublisher, InvalidationReceiver, QueryKey,
    invalidation_channel};
pub use http::{ApiClient, ClientError};
