pub mod backoff;
pub mod fetcher;
pub mod payload;
pub mod request;
