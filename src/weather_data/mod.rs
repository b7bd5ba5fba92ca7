pub mod aggregator;
pub mod error;
pub mod parser;
pub mod record_cache;
pub mod record_loader;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;
