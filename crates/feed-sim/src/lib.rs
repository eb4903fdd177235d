mod config;
mod generators;

pub use config::FeedConfig;
pub use generators::{PriceFeed, PriceGenerator};

pub fn module_ready() -> bool {
    true
}
