#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedConfig {
    pub seed: u64,
    pub price_floor: f64,
    pub price_span: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            price_floor: 100.0,
            price_span: 100.0,
        }
    }
}
