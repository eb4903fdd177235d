pub trait PriceFeed {
    fn next_price(&mut self) -> f64;
}

#[derive(Debug, Clone)]
pub struct PriceGenerator {
    state: u64,
    floor: f64,
    span: f64,
}

impl PriceGenerator {
    pub fn new(seed: u64, floor: f64, span: f64) -> Self {
        assert!(
            floor.is_finite() && floor >= 0.0,
            "floor must be finite and non-negative"
        );
        assert!(
            span.is_finite() && span > 0.0,
            "span must be finite and positive"
        );

        Self {
            state: seed,
            floor,
            span,
        }
    }
}

impl PriceFeed for PriceGenerator {
    fn next_price(&mut self) -> f64 {
        let unit = next_unit(&mut self.state);
        self.floor + unit * self.span
    }
}

fn next_u64(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn next_unit(state: &mut u64) -> f64 {
    let value = next_u64(state);
    // Scaled into [0, 1); u64::MAX itself lands just below 1.
    (value as f64) / (u64::MAX as f64 + 1.0)
}
