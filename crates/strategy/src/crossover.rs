#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    pub fn entered_position(self) -> Position {
        match self {
            Self::Buy => Position::Long,
            Self::Sell => Position::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Flat,
    Long,
}

/// Edge-triggered crossover rule: an action fires only on the tick where the
/// averages first cross while the position allows it, never while the
/// condition merely keeps holding. Exact equality of the averages is a hold.
pub fn crossover_action(position: Position, short_avg: f64, long_avg: f64) -> Option<Side> {
    match position {
        Position::Flat if short_avg > long_avg => Some(Side::Buy),
        Position::Long if short_avg < long_avg => Some(Side::Sell),
        _ => None,
    }
}
