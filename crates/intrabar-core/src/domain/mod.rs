mod bar;
mod symbol;
mod timestamp;

pub use bar::{coerce_volume, Bar};
pub use symbol::Symbol;
pub use timestamp::{Clock, FixedClock, MarketTimestamp, SystemClock, MARKET_OFFSET};
