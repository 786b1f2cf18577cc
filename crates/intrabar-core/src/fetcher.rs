use tracing::{error, warn};

use crate::data_source::{BarSource, DayBarsRequest};
use crate::domain::{Bar, Symbol};

/// Fail-soft fetch wrapper.
///
/// Provider errors and empty responses both surface as `None`, logged at the
/// appropriate severity, so one symbol can never abort a cycle. Callers must
/// treat `None` as "nothing to insert", never as a failure to propagate.
pub struct BarFetcher {
    source: Box<dyn BarSource>,
}

impl BarFetcher {
    pub fn new(source: Box<dyn BarSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn fetch(&self, symbol: &Symbol) -> Option<Vec<Bar>> {
        let request = DayBarsRequest {
            symbol: symbol.clone(),
        };

        match self.source.day_bars(&request) {
            Ok(bars) if bars.is_empty() => {
                warn!(source = self.source.name(), %symbol, "no data returned");
                None
            }
            Ok(bars) => Some(bars),
            Err(error) => {
                error!(source = self.source.name(), %symbol, %error, "fetch failed");
                None
            }
        }
    }
}
