use std::sync::Arc;

use log::{debug, info};

use crate::data::service::{QuotesService, ServiceError};
use crate::data::types::Quote;

/// Stateless pass-through to the quotes service.
pub struct QuotesRepository {
    service: Arc<dyn QuotesService>,
}

impl QuotesRepository {
    pub fn new(service: Arc<dyn QuotesService>) -> Self {
        Self { service }
    }

    /// Fetch one random quote. An empty response yields [`Quote::fallback`].
    pub async fn fetch_quote(&self) -> Result<Quote, ServiceError> {
        debug!("Fetching quote from {}", self.service.name());
        match self.service.get_random_quote().await? {
            Some(quote) => Ok(quote),
            None => {
                info!("Quote service returned no body, using fallback quote");
                Ok(Quote::fallback())
            }
        }
    }
}
