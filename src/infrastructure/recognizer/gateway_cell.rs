use std::sync::{Arc, Mutex, PoisonError};

use super::gateway::RecognizerGateway;

/// Construct-once slot for the process-wide [`RecognizerGateway`].
///
/// The initializer runs while the slot is locked, so concurrent callers wait
/// for the first construction instead of building a second model. A failed
/// initialization leaves the slot empty.
#[derive(Default)]
pub struct GatewayCell {
    slot: Mutex<Option<Arc<RecognizerGateway>>>,
}

impl GatewayCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<RecognizerGateway>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<Arc<RecognizerGateway>, E>
    where
        F: FnOnce() -> Result<RecognizerGateway, E>,
    {
        // A panic inside `init` poisons the lock but leaves the slot empty.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(gateway) = slot.as_ref() {
            return Ok(Arc::clone(gateway));
        }

        let gateway = Arc::new(init()?);
        *slot = Some(Arc::clone(&gateway));
        Ok(gateway)
    }
}
