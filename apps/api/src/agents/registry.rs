//! One assistant per OpenAI credential, all sharing a single session store.
//!
//! Assistants are cached by key so repeated requests reuse the same HTTP
//! client. The cache is bounded; the oldest entry is evicted first.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::agents::graph::AssistantGraph;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::SessionStore;

pub const MISSING_API_KEY: &str = "API key is required. Please provide an OpenAI API key.";

/// Builds a model bound to one API key.
pub type ModelFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn ChatModel>, AppError> + Send + Sync>;

#[derive(Default)]
struct Cache {
    by_key: HashMap<String, Arc<AssistantGraph>>,
    order: VecDeque<String>,
}

pub struct AgentRegistry {
    factory: ModelFactory,
    store: Arc<dyn SessionStore>,
    default_api_key: Option<String>,
    capacity: usize,
    cache: Mutex<Cache>,
}

impl AgentRegistry {
    pub fn new(
        factory: ModelFactory,
        store: Arc<dyn SessionStore>,
        default_api_key: Option<String>,
        capacity: usize,
    ) -> Self {
        Self {
            factory,
            store,
            default_api_key: default_api_key.filter(|k| !k.trim().is_empty()),
            capacity: capacity.max(1),
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Assistant for the request's key, falling back to the server default.
    pub fn get_or_create(&self, api_key: Option<&str>) -> Result<Arc<AssistantGraph>, AppError> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_api_key.as_deref())
            .ok_or_else(|| AppError::Validation(MISSING_API_KEY.to_string()))?;

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| anyhow::anyhow!("assistant registry lock poisoned"))?;

        if let Some(assistant) = cache.by_key.get(key) {
            return Ok(Arc::clone(assistant));
        }

        let llm = (self.factory)(key)?;
        let assistant = Arc::new(AssistantGraph::new(llm, Arc::clone(&self.store)));

        while cache.by_key.len() >= self.capacity {
            let Some(oldest) = cache.order.pop_front() else {
                break;
            };
            cache.by_key.remove(&oldest);
            debug!("Evicted cached assistant");
        }
        cache.by_key.insert(key.to_string(), Arc::clone(&assistant));
        cache.order.push_back(key.to_string());
        info!("Created assistant ({} cached)", cache.by_key.len());

        Ok(assistant)
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.lock().unwrap().by_key.len()
    }
}
