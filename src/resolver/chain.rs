// Mon Jan 19 2026 - Alex

use crate::query::QueryService;
use crate::resolver::{MatchStrategy, MethodRef, Resolution, ResolutionResult};

/// Ordered strategies for one semantic target. The first strategy with a
/// candidate wins and nothing after it runs.
pub struct FallbackChain {
    target: String,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl FallbackChain {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy<S: MatchStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn resolve(&self, query: &dyn QueryService) -> Resolution {
        let mut attempted = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let tag = strategy.tag();
            attempted.push(tag);

            let candidates = match strategy.search(query) {
                Ok(candidates) => candidates,
                Err(e) => {
                    log::warn!("[{}] {} failed: {}", self.target, tag, e);
                    continue;
                }
            };

            let Some(candidate) = candidates.into_iter().next() else {
                log::debug!("[{}] {} found nothing", self.target, tag);
                continue;
            };

            let mut result = ResolutionResult::new(
                &self.target,
                MethodRef::from(&candidate.method),
                &candidate.anchor_type,
                tag,
            );
            if let Some(ref companion) = candidate.companion {
                result = result.with_companion(MethodRef::from(companion));
            }

            log::info!("[{}] resolved via {}: {}", self.target, tag, result.primary);
            return Resolution::Resolved(result);
        }

        log::warn!("[{}] no strategy matched ({} tried)", self.target, attempted.len());
        Resolution::NotFound { attempted }
    }
}
