// Mon Jan 19 2026 - Alex

use crate::query::QueryService;
use crate::resolver::{Candidate, MatchStrategy, ResolveError, StrategyTag};

/// Picks a method by its position among the methods a type declares with a
/// given return type.
///
/// The ordinals are fragile: they were read off one build of the target and
/// hold only while its declaration order does. Too few methods is a miss,
/// not an error.
pub struct DeclaredOrdinalStrategy {
    declaring_type: String,
    return_type: String,
    primary_ordinal: usize,
    companion_ordinal: Option<usize>,
}

impl DeclaredOrdinalStrategy {
    pub fn new(declaring_type: &str, return_type: &str, primary_ordinal: usize) -> Self {
        Self {
            declaring_type: declaring_type.to_string(),
            return_type: return_type.to_string(),
            primary_ordinal,
            companion_ordinal: None,
        }
    }

    pub fn with_companion_ordinal(mut self, ordinal: Option<usize>) -> Self {
        self.companion_ordinal = ordinal;
        self
    }
}

impl MatchStrategy for DeclaredOrdinalStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::DeclaredOrdinal
    }

    fn search(&self, query: &dyn QueryService) -> Result<Vec<Candidate>, ResolveError> {
        let methods =
            query.find_by_declaring_type_and_return_type(&self.declaring_type, &self.return_type)?;

        log::debug!(
            "{} declares {} {} methods",
            self.declaring_type,
            methods.len(),
            self.return_type
        );

        let Some(primary) = methods.get(self.primary_ordinal) else {
            return Ok(Vec::new());
        };

        let mut candidate = Candidate::new(primary.clone(), &self.declaring_type);

        match self.companion_ordinal.map(|i| (i, methods.get(i))) {
            Some((_, Some(companion))) => candidate = candidate.with_companion(companion.clone()),
            Some((i, None)) => log::debug!("No companion at ordinal {} ({} methods)", i, methods.len()),
            None => {}
        }

        Ok(vec![candidate])
    }
}
