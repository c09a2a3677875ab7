// Mon Jan 19 2026 - Alex

use crate::config::TargetConfig;
use crate::resolver::{
    CompanionIdentifierLookup, DeclaredOrdinalStrategy, FallbackChain, StringAnchorStrategy,
    StructuralShapeStrategy,
};

pub const FOLLOW_STATUS_TARGET: &str = "follow-status";

pub fn follow_status_chain(targets: &TargetConfig) -> FallbackChain {
    FallbackChain::new(FOLLOW_STATUS_TARGET)
        .with_strategy(
            DeclaredOrdinalStrategy::new(&targets.interface_type, &targets.boolean_type, targets.primary_ordinal)
                .with_companion_ordinal(targets.companion_ordinal),
        )
        .with_strategy(StringAnchorStrategy::new(&targets.anchor_strings, &targets.session_type))
        .with_strategy(StructuralShapeStrategy::new(&targets.session_type, &targets.user_type))
}

pub fn identifier_lookup(targets: &TargetConfig) -> CompanionIdentifierLookup {
    CompanionIdentifierLookup::new(
        &targets.interface_type,
        &targets.identifier_anchor_string,
        &targets.stringify_method,
    )
}
