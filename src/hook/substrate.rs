// Tue Jan 20 2026 - Alex

use crate::hook::{CallFrame, InstallError, ObservationError};
use std::sync::Arc;

pub type HookCallback = Arc<dyn Fn(&CallFrame) -> Result<(), ObservationError> + Send + Sync>;

/// The live-process capability this crate needs: attach an observer that
/// runs after a named method returns. The observer cannot change the
/// result. Attaching twice to one method gives two independent observers.
pub trait InterceptionSubstrate: Send + Sync {
    fn install_post_call_hook(
        &self,
        type_name: &str,
        method_name: &str,
        callback: HookCallback,
    ) -> Result<(), InstallError>;
}
