// Tue Jan 20 2026 - Alex

use crate::config::TargetConfig;
use crate::detect::{SignalKind, SignalMatch};
use crate::hook::status::{FOLLOWER_FEATURE, STORY_HIDDEN_FEATURE, STORY_HIDE_FEATURE};
use crate::hook::{
    CallFrame, FeatureStatusTracker, HookCallback, HookValue, InstallError, InterceptionSubstrate,
    ObservationError,
};
use crate::notify::EventNotifier;
use crate::resolver::ResolutionResult;
use parking_lot::Mutex;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookRole {
    Primary,
    Companion,
    IdentifierAccessor,
    Signal(SignalKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookPoint {
    pub type_name: String,
    pub method_name: String,
    pub role: HookRole,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallReport {
    pub installed: Vec<HookPoint>,
    pub failures: Vec<String>,
}

impl InstallReport {
    pub fn merge(&mut self, other: InstallReport) {
        self.installed.extend(other.installed);
        self.failures.extend(other.failures);
    }
}

/// Last identifier seen by the identifier accessor hook, read by the
/// follow-status hook when the hooked type was substituted.
#[derive(Clone, Default)]
struct IdentifierCell(Arc<Mutex<Option<String>>>);

impl IdentifierCell {
    fn set(&self, id: &str) {
        *self.0.lock() = Some(id.to_string());
    }

    fn get(&self) -> Option<String> {
        self.0.lock().clone()
    }
}

pub struct HookInstaller {
    substrate: Arc<dyn InterceptionSubstrate>,
    status: Arc<FeatureStatusTracker>,
    notifier: Arc<EventNotifier>,
    targets: TargetConfig,
}

impl HookInstaller {
    pub fn new(
        substrate: Arc<dyn InterceptionSubstrate>,
        status: Arc<FeatureStatusTracker>,
        notifier: Arc<EventNotifier>,
        targets: TargetConfig,
    ) -> Self {
        Self {
            substrate,
            status,
            notifier,
            targets,
        }
    }

    /// The type to hook for `owning_type`. The interface type cannot be
    /// hooked directly, so it is swapped for its `Impl` class. This is a
    /// naming convention of the target, not general resolution.
    pub fn install_type(&self, owning_type: &str) -> (String, bool) {
        if owning_type == self.targets.interface_type {
            (self.targets.implementation_type(), true)
        } else {
            (owning_type.to_string(), false)
        }
    }

    pub fn install_follow_indicator(
        &self,
        result: &ResolutionResult,
        identifier_type: Option<&str>,
    ) -> Result<InstallReport, InstallError> {
        let mut report = InstallReport::default();
        let (hook_type, substituted) = self.install_type(&result.owning_type);
        let cell = IdentifierCell::default();

        if substituted {
            match identifier_type {
                Some(id_type) => {
                    let accessor = self.targets.identifier_accessor.clone();
                    let callback = self.identifier_callback(cell.clone());
                    self.try_install(&mut report, id_type, &accessor, HookRole::IdentifierAccessor, callback);
                }
                None => log::warn!("No identifier type for {}, follow events will lack a subject", hook_type),
            }
        }

        let primary = self.follow_callback(&result.primary.name, substituted, cell);
        self.substrate
            .install_post_call_hook(&hook_type, &result.primary.name, primary)?;
        report.installed.push(HookPoint {
            type_name: hook_type.clone(),
            method_name: result.primary.name.clone(),
            role: HookRole::Primary,
        });
        self.status.set_hooked(FOLLOWER_FEATURE);
        log::info!("Hooked ({}): {}.{}", result.strategy, hook_type, result.primary.name);

        if let Some(ref companion) = result.companion {
            let callback = self.companion_callback();
            if self.try_install(&mut report, &hook_type, &companion.name, HookRole::Companion, callback) {
                self.status.set_hooked(STORY_HIDDEN_FEATURE);
            }
        }

        Ok(report)
    }

    pub fn install_signals(&self, matches: &[SignalMatch]) -> InstallReport {
        let mut report = InstallReport::default();

        for signal in matches {
            let (hook_type, _) = self.install_type(&signal.method.owning_type);
            let callback = self.signal_callback(&signal.method.name, signal.kind);
            let role = HookRole::Signal(signal.kind);
            if self.try_install(&mut report, &hook_type, &signal.method.name, role, callback) {
                self.status.set_hooked(STORY_HIDE_FEATURE);
            }
        }

        log::info!(
            "Story signal hooks: {} installed, {} failed",
            report.installed.len(),
            report.failures.len()
        );
        report
    }

    fn try_install(
        &self,
        report: &mut InstallReport,
        type_name: &str,
        method_name: &str,
        role: HookRole,
        callback: HookCallback,
    ) -> bool {
        match self.substrate.install_post_call_hook(type_name, method_name, callback) {
            Ok(()) => {
                log::debug!("Hooked {}.{} as {:?}", type_name, method_name, role);
                report.installed.push(HookPoint {
                    type_name: type_name.to_string(),
                    method_name: method_name.to_string(),
                    role,
                });
                true
            }
            Err(e) => {
                log::warn!("Failed to hook {}.{}: {}", type_name, method_name, e);
                report.failures.push(e.to_string());
                false
            }
        }
    }

    fn identifier_callback(&self, cell: IdentifierCell) -> HookCallback {
        guarded("identifier", move |frame| {
            if let Some(id) = frame.result.as_str() {
                cell.set(id);
            }
            Ok(())
        })
    }

    fn follow_callback(&self, source: &str, substituted: bool, cell: IdentifierCell) -> HookCallback {
        let notifier = Arc::clone(&self.notifier);
        let source = source.to_string();
        let id_accessor = self.targets.identifier_accessor.clone();
        let label_accessor = self.targets.label_accessor.clone();

        guarded("follow-status", move |frame| {
            let follows = frame.result.expect_bool()?;

            let subject = if substituted {
                cell.get()
            } else {
                match frame.call_on_receiver(&id_accessor) {
                    Some(Ok(HookValue::Str(id))) => Some(id),
                    Some(Err(e)) => {
                        log::debug!("Identifier accessor failed: {}", e);
                        None
                    }
                    _ => None,
                }
            };

            let label = match frame.call_on_receiver(&label_accessor) {
                Some(Ok(HookValue::Str(label))) => Some(label),
                _ => None,
            };

            notifier.on_follow_status(&source, subject.as_deref(), label.as_deref(), follows);
            Ok(())
        })
    }

    fn companion_callback(&self) -> HookCallback {
        let notifier = Arc::clone(&self.notifier);

        guarded("companion", move |frame| {
            if let Some(blocked) = frame.result.as_bool() {
                notifier.on_story_blocked(blocked);
            }
            Ok(())
        })
    }

    fn signal_callback(&self, method_name: &str, kind: SignalKind) -> HookCallback {
        let notifier = Arc::clone(&self.notifier);
        let source = method_name.to_string();
        let id_accessor = self.targets.identifier_accessor.clone();

        guarded("story-signal", move |frame| {
            let Some(value) = frame.result.as_bool() else {
                return Ok(());
            };

            let subject = match frame.call_on_receiver(&id_accessor) {
                Some(Ok(HookValue::Str(id))) => Some(id),
                _ => None,
            };

            let message = kind.message(&source, value);
            notifier.on_signal(&source, subject.as_deref(), value, &message);
            Ok(())
        })
    }
}

/// Wraps a callback so neither its errors nor its panics reach the host call.
fn guarded<F>(label: &'static str, f: F) -> HookCallback
where
    F: Fn(&CallFrame) -> Result<(), ObservationError> + Send + Sync + 'static,
{
    Arc::new(move |frame: &CallFrame| -> Result<(), ObservationError> {
        match panic::catch_unwind(AssertUnwindSafe(|| f(frame))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Error in {} hook: {}", label, e),
            Err(payload) => {
                let e = ObservationError::Panicked(panic_message(payload.as_ref()));
                log::error!("Panic in {} hook: {}", label, e);
            }
        }
        Ok(())
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureFlags;
    use crate::detect::{MatchSource, SignalCategory, ValuePolicy};
    use crate::hook::RecordingSubstrate;
    use crate::notify::{CollectingSink, ManualScheduler, ObservationSession};
    use crate::query::{MethodDescriptor, MethodId};
    use crate::resolver::{MethodRef, StrategyTag};
    use crate::testing::FakeReceiver;
    use parking_lot::RwLock;

    struct Fixture {
        substrate: Arc<RecordingSubstrate>,
        status: Arc<FeatureStatusTracker>,
        session: Arc<ObservationSession>,
        sink: Arc<CollectingSink>,
        installer: HookInstaller,
    }

    fn fixture_with(substrate: RecordingSubstrate, policy: ValuePolicy) -> Fixture {
        let substrate = Arc::new(substrate);
        let status = Arc::new(FeatureStatusTracker::new());
        let session = Arc::new(ObservationSession::new());
        let sink = Arc::new(CollectingSink::new());
        let notifier = EventNotifier::new(
            session.clone(),
            sink.clone(),
            Arc::new(ManualScheduler::new()),
            Arc::new(RwLock::new(FeatureFlags::default())),
        )
        .with_value_policy(policy);
        let installer = HookInstaller::new(
            substrate.clone(),
            status.clone(),
            Arc::new(notifier),
            TargetConfig::default(),
        );
        Fixture { substrate, status, session, sink, installer }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingSubstrate::new(), ValuePolicy::TrueOnly)
    }

    fn interface_result() -> ResolutionResult {
        let iface = TargetConfig::default().interface_type;
        ResolutionResult::new("follow-status", MethodRef::new(&iface, "m1"), &iface, StrategyTag::DeclaredOrdinal)
            .with_companion(MethodRef::new(&iface, "m13"))
    }

    fn user(id: &str) -> Arc<FakeReceiver> {
        Arc::new(
            FakeReceiver::new("com.instagram.user.model.User")
                .with_value("getId", HookValue::from(id))
                .with_value("getUsername", HookValue::from("bob")),
        )
    }

    #[test]
    fn test_interface_is_swapped_for_impl() {
        let f = fixture();
        let impl_type = TargetConfig::default().implementation_type();

        let report = f.installer.install_follow_indicator(&interface_result(), Some("U.id")).unwrap();

        assert_eq!(report.installed.len(), 3);
        assert_eq!(f.substrate.hook_count(&impl_type, "m1"), 1);
        assert_eq!(f.substrate.hook_count(&impl_type, "m13"), 1);
        assert_eq!(f.substrate.hook_count("U.id", "getId"), 1);
        assert!(f.status.is_hooked(FOLLOWER_FEATURE));
        assert!(f.status.is_hooked(STORY_HIDDEN_FEATURE));
    }

    #[test]
    fn test_substituted_flow_uses_identifier_hook() {
        let f = fixture();
        let impl_type = TargetConfig::default().implementation_type();
        f.installer.install_follow_indicator(&interface_result(), Some("U.id")).unwrap();
        f.session.begin_scope("42");

        f.substrate.fire("U.id", "getId", &CallFrame::new(HookValue::from("42")));
        f.substrate.fire(&impl_type, "m1", &CallFrame::new(HookValue::Bool(false)));

        assert_eq!(f.sink.messages(), vec!["(42) doesn't follow you".to_string()]);
    }

    #[test]
    fn test_concrete_receiver_supplies_id_and_label() {
        let f = fixture();
        let result = ResolutionResult::new(
            "follow-status",
            MethodRef::new("X.a", "f"),
            "X.a",
            StrategyTag::StringAnchor,
        );
        f.installer.install_follow_indicator(&result, Some("X.a")).unwrap();
        f.session.begin_scope("42");

        let frame = CallFrame::new(HookValue::Bool(true)).with_receiver(user("42"));
        assert_eq!(f.substrate.fire("X.a", "f", &frame), 1);
        assert_eq!(f.sink.messages(), vec!["@bob (42) follows you".to_string()]);
        assert!(!f.status.is_hooked(STORY_HIDDEN_FEATURE));
    }

    #[test]
    fn test_concrete_receiver_without_id_is_not_credited() {
        let f = fixture();
        let result = ResolutionResult::new("follow-status", MethodRef::new("X.a", "f"), "X.a", StrategyTag::StringAnchor);
        f.installer.install_follow_indicator(&result, Some("X.a")).unwrap();

        f.session.begin_scope("99");
        let frame = CallFrame::new(HookValue::Bool(true)).with_receiver(user("42"));
        f.substrate.fire("X.a", "f", &frame);
        assert!(f.sink.is_empty());

        f.session.begin_scope("42");
        let anonymous = Arc::new(FakeReceiver::new("com.instagram.user.model.User"));
        let frame = CallFrame::new(HookValue::Bool(false)).with_receiver(anonymous);
        assert_eq!(f.substrate.fire("X.a", "f", &frame), 1);
        assert!(f.sink.is_empty());
    }

    #[test]
    fn test_primary_failure_is_an_error() {
        let f = fixture_with(RecordingSubstrate::strict(), ValuePolicy::TrueOnly);

        let err = f.installer.install_follow_indicator(&interface_result(), Some("U.id"));
        assert!(matches!(err, Err(InstallError::MethodNotFound { .. })));
        assert!(!f.status.is_hooked(FOLLOWER_FEATURE));
    }

    #[test]
    fn test_companion_failure_is_reported_not_fatal() {
        let impl_type = TargetConfig::default().implementation_type();
        let substrate = RecordingSubstrate::strict()
            .with_method(&impl_type, "m1")
            .with_method("U.id", "getId");
        let f = fixture_with(substrate, ValuePolicy::TrueOnly);

        let report = f.installer.install_follow_indicator(&interface_result(), Some("U.id")).unwrap();
        assert_eq!(report.installed.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!f.status.is_hooked(STORY_HIDDEN_FEATURE));
    }

    #[test]
    fn test_bad_return_value_is_swallowed() {
        let f = fixture();
        let result = ResolutionResult::new("follow-status", MethodRef::new("X.a", "f"), "X.a", StrategyTag::StringAnchor);
        f.installer.install_follow_indicator(&result, None).unwrap();
        f.session.begin_scope("42");

        let frame = CallFrame::new(HookValue::Int(3)).with_receiver(user("42"));
        assert_eq!(f.substrate.fire("X.a", "f", &frame), 1);
        assert!(f.sink.is_empty());
    }

    #[test]
    fn test_panicking_receiver_is_contained() {
        struct Exploding;
        impl crate::hook::Receiver for Exploding {
            fn type_name(&self) -> &str {
                "X.a"
            }
            fn call_method(&self, _name: &str) -> Result<HookValue, ObservationError> {
                panic!("accessor blew up")
            }
        }

        let f = fixture();
        let result = ResolutionResult::new("follow-status", MethodRef::new("X.a", "f"), "X.a", StrategyTag::StringAnchor);
        f.installer.install_follow_indicator(&result, None).unwrap();

        let frame = CallFrame::new(HookValue::Bool(true)).with_receiver(Arc::new(Exploding));
        assert_eq!(f.substrate.fire("X.a", "f", &frame), 1);
        assert!(f.sink.is_empty());
    }

    #[test]
    fn test_signal_hooks_and_duplicates() {
        let f = fixture();
        let method = MethodDescriptor::new(MethodId::new(0), "S.impl", "isMutingReel", "boolean");
        let kind = SignalKind::Categorized { category: SignalCategory::MutedReel };
        let matches = vec![
            SignalMatch { method: method.clone(), kind, source: MatchSource::StringKey("is_muting_reel".to_string()) },
            SignalMatch { method, kind, source: MatchSource::NameHeuristic },
        ];

        let report = f.installer.install_signals(&matches);
        assert_eq!(report.installed.len(), 2);
        assert_eq!(f.substrate.hook_count("S.impl", "isMutingReel"), 2);
        assert_eq!(f.status.hook_count(STORY_HIDE_FEATURE), 2);

        f.session.begin_scope("42");
        f.substrate.fire("S.impl", "isMutingReel", &CallFrame::new(HookValue::Bool(true)));
        assert_eq!(f.sink.messages(), vec!["This user muted your stories".to_string()]);
    }
}
