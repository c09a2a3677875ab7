// Wed Jan 21 2026 - Alex

use crate::config::Config;
use crate::detect::{SignalMatch, StoryHideDetector};
use crate::hook::{FeatureStatusTracker, HookInstaller, InstallReport, InterceptionSubstrate};
use crate::notify::EventNotifier;
use crate::query::QueryService;
use crate::resolver::{follow_status_chain, identifier_lookup, Resolution, ResolutionResult, StrategyTag};
use crate::utils::logging::Timer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub follow: Option<ResolutionResult>,
    pub attempted: Vec<StrategyTag>,
    pub identifier_type: Option<String>,
    pub follow_hooks: InstallReport,
    pub follow_error: Option<String>,
    pub signals: Vec<SignalMatch>,
    pub signal_hooks: InstallReport,
    pub status: BTreeMap<String, usize>,
}

impl PipelineReport {
    pub fn hook_count(&self) -> usize {
        self.follow_hooks.installed.len() + self.signal_hooks.installed.len()
    }

    pub fn failure_count(&self) -> usize {
        self.follow_hooks.failures.len()
            + self.signal_hooks.failures.len()
            + usize::from(self.follow_error.is_some())
    }
}

/// The one-off start-up pass: resolve every target against the index and
/// attach hooks for whatever was found. Nothing here is fatal.
pub struct Pipeline {
    config: Config,
    installer: HookInstaller,
    status: Arc<FeatureStatusTracker>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        substrate: Arc<dyn InterceptionSubstrate>,
        notifier: Arc<EventNotifier>,
        status: Arc<FeatureStatusTracker>,
    ) -> Self {
        let installer = HookInstaller::new(substrate, status.clone(), notifier, config.targets.clone());
        Self {
            config,
            installer,
            status,
        }
    }

    pub fn run(&self, query: &dyn QueryService) -> PipelineReport {
        let _timer = Timer::new("pipeline");
        let mut report = PipelineReport::default();

        self.run_follow_status(query, &mut report);
        self.run_story_signals(query, &mut report);

        report.status = self.status.snapshot();
        report
    }

    fn run_follow_status(&self, query: &dyn QueryService, report: &mut PipelineReport) {
        let result = match follow_status_chain(&self.config.targets).resolve(query) {
            Resolution::Resolved(result) => result,
            Resolution::NotFound { attempted } => {
                report.attempted = attempted;
                return;
            }
        };

        let identifier_type = match identifier_lookup(&self.config.targets).lookup(query, &result.owning_type) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Identifier type lookup failed: {}", e);
                None
            }
        };

        match self.installer.install_follow_indicator(&result, identifier_type.as_deref()) {
            Ok(hooks) => report.follow_hooks = hooks,
            Err(e) => {
                log::warn!("Error hooking follower status: {}", e);
                report.follow_error = Some(e.to_string());
            }
        }

        report.attempted = vec![result.strategy];
        report.identifier_type = identifier_type;
        report.follow = Some(result);
    }

    fn run_story_signals(&self, query: &dyn QueryService, report: &mut PipelineReport) {
        let signals = StoryHideDetector::from_config(&self.config.detector).detect(query);
        if signals.is_empty() {
            log::warn!("No story signal methods found to hook");
        } else {
            report.signal_hooks = self.installer.install_signals(&signals);
        }
        report.signals = signals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureFlags;
    use crate::detect::ValuePolicy;
    use crate::hook::{CallFrame, HookValue, RecordingSubstrate, FOLLOWER_FEATURE};
    use crate::notify::{CollectingSink, ManualScheduler, ObservationSession};
    use crate::query::{InMemoryIndex, MethodDescriptor, MethodMatcher, MethodSpec, QueryError};
    use crate::testing::{add_ordinal_methods, add_string_anchor_layout, add_structural_layout, ordinal_index};
    use parking_lot::{Mutex, RwLock};

    struct RecordingQuery<'a> {
        inner: &'a InMemoryIndex,
        log: Mutex<Vec<MethodMatcher>>,
    }

    impl<'a> RecordingQuery<'a> {
        fn new(inner: &'a InMemoryIndex) -> Self {
            Self { inner, log: Mutex::new(Vec::new()) }
        }

        fn asked_for_param_count(&self) -> bool {
            self.log.lock().iter().any(|m| m.param_count.is_some())
        }
    }

    impl QueryService for RecordingQuery<'_> {
        fn find_methods(&self, matcher: &MethodMatcher) -> Result<Vec<MethodDescriptor>, QueryError> {
            self.log.lock().push(matcher.clone());
            self.inner.find_methods(matcher)
        }

        fn invoked_methods(&self, method: &MethodDescriptor) -> Result<Vec<MethodDescriptor>, QueryError> {
            self.inner.invoked_methods(method)
        }
    }

    struct World {
        substrate: Arc<RecordingSubstrate>,
        session: Arc<ObservationSession>,
        sink: Arc<CollectingSink>,
        pipeline: Pipeline,
    }

    fn world(config: Config) -> World {
        let substrate = Arc::new(RecordingSubstrate::new());
        let session = Arc::new(ObservationSession::new());
        let sink = Arc::new(CollectingSink::new());
        let notifier = EventNotifier::new(
            session.clone(),
            sink.clone(),
            Arc::new(ManualScheduler::new()),
            Arc::new(RwLock::new(config.features)),
        )
        .with_value_policy(config.detector.value_policy);
        let pipeline = Pipeline::new(
            config,
            substrate.clone(),
            Arc::new(notifier),
            Arc::new(FeatureStatusTracker::new()),
        );
        World { substrate, session, sink, pipeline }
    }

    #[test]
    fn test_ordinal_layout_resolves_without_fallthrough() {
        let config = Config::default();
        let mut index = ordinal_index(&config.targets, 20);
        add_string_anchor_layout(&mut index, &config.targets);
        let query = RecordingQuery::new(&index);
        let w = world(config.clone());

        let report = w.pipeline.run(&query);
        let follow = report.follow.as_ref().unwrap();

        assert_eq!(follow.strategy, StrategyTag::DeclaredOrdinal);
        assert_eq!(follow.primary.name, "m1");
        assert_eq!(follow.companion.as_ref().unwrap().name, "m13");
        assert_eq!(report.attempted, vec![StrategyTag::DeclaredOrdinal]);
        assert!(!query.asked_for_param_count());

        let impl_type = config.targets.implementation_type();
        assert_eq!(w.substrate.hook_count(&impl_type, "m1"), 1);
        assert_eq!(w.substrate.hook_count(&impl_type, "m13"), 1);
        assert_eq!(report.status.get(FOLLOWER_FEATURE), Some(&1));
    }

    #[test]
    fn test_string_anchor_wins_when_interface_is_empty() {
        let config = Config::default();
        let mut index = InMemoryIndex::new();
        let followed = add_string_anchor_layout(&mut index, &config.targets);
        add_structural_layout(&mut index, &config.targets);
        let query = RecordingQuery::new(&index);
        let w = world(config);

        let report = w.pipeline.run(&query);
        let follow = report.follow.as_ref().unwrap();

        assert_eq!(follow.strategy, StrategyTag::StringAnchor);
        assert_eq!(follow.primary.name, index.get(followed).unwrap().name);
        assert_eq!(follow.owning_type, "X.a");
        assert!(follow.companion.is_none());
        assert!(!query.asked_for_param_count());
        assert_eq!(report.identifier_type.as_deref(), Some("X.a"));
        assert_eq!(w.substrate.hook_count("X.a", "f"), 1);
    }

    #[test]
    fn test_structural_shape_is_last_resort() {
        let config = Config::default();
        let mut index = ordinal_index(&config.targets, 1);
        add_structural_layout(&mut index, &config.targets);
        let w = world(config.clone());

        let report = w.pipeline.run(&index);
        let follow = report.follow.as_ref().unwrap();
        assert_eq!(follow.strategy, StrategyTag::StructuralShape);
        assert_eq!(follow.owning_type, config.targets.user_type);
    }

    #[test]
    fn test_nothing_found_installs_nothing() {
        let config = Config::default();
        let index = InMemoryIndex::new();
        let w = world(config);

        let report = w.pipeline.run(&index);

        assert!(report.follow.is_none());
        assert_eq!(
            report.attempted,
            vec![StrategyTag::DeclaredOrdinal, StrategyTag::StringAnchor, StrategyTag::StructuralShape]
        );
        assert!(report.follow_hooks.installed.is_empty());
        assert!(report.signals.is_empty());
        assert_eq!(w.substrate.total_hooks(), 0);
        assert!(report.status.is_empty());
    }

    #[test]
    fn test_log_both_versus_single_signal() {
        let config = Config::default().with_value_policy(ValuePolicy::LogBoth);
        let mut index = InMemoryIndex::new();
        add_ordinal_methods(&mut index, &config.targets, 2);
        index.add_method(MethodSpec::new(&config.detector.scan_type, "isHideStory", "boolean"));
        index.add_method(MethodSpec::new("U.u", "update", "void").with_strings(&[config.targets.identifier_anchor_string.as_str()]));
        let to_string = index.add_method(MethodSpec::new("U.u", "toString", "java.lang.String"));
        let id_getter = index.add_method(MethodSpec::new("U.id", "getId", "java.lang.String"));
        index.add_invoke(to_string, id_getter).unwrap();

        let w = world(config.clone());
        let report = w.pipeline.run(&index);
        assert_eq!(report.identifier_type.as_deref(), Some("U.id"));

        let impl_type = config.targets.implementation_type();
        let user = Arc::new(
            crate::testing::FakeReceiver::new(&config.targets.user_type)
                .with_value("getId", HookValue::from("42")),
        );
        w.session.begin_scope("42");

        for value in [true, false] {
            w.substrate.fire(&config.detector.scan_type, "isHideStory", &CallFrame::new(HookValue::Bool(value)));
        }
        assert_eq!(
            w.sink.messages(),
            vec![
                "This user hid their story from you".to_string(),
                "This user does not hide their story from you".to_string(),
            ]
        );

        w.substrate.fire("U.id", "getId", &CallFrame::new(HookValue::from("42")));
        for value in [true, false] {
            let frame = CallFrame::new(HookValue::Bool(value)).with_receiver(user.clone());
            w.substrate.fire(&impl_type, "m1", &frame);
        }
        let messages = w.sink.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], "(42) follows you");
    }

    #[test]
    fn test_disabled_features_still_install() {
        let features = FeatureFlags {
            show_follower_toast: false,
            show_story_hidden_toast: false,
            show_story_hide_toast: false,
        };
        let config = Config::default().with_features(features);
        let index = ordinal_index(&config.targets, 20);
        let w = world(config.clone());

        let report = w.pipeline.run(&index);
        assert!(report.hook_count() >= 2);

        w.session.begin_scope("42");
        let impl_type = config.targets.implementation_type();
        w.substrate.fire(&impl_type, "m13", &CallFrame::new(HookValue::Bool(true)));
        assert!(w.sink.is_empty());
    }
}
