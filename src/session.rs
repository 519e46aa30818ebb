//! Test session controller: per-suite and per-test record/replay lifecycle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::live::RandomIdGenerator;
use crate::adapters::mocked::{
    FixedCredentialStore, SequentialIdGenerator, StubFileProbe, TestProfileLoader,
};
use crate::command_line::{ensure_entry, CommandLine};
use crate::config::{SessionConfig, STRICT_SSL_VAR};
use crate::context::ServiceContext;
use crate::error::SessionError;
use crate::fixture::{normalize, Fixture, FixtureRecorder, FixtureReplayer};
use crate::intercept::Interceptor;
use crate::ports::{
    CommandExecutor, CommandOutput, CredentialStore, FileProbe, HttpInterception, IdGenerator,
    Invocation, Profile, ProfileLoader,
};
use crate::stand_in::StandIn;

/// The two switches that determine every session behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    /// HTTP is intercepted and collaborators are stood in for.
    pub mocked: bool,
    /// Exchanges are captured into the fixture instead of replayed from it.
    pub recording: bool,
}

impl Mode {
    /// Resolves the mode from an explicit override or the configured toggles.
    #[must_use]
    pub fn resolve(mocked_override: Option<bool>, config: &SessionConfig) -> Self {
        Self { mocked: mocked_override.unwrap_or(!config.live), recording: config.record }
    }

    fn id_generator(self) -> Box<dyn IdGenerator> {
        if self.mocked {
            Box::new(SequentialIdGenerator)
        } else {
            Box::new(RandomIdGenerator::new())
        }
    }
}

/// Drives one test suite against either the live backend or a fixture.
///
/// Call order: [`suite_setup`](Self::suite_setup), then for every test
/// [`test_setup`](Self::test_setup), the test body, and
/// [`test_teardown`](Self::test_teardown), and finally
/// [`suite_teardown`](Self::suite_teardown).
pub struct TestSession {
    suite: String,
    mode: Mode,
    config: SessionConfig,
    fixture_path: PathBuf,
    sequence: usize,
    recorder: Option<FixtureRecorder>,
    replayer: Option<FixtureReplayer>,
    credentials: StandIn<dyn CredentialStore>,
    files: StandIn<dyn FileProbe>,
    profiles: StandIn<dyn ProfileLoader>,
    current_profile: Option<Profile>,
    interceptor: Arc<Interceptor>,
    executor: Box<dyn CommandExecutor>,
    ids: Box<dyn IdGenerator>,
    child_env: BTreeMap<String, String>,
    skip_subscription: bool,
}

impl TestSession {
    /// Creates a session for `suite` over the given original collaborators.
    ///
    /// The mode comes from `config`; use [`with_mocked`](Self::with_mocked) to
    /// override it.
    pub fn new(
        suite: impl Into<String>,
        config: SessionConfig,
        executor: Box<dyn CommandExecutor>,
        originals: ServiceContext,
    ) -> Self {
        let suite = suite.into();
        let mode = Mode::resolve(None, &config);
        let fixture_path = Fixture::path_for(&config.fixtures_dir, &suite);
        Self {
            suite,
            mode,
            fixture_path,
            sequence: 0,
            recorder: None,
            replayer: None,
            credentials: StandIn::new("credentials", originals.credentials),
            files: StandIn::new("files", originals.files),
            profiles: StandIn::new("profiles", originals.profiles),
            current_profile: originals.profile,
            interceptor: Arc::new(Interceptor::new(originals.http)),
            executor,
            ids: mode.id_generator(),
            child_env: BTreeMap::new(),
            skip_subscription: false,
            config,
        }
    }

    /// Creates a session configured from the environment with live collaborators.
    pub fn from_env(suite: impl Into<String>, executor: Box<dyn CommandExecutor>) -> Self {
        let config = SessionConfig::from_env();
        let originals = ServiceContext::live(&config.home);
        Self::new(suite, config, executor, originals)
    }

    /// Overrides whether the session is mocked, ignoring the skip-mocking toggle.
    #[must_use]
    pub fn with_mocked(mut self, mocked: bool) -> Self {
        self.mode = Mode::resolve(Some(mocked), &self.config);
        self.ids = self.mode.id_generator();
        self
    }

    /// Stops `execute` from appending the subscription flag.
    #[must_use]
    pub fn skip_subscription(mut self, skip: bool) -> Self {
        self.skip_subscription = skip;
        self
    }

    /// The resolved mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Suite name.
    #[must_use]
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Index of the next scope playback will use.
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Fixture file for this suite.
    #[must_use]
    pub fn fixture_path(&self) -> &Path {
        &self.fixture_path
    }

    /// The profile loaded during suite setup.
    #[must_use]
    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_profile.as_ref()
    }

    /// Environment variables applied to executed commands.
    #[must_use]
    pub fn child_env(&self) -> &BTreeMap<String, String> {
        &self.child_env
    }

    /// The interception layer, for inspection in tests.
    #[must_use]
    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    /// Capabilities as the CLI under test currently sees them.
    #[must_use]
    pub fn context(&self) -> ServiceContext {
        ServiceContext {
            credentials: self.credentials.current(),
            files: self.files.current(),
            profiles: self.profiles.current(),
            http: self.interceptor.clone(),
            profile: self.current_profile.clone(),
        }
    }

    /// Installs stand-ins, opens the fixture when recording, loads the test
    /// profile and clears local cache files.
    ///
    /// # Errors
    ///
    /// Fails if a stand-in is already installed (setup ran twice), or if the
    /// fixture, profile or cache files cannot be handled.
    pub fn suite_setup(&mut self) -> Result<(), SessionError> {
        info!(
            suite = %self.suite,
            mocked = self.mode.mocked,
            recording = self.mode.recording,
            "suite setup"
        );

        if self.mode.mocked {
            let credentials = FixedCredentialStore::new(self.config.credentials.clone());
            self.credentials.install(Arc::new(credentials))?;
            let files = StubFileProbe::new(self.config.known_files.clone(), self.files.original());
            self.files.install(Arc::new(files))?;
            self.child_env.insert(STRICT_SSL_VAR.to_string(), "false".to_string());

            if self.mode.recording {
                self.recorder = Some(FixtureRecorder::begin(&self.fixture_path, &self.suite)?);
            }
        }

        let profiles = TestProfileLoader::new(self.config.test_profile(), self.profiles.original());
        self.profiles.install(Arc::new(profiles))?;
        let profile = self
            .profiles
            .current()
            .load(None)
            .map_err(|e| SessionError::collaborator("loading the test profile", e))?;
        self.current_profile = Some(profile);

        let files = self.files.original();
        for artifact in self.config.cache_artifacts() {
            files
                .remove_file(&artifact)
                .map_err(|e| SessionError::collaborator("removing cache artifacts", e))?;
        }
        Ok(())
    }

    /// Closes the fixture when recording and restores every stand-in.
    ///
    /// Restoring a capability that has no stand-in is a no-op, so teardown is
    /// safe after a partial setup.
    ///
    /// # Errors
    ///
    /// Fails if the fixture cannot be closed.
    pub fn suite_teardown(&mut self) -> Result<(), SessionError> {
        self.sequence = 0;
        self.replayer = None;

        let mut result = Ok(());
        if self.mode.mocked {
            if let Some(recorder) = self.recorder.take() {
                let scopes = recorder.scopes_written();
                match recorder.finish() {
                    Ok(path) => info!(path = %path.display(), scopes, "fixture written"),
                    Err(e) => result = Err(e),
                }
            }
            self.credentials.restore();
            self.files.restore();
        }
        self.profiles.restore();
        self.current_profile = None;
        self.child_env.remove(STRICT_SSL_VAR);

        info!(suite = %self.suite, "suite teardown");
        result
    }

    /// Runs a command through the executor.
    ///
    /// String commands are split on whitespace and `%s` tokens replaced by
    /// `template_args` in order. The configured entry point is prepended, and
    /// mocked playback sessions append `-s <subscription>`.
    ///
    /// # Errors
    ///
    /// Fails on argument contract violations (empty command, placeholder
    /// mismatch) and when the executor cannot run the command.
    pub fn execute(
        &self,
        command: impl Into<CommandLine>,
        template_args: &[&str],
    ) -> Result<CommandOutput, SessionError> {
        let mut args = command.into().into_tokens(template_args)?;
        ensure_entry(&mut args, &self.config.entry);
        if !self.skip_subscription && self.mode.mocked && !self.mode.recording {
            args.push("-s".to_string());
            args.push(self.config.subscription_id.clone());
        }

        let context = self.context();
        let invocation = Invocation { args: &args, env: &self.child_env, context: &context };
        debug!(command = %args.join(" "), "executing");
        self.executor
            .execute(&invocation)
            .map_err(|source| SessionError::Command { command: args.join(" "), source })
    }

    /// Runs a command and hands the outcome to `callback`, returning what it returns.
    pub fn execute_with<F, R>(
        &self,
        command: impl Into<CommandLine>,
        template_args: &[&str],
        callback: F,
    ) -> R
    where
        F: FnOnce(Result<CommandOutput, SessionError>) -> R,
    {
        callback(self.execute(command, template_args))
    }

    /// Prepares interception for the next test.
    ///
    /// Recording sessions start capturing; playback sessions register the
    /// scope recorded for this test's position and advance the position.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FixtureExhausted`] when the fixture has fewer
    /// scopes than tests run so far, or a fixture error if it cannot be loaded.
    pub fn test_setup(&mut self) -> Result<(), SessionError> {
        self.interceptor.activate();
        if !self.mode.mocked {
            return Ok(());
        }

        if self.mode.recording {
            self.interceptor.start_recording();
            debug!(suite = %self.suite, "recording test");
            return Ok(());
        }

        let replayer = match self.replayer.take() {
            Some(replayer) => replayer,
            None => FixtureReplayer::load(&self.fixture_path)?,
        };
        let scope = replayer.scope(self.sequence).map(<[_]>::to_vec);
        self.replayer = Some(replayer);
        let scope = scope?;

        debug!(suite = %self.suite, index = self.sequence, calls = scope.len(), "replaying scope");
        for descriptor in scope {
            self.interceptor.register_scope(descriptor);
        }
        self.sequence += 1;
        Ok(())
    }

    /// Finishes the current test: appends its recorded scope when recording
    /// and always detaches interception.
    ///
    /// # Errors
    ///
    /// Fails if the recorded scope cannot be appended to the fixture.
    pub fn test_teardown(&mut self) -> Result<(), SessionError> {
        let recorded = (self.mode.mocked && self.mode.recording)
            .then(|| self.interceptor.drain_recorded());
        self.interceptor.deactivate();

        let Some(lines) = recorded else {
            return Ok(());
        };
        let scope = normalize::scope_from_recording(lines);
        let recorder = self
            .recorder
            .as_mut()
            .ok_or_else(|| SessionError::RecorderNotOpen { suite: self.suite.clone() })?;
        debug!(suite = %self.suite, calls = scope.len(), "appending recorded scope");
        recorder.append_scope(&scope)
    }

    /// Returns a new identifier for `prefix` and records it in `ledger`.
    ///
    /// Mocked sessions return `prefix` followed by `ledger.len() + 1`; live
    /// sessions draw random suffixes until one is not already in the ledger.
    pub fn generate_id(&self, prefix: &str, ledger: &mut Vec<String>) -> String {
        let id = self.ids.next_id(prefix, ledger);
        ledger.push(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::InProcessExecutor;
    use crate::config::SUBSCRIPTION_VAR;
    use crate::error::PortError;
    use crate::ports::{Credentials, HttpFuture, HttpRequest, HttpResponse, HttpTransport};
    use std::sync::Mutex;

    struct OriginalCredentials;
    impl CredentialStore for OriginalCredentials {
        fn read(&self) -> Result<Credentials, PortError> {
            Ok(Credentials { cert: "original-cert".into(), key: "original-key".into() })
        }
        fn write(&self, _credentials: &Credentials) -> Result<(), PortError> {
            Err("original store is read-only".into())
        }
    }

    struct NoNetwork;
    impl HttpTransport for NoNetwork {
        fn send(&self, request: &HttpRequest) -> HttpFuture<'_> {
            let url = request.url.clone();
            Box::pin(async move { Ok(HttpResponse { status: 503, headers: BTreeMap::new(), body: url }) })
        }
    }

    fn test_config(name: &str, record: bool) -> SessionConfig {
        let root = std::env::temp_dir().join(format!("climock_session_{name}"));
        let _ = std::fs::remove_dir_all(&root);
        let mut vars = BTreeMap::new();
        vars.insert(SUBSCRIPTION_VAR.to_string(), "sub1".to_string());
        if record {
            vars.insert(crate::config::RECORD_VAR.to_string(), "1".to_string());
        }
        let mut config = SessionConfig::from_lookup(|k| vars.get(k).cloned());
        config.fixtures_dir = root.join("recordings");
        config.home = root.join("home");
        config
    }

    fn session(
        config: SessionConfig,
        seen: Arc<Mutex<Vec<Vec<String>>>>,
    ) -> TestSession {
        let mut originals = ServiceContext::live(&config.home);
        originals.credentials = Arc::new(OriginalCredentials);
        originals.http = Arc::new(NoNetwork);
        let executor = InProcessExecutor::new(move |inv: &Invocation<'_>| {
            seen.lock().unwrap().push(inv.args.to_vec());
            Ok(CommandOutput::default())
        });
        TestSession::new("unit", config, Box::new(executor), originals)
    }

    #[test]
    fn mode_override_wins_over_toggle() {
        let mut config = test_config("mode", false);
        config.live = true;
        assert!(!Mode::resolve(None, &config).mocked);
        assert!(Mode::resolve(Some(true), &config).mocked);
    }

    #[test]
    fn mocked_playback_appends_subscription_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let session = session(test_config("flag_replay", false), seen.clone());
        session.execute(["vm", "list"], &[]).unwrap();
        assert_eq!(seen.lock().unwrap()[0], vec!["cli", "vm", "list", "-s", "sub1"]);
    }

    #[test]
    fn recording_does_not_append_subscription_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let session = session(test_config("flag_record", true), seen.clone());
        session.execute(["vm", "list"], &[]).unwrap();
        assert_eq!(seen.lock().unwrap()[0], vec!["cli", "vm", "list"]);
    }

    #[test]
    fn opting_out_skips_subscription_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let session = session(test_config("flag_skip", false), seen.clone()).skip_subscription(true);
        session.execute("account show %s", &["name"]).unwrap();
        assert_eq!(seen.lock().unwrap()[0], vec!["cli", "account", "show", "name"]);
    }

    #[test]
    fn execute_with_hands_result_to_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let session = session(test_config("callback", false), seen);
        let failed = session.execute_with("", &[], |result| result.is_err());
        assert!(failed);
        let code = session.execute_with("vm list", &[], |result| result.unwrap().exit_code);
        assert_eq!(code, 0);
    }

    #[test]
    fn suite_setup_installs_and_teardown_restores() {
        let config = test_config("standins", false);
        let artifact = config.cache_artifacts()[0].clone();
        std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        std::fs::write(&artifact, "stale").unwrap();

        let mut session = session(config, Arc::new(Mutex::new(Vec::new())));
        session.suite_setup().unwrap();

        let ctx = session.context();
        assert_eq!(ctx.credentials.read().unwrap().cert, "test-certificate");
        assert!(ctx.credentials.write(&ctx.credentials.read().unwrap()).is_ok());
        assert!(ctx.files.exists(Path::new("/anywhere/config.json")));
        assert_eq!(ctx.profile.as_ref().unwrap().subscriptions[0].id, "sub1");
        assert_eq!(session.child_env().get(STRICT_SSL_VAR).map(String::as_str), Some("false"));
        assert!(!artifact.exists(), "cache artifact should be removed");

        session.suite_teardown().unwrap();
        let ctx = session.context();
        assert_eq!(ctx.credentials.read().unwrap().cert, "original-cert");
        assert!(ctx.credentials.write(&ctx.credentials.read().unwrap()).is_err());
        assert!(!ctx.files.exists(Path::new("/anywhere/config.json")));
        assert!(ctx.profile.is_none());
        assert!(session.child_env().is_empty());

        let _ = std::fs::remove_dir_all(session.config.home.parent().unwrap());
    }

    #[test]
    fn suite_setup_twice_fails_loudly() {
        let mut session = session(test_config("twice", false), Arc::new(Mutex::new(Vec::new())));
        session.suite_setup().unwrap();
        let err = session.suite_setup().unwrap_err();
        assert!(matches!(err, SessionError::StandInAlreadyInstalled { .. }));
        session.suite_teardown().unwrap();
        // Teardown tolerates being called with nothing installed.
        session.suite_teardown().unwrap();
    }

    #[test]
    fn live_session_only_stands_in_for_profiles() {
        let mut session = session(test_config("live", false), Arc::new(Mutex::new(Vec::new())))
            .with_mocked(false);
        session.suite_setup().unwrap();

        let ctx = session.context();
        assert_eq!(ctx.credentials.read().unwrap().cert, "original-cert");
        assert_eq!(ctx.profiles.load(None).unwrap().subscriptions[0].id, "sub1");
        assert!(session.child_env().is_empty());

        session.test_setup().unwrap();
        assert!(session.interceptor().is_active());
        session.test_teardown().unwrap();
        assert!(!session.interceptor().is_active());
        session.suite_teardown().unwrap();
    }

    #[test]
    fn mocked_ids_are_sequential_and_live_ids_avoid_ledger() {
        let session = session(test_config("ids", false), Arc::new(Mutex::new(Vec::new())));
        let mut ledger = Vec::new();
        assert_eq!(session.generate_id("vm", &mut ledger), "vm1");
        assert_eq!(session.generate_id("vm", &mut ledger), "vm2");
        assert_eq!(ledger, vec!["vm1", "vm2"]);

        let live = session.with_mocked(false);
        let mut ledger = vec!["vm1".to_string()];
        for _ in 0..50 {
            let before = ledger.clone();
            let id = live.generate_id("vm", &mut ledger);
            assert!(!before.contains(&id));
        }
        assert_eq!(ledger.len(), 51);
    }

    #[test]
    fn playback_without_fixture_is_an_io_error() {
        let mut session = session(test_config("nofixture", false), Arc::new(Mutex::new(Vec::new())));
        let err = session.test_setup().unwrap_err();
        assert!(matches!(err, SessionError::FixtureIo { .. }));
    }
}
