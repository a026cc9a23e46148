//=========================================================================
// Application
//
// Lifecycle orchestrator of the game.
//
// Architecture:
// ```text
//   ApplicationBuilder ──build()──> Application ──startup()──> ──run()──> [Loop]
//         │                           │                          │
//         ├─ with_window_title()      ├─ subsystems started      ├─ poll_input(wait)
//         ├─ with_window_size()       │  in order                ├─ timer.tick()
//         ├─ with_target_fps()        └─ render toggles          ├─ scene tick
//         ├─ with_config_path()                                  └─ transition
//         ├─ with_resource_root()
//         └─ with_platform_backend()
//
//   drop / shutdown() ──> subsystems stopped in reverse order
// ```
//
// The loop checks the quit latch only at the top of an iteration: a quit
// requested during frame K lets frame K finish, frame K+1 never starts.
//
// With vsync on, each frame starts no sooner than one frame interval after
// the previous one. The remaining time is handed to the platform pump, so
// OS events keep flowing while the loop waits.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::{debug, info, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::WindowEventKind;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::quit::QuitSignal;
use crate::core::resource::{FontArgs, ResourceError, Sound, TtFont};
use crate::core::scene::{SceneError, SceneId, SceneMachine};
use crate::core::subsystem::{Services, StartupError, SubsystemRegistry};
use crate::core::timer::GameTimer;
use crate::platform::{HeadlessBackend, PlatformBackend, WindowSettings, WinitBackend};
use crate::scenes::{self, CLICK_SOUND, FONT_32, FONT_64, FONT_90};

//=== Errors ==============================================================

/// Top-level failure of the application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("failed to load global resources")]
    Resource(#[from] ResourceError),

    #[error("scene flow aborted")]
    Scene(#[from] SceneError),

    #[error("application used before startup()")]
    NotStarted,
}

//=== Global Resources ====================================================

const FONT_PATH: &str = "Font/Flappy_Font.ttf";
const CLICK_SOUND_PATH: &str = "Sound/swoosh.wav";

/// Loads the fonts and sounds every scene shares and publishes them by name.
pub(crate) fn load_global_resources(services: &mut Services, root: &Path) -> Result<(), ResourceError> {
    let resources = services.resources_mut();
    let font_path = root.join(FONT_PATH);

    for (name, size) in [(FONT_32, 32.0), (FONT_64, 64.0), (FONT_90, 90.0)] {
        let font = resources.create::<TtFont>(
            &font_path,
            FontArgs {
                begin: 0x00,
                end: 127,
                size,
            },
        )?;
        resources.register_global(name, font);
    }

    let click = resources.create::<Sound>(root.join(CLICK_SOUND_PATH), ())?;
    resources.register_global(CLICK_SOUND, click);

    debug!("Global resources loaded from {}", root.display());
    Ok(())
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and starting an [`Application`].
///
/// # Default Values
///
/// - **Window**: "FlappyBird", 1000x800
/// - **Config path**: none (settings kept in memory)
/// - **Resource root**: `Resource`
/// - **Target frame rate**: 60 fps
/// - **Platform backend**: [`WinitBackend`]
///
/// # Examples
///
/// ```no_run
/// use flappy_runtime::ApplicationBuilder;
///
/// let mut app = ApplicationBuilder::new()
///     .with_config_path("settings.toml")
///     .build()?;
/// app.startup()?;
/// app.run()?;
/// # Ok::<(), flappy_runtime::ApplicationError>(())
/// ```
pub struct ApplicationBuilder {
    window: WindowSettings,
    config_path: Option<PathBuf>,
    resource_root: PathBuf,
    fps: f64,
    backend: Option<Box<dyn PlatformBackend>>,
}

impl ApplicationBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            window: WindowSettings::default(),
            config_path: None,
            resource_root: PathBuf::from("Resource"),
            fps: 60.0,
            backend: None,
        }
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the logical window size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Sets the frame rate the loop is paced to while vsync is on.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Persists settings to `path` (TOML).
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Directory the font and sound paths are resolved against.
    pub fn with_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resource_root = root.into();
        self
    }

    pub fn with_platform_backend<B>(mut self, backend: B) -> Self
    where
        B: PlatformBackend + 'static,
    {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Runs without a window.
    pub fn headless(self) -> Self {
        self.with_platform_backend(HeadlessBackend::new())
    }

    /// Creates the services and starts them in dependency order.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] naming the first subsystem that failed. The
    /// subsystems started before it have been shut down again.
    pub fn build(self) -> Result<Application, StartupError> {
        let backend = self
            .backend
            .unwrap_or_else(|| Box::new(WinitBackend::new()));
        info!("Building application ({} backend)", backend.name());

        let mut services = Services::new(backend, self.window, self.config_path);
        let mut registry = SubsystemRegistry::new();
        registry.startup(&mut services.startup_order())?;

        let render = services.render_mut();
        render.set_depth_mode(false);
        render.set_alpha_blend_mode(true);
        render.set_multisample_mode(true);
        render.set_vsync_mode(true);

        Ok(Application {
            services,
            registry,
            resource_root: self.resource_root,
            scenes: None,
            quit: QuitSignal::new(),
            timer: GameTimer::new(),
            frame_interval: Duration::from_secs_f64(1.0 / self.fps),
            frame_started: None,
            frames: 0,
        })
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Application =========================================================

/// Running game: started services, scene graph and frame loop.
///
/// Dropping the application shuts the services down in reverse startup
/// order. The current scene is not exited.
pub struct Application {
    services: Services,
    registry: SubsystemRegistry,
    resource_root: PathBuf,
    scenes: Option<SceneMachine>,
    quit: QuitSignal,
    timer: GameTimer,
    frame_interval: Duration,
    frame_started: Option<Instant>,
    frames: u64,
}

impl Application {
    //--- Initialization ---------------------------------------------------

    /// Binds window close to quit, loads the global resources and wires the
    /// scenes.
    pub fn startup(&mut self) -> Result<(), ApplicationError> {
        info!("Initializing application");

        let quit = self.quit.clone();
        self.services
            .input_mut()
            .add_window_event_action(WindowEventKind::Close, move || quit.request(), true);

        load_global_resources(&mut self.services, &self.resource_root)?;

        let settings = self.services.config().settings().clone();
        let audio = self.services.audio_mut();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        self.scenes = Some(scenes::wire(&self.quit)?);

        info!("Application initialization complete");
        Ok(())
    }

    //--- Execution --------------------------------------------------------

    /// Runs frames until quit is requested.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Scene`] if the scene flow breaks one of
    /// its invariants; the loop stops at that frame.
    pub fn run(&mut self) -> Result<(), ApplicationError> {
        self.begin()?;
        info!("Entering frame loop");

        while !self.quit.is_requested() {
            self.frame()?;
        }

        info!("Frame loop finished after {} frames", self.frames);
        Ok(())
    }

    /// Enters the initial scene and resets the timer.
    pub fn begin(&mut self) -> Result<(), ApplicationError> {
        let scenes = self.scenes.as_mut().ok_or(ApplicationError::NotStarted)?;
        scenes.start(&mut self.services)?;
        self.timer.reset();
        self.frame_started = Some(Instant::now());
        Ok(())
    }

    /// Runs one frame with the measured delta, paced to the target frame
    /// rate while vsync is on.
    pub fn frame(&mut self) -> Result<(), ApplicationError> {
        let wait = self.pacing_wait();
        self.advance(wait, None)
    }

    /// Runs one frame with a given delta and no pacing.
    pub fn step(&mut self, delta_seconds: f32) -> Result<(), ApplicationError> {
        self.advance(Duration::ZERO, Some(delta_seconds))
    }

    /// Time left in the current frame interval.
    fn pacing_wait(&self) -> Duration {
        if !self.services.render().state().vsync {
            return Duration::ZERO;
        }
        self.frame_started
            .map(|started| self.frame_interval.saturating_sub(started.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Input (after `wait`), scene tick, transition.
    fn advance(&mut self, wait: Duration, delta: Option<f32>) -> Result<(), ApplicationError> {
        let scenes = self.scenes.as_mut().ok_or(ApplicationError::NotStarted)?;

        self.services.poll_input_after(wait);
        self.frame_started = Some(Instant::now());
        self.timer.tick();

        let delta_seconds = delta.unwrap_or_else(|| self.timer.delta_seconds());
        scenes.tick(&mut self.services, delta_seconds)?;
        if let Some(next) = scenes.process_transition(&mut self.services)? {
            debug!("Frame {}: now in {:?}", self.frames, next);
        }

        let played = self.services.audio_mut().drain_requests();
        if !played.is_empty() {
            trace!("Frame {}: {} sounds handed to audio", self.frames, played.len());
        }

        self.frames += 1;
        Ok(())
    }

    /// Shuts the services down now instead of on drop.
    pub fn shutdown(self) {
        drop(self);
    }

    //--- Queries ----------------------------------------------------------

    /// Another handle to the quit latch.
    pub fn quit_signal(&self) -> QuitSignal {
        self.quit.clone()
    }

    /// Current scene, once [`startup`](Self::startup) wired the scenes.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.scenes.as_ref().map(SceneMachine::current)
    }

    /// Sender for injecting platform events (bots, tests).
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.services.event_sender()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        info!("Shutting down application");
        self.registry.shutdown(&mut self.services.startup_order());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::subsystem::SubsystemState;

    //--- Test Helpers -----------------------------------------------------

    const STEP: f32 = 0.05;

    fn started() -> Application {
        let mut app = ApplicationBuilder::new().headless().build().unwrap();
        app.startup().unwrap();
        app.begin().unwrap();
        app
    }

    fn press(app: &mut Application, key: KeyCode) {
        app.event_sender()
            .send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)]))
            .unwrap();
        app.step(STEP).unwrap();
    }

    /// Start → Ready → Play.
    fn into_play(app: &mut Application) {
        press(app, KeyCode::Enter);
        press(app, KeyCode::Space);
        assert_eq!(app.current_scene(), Some(SceneId::Play));
    }

    /// Idles until the bird falls out and the run ends.
    fn into_rank(app: &mut Application) {
        into_play(app);
        for _ in 0..100 {
            app.step(STEP).unwrap();
            if app.current_scene() != Some(SceneId::Play) {
                break;
            }
        }
        assert_eq!(app.current_scene(), Some(SceneId::Rank));
    }

    fn key_batch(key: KeyCode) -> Vec<PlatformEvent> {
        vec![PlatformEvent::Inputs(vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)])]
    }

    /// Headless application replaying `script`, started and wired.
    fn scripted(script: Vec<Vec<PlatformEvent>>, fps: f64) -> Application {
        let mut app = ApplicationBuilder::new()
            .with_target_fps(fps)
            .with_platform_backend(HeadlessBackend::with_script(script))
            .build()
            .unwrap();
        app.startup().unwrap();
        app
    }

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy_runtime_app_{}_{}.toml", name, std::process::id()))
    }

    //=====================================================================
    // Builder Tests
    //=====================================================================

    #[test]
    fn build_starts_subsystems_and_applies_render_state() {
        let app = ApplicationBuilder::new().headless().build().unwrap();

        let order: Vec<_> = app.registry.startup_order().collect();
        assert_eq!(
            order,
            vec!["platform", "input", "audio", "render", "resource", "entity", "config"]
        );

        let state = app.services().render().state();
        assert!(!state.depth_test);
        assert!(state.alpha_blend && state.multisample && state.vsync);
    }

    #[test]
    fn malformed_config_fails_startup() {
        let path = temp_config("malformed");
        std::fs::write(&path, "muted = 3").unwrap();

        let err = ApplicationBuilder::new()
            .headless()
            .with_config_path(&path)
            .build()
            .err()
            .unwrap();
        assert_eq!(err.subsystem, "config");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn zero_target_fps_panics() {
        let _ = ApplicationBuilder::new().with_target_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn zero_window_size_panics() {
        let _ = ApplicationBuilder::new().with_window_size(0, 600);
    }

    //=====================================================================
    // Startup Tests
    //=====================================================================

    #[test]
    fn startup_publishes_global_resources() {
        let app = started();
        let resources = app.services().resources();

        for (name, size) in [(FONT_32, 32.0), (FONT_64, 64.0), (FONT_90, 90.0)] {
            let font = resources.global_resource::<TtFont>(name).unwrap();
            assert_eq!(font.size(), size);
            assert_eq!(font.glyph_range(), (0x00, 127));
        }
        assert!(resources.global_resource::<Sound>(CLICK_SOUND).is_some());
        assert_eq!(app.current_scene(), Some(SceneId::Start));
    }

    #[test]
    fn frame_before_startup_is_an_error() {
        let mut app = ApplicationBuilder::new().headless().build().unwrap();
        assert!(matches!(app.frame(), Err(ApplicationError::NotStarted)));
    }

    //=====================================================================
    // Scene Flow Tests
    //=====================================================================

    #[test]
    fn enter_on_start_moves_to_ready() {
        let mut app = started();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_scene(), Some(SceneId::Ready));
    }

    #[test]
    fn play_moves_to_rank_at_the_frame_boundary() {
        let mut app = started();
        into_play(&mut app);

        let mut frames = 0;
        while app.current_scene() == Some(SceneId::Play) {
            app.step(STEP).unwrap();
            frames += 1;
            assert!(frames < 100);
        }

        assert_eq!(app.current_scene(), Some(SceneId::Rank));
        assert!(app.services().entities().is_empty(), "play scene exited");
        assert_eq!(app.services().config().last_score(), Some(0));
    }

    #[test]
    fn rank_menu_returns_to_start() {
        let mut app = started();
        into_rank(&mut app);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_scene(), Some(SceneId::Start));
        assert!(!app.quit_signal().is_requested());
    }

    #[test]
    fn rank_quit_sets_latch() {
        let mut app = started();
        into_rank(&mut app);

        press(&mut app, KeyCode::ArrowDown);
        press(&mut app, KeyCode::Enter);

        assert!(app.quit_signal().is_requested());
        assert_eq!(app.current_scene(), Some(SceneId::Rank));
    }

    //=====================================================================
    // Frame Loop Tests
    //=====================================================================

    #[test]
    fn quit_during_frame_finishes_that_frame_only() {
        let script = vec![
            vec![],
            vec![],
            vec![PlatformEvent::Window(WindowEventKind::Close)],
            vec![],
        ];
        let mut app = scripted(script, 60.0);

        app.run().unwrap();

        assert_eq!(app.frame_count(), 3);
        assert_eq!(app.services().render().frames_presented(), 3, "frame 3 completed");
        assert!(
            app.services().input().window_events().is_empty(),
            "close is consumed by the quit action"
        );
    }

    #[test]
    fn rank_quit_stops_the_loop_without_further_transitions() {
        // Paced at 120 fps every frame advances Play by at least 1/120s,
        // so 150 idle frames outlast the bird's fall.
        const PLAY_FRAMES: usize = 150;

        let mut script = vec![key_batch(KeyCode::Enter), key_batch(KeyCode::Space)];
        script.extend(std::iter::repeat(Vec::new()).take(PLAY_FRAMES));
        script.push(key_batch(KeyCode::ArrowDown));
        script.push(key_batch(KeyCode::Enter));
        // Would return to Start if another frame ran.
        script.push(key_batch(KeyCode::Enter));

        let mut app = scripted(script, 120.0);
        app.run().unwrap();

        assert!(app.quit_signal().is_requested());
        assert_eq!(app.current_scene(), Some(SceneId::Rank));
        assert_eq!(app.frame_count(), (2 + PLAY_FRAMES + 2) as u64);
    }

    #[test]
    fn vsync_paces_frames_to_target_interval() {
        const FRAMES: usize = 10;
        let mut script = vec![Vec::new(); FRAMES - 1];
        script.push(vec![PlatformEvent::Window(WindowEventKind::Close)]);

        let mut app = scripted(script, 100.0);
        assert!(app.services().render().state().vsync);

        let started = Instant::now();
        app.run().unwrap();
        let elapsed = started.elapsed();

        assert_eq!(app.frame_count(), FRAMES as u64);
        assert!(
            elapsed >= Duration::from_millis(10) * FRAMES as u32,
            "{} frames took {:?}",
            FRAMES,
            elapsed
        );
    }

    #[test]
    fn frames_are_unpaced_without_vsync() {
        let script = vec![vec![], vec![], vec![PlatformEvent::Window(WindowEventKind::Close)]];
        let mut app = scripted(script, 1.0);
        app.services.render_mut().set_vsync_mode(false);

        let started = Instant::now();
        app.run().unwrap();

        assert_eq!(app.frame_count(), 3);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn drop_shuts_down_and_saves_settings() {
        let path = temp_config("drop");
        let _ = std::fs::remove_file(&path);

        {
            let mut app = ApplicationBuilder::new()
                .headless()
                .with_config_path(&path)
                .build()
                .unwrap();
            app.startup().unwrap();
            app.begin().unwrap();
            into_rank(&mut app);
        }

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("best_scores = [0]"), "saved: {}", saved);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn registry_reports_shutdown_after_explicit_shutdown() {
        let mut app = started();
        app.registry.shutdown(&mut app.services.startup_order());
        assert_eq!(app.registry.state_of("platform"), SubsystemState::ShutDown);
        // Drop must not shut anything down a second time.
    }
}
