//=========================================================================
// Game Scenes
//=========================================================================
//
// The five scenes of the game and the wiring between them.
//
// Topology:
//   Start ──→ Setting ──→ Start
//     │  └──→ Ready ──→ Play ──→ Rank ──→ Start
//     └──→ quit                     └──→ quit
//
// Scenes are constructed and wired through their typed setters first,
// then handed to the scene machine, which only sees `dyn Scene`.
//
//=========================================================================

//=== Module Declarations =================================================

mod menu;
mod play;
mod rank;
mod ready;
mod setting;
mod start;

//=== Public API ==========================================================

pub use play::{Bird, PlayScene};
pub use rank::RankScene;
pub use ready::ReadyScene;
pub use setting::SettingScene;
pub use start::StartScene;

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, MouseButton};
use crate::core::quit::QuitSignal;
use crate::core::render::{Color, DrawCommand};
use crate::core::scene::{SceneError, SceneId, SceneMachine};
use crate::core::subsystem::Services;

//=== Global Resource Names ===============================================

pub const FONT_32: &str = "Font32";
pub const FONT_64: &str = "Font64";
pub const FONT_90: &str = "Font90";
pub const CLICK_SOUND: &str = "ClickSound";

//=== Palette =============================================================

pub(crate) const SKY: Color = [0.31, 0.75, 0.79, 1.0];
pub(crate) const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub(crate) const HIGHLIGHT: Color = [1.0, 0.6, 0.0, 1.0];

//=== Wiring ==============================================================

/// Builds the scene graph. The game starts in [`SceneId::Start`].
pub fn wire(quit: &QuitSignal) -> Result<SceneMachine, SceneError> {
    let mut start = StartScene::new();
    start.set_quit_signal(quit.clone());
    start.set_setting_scene(SceneId::Setting);
    start.set_ready_scene(SceneId::Ready);

    let mut setting = SettingScene::new();
    setting.set_start_scene(SceneId::Start);

    let mut ready = ReadyScene::new();
    ready.set_play_scene(SceneId::Play);

    let mut play = PlayScene::new();
    play.set_rank_scene(SceneId::Rank);

    let mut rank = RankScene::new();
    rank.set_quit_signal(quit.clone());
    rank.set_start_scene(SceneId::Start);

    SceneMachine::builder()
        .register(SceneId::Start, start)
        .register(SceneId::Setting, setting)
        .register(SceneId::Ready, ready)
        .register(SceneId::Play, play)
        .register(SceneId::Rank, rank)
        .initial(SceneId::Start)
        .build()
}

//=== Shared Helpers ======================================================

/// Plays the global click sound, if loaded.
pub(crate) fn play_click(services: &mut Services) {
    match services.resources().global(CLICK_SOUND) {
        Some(sound) => {
            services.audio_mut().play(sound);
        }
        None => debug!("{} not loaded, click skipped", CLICK_SOUND),
    }
}

/// Queues `text` in the global font `font`. Skipped if the font is missing.
pub(crate) fn draw_text(
    services: &mut Services,
    font: &str,
    text: impl Into<String>,
    center: (f32, f32),
    color: Color,
) {
    let Some(font_id) = services.resources().global(font) else {
        warn!("Font `{}` not loaded", font);
        return;
    };
    services.render_mut().draw(DrawCommand::Text {
        font: font_id,
        text: text.into(),
        center,
        color,
    });
}

/// Space or left click: the "go on" input of the game.
pub(crate) fn is_confirm_pressed(services: &Services) -> bool {
    let input = services.input();
    input.is_key_pressed(KeyCode::Space) || input.is_button_pressed(MouseButton::Left)
}

//=========================================================================
// Test Helpers
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
