//=========================================================================
// Setting Scene
//=========================================================================
//
// Volume and mute settings. Changes go to the configuration service and
// are pushed to the audio service as soon as they are made.
//
// Controls: Left/Right volume ∓0.1, M mute, Enter/Escape back.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{draw_text, play_click, FONT_32, FONT_64, SKY, WHITE};
use crate::core::input::KeyCode;
use crate::core::scene::{Scene, SceneId, SceneSwitch};
use crate::core::subsystem::Services;

//=== SettingScene ========================================================

/// Volume change per key press.
const VOLUME_STEP: f32 = 0.1;

pub struct SettingScene {
    switch: SceneSwitch,
    start_scene: Option<SceneId>,
}

impl SettingScene {
    pub fn new() -> Self {
        Self {
            switch: SceneSwitch::new(),
            start_scene: None,
        }
    }

    pub fn set_start_scene(&mut self, scene: SceneId) {
        self.start_scene = Some(scene);
    }

    fn handle_input(&mut self, services: &mut Services) {
        let input = services.input();
        let left = input.is_key_pressed(KeyCode::ArrowLeft);
        let right = input.is_key_pressed(KeyCode::ArrowRight);
        let mute = input.is_key_pressed(KeyCode::KeyM);
        let back = input.is_key_pressed(KeyCode::Enter) || input.is_key_pressed(KeyCode::Escape);

        let config = services.config_mut();
        let volume = config.settings().master_volume;
        if left {
            config.set_master_volume(round_step(volume - VOLUME_STEP));
        }
        if right {
            config.set_master_volume(round_step(volume + VOLUME_STEP));
        }
        if mute {
            config.toggle_mute();
        }
        if left || right || mute {
            apply_to_audio(services);
        }

        if back {
            play_click(services);
            match self.start_scene {
                Some(scene) => {
                    self.switch.request(scene);
                }
                None => warn!("Setting scene has no start scene wired"),
            }
        }
    }

    fn draw(&self, services: &mut Services) {
        let settings = services.config().settings();
        let volume = format!("VOLUME < {:>3} >", (settings.master_volume * 100.0).round() as u32);
        let mute = if settings.muted { "MUTE ON" } else { "MUTE OFF" };

        services.render_mut().begin_frame(SKY);
        draw_text(services, FONT_64, "SETTING", (500.0, 200.0), WHITE);
        draw_text(services, FONT_32, volume, (500.0, 400.0), WHITE);
        draw_text(services, FONT_32, mute, (500.0, 460.0), WHITE);
        services.render_mut().end_frame();
    }
}

/// Copies the configured volume and mute to the audio service.
fn apply_to_audio(services: &mut Services) {
    let settings = services.config().settings();
    let (volume, muted) = (settings.master_volume, settings.muted);
    let audio = services.audio_mut();
    audio.set_master_volume(volume);
    audio.set_muted(muted);
}

/// Snaps to the 0.1 grid so repeated steps do not drift.
fn round_step(volume: f32) -> f32 {
    (volume * 10.0).round() / 10.0
}

impl Default for SettingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SettingScene {
    fn enter(&mut self, _services: &mut Services) {
        self.switch.reset();
        info!(target: "scene", "Setting scene entered");
    }

    fn tick(&mut self, services: &mut Services, _delta_seconds: f32) {
        self.handle_input(services);
        self.draw(services);
    }

    fn exit(&mut self, services: &mut Services) {
        apply_to_audio(services);
    }

    fn is_detect_switch(&self) -> bool {
        self.switch.is_requested()
    }

    fn link(&self) -> Option<SceneId> {
        self.switch.link()
    }

    fn links(&self) -> Vec<SceneId> {
        self.start_scene.into_iter().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::scenes::testing::*;

    fn wired() -> SettingScene {
        let mut scene = SettingScene::new();
        scene.set_start_scene(SceneId::Start);
        scene
    }

    #[test]
    fn arrows_step_volume_within_bounds() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);
        services.config_mut().set_master_volume(0.9);

        press(&mut services, KeyCode::ArrowRight);
        scene.tick(&mut services, 0.016);
        assert_eq!(services.config().settings().master_volume, 1.0);

        press(&mut services, KeyCode::ArrowRight);
        scene.tick(&mut services, 0.016);
        assert_eq!(services.config().settings().master_volume, 1.0);

        press(&mut services, KeyCode::ArrowLeft);
        scene.tick(&mut services, 0.016);
        assert_eq!(services.config().settings().master_volume, 0.9);
    }

    #[test]
    fn changes_reach_audio_immediately() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);
        services.config_mut().set_master_volume(0.5);

        press(&mut services, KeyCode::ArrowLeft);
        scene.tick(&mut services, 0.016);
        assert_eq!(services.audio().master_volume(), 0.4);

        press(&mut services, KeyCode::KeyM);
        scene.tick(&mut services, 0.016);
        assert!(services.audio().is_muted());
    }

    #[test]
    fn mute_then_back_plays_no_click() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        feed(
            &mut services,
            vec![
                InputEvent::KeyDown(KeyCode::KeyM),
                InputEvent::KeyUp(KeyCode::KeyM),
                InputEvent::KeyDown(KeyCode::Enter),
                InputEvent::KeyUp(KeyCode::Enter),
            ],
        );
        scene.tick(&mut services, 0.016);

        assert!(scene.is_detect_switch());
        assert!(services.audio().pending().is_empty(), "click muted");
    }

    #[test]
    fn exit_pushes_settings_to_audio() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);
        services.config_mut().set_master_volume(0.5);
        services.config_mut().toggle_mute();

        scene.exit(&mut services);
        assert!(services.audio().is_muted());
        assert_eq!(services.audio().master_volume(), 0.5);
    }

    #[test]
    fn escape_links_start() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        press(&mut services, KeyCode::Escape);
        scene.tick(&mut services, 0.016);

        assert!(scene.is_detect_switch());
        assert_eq!(scene.link(), Some(SceneId::Start));
    }

    #[test]
    fn round_step_snaps_to_tenths() {
        assert_eq!(round_step(0.7 + 0.1), 0.8);
        assert_eq!(round_step(0.30000001), 0.3);
    }
}
