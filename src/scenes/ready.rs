//=========================================================================
// Ready Scene
//=========================================================================
//
// "Get ready" screen between the menu and a run. Space or a left click
// starts playing.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{draw_text, is_confirm_pressed, FONT_32, FONT_64, SKY, WHITE};
use crate::core::scene::{Scene, SceneId, SceneSwitch};
use crate::core::subsystem::Services;

//=== ReadyScene ==========================================================

pub struct ReadyScene {
    switch: SceneSwitch,
    play_scene: Option<SceneId>,
}

impl ReadyScene {
    pub fn new() -> Self {
        Self {
            switch: SceneSwitch::new(),
            play_scene: None,
        }
    }

    pub fn set_play_scene(&mut self, scene: SceneId) {
        self.play_scene = Some(scene);
    }
}

impl Default for ReadyScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ReadyScene {
    fn enter(&mut self, _services: &mut Services) {
        self.switch.reset();
        info!(target: "scene", "Ready scene entered");
    }

    fn tick(&mut self, services: &mut Services, _delta_seconds: f32) {
        if is_confirm_pressed(services) {
            match self.play_scene {
                Some(scene) => {
                    self.switch.request(scene);
                }
                None => warn!("Ready scene has no play scene wired"),
            }
        }

        services.render_mut().begin_frame(SKY);
        draw_text(services, FONT_64, "GET READY", (500.0, 300.0), WHITE);
        draw_text(services, FONT_32, "PRESS SPACE", (500.0, 500.0), WHITE);
        services.render_mut().end_frame();
    }

    fn exit(&mut self, _services: &mut Services) {}

    fn is_detect_switch(&self) -> bool {
        self.switch.is_requested()
    }

    fn link(&self) -> Option<SceneId> {
        self.switch.link()
    }

    fn links(&self) -> Vec<SceneId> {
        self.play_scene.into_iter().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, MouseButton};
    use crate::scenes::testing::*;

    fn wired() -> ReadyScene {
        let mut scene = ReadyScene::new();
        scene.set_play_scene(SceneId::Play);
        scene
    }

    #[test]
    fn waits_without_input() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        idle(&mut services);
        scene.tick(&mut services, 0.016);

        assert!(!scene.is_detect_switch());
    }

    #[test]
    fn left_click_links_play() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        feed(&mut services, vec![InputEvent::MouseButtonDown(MouseButton::Left)]);
        scene.tick(&mut services, 0.016);

        assert_eq!(scene.link(), Some(SceneId::Play));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        press(&mut services, KeyCode::Enter);
        scene.tick(&mut services, 0.016);

        assert!(!scene.is_detect_switch());
    }
}
