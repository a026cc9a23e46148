//=========================================================================
// Start Scene
//=========================================================================
//
// Title screen with the main menu: Game Start, Setting, Quit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::menu::Menu;
use super::{draw_text, play_click, FONT_90, SKY, WHITE};
use crate::core::quit::QuitSignal;
use crate::core::scene::{Scene, SceneId, SceneSwitch};
use crate::core::subsystem::Services;

//=== StartItem ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartItem {
    GameStart,
    Setting,
    Quit,
}

//=== StartScene ==========================================================

pub struct StartScene {
    switch: SceneSwitch,
    menu: Menu<StartItem>,
    ready_scene: Option<SceneId>,
    setting_scene: Option<SceneId>,
    quit: Option<QuitSignal>,
}

impl StartScene {
    pub fn new() -> Self {
        Self {
            switch: SceneSwitch::new(),
            menu: Menu::new(vec![
                ("GAME START", StartItem::GameStart),
                ("SETTING", StartItem::Setting),
                ("QUIT", StartItem::Quit),
            ]),
            ready_scene: None,
            setting_scene: None,
            quit: None,
        }
    }

    //--- Wiring -----------------------------------------------------------

    pub fn set_ready_scene(&mut self, scene: SceneId) {
        self.ready_scene = Some(scene);
    }

    pub fn set_setting_scene(&mut self, scene: SceneId) {
        self.setting_scene = Some(scene);
    }

    pub fn set_quit_signal(&mut self, quit: QuitSignal) {
        self.quit = Some(quit);
    }

    //--- Internal Helpers -------------------------------------------------

    fn activate(&mut self, item: StartItem) {
        let target = match item {
            StartItem::GameStart => self.ready_scene,
            StartItem::Setting => self.setting_scene,
            StartItem::Quit => {
                match &self.quit {
                    Some(quit) => quit.request(),
                    None => warn!("Quit selected but no quit signal is wired"),
                }
                return;
            }
        };

        match target {
            Some(scene) => {
                self.switch.request(scene);
            }
            None => warn!("{:?} selected but its scene is not wired", item),
        }
    }

    fn draw(&self, services: &mut Services) {
        services.render_mut().begin_frame(SKY);
        draw_text(services, FONT_90, "FLAPPY BIRD", (500.0, 200.0), WHITE);
        self.menu.draw(services, 500.0, 450.0);
        services.render_mut().end_frame();
    }
}

impl Default for StartScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for StartScene {
    fn enter(&mut self, _services: &mut Services) {
        self.switch.reset();
        self.menu.reset();
        info!(target: "scene", "Start scene entered");
    }

    fn tick(&mut self, services: &mut Services, _delta_seconds: f32) {
        if let Some(item) = self.menu.update(services.input()) {
            play_click(services);
            self.activate(item);
        }
        self.draw(services);
    }

    fn exit(&mut self, _services: &mut Services) {}

    fn is_detect_switch(&self) -> bool {
        self.switch.is_requested()
    }

    fn link(&self) -> Option<SceneId> {
        self.switch.link()
    }

    fn links(&self) -> Vec<SceneId> {
        [self.ready_scene, self.setting_scene].into_iter().flatten().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::scenes::testing::*;

    fn wired(quit: &QuitSignal) -> StartScene {
        let mut scene = StartScene::new();
        scene.set_ready_scene(SceneId::Ready);
        scene.set_setting_scene(SceneId::Setting);
        scene.set_quit_signal(quit.clone());
        scene
    }

    #[test]
    fn enter_on_game_start_links_ready() {
        let mut services = services();
        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);

        press(&mut services, KeyCode::Enter);
        scene.tick(&mut services, 0.016);

        assert!(scene.is_detect_switch());
        assert_eq!(scene.link(), Some(SceneId::Ready));
        assert_eq!(services.audio().pending().len(), 1, "click played");
    }

    #[test]
    fn down_then_space_links_setting() {
        let mut services = services();
        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);

        press(&mut services, KeyCode::ArrowDown);
        scene.tick(&mut services, 0.016);
        assert!(!scene.is_detect_switch());

        press(&mut services, KeyCode::Space);
        scene.tick(&mut services, 0.016);
        assert_eq!(scene.link(), Some(SceneId::Setting));
    }

    #[test]
    fn quit_item_sets_latch_without_switch() {
        let mut services = services();
        let quit = QuitSignal::new();
        let mut scene = wired(&quit);
        scene.enter(&mut services);

        press(&mut services, KeyCode::ArrowUp);
        scene.tick(&mut services, 0.016);
        press(&mut services, KeyCode::Enter);
        scene.tick(&mut services, 0.016);

        assert!(quit.is_requested());
        assert!(!scene.is_detect_switch());
    }

    #[test]
    fn enter_clears_previous_visit() {
        let mut services = services();
        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);
        press(&mut services, KeyCode::Enter);
        scene.tick(&mut services, 0.016);

        scene.exit(&mut services);
        scene.enter(&mut services);

        assert!(!scene.is_detect_switch());
        assert_eq!(scene.link(), None);
    }

    #[test]
    fn tick_presents_a_frame() {
        let mut services = services();
        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);

        idle(&mut services);
        scene.tick(&mut services, 0.016);

        assert_eq!(services.render().frames_presented(), 1);
        assert_eq!(services.render().presented().len(), 4, "title and three items");
    }
}
