//=========================================================================
// Rank Scene
//=========================================================================
//
// Result screen after a run: last and best score, then Menu or Quit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::menu::Menu;
use super::{draw_text, play_click, FONT_32, FONT_64, SKY, WHITE};
use crate::core::quit::QuitSignal;
use crate::core::scene::{Scene, SceneId, SceneSwitch};
use crate::core::subsystem::Services;

//=== RankItem ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankItem {
    Menu,
    Quit,
}

//=== RankScene ===========================================================

pub struct RankScene {
    switch: SceneSwitch,
    menu: Menu<RankItem>,
    start_scene: Option<SceneId>,
    quit: Option<QuitSignal>,
    last_score: u32,
    best_score: u32,
}

impl RankScene {
    pub fn new() -> Self {
        Self {
            switch: SceneSwitch::new(),
            menu: Menu::new(vec![("MENU", RankItem::Menu), ("QUIT", RankItem::Quit)]),
            start_scene: None,
            quit: None,
            last_score: 0,
            best_score: 0,
        }
    }

    //--- Wiring -----------------------------------------------------------

    pub fn set_start_scene(&mut self, scene: SceneId) {
        self.start_scene = Some(scene);
    }

    pub fn set_quit_signal(&mut self, quit: QuitSignal) {
        self.quit = Some(quit);
    }

    //--- Internal Helpers -------------------------------------------------

    fn activate(&mut self, item: RankItem) {
        match item {
            RankItem::Menu => match self.start_scene {
                Some(scene) => {
                    self.switch.request(scene);
                }
                None => warn!("Rank scene has no start scene wired"),
            },
            RankItem::Quit => match &self.quit {
                Some(quit) => quit.request(),
                None => warn!("Quit selected but no quit signal is wired"),
            },
        }
    }

    fn draw(&self, services: &mut Services) {
        services.render_mut().begin_frame(SKY);
        draw_text(services, FONT_64, "GAME OVER", (500.0, 150.0), WHITE);
        draw_text(
            services,
            FONT_32,
            format!("SCORE {}", self.last_score),
            (500.0, 280.0),
            WHITE,
        );
        draw_text(
            services,
            FONT_32,
            format!("BEST {}", self.best_score),
            (500.0, 330.0),
            WHITE,
        );
        self.menu.draw(services, 500.0, 500.0);
        services.render_mut().end_frame();
    }
}

impl Default for RankScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for RankScene {
    fn enter(&mut self, services: &mut Services) {
        self.switch.reset();
        self.menu.reset();

        let config = services.config();
        self.last_score = config.last_score().unwrap_or(0);
        self.best_score = config.best_score().unwrap_or(0);
        info!(
            target: "scene",
            "Rank scene entered (score {}, best {})",
            self.last_score,
            self.best_score
        );
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
        self.start_scene.into_iter().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::render::DrawCommand;
    use crate::scenes::testing::*;

    fn wired(quit: &QuitSignal) -> RankScene {
        let mut scene = RankScene::new();
        scene.set_start_scene(SceneId::Start);
        scene.set_quit_signal(quit.clone());
        scene
    }

    fn texts(services: &Services) -> Vec<String> {
        services
            .render()
            .presented()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn shows_last_and_best_scores() {
        let mut services = services();
        services.config_mut().record_score(9);
        services.config_mut().record_score(4);

        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);
        idle(&mut services);
        scene.tick(&mut services, 0.016);

        let texts = texts(&services);
        assert!(texts.contains(&"SCORE 4".to_string()));
        assert!(texts.contains(&"BEST 9".to_string()));
    }

    #[test]
    fn menu_links_start() {
        let mut services = services();
        let mut scene = wired(&QuitSignal::new());
        scene.enter(&mut services);

        press(&mut services, KeyCode::Enter);
        scene.tick(&mut services, 0.016);

        assert_eq!(scene.link(), Some(SceneId::Start));
    }

    #[test]
    fn quit_sets_latch() {
        let mut services = services();
        let quit = QuitSignal::new();
        let mut scene = wired(&quit);
        scene.enter(&mut services);

        press(&mut services, KeyCode::ArrowDown);
        scene.tick(&mut services, 0.016);
        press(&mut services, KeyCode::Space);
        scene.tick(&mut services, 0.016);

        assert!(quit.is_requested());
        assert!(!scene.is_detect_switch());
    }
}
