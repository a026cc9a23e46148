//=========================================================================
// Play Scene
//=========================================================================
//
// One run of the game. The bird falls under gravity and flaps on Space or
// a left click; every pipe interval survived scores a point. Leaving the
// play field ends the run, records the score and moves on to the ranking.
//
// Coordinates are window pixels, y grows downwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{draw_text, is_confirm_pressed, FONT_64, SKY, WHITE};
use crate::core::entity::Entity;
use crate::core::render::DrawCommand;
use crate::core::scene::{Scene, SceneId, SceneSwitch};
use crate::core::subsystem::Services;

//=== Tuning ==============================================================

const GRAVITY: f32 = 1500.0;
const FLAP_VELOCITY: f32 = -500.0;
const FIELD_HEIGHT: f32 = 800.0;
const BIRD_X: f32 = 300.0;
const BIRD_SIZE: f32 = 40.0;
const PIPE_INTERVAL: f32 = 1.5;

/// Longest step integrated in one frame.
const MAX_STEP: f32 = 0.05;

const BIRD_SIGNATURE: &str = "Bird";

//=== Bird ================================================================

/// The player's bird.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    y: f32,
    velocity: f32,
}

impl Bird {
    pub fn new(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    pub fn flap(&mut self) {
        self.velocity = FLAP_VELOCITY;
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// `false` once the bird left the play field.
    pub fn is_inside_field(&self) -> bool {
        (0.0..=FIELD_HEIGHT).contains(&self.y)
    }
}

impl Entity for Bird {
    fn tick(&mut self, delta_seconds: f32) {
        self.velocity += GRAVITY * delta_seconds;
        self.y += self.velocity * delta_seconds;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== PlayScene ===========================================================

pub struct PlayScene {
    switch: SceneSwitch,
    rank_scene: Option<SceneId>,
    score: u32,
    interval_elapsed: f32,
}

impl PlayScene {
    pub fn new() -> Self {
        Self {
            switch: SceneSwitch::new(),
            rank_scene: None,
            score: 0,
            interval_elapsed: 0.0,
        }
    }

    pub fn set_rank_scene(&mut self, scene: SceneId) {
        self.rank_scene = Some(scene);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    //--- Internal Helpers -------------------------------------------------

    fn update_score(&mut self, delta_seconds: f32) {
        self.interval_elapsed += delta_seconds;
        while self.interval_elapsed >= PIPE_INTERVAL {
            self.interval_elapsed -= PIPE_INTERVAL;
            self.score += 1;
        }
    }

    fn finish_run(&mut self, services: &mut Services) {
        info!(target: "scene", "Run over with score {}", self.score);
        services.config_mut().record_score(self.score);

        match self.rank_scene {
            Some(scene) => {
                self.switch.request(scene);
            }
            None => warn!("Play scene has no rank scene wired"),
        }
    }

    fn draw(&self, services: &mut Services, bird_y: f32) {
        services.render_mut().begin_frame(SKY);
        services.render_mut().draw(DrawCommand::Rect {
            center: (BIRD_X, bird_y),
            size: (BIRD_SIZE, BIRD_SIZE),
            color: [1.0, 0.85, 0.2, 1.0],
        });
        draw_text(services, FONT_64, self.score.to_string(), (500.0, 100.0), WHITE);
        services.render_mut().end_frame();
    }
}

impl Default for PlayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PlayScene {
    fn enter(&mut self, services: &mut Services) {
        self.switch.reset();
        self.score = 0;
        self.interval_elapsed = 0.0;
        services.entities_mut().add(BIRD_SIGNATURE, Bird::new(FIELD_HEIGHT / 2.0));
        info!(target: "scene", "Play scene entered");
    }

    fn tick(&mut self, services: &mut Services, delta_seconds: f32) {
        if self.switch.is_requested() {
            return;
        }

        let step = delta_seconds.min(MAX_STEP);
        let flap = is_confirm_pressed(services);

        let entities = services.entities_mut();
        if flap {
            if let Some(bird) = entities.get_mut::<Bird>(BIRD_SIGNATURE) {
                bird.flap();
            }
        }
        entities.tick(step);

        let Some((bird_y, inside)) = entities
            .get::<Bird>(BIRD_SIGNATURE)
            .map(|bird| (bird.y(), bird.is_inside_field()))
        else {
            warn!("Bird entity missing, ending run");
            self.finish_run(services);
            return;
        };

        if inside {
            self.update_score(step);
        } else {
            self.finish_run(services);
        }

        self.draw(services, bird_y);
    }

    fn exit(&mut self, services: &mut Services) {
        services.entities_mut().remove(BIRD_SIGNATURE);
    }

    fn is_detect_switch(&self) -> bool {
        self.switch.is_requested()
    }

    fn link(&self) -> Option<SceneId> {
        self.switch.link()
    }

    fn links(&self) -> Vec<SceneId> {
        self.rank_scene.into_iter().collect()
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

    fn wired() -> PlayScene {
        let mut scene = PlayScene::new();
        scene.set_rank_scene(SceneId::Rank);
        scene
    }

    //=====================================================================
    // Bird Tests
    //=====================================================================

    #[test]
    fn bird_falls_under_gravity() {
        let mut bird = Bird::new(400.0);
        bird.tick(0.1);

        assert!(bird.velocity() > 0.0);
        assert!(bird.y() > 400.0);
    }

    #[test]
    fn flap_moves_bird_up() {
        let mut bird = Bird::new(400.0);
        bird.flap();
        bird.tick(0.01);

        assert!(bird.y() < 400.0);
    }

    #[test]
    fn bird_outside_field() {
        assert!(Bird::new(FIELD_HEIGHT / 2.0).is_inside_field());
        assert!(!Bird::new(-1.0).is_inside_field());
        assert!(!Bird::new(FIELD_HEIGHT + 1.0).is_inside_field());
    }

    //=====================================================================
    // Scene Tests
    //=====================================================================

    #[test]
    fn enter_spawns_and_exit_removes_bird() {
        let mut services = services();
        let mut scene = wired();

        scene.enter(&mut services);
        assert!(services.entities().contains(BIRD_SIGNATURE));

        scene.exit(&mut services);
        assert!(services.entities().is_empty());
    }

    #[test]
    fn flapping_bird_survives_and_scores() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        // 0.05s steps, flapping every 0.6s keeps the bird near the middle.
        for frame in 0..80 {
            if frame % 12 == 0 {
                press(&mut services, KeyCode::Space);
            } else {
                idle(&mut services);
            }
            scene.tick(&mut services, MAX_STEP);
        }

        assert!(!scene.is_detect_switch());
        assert_eq!(scene.score(), 2);
    }

    #[test]
    fn falling_out_records_score_and_links_rank() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);

        let mut frames = 0;
        while !scene.is_detect_switch() {
            idle(&mut services);
            scene.tick(&mut services, MAX_STEP);
            frames += 1;
            assert!(frames < 100, "bird never left the field");
        }

        assert_eq!(scene.link(), Some(SceneId::Rank));
        assert_eq!(services.config().last_score(), Some(0));
    }

    #[test]
    fn enter_resets_score() {
        let mut services = services();
        let mut scene = wired();
        scene.enter(&mut services);
        scene.update_score(PIPE_INTERVAL * 3.0);
        assert_eq!(scene.score(), 3);

        scene.exit(&mut services);
        scene.enter(&mut services);
        assert_eq!(scene.score(), 0);
    }
}
