//! Scene data structures.

use crate::config::Config;
use crate::constants::*;
use crate::physics::{Aabb, Body, Category, Collider, ColliderId, PhysicsWorld, Vec2};
use serde::Serialize;

/// Top-level game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Bird hovers in place, ground scrolls, waiting for the first tap.
    Idle,
    /// Bird is live, pipes spawn, contacts count.
    Running,
    /// Bird crashed; motion stopped until the player taps back to idle.
    Over,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrashCause {
    Ground,
    Pipe,
}

/// UI-agnostic scene inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneInput {
    /// One or more simultaneous touches.
    Tap { touches: u32 },
    /// Leave the game.
    Quit,
}

/// Derived scene geometry, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub width: f64,
    pub height: f64,
    pub pipe_width: f64,
    pub pipe_height: f64,
    pub pipe_gap: f64,
    /// Height of one scaled ground tile.
    pub land_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub bird_start: Vec2,
}

impl SceneLayout {
    pub fn new(config: &Config) -> Self {
        let width = SCENE_WIDTH;
        let height = SCENE_HEIGHT;
        Self {
            width,
            height,
            pipe_width: PIPE_TEXTURE.0 * PIPE_SCALE,
            pipe_height: PIPE_TEXTURE.1 * PIPE_SCALE,
            pipe_gap: config.pipe_gap,
            land_height: LAND_TEXTURE.1 * BACKGROUND_SCALE,
            bird_width: BIRD_TEXTURE.0 * BIRD_SCALE,
            bird_height: BIRD_TEXTURE.1 * BIRD_SCALE,
            bird_start: Vec2::new(
                width * BIRD_START_X_FRACTION,
                height * BIRD_START_Y_FRACTION,
            ),
        }
    }

    /// Collision radius of the bird.
    pub fn bird_radius(&self) -> f64 {
        self.bird_height / 2.0
    }

    /// Distance a pipe pair travels before it is removed.
    pub fn pipe_travel(&self) -> f64 {
        self.width + 2.0 * self.pipe_width
    }

    /// The lower pipe's centre lies in `[band, 2 * band)`.
    pub fn gap_band(&self) -> u32 {
        (self.height / 5.0) as u32
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

/// A row of tiles scrolling left and snapping back one tile at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLayer {
    pub tile_width: f64,
    pub tile_height: f64,
    pub tile_count: usize,
    /// Bottom edge of the layer.
    pub base_y: f64,
    /// Points per second at moving speed 1.
    pub speed: f64,
    /// Current leftward shift, always in `[0, tile_width)`.
    pub offset: f64,
}

impl ScrollLayer {
    pub fn new(
        texture: (f64, f64),
        scale: f64,
        base_y: f64,
        seconds_per_point: f64,
        scene_width: f64,
    ) -> Self {
        let tile_width = texture.0 * scale;
        Self {
            tile_width,
            tile_height: texture.1 * scale,
            tile_count: 2 + (scene_width / (texture.0 * 2.0)) as usize,
            base_y,
            speed: 1.0 / seconds_per_point,
            offset: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f64, moving_speed: f64) {
        if self.tile_width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed * moving_speed * dt).rem_euclid(self.tile_width);
    }

    /// Left edge of tile `i`.
    pub fn tile_x(&self, i: usize) -> f64 {
        i as f64 * self.tile_width - self.offset
    }
}

/// An upper and lower pipe with a score zone just behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub id: u64,
    /// Horizontal centre of both pipes.
    pub x: f64,
    /// Vertical centre of the lower pipe.
    pub base_y: f64,
    pub travelled: f64,
}

impl PipePair {
    pub fn lower_bounds(&self, layout: &SceneLayout) -> Aabb {
        Aabb::from_center(
            Vec2::new(self.x, self.base_y),
            layout.pipe_width,
            layout.pipe_height,
        )
    }

    pub fn upper_bounds(&self, layout: &SceneLayout) -> Aabb {
        Aabb::from_center(
            Vec2::new(
                self.x,
                self.base_y + layout.pipe_height + layout.pipe_gap,
            ),
            layout.pipe_width,
            layout.pipe_height,
        )
    }

    /// Full-height strip one pipe width to the right of the pipes.
    pub fn score_bounds(&self, layout: &SceneLayout) -> Aabb {
        Aabb::from_center(
            Vec2::new(self.x + layout.pipe_width, layout.height / 2.0),
            layout.pipe_width,
            layout.height,
        )
    }

    /// Bottom and top of the opening.
    pub fn gap_span(&self, layout: &SceneLayout) -> (f64, f64) {
        let bottom = self.lower_bounds(layout).max.y;
        (bottom, bottom + layout.pipe_gap)
    }

    pub fn colliders(&self, layout: &SceneLayout) -> [Collider; 3] {
        let bird = Category(BIRD_CATEGORY);
        let base = self.id * 3 + 1;
        [
            Collider {
                id: ColliderId(base),
                bounds: self.lower_bounds(layout),
                category: Category(PIPE_CATEGORY),
                contact_test: bird,
            },
            Collider {
                id: ColliderId(base + 1),
                bounds: self.upper_bounds(layout),
                category: Category(PIPE_CATEGORY),
                contact_test: bird,
            },
            Collider {
                id: ColliderId(base + 2),
                bounds: self.score_bounds(layout),
                category: Category(SCORE_CATEGORY),
                contact_test: bird,
            },
        ]
    }
}

/// Looping three-frame wing animation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlapAnimation {
    pub playing: bool,
    pub frame: usize,
    pub elapsed: f64,
}

impl FlapAnimation {
    pub fn start(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= BIRD_FRAME_SECS {
            self.elapsed -= BIRD_FRAME_SECS;
            self.frame = (self.frame + 1) % BIRD_ANIM_FRAMES;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub body: Body,
    /// Radians, positive nose-up.
    pub rotation: f64,
    pub anim: FlapAnimation,
}

/// Grows the score label to 1.5x and back after each point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorePulse {
    elapsed: Option<f64>,
}

impl ScorePulse {
    pub fn trigger(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn clear(&mut self) {
        self.elapsed = None;
    }

    pub fn advance(&mut self, dt: f64) {
        if let Some(t) = self.elapsed {
            let t = t + dt;
            self.elapsed = if t >= 2.0 * SCORE_PULSE_HALF_SECS {
                None
            } else {
                Some(t)
            };
        }
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn scale(&self) -> f64 {
        let grow = SCORE_PULSE_SCALE - 1.0;
        match self.elapsed {
            None => 1.0,
            Some(t) if t < SCORE_PULSE_HALF_SECS => 1.0 + grow * t / SCORE_PULSE_HALF_SECS,
            Some(t) => {
                SCORE_PULSE_SCALE - grow * (t - SCORE_PULSE_HALF_SECS) / SCORE_PULSE_HALF_SECS
            }
        }
    }
}

/// "Game Over" text: waits at the top edge, then slides to mid-screen.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverBanner {
    pub start_y: f64,
    pub drop: f64,
    pub elapsed: f64,
}

impl GameOverBanner {
    pub fn new(scene_height: f64) -> Self {
        Self {
            start_y: scene_height,
            drop: scene_height * 0.5,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(BANNER_DELAY_SECS + BANNER_DROP_SECS);
    }

    pub fn y(&self) -> f64 {
        let t = ((self.elapsed - BANNER_DELAY_SECS) / BANNER_DROP_SECS).clamp(0.0, 1.0);
        self.start_y - self.drop * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= BANNER_DELAY_SECS + BANNER_DROP_SECS
    }
}

/// Red/sky background alternation after a crash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrashFlash {
    pub elapsed: f64,
}

impl CrashFlash {
    pub fn duration() -> f64 {
        FLASH_CYCLES as f64 * 2.0 * FLASH_HALF_SECS
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= Self::duration()
    }

    pub fn is_red(&self) -> bool {
        !self.is_finished() && ((self.elapsed / FLASH_HALF_SECS) as u64) % 2 == 0
    }
}

/// Repeating pipe spawn schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnTimer {
    pub active: bool,
    /// Seconds until the next spawn.
    pub until_next: f64,
}

impl SpawnTimer {
    /// Start so that the first spawn happens on the next frame.
    pub fn start(&mut self) {
        self.active = true;
        self.until_next = 0.0;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance by `dt`; returns how many spawns fell due.
    pub fn advance(&mut self, dt: f64, interval: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.until_next -= dt;
        let mut due = 0;
        while self.until_next <= 0.0 {
            due += 1;
            self.until_next += interval;
        }
        due
    }
}

/// What happened during a `tick_scene` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Fixed steps executed.
    pub steps: u32,
    pub pipes_spawned: u32,
    pub points_scored: u32,
    pub crashed: Option<CrashCause>,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.steps > 0
    }
}

/// The whole game scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: Config,
    pub layout: SceneLayout,
    pub status: GameStatus,
    pub score: u32,
    /// Best score since the program started.
    pub best_score: u32,
    pub runs_played: u32,
    pub bird: Bird,
    pub pipes: Vec<PipePair>,
    pub ground: ScrollLayer,
    pub sky: ScrollLayer,
    pub ground_collider: Collider,
    /// Multiplier on every scrolling element; 0 while over.
    pub moving_speed: f64,
    pub spawn_timer: SpawnTimer,
    /// Taps are dropped while false.
    pub interaction_enabled: bool,
    pub score_label_visible: bool,
    pub score_pulse: ScorePulse,
    pub banner: Option<GameOverBanner>,
    pub flash: Option<CrashFlash>,
    pub crash_cause: Option<CrashCause>,
    pub world: PhysicsWorld,
    /// Sub-step time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    pub tick_count: u64,
    /// Seconds survived in the current run.
    pub run_time_secs: f64,
    pub quit_requested: bool,
    pub(crate) next_pipe_id: u64,
}

impl Scene {
    /// Build the scene and put it in the idle state.
    pub fn new(config: Config) -> Self {
        let layout = SceneLayout::new(&config);

        let ground = ScrollLayer::new(
            LAND_TEXTURE,
            BACKGROUND_SCALE,
            0.0,
            config.ground_seconds_per_point,
            layout.width,
        );
        let sky = ScrollLayer::new(
            SKY_TEXTURE,
            BACKGROUND_SCALE,
            layout.land_height,
            config.sky_seconds_per_point,
            layout.width,
        );

        // Ground body: centred one texture height up, twice as tall
        let ground_collider = Collider {
            id: ColliderId(0),
            bounds: Aabb::from_center(
                Vec2::new(layout.width / 2.0, LAND_TEXTURE.1),
                layout.width,
                LAND_TEXTURE.1 * 2.0,
            ),
            category: Category(WORLD_CATEGORY),
            contact_test: Category::NONE,
        };

        let mut body = Body::circle(
            layout.bird_start,
            layout.bird_radius(),
            Category(BIRD_CATEGORY),
        );
        body.contact_test = Category(WORLD_CATEGORY | PIPE_CATEGORY);
        body.dynamic = false;

        let world = PhysicsWorld::new(Vec2::new(0.0, config.gravity_points()), layout.bounds());

        let mut scene = Self {
            config,
            layout,
            status: GameStatus::Idle,
            score: 0,
            best_score: 0,
            runs_played: 0,
            bird: Bird {
                body,
                rotation: 0.0,
                anim: FlapAnimation::default(),
            },
            pipes: Vec::new(),
            ground,
            sky,
            ground_collider,
            moving_speed: 1.0,
            spawn_timer: SpawnTimer::default(),
            interaction_enabled: true,
            score_label_visible: false,
            score_pulse: ScorePulse::default(),
            banner: None,
            flash: None,
            crash_cause: None,
            world,
            accumulated_time_ms: 0,
            tick_count: 0,
            run_time_secs: 0.0,
            quit_requested: false,
            next_pipe_id: 0,
        };
        super::logic::enter_idle(&mut scene);
        scene
    }

    /// Ground plus every pipe pair's colliders.
    pub fn colliders(&self) -> Vec<Collider> {
        let mut colliders = Vec::with_capacity(1 + self.pipes.len() * 3);
        colliders.push(self.ground_collider);
        for pair in &self.pipes {
            colliders.extend(pair.colliders(&self.layout));
        }
        colliders
    }

    /// Next pipe pair the bird has not yet cleared.
    pub fn next_pipe_ahead(&self) -> Option<&PipePair> {
        let bird_x = self.bird.body.position.x;
        self.pipes
            .iter()
            .filter(|p| p.x + self.layout.pipe_width / 2.0 + self.bird.body.radius > bird_x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }
}
