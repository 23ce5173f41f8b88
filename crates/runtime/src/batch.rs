//! Sprite batch host collaborator.
//!
//! Structure-of-arrays storage for a homogeneous group of sprites driven by
//! one compiled behavior. Each attribute lives in its own contiguous array
//! indexed by sprite; the interpreter executes vectorized operations over
//! all of them once per frame.
//!
//! Built-in mutable fields (accessible in scripts):
//! `pos.x`, `pos.y`, `dir.x`, `dir.y`, `rot`, `scale.x`, `scale.y`,
//! `speed`, `angle_speed`.
//!
//! Built-in read-only constants, set fresh each frame:
//! `dt`, `bounds.x/y/w/h`, `rect_w`, `rect_h`, `PI`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use wisp_ast::BehaviorDecl;

use crate::error::Result;
use crate::interpreter::{Bindings, Interpreter};

/// Spawn area and viewport bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A batch of sprites whose per-frame behavior is a compiled script.
///
/// Arrays may reallocate whenever sprites are added or removed, so field
/// bindings are rebuilt from scratch on every [`update`] call.
///
/// [`update`]: SpriteBatch::update
pub struct SpriteBatch {
    pos_x: Vec<f64>,
    pos_y: Vec<f64>,
    dir_x: Vec<f64>,
    dir_y: Vec<f64>,
    rot: Vec<f64>,
    scale_x: Vec<f64>,
    scale_y: Vec<f64>,
    speed: Vec<f64>,
    angle_speed: Vec<f64>,

    bounds: Bounds,
    sprite_w: f64,
    sprite_h: f64,

    behavior: BehaviorDecl,
    interpreter: Interpreter,
    rng: SmallRng,
}

impl SpriteBatch {
    /// Create an empty batch for a compiled behavior.
    ///
    /// `sprite_size` is the unscaled sprite width/height used to derive the
    /// `rect_w`/`rect_h` constants.
    pub fn new(behavior: BehaviorDecl, bounds: Bounds, sprite_size: (f64, f64)) -> Self {
        Self::build(behavior, bounds, sprite_size, SmallRng::from_entropy())
    }

    /// Create an empty batch with a deterministic spawn RNG.
    pub fn with_seed(
        behavior: BehaviorDecl,
        bounds: Bounds,
        sprite_size: (f64, f64),
        seed: u64,
    ) -> Self {
        Self::build(behavior, bounds, sprite_size, SmallRng::seed_from_u64(seed))
    }

    fn build(
        behavior: BehaviorDecl,
        bounds: Bounds,
        sprite_size: (f64, f64),
        rng: SmallRng,
    ) -> Self {
        Self {
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            dir_x: Vec::new(),
            dir_y: Vec::new(),
            rot: Vec::new(),
            scale_x: Vec::new(),
            scale_y: Vec::new(),
            speed: Vec::new(),
            angle_speed: Vec::new(),
            bounds,
            sprite_w: sprite_size.0,
            sprite_h: sprite_size.1,
            behavior,
            interpreter: Interpreter::new(),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    /// Spawn `count` sprites with randomized position, direction, and
    /// speeds, at the given scale.
    pub fn add(&mut self, count: usize, scale: f64) {
        let new_len = self.len() + count;
        self.pos_x.reserve(count);
        self.pos_y.reserve(count);
        self.dir_x.reserve(count);
        self.dir_y.reserve(count);
        self.rot.reserve(count);
        self.scale_x.reserve(count);
        self.scale_y.reserve(count);
        self.speed.reserve(count);
        self.angle_speed.reserve(count);

        for _ in 0..count {
            self.pos_x
                .push(self.bounds.x + self.rng.gen::<f64>() * self.bounds.w);
            self.pos_y
                .push(self.bounds.y + self.rng.gen::<f64>() * self.bounds.h);

            let mut dx: f64 = self.rng.gen_range(-1.0..1.0);
            let mut dy: f64 = self.rng.gen_range(-1.0..1.0);
            let len = (dx * dx + dy * dy).sqrt();
            if len < 1e-8 {
                dx = 1.0;
                dy = 0.0;
            } else {
                dx /= len;
                dy /= len;
            }
            self.dir_x.push(dx);
            self.dir_y.push(dy);

            self.rot.push(0.0);
            self.scale_x.push(scale);
            self.scale_y.push(scale);
            self.speed.push(self.rng.gen_range(1.0..7.0));
            self.angle_speed.push(self.rng.gen_range(0.2..3.5));
        }

        debug!(added = count, total = new_len, "spawned sprites");
    }

    /// Remove up to `count` sprites from the end of the batch.
    pub fn remove(&mut self, count: usize) {
        let new_len = self.len().saturating_sub(count);
        self.pos_x.truncate(new_len);
        self.pos_y.truncate(new_len);
        self.dir_x.truncate(new_len);
        self.dir_y.truncate(new_len);
        self.rot.truncate(new_len);
        self.scale_x.truncate(new_len);
        self.scale_y.truncate(new_len);
        self.speed.truncate(new_len);
        self.angle_speed.truncate(new_len);
    }

    /// Run the behavior once for this frame.
    ///
    /// Rebinds every field (array storage may have moved since the last
    /// frame) and refreshes the per-frame constants before executing.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        self.interpreter.set_count(self.pos_x.len());
        self.interpreter.set_constant("dt", dt);
        self.interpreter.set_constant("bounds.x", self.bounds.x);
        self.interpreter.set_constant("bounds.y", self.bounds.y);
        self.interpreter.set_constant("bounds.w", self.bounds.w);
        self.interpreter.set_constant("bounds.h", self.bounds.h);
        let scale_x = self.scale_x.first().copied().unwrap_or(1.0);
        let scale_y = self.scale_y.first().copied().unwrap_or(1.0);
        self.interpreter
            .set_constant("rect_w", self.sprite_w * scale_x);
        self.interpreter
            .set_constant("rect_h", self.sprite_h * scale_y);
        self.interpreter
            .set_constant("PI", std::f64::consts::PI);

        let mut fields = Bindings::new();
        fields.bind("pos.x", &mut self.pos_x);
        fields.bind("pos.y", &mut self.pos_y);
        fields.bind("dir.x", &mut self.dir_x);
        fields.bind("dir.y", &mut self.dir_y);
        fields.bind("rot", &mut self.rot);
        fields.bind("scale.x", &mut self.scale_x);
        fields.bind("scale.y", &mut self.scale_y);
        fields.bind("speed", &mut self.speed);
        fields.bind("angle_speed", &mut self.angle_speed);

        self.interpreter.execute(&self.behavior, &mut fields)
    }

    // Read access for a rendering layer.

    pub fn pos_x(&self) -> &[f64] {
        &self.pos_x
    }

    pub fn pos_y(&self) -> &[f64] {
        &self.pos_y
    }

    pub fn rot(&self) -> &[f64] {
        &self.rot
    }

    pub fn scale_x(&self) -> &[f64] {
        &self.scale_x
    }

    pub fn scale_y(&self) -> &[f64] {
        &self.scale_y
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }
}
