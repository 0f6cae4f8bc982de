use glam::Vec2;

use crate::canvas::Canvas;
use crate::firework::Firework;

// Logical viewport the physics runs in, origin bottom-left.
pub const VIEW_WIDTH: f32 = 1000.0;
pub const VIEW_HEIGHT: f32 = 720.0;

pub const GRAVITY: Vec2 = Vec2::new(0.0, -1.0);

// Population bounds: seeded small, topped back up after every tick.
const SEED_FIREWORKS: usize = 4;
const MIN_FIREWORKS: usize = 6;

pub struct Simulation {
    pub fireworks: Vec<Firework>,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            fireworks: (0..SEED_FIREWORKS).map(|_| Firework::new()).collect(),
        }
    }

    pub fn tick(&mut self, canvas: &mut Canvas) {
        for fw in &mut self.fireworks {
            fw.update(canvas);
        }
        self.fireworks.retain(|fw| !fw.spent());
        while self.fireworks.len() < MIN_FIREWORKS {
            self.fireworks.push(Firework::new());
        }
    }
}
