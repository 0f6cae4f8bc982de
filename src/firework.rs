use glam::Vec2;

use crate::canvas::Canvas;
use crate::particle::Particle;
use crate::sim::{GRAVITY, VIEW_WIDTH};

const MIN_FRAGMENTS: usize = 200;
const MAX_FRAGMENTS: usize = 600;

fn random_color() -> (u8, u8, u8) {
    (fastrand::u8(..), fastrand::u8(..), fastrand::u8(..))
}

pub struct Firework {
    pub shell: Particle,
    pub exploded: bool,
    pub fragments: Vec<Particle>,
    palette: [(u8, u8, u8); 3],
}

impl Firework {
    pub fn new() -> Self {
        let x = fastrand::u32(0..=VIEW_WIDTH as u32) as f32;
        Self {
            shell: Particle::launcher(Vec2::new(x, 0.0), random_color()),
            exploded: false,
            fragments: Vec::new(),
            palette: [random_color(), random_color(), random_color()],
        }
    }

    pub fn update(&mut self, canvas: &mut Canvas) {
        if !self.exploded {
            self.shell.apply_force(GRAVITY);
            self.shell.update();
            self.shell.draw(canvas);

            // Apex: the shell slows to a stop, then bursts.
            if self.shell.vel.y <= 0.0 {
                self.exploded = true;
                self.explode();
            }
        } else {
            for fragment in &mut self.fragments {
                let jitter = Vec2::new(
                    fastrand::f32() * 0.1 - 0.05,
                    fastrand::f32() * 0.12 - 0.04,
                );
                fragment.apply_force(GRAVITY + jitter);
                fragment.update();
                fragment.draw(canvas);
            }
            self.fragments.retain(|p| !p.remove);
        }
    }

    fn explode(&mut self) {
        let amount = fastrand::usize(MIN_FRAGMENTS..=MAX_FRAGMENTS);
        let pos = self.shell.pos;
        self.fragments = (0..amount)
            .map(|_| Particle::fragment(pos, &self.palette))
            .collect();
    }

    pub fn spent(&self) -> bool {
        self.exploded && self.fragments.iter().all(|p| p.remove)
    }
}
