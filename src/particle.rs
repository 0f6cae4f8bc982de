use glam::{IVec2, Vec2};

use crate::canvas::Canvas;
use crate::sim::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::trail::{TRAIL_COUNT, Trail};

const HISTORY_LEN: usize = 10;

// Velocity damping applied to fragments every tick. Launchers are undamped
// so they ascend cleanly.
const DRAG: f32 = 0.85;

// Two-tier stochastic fade-out instead of a fixed lifespan.
const EARLY_FADE_AGE: u32 = 5;
const LATE_FADE_AGE: u32 = 30;
const EARLY_FADE_CHANCE: f32 = 1.0 / 16.0;
const LATE_FADE_CHANCE: f32 = 1.0 / 3.0;

const HISTORY_SENTINEL: IVec2 = IVec2::new(-10, -10);

#[derive(Clone, Copy)]
pub enum Kind {
    Launcher,
    Fragment { explosion_radius: f32 },
}

pub struct Particle {
    pub kind: Kind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub origin: Vec2,
    pub size: f32,
    pub color: (u8, u8, u8),
    pub age: u32,
    pub remove: bool,
    history: [IVec2; HISTORY_LEN],
    trails: [Trail; TRAIL_COUNT],
}

impl Particle {
    pub fn launcher(pos: Vec2, color: (u8, u8, u8)) -> Self {
        let size = 5.0;
        Self {
            kind: Kind::Launcher,
            pos,
            vel: Vec2::new(0.0, 30.0 + fastrand::f32() * 5.0),
            acc: Vec2::ZERO,
            origin: pos,
            size,
            color,
            age: 0,
            remove: false,
            history: [HISTORY_SENTINEL; HISTORY_LEN],
            trails: std::array::from_fn(|i| Trail::new(i, size, true)),
        }
    }

    pub fn fragment(pos: Vec2, palette: &[(u8, u8, u8); 3]) -> Self {
        let explosion_radius = fastrand::u32(5..40) as f32;
        // Uniform direction in a small square, stretched radially.
        let spread = Vec2::new(fastrand::f32() * 4.0 - 2.0, fastrand::f32() * 4.0 - 2.0);
        let stretch = fastrand::u32(10..=explosion_radius as u32 + 5) as f32;
        let size = fastrand::u32(2..=4) as f32;
        Self {
            kind: Kind::Fragment { explosion_radius },
            pos,
            vel: spread * stretch,
            acc: Vec2::ZERO,
            origin: pos,
            size,
            color: palette[fastrand::usize(0..palette.len())],
            age: 0,
            remove: false,
            history: [HISTORY_SENTINEL; HISTORY_LEN],
            trails: std::array::from_fn(|i| Trail::new(i, size, false)),
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    pub fn update(&mut self) {
        if let Kind::Fragment { .. } = self.kind {
            self.vel *= DRAG;
        }

        // Semi-implicit Euler, one unit of simulated time per tick.
        self.vel += self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;

        if self.pos.x < 0.0
            || self.pos.x > VIEW_WIDTH
            || self.pos.y < 0.0
            || self.pos.y > VIEW_HEIGHT
        {
            self.remove = true;
        }

        // A fragment whose first step overshoots the intended burst radius is
        // discarded before it gets a fade step.
        if self.age == 0 {
            if let Kind::Fragment { explosion_radius } = self.kind {
                if self.pos.distance(self.origin) > explosion_radius {
                    self.remove = true;
                }
            }
        }

        self.fade();
        self.record_position();
        self.age += 1;
    }

    fn fade(&mut self) {
        if self.age > EARLY_FADE_AGE && self.age < LATE_FADE_AGE {
            if fastrand::f32() < EARLY_FADE_CHANCE {
                self.remove = true;
            }
        } else if self.age >= LATE_FADE_AGE && fastrand::f32() < LATE_FADE_CHANCE {
            self.remove = true;
        }
    }

    fn record_position(&mut self) {
        // Rolling window: drop the oldest entry, newest goes up front.
        self.history.rotate_right(1);
        self.history[0] = self.pos.as_ivec2();
        for trail in &mut self.trails {
            let slot = trail.history_slot();
            trail.follow(self.history[slot]);
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for trail in &self.trails {
            canvas.fill_circle(trail.pos, trail.size, trail.color);
        }
        canvas.fill_circle(self.pos, self.size, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: (u8, u8, u8) = (255, 255, 255);
    const PALETTE: [(u8, u8, u8); 3] = [(255, 0, 0), (0, 255, 0), (0, 0, 255)];

    #[test]
    fn launcher_integrates_one_gravity_step() {
        let mut p = Particle::launcher(Vec2::new(500.0, 0.0), WHITE);
        p.vel = Vec2::new(0.0, 32.0);
        p.apply_force(Vec2::new(0.0, -1.0));
        p.update();
        assert_eq!(p.vel, Vec2::new(0.0, 31.0));
        assert_eq!(p.pos, Vec2::new(500.0, 31.0));
        assert_eq!(p.age, 1);
        assert!(!p.remove);
    }

    #[test]
    fn forces_accumulate_and_reset() {
        let mut p = Particle::launcher(Vec2::new(500.0, 100.0), WHITE);
        p.vel = Vec2::ZERO;
        p.apply_force(Vec2::new(0.0, -1.0));
        p.apply_force(Vec2::new(0.5, 0.25));
        assert_eq!(p.acc, Vec2::new(0.5, -0.75));
        p.update();
        assert_eq!(p.vel, Vec2::new(0.5, -0.75));
        assert_eq!(p.acc, Vec2::ZERO);
    }

    #[test]
    fn overshooting_fragment_is_discarded_at_age_zero() {
        fastrand::seed(1);
        let origin = Vec2::new(500.0, 300.0);
        let mut p = Particle::fragment(origin, &PALETTE);
        p.kind = Kind::Fragment {
            explosion_radius: 10.0,
        };
        // 50 * 0.85 = 42.5 units in one step, well past the 10-unit radius.
        p.vel = Vec2::new(50.0, 0.0);
        p.update();
        assert!(p.remove);
        assert_eq!(p.age, 1);
    }

    #[test]
    fn leaving_the_viewport_marks_for_removal() {
        let mut p = Particle::launcher(Vec2::new(5.0, 5.0), WHITE);
        p.vel = Vec2::new(-20.0, 0.0);
        p.update();
        assert!(p.remove);
    }

    #[test]
    fn no_fade_before_age_six() {
        // The early tier opens at age > 5, so the first six updates are
        // deterministic for an in-bounds launcher at rest.
        let mut p = Particle::launcher(Vec2::new(500.0, 100.0), WHITE);
        p.vel = Vec2::ZERO;
        for _ in 0..6 {
            p.update();
            assert!(!p.remove);
        }
        assert_eq!(p.age, 6);
    }

    #[test]
    fn removal_is_monotonic_and_eventually_fires() {
        fastrand::seed(42);
        let mut p = Particle::launcher(Vec2::new(500.0, 100.0), WHITE);
        p.vel = Vec2::ZERO;
        let mut removed_at = None;
        for tick in 0..10_000 {
            p.update();
            if p.remove {
                removed_at = Some(tick);
                break;
            }
        }
        assert!(removed_at.is_some(), "fade never triggered");
        for _ in 0..50 {
            p.update();
            assert!(p.remove);
        }
    }

    #[test]
    fn history_keeps_last_ten_positions_newest_first() {
        let mut p = Particle::launcher(Vec2::new(100.0, 100.0), WHITE);
        p.vel = Vec2::new(3.0, 2.0);
        let mut seen = Vec::new();
        for _ in 0..25 {
            p.update();
            seen.push(p.pos.as_ivec2());
        }
        for (slot, entry) in p.history.iter().enumerate() {
            assert_eq!(*entry, seen[seen.len() - 1 - slot]);
        }
    }

    #[test]
    fn history_starts_at_the_sentinel() {
        let p = Particle::launcher(Vec2::new(100.0, 100.0), WHITE);
        assert!(p.history.iter().all(|&e| e == HISTORY_SENTINEL));
    }

    #[test]
    fn trails_sample_their_history_slots() {
        let mut p = Particle::launcher(Vec2::new(100.0, 100.0), WHITE);
        p.vel = Vec2::new(3.0, 2.0);
        for _ in 0..12 {
            p.update();
        }
        for trail in &p.trails {
            assert_eq!(trail.pos, p.history[trail.history_slot()].as_vec2());
        }
    }

    #[test]
    fn fragment_construction_ranges() {
        fastrand::seed(9);
        for _ in 0..200 {
            let p = Particle::fragment(Vec2::new(500.0, 300.0), &PALETTE);
            let Kind::Fragment { explosion_radius } = p.kind else {
                panic!("fragment constructor produced a launcher");
            };
            assert!((5.0..40.0).contains(&explosion_radius));
            assert!((2.0..=4.0).contains(&p.size));
            assert!(PALETTE.contains(&p.color));
            assert_eq!(p.origin, Vec2::new(500.0, 300.0));
        }
    }
}
