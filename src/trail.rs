use glam::{IVec2, Vec2};

pub const TRAIL_COUNT: usize = 5;

// How far back in the owner's position history each trail reads. Launcher
// trails hug the head; fragment trails lag further behind.
const DYNAMIC_OFFSET: usize = 2;
const STATIC_OFFSET: usize = 5;

// Dark-to-light gray ramp for the ascent trail.
const DYNAMIC_COLORS: [(u8, u8, u8); TRAIL_COUNT] = [
    (45, 45, 45),
    (60, 60, 60),
    (75, 75, 75),
    (125, 125, 125),
    (150, 150, 150),
];

// Pale yellow afterglow behind every fragment.
const STATIC_COLOR: (u8, u8, u8) = (255, 255, 200);

pub struct Trail {
    index: usize,
    pub pos: Vec2,
    dynamic: bool,
    pub size: f32,
    pub color: (u8, u8, u8),
}

impl Trail {
    pub fn new(index: usize, particle_size: f32, dynamic: bool) -> Self {
        let (color, size) = if dynamic {
            (
                DYNAMIC_COLORS[index],
                (particle_size - index as f32 / 2.0).trunc(),
            )
        } else {
            (STATIC_COLOR, (particle_size - 2.0).max(0.0))
        };
        Self {
            index,
            // Off-screen until the owner has enough history.
            pos: Vec2::new(-10.0, -10.0),
            dynamic,
            size,
            color,
        }
    }

    // Slot in the owner's 10-entry position history this trail samples.
    pub fn history_slot(&self) -> usize {
        self.index + if self.dynamic { DYNAMIC_OFFSET } else { STATIC_OFFSET }
    }

    pub fn follow(&mut self, p: IVec2) {
        self.pos = p.as_vec2();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_sizes_truncate_half_steps() {
        let sizes: Vec<f32> = (0..TRAIL_COUNT)
            .map(|i| Trail::new(i, 5.0, true).size)
            .collect();
        assert_eq!(sizes, vec![5.0, 4.0, 4.0, 3.0, 3.0]);
    }

    #[test]
    fn static_size_floors_at_zero() {
        assert_eq!(Trail::new(0, 2.0, false).size, 0.0);
        assert_eq!(Trail::new(3, 4.0, false).size, 2.0);
    }

    #[test]
    fn history_slots_lag_behind_the_head() {
        assert_eq!(Trail::new(0, 5.0, true).history_slot(), 2);
        assert_eq!(Trail::new(4, 5.0, true).history_slot(), 6);
        assert_eq!(Trail::new(0, 3.0, false).history_slot(), 5);
        assert_eq!(Trail::new(4, 3.0, false).history_slot(), 9);
    }

    #[test]
    fn colors_per_kind() {
        assert_eq!(Trail::new(0, 5.0, true).color, (45, 45, 45));
        assert_eq!(Trail::new(4, 5.0, true).color, (150, 150, 150));
        assert_eq!(Trail::new(2, 3.0, false).color, (255, 255, 200));
    }

    #[test]
    fn follow_tracks_integer_positions() {
        let mut t = Trail::new(1, 5.0, true);
        assert_eq!(t.pos, Vec2::new(-10.0, -10.0));
        t.follow(IVec2::new(320, 451));
        assert_eq!(t.pos, Vec2::new(320.0, 451.0));
    }
}
