use std::f32::consts::TAU;

use glam::Vec2;

use crate::canvas::Canvas;
use crate::sim::VIEW_HEIGHT;

const TEXT_SIZE: f32 = 45.0;
const TEXT_COLOR: (u8, u8, u8) = (0, 0, 0);
const ANCHOR: Vec2 = Vec2::new(100.0, VIEW_HEIGHT - 100.0);

// Gentle vertical bob, half a cycle per second.
const BOB_AMPLITUDE: f32 = 50.0;
const BOB_FREQUENCY: f32 = 0.5;

pub struct Banner {
    text: String,
}

impl Banner {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    fn position(&self, t: f32) -> Vec2 {
        ANCHOR + Vec2::new(0.0, BOB_AMPLITUDE * (TAU * BOB_FREQUENCY * t).sin())
    }

    pub fn draw(&self, canvas: &mut Canvas, t: f32) {
        canvas.draw_text(&self.text, self.position(t), TEXT_SIZE, TEXT_COLOR);
    }
}
