//! Confetti field: falling, spinning paper pieces.
//! Positions are in normalized viewport units (0..1 on both axes, y down).

use glam::Vec2;
use super::rng::Rng;

/// Downward acceleration in viewport heights per second squared.
const GRAVITY: f32 = 0.35;
/// Horizontal velocity damping per second.
const AIR_DRAG: f32 = 0.6;

/// Palette slots; the view maps them onto theme colors.
pub const PALETTE_SIZE: u32 = 6;

#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
    pub color: u32,
    pub life: f32,
}

impl ConfettiPiece {
    pub const FLOATS: usize = 4;

    /// Integrate one step. Returns false once the piece expired or fell off screen.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.life -= dt;
        if self.life <= 0.0 {
            return false;
        }
        self.vel.y += GRAVITY * dt;
        self.vel.x *= 1.0 - (AIR_DRAG * dt).min(1.0);
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;
        self.pos.y < 1.2
    }

    /// Wire format: x, y, rotation, palette slot.
    pub fn write(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[self.pos.x, self.pos.y, self.rotation, self.color as f32]);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfettiField {
    pub pieces: Vec<ConfettiPiece>,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst `count` pieces from the top-center of the viewport.
    pub fn burst(&mut self, count: usize, rng: &mut Rng) {
        self.pieces.reserve(count);
        for _ in 0..count {
            let angle = rng.range(-2.6, -0.5);
            let speed = rng.range(0.3, 0.9);
            self.pieces.push(ConfettiPiece {
                pos: Vec2::new(rng.range(0.3, 0.7), rng.range(-0.1, 0.1)),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                rotation: rng.range(0.0, std::f32::consts::TAU),
                spin: rng.range(-6.0, 6.0),
                color: rng.next_int(PALETTE_SIZE),
                life: rng.range(3.0, 5.0),
            });
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pieces.retain_mut(|p| p.advance(dt));
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
