//! Kinematic body shared by every moving entity, plus toroidal wrapping.
//!
//! Integration is explicit Euler with no forces: `position += velocity·Δt`,
//! `rotation += spin·Δt`.  Wrapping is a separate step so callers choose the
//! topology per entity:
//!
//! | Entity                | Wrap mode          |
//! |-----------------------|--------------------|
//! | Ship, bullets         | [`WrapMode::Flush`] (edge to edge) |
//! | Asteroids, power-ups  | [`WrapMode::Margin`] with the entity radius |
//! | Particles, fragments  | none               |
//!
//! With a margin `r` an entity must be fully off-screen before it jumps, and
//! it re-enters fully off-screen on the other side, so the field behaves like a
//! torus of size `viewport + 2r` on each axis.

use bevy::prelude::*;

/// Dimensions of the play field.  The origin is the top-left corner and +Y
/// points down the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Respawn point of the ship.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// How an entity re-enters the field after crossing an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapMode {
    /// Jump as soon as the centre leaves the viewport, landing on the far edge.
    Flush,
    /// Jump once the centre is `margin` past an edge, landing `margin` outside
    /// the opposite edge.
    Margin(f32),
}

/// Pose and motion of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Radians per second.
    pub spin: f32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            rotation: 0.0,
            spin: 0.0,
        }
    }

    /// Advance position and rotation by `dt` seconds.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.rotation += self.spin * dt;
    }

    /// Reflect any edge crossing to the opposite side of `viewport`.
    #[inline]
    pub fn wrap(&mut self, viewport: Viewport, mode: WrapMode) {
        self.position = wrap_position(self.position, viewport, mode);
    }

    /// [`integrate`](Self::integrate) followed by [`wrap`](Self::wrap).
    #[inline]
    pub fn advance(&mut self, dt: f32, viewport: Viewport, mode: WrapMode) {
        self.integrate(dt);
        self.wrap(viewport, mode);
    }

    /// Scale velocity by a per-reference-frame retention factor, independent of
    /// the actual frame rate.
    #[inline]
    pub fn apply_drag(&mut self, factor_per_frame: f32, dt: f32) {
        self.velocity *= drag_factor(factor_per_frame, dt);
    }
}

/// Convert a per-60 Hz-frame retention factor into the factor for `dt`.
#[inline]
pub fn drag_factor(factor_per_frame: f32, dt: f32) -> f32 {
    factor_per_frame.powf(dt * crate::constants::REFERENCE_FPS)
}

/// Unit vector for a ship-style facing: rotation 0 points up the screen (-Y)
/// and positive rotation turns clockwise.
#[inline]
pub fn facing_vector(rotation: f32) -> Vec2 {
    let angle = rotation - std::f32::consts::FRAC_PI_2;
    Vec2::new(angle.cos(), angle.sin())
}

/// Unit vector at `angle` radians from +X.
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Apply the wrap rule for one position.
pub fn wrap_position(position: Vec2, viewport: Viewport, mode: WrapMode) -> Vec2 {
    let margin = match mode {
        WrapMode::Flush => 0.0,
        WrapMode::Margin(r) => r,
    };
    Vec2::new(
        wrap_axis(position.x, viewport.width, margin),
        wrap_axis(position.y, viewport.height, margin),
    )
}

#[inline]
fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    #[test]
    fn integration_accumulates_velocity_times_elapsed_time() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(30.0, -12.0));
        body.spin = 1.5;
        let steps = [0.016, 0.017, 0.015, 0.02, 0.016];
        for dt in steps {
            body.integrate(dt);
        }
        let elapsed: f32 = steps.iter().sum();
        let expected = Vec2::new(100.0, 100.0) + Vec2::new(30.0, -12.0) * elapsed;
        assert!((body.position - expected).length() < 1e-3);
        assert!((body.rotation - 1.5 * elapsed).abs() < 1e-5);
    }

    #[test]
    fn margin_wrap_reenters_fully_outside_opposite_edge() {
        let r = 30.0;
        let wrapped = wrap_position(Vec2::new(1024.0 + r + 1.0, 200.0), VIEW, WrapMode::Margin(r));
        assert_eq!(wrapped, Vec2::new(-r, 200.0));

        let wrapped = wrap_position(Vec2::new(500.0, -r - 0.5), VIEW, WrapMode::Margin(r));
        assert_eq!(wrapped, Vec2::new(500.0, 768.0 + r));
    }

    #[test]
    fn position_inside_margin_band_is_untouched() {
        let p = Vec2::new(1024.0 + 10.0, -10.0);
        assert_eq!(wrap_position(p, VIEW, WrapMode::Margin(20.0)), p);
    }

    #[test]
    fn flush_wrap_lands_on_the_far_edge() {
        assert_eq!(
            wrap_position(Vec2::new(-0.1, 10.0), VIEW, WrapMode::Flush),
            Vec2::new(1024.0, 10.0)
        );
        assert_eq!(
            wrap_position(Vec2::new(10.0, 768.5), VIEW, WrapMode::Flush),
            Vec2::new(10.0, 0.0)
        );
    }

    #[test]
    fn wrapped_body_keeps_its_trajectory_line() {
        // Crossing the right edge moving right: after the jump the body keeps
        // travelling along the same horizontal line, and one torus period
        // later it is back where it started.
        let r = 30.0;
        let period = VIEW.width + 2.0 * r;
        let start = Vec2::new(900.0, 384.0);
        let mut body = Body::new(start, Vec2::new(period, 0.0));
        let dt = 0.01;
        for _ in 0..100 {
            body.advance(dt, VIEW, WrapMode::Margin(r));
            assert!((body.position.y - 384.0).abs() < 1e-4);
        }
        assert!((body.position.x - start.x).abs() < 1.0);
    }

    #[test]
    fn drag_matches_per_frame_factor_at_reference_rate() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(100.0, 0.0));
        body.apply_drag(0.98, 1.0 / 60.0);
        assert!((body.velocity.x - 98.0).abs() < 1e-3);
    }

    #[test]
    fn zero_rotation_faces_up_the_screen() {
        let f = facing_vector(0.0);
        assert!(f.x.abs() < 1e-6);
        assert!((f.y + 1.0).abs() < 1e-6);
    }
}
