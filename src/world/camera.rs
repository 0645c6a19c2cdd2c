use crate::math::Vec2;

/// Default plane length relative to the direction: about 66 degrees of view
pub const DEFAULT_FOV_SCALE: f32 = 0.66;

/// First-person camera.
///
/// `dir` points forward; `plane` is perpendicular to it and points toward
/// screen-right, its length setting the field of view. With x to the right
/// and y down the grid, a camera facing `+x` has its plane along `+y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Camera {
    pub const fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Camera at `pos` facing `angle` radians (0 = +x, pi/2 = +y)
    pub fn looking(pos: Vec2, angle: f32, fov_scale: f32) -> Self {
        let dir = Vec2::from_angle(angle);
        Self {
            pos,
            dir,
            plane: dir.perp() * fov_scale,
        }
    }

    /// Turn by `angle` radians; positive turns toward screen-right
    pub fn rotate(&mut self, angle: f32) {
        self.dir = self.dir.rotate(angle);
        self.plane = self.plane.rotate(angle);
    }

    /// Ray direction through screen column `x` of `width`
    #[inline]
    pub fn ray_dir(&self, x: usize, width: usize) -> Vec2 {
        let camera_x = 2.0 * x as f32 / width.max(1) as f32 - 1.0;
        self.dir + self.plane * camera_x
    }

    /// Determinant of the [plane dir] basis; zero when the basis is singular
    #[inline]
    pub fn basis_det(&self) -> f32 {
        self.plane.cross(self.dir)
    }

    /// A camera that cannot produce sane rays or sprite projections
    pub fn is_degenerate(&self) -> bool {
        !self.pos.is_finite()
            || !self.dir.is_finite()
            || !self.plane.is_finite()
            || self.dir.length_squared() <= f32::EPSILON
    }

    /// World point into camera space: `x` across the plane, `y` depth along `dir`.
    /// Returns `None` when the basis cannot be inverted.
    #[inline]
    pub fn to_camera_space(&self, world: Vec2) -> Option<Vec2> {
        let det = self.basis_det();
        if det.abs() <= f32::EPSILON || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let rel = world - self.pos;
        Some(Vec2::new(
            inv_det * (self.dir.y * rel.x - self.dir.x * rel.y),
            inv_det * (-self.plane.y * rel.x + self.plane.x * rel.y),
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking(Vec2::new(1.5, 1.5), 0.0, DEFAULT_FOV_SCALE)
    }
}
