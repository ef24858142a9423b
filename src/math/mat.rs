use crate::math::vec::Vec3;

/// Column-major 4x4 matrix, laid out the way WGSL `mat4x4<f32>` expects.
///
/// `self.0[c]` is column `c`, so a translation lives in `self.0[3]`.
/// Projections target wgpu clip space (depth in `[0, 1]`).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Orthographic projection of the box `[left, right] x [bottom, top] x [near, far]`.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4([
            [2.0 / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (top - bottom), 0.0, 0.0],
            [0.0, 0.0, 1.0 / (near - far), 0.0],
            [
                (right + left) / (left - right),
                (top + bottom) / (bottom - top),
                near / (near - far),
                1.0,
            ],
        ])
    }

    /// Right-handed perspective projection.
    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, z_far * range_reciprocal, -1.0],
            [0.0, 0.0, z_far * z_near * range_reciprocal, 0.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalize();
        let s = f.cross(&up).normalize();
        let u = s.cross(&f);

        Mat4([
            [s.x(), u.x(), -f.x(), 0.0],
            [s.y(), u.y(), -f.y(), 0.0],
            [s.z(), u.z(), -f.z(), 0.0],
            [-s.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0],
        ])
    }

    /// Matrix product `self * rhs`: `rhs` is applied to a vector first.
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (c, column) in result.iter_mut().enumerate() {
            for (r, cell) in column.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[k][r] * rhs.0[c][k]).sum();
            }
        }
        Mat4(result)
    }

    /// Transforms a point, returning homogeneous `[x, y, z, w]`.
    pub fn transform_point(&self, p: Vec3) -> [f32; 4] {
        let v = [p.x(), p.y(), p.z(), 1.0];
        let mut out = [0.0; 4];
        for (r, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|c| self.0[c][r] * v[c]).sum();
        }
        out
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::deg_to_rad;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    /// Translation composed after identity moves a point by the offset.
    #[test]
    fn test_multiply_applies_rhs_first() {
        let translation = Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 2.0, 3.0, 1.0],
        ]);
        let m = translation.multiply(&Mat4::identity());
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, [2.0, 3.0, 4.0, 1.0]);
    }

    /// The look-at target lands on the negative view-space z axis.
    #[test]
    fn test_look_at_target_on_view_axis() {
        let eye = Vec3::new(1.5, 1.0, 1.5);
        let view = Mat4::look_at(eye, eye + Vec3::new(1.0, 0.0, 0.0), Vec3::UP);
        let p = view.transform_point(eye + Vec3::new(2.0, 0.0, 0.0));
        assert!(approx(p[0], 0.0));
        assert!(approx(p[1], 0.0));
        assert!(approx(p[2], -2.0));
    }

    /// Points on the near and far planes map to depth 0 and 1.
    #[test]
    fn test_perspective_depth_range() {
        let proj = Mat4::perspective(deg_to_rad(45.0), 4.0 / 3.0, 0.1, 100.0);
        let near = proj.transform_point(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.transform_point(Vec3::new(0.0, 0.0, -100.0));
        assert!(approx(near[2] / near[3], 0.0));
        assert!(approx(far[2] / far[3], 1.0));
    }

    /// The minimap projection maps the grid corners to the clip-space corners.
    #[test]
    fn test_ortho_maps_grid_to_clip_space() {
        let proj = Mat4::ortho(0.0, 10.0, 0.0, 10.0, -1.0, 1.0);
        let low = proj.transform_point(Vec3::new(0.0, 0.0, 0.0));
        let high = proj.transform_point(Vec3::new(10.0, 10.0, 0.0));
        assert!(approx(low[0], -1.0) && approx(low[1], -1.0));
        assert!(approx(high[0], 1.0) && approx(high[1], 1.0));
    }
}
