use nalgebra::{Matrix3, Vector3};

/// Crystallographic unit cell parameters: edge lengths in Angstroms and
/// angles in degrees, as stored in CRYST1 records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl UnitCell {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// The cell as three box vectors (rows), with the first vector along x
    /// and the second in the xy plane.
    pub fn to_vectors(&self) -> Matrix3<f64> {
        let alpha = self.alpha.to_radians();
        let beta = self.beta.to_radians();
        let gamma = self.gamma.to_radians();

        let v1 = Vector3::new(self.a, 0.0, 0.0);
        let v2 = Vector3::new(self.b * gamma.cos(), self.b * gamma.sin(), 0.0);
        let cx = beta.cos();
        let cy = (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
        let cz = (1.0 - cx * cx - cy * cy).max(0.0).sqrt();
        let v3 = Vector3::new(self.c * cx, self.c * cy, self.c * cz);

        Matrix3::from_rows(&[v1.transpose(), v2.transpose(), v3.transpose()])
    }

    /// Total cell volume in cubic Angstroms.
    pub fn volume(&self) -> f64 {
        self.to_vectors().determinant().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(left: f64, right: f64) {
        assert!(
            (left - right).abs() < 1e-6,
            "expected {} to be close to {}",
            left,
            right
        );
    }

    #[test]
    fn orthorhombic_cell_produces_a_diagonal_box() {
        let cell = UnitCell::new(10.0, 20.0, 30.0, 90.0, 90.0, 90.0);
        let vectors = cell.to_vectors();
        assert_close(vectors[(0, 0)], 10.0);
        assert_close(vectors[(1, 1)], 20.0);
        assert_close(vectors[(2, 2)], 30.0);
        assert_close(vectors[(0, 1)], 0.0);
        assert_close(vectors[(1, 0)], 0.0);
        assert_close(vectors[(2, 0)], 0.0);
        assert_close(cell.volume(), 6000.0);
    }

    #[test]
    fn monoclinic_cell_tilts_the_third_vector() {
        let cell = UnitCell::new(66.65, 190.66, 73.10, 90.0, 109.66, 90.0);
        let vectors = cell.to_vectors();
        // beta > 90 degrees pushes the third vector into negative x.
        assert!(vectors[(2, 0)] < 0.0);
        assert_close(vectors[(1, 1)], 190.66);
        assert_close(vectors[(2, 1)], 0.0);
        let length = vectors.row(2).norm();
        assert_close(length, 73.10);
    }
}
