//! Affine transformations
//!
//! Only what filling needs: mapping polygon points and mapping pixel
//! centers back into paint space. Building and composing matrices is left
//! to the caller.

const IDENTITY_EPSILON : f64 = 1e-14;

/// Affine transformation
///
/// Maps `(x,y)` to `(x * sx + y * shx + tx, x * shy + y * sy + ty)`
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self::from_coefficients(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
    /// Transform from its six coefficients
    pub fn from_coefficients(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self { sx, shy, shx, sy, tx, ty }
    }
    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }
    /// True if the transform maps every point onto itself
    pub fn is_identity(&self) -> bool {
        (self.sx - 1.0).abs() < IDENTITY_EPSILON &&
            self.shy.abs() < IDENTITY_EPSILON &&
            self.shx.abs() < IDENTITY_EPSILON &&
            (self.sy - 1.0).abs() < IDENTITY_EPSILON &&
            self.tx.abs() < IDENTITY_EPSILON &&
            self.ty.abs() < IDENTITY_EPSILON
    }
    /// Inverse transform, `None` if the transform is singular
    pub fn inverted(&self) -> Option<Transform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let d = 1.0 / det;
        let sx  =  self.sy  * d;
        let sy  =  self.sx  * d;
        let shy = -self.shy * d;
        let shx = -self.shx * d;
        let tx  = -self.tx * sx  - self.ty * shx;
        let ty  = -self.tx * shy - self.ty * sy;
        Some(Transform { sx, shy, shx, sy, tx, ty })
    }
}
