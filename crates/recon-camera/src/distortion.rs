//! Forward and inverse lens distortion in normalized camera coordinates.
//!
//! The inverses are iterative Newton–Raphson solvers with no closed
//! form. Non-convergence is silent: after exhausting the iteration
//! budget, or when the Jacobian turns numerically singular, the best
//! estimate so far is returned.

/// Iteration budget of the Newton–Raphson inversions.
pub const MAX_NEWTON_ITERATIONS: usize = 20;

/// Residual bound at which an inversion counts as converged.
pub const NEWTON_TOLERANCE: f64 = 1e-10;

const SINGULAR_EPS: f64 = 1e-16;
const RADIUS_EPS: f64 = 1e-12;

/// Radial-tangential distortion coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadTan {
    /// Second-order radial coefficient.
    pub k1: f64,
    /// Fourth-order radial coefficient.
    pub k2: f64,
    /// First tangential coefficient.
    pub p1: f64,
    /// Second tangential coefficient.
    pub p2: f64,
}

/// Equidistant fisheye distortion coefficients on the polar angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fisheye {
    /// θ² coefficient.
    pub k1: f64,
    /// θ⁴ coefficient.
    pub k2: f64,
    /// θ⁶ coefficient.
    pub k3: f64,
    /// θ⁸ coefficient.
    pub k4: f64,
}

impl RadTan {
    /// Apply forward radial-tangential distortion.
    pub fn distort(&self, x: f64, y: f64) -> (f64, f64) {
        let r2 = x * x + y * y;
        let radial = 1.0 + r2 * (self.k1 + r2 * self.k2);
        let xd = x * radial + 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + 2.0 * self.p2 * x * y + self.p1 * (r2 + 2.0 * y * y);
        (xd, yd)
    }

    /// Invert the distortion with a 2×2 Newton–Raphson iteration.
    pub fn undistort(&self, xd: f64, yd: f64) -> (f64, f64) {
        let (mut x, mut y) = (xd, yd);
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (fx, fy) = self.distort(x, y);
            let rx = fx - xd;
            let ry = fy - yd;
            if rx.abs().max(ry.abs()) < NEWTON_TOLERANCE {
                break;
            }
            let r2 = x * x + y * y;
            let radial = 1.0 + r2 * (self.k1 + r2 * self.k2);
            let dradial = self.k1 + 2.0 * self.k2 * r2;
            let j00 = radial + 2.0 * x * x * dradial + 2.0 * self.p1 * y + 6.0 * self.p2 * x;
            let j01 = 2.0 * x * y * dradial + 2.0 * self.p1 * x + 2.0 * self.p2 * y;
            let j10 = 2.0 * x * y * dradial + 2.0 * self.p2 * y + 2.0 * self.p1 * x;
            let j11 = radial + 2.0 * y * y * dradial + 2.0 * self.p2 * x + 6.0 * self.p1 * y;
            let det = j00 * j11 - j01 * j10;
            if det.abs() < SINGULAR_EPS {
                break;
            }
            x -= (j11 * rx - j01 * ry) / det;
            y -= (j00 * ry - j10 * rx) / det;
        }
        (x, y)
    }
}

impl Fisheye {
    fn theta_d(&self, theta: f64) -> f64 {
        let t2 = theta * theta;
        theta * (1.0 + t2 * (self.k1 + t2 * (self.k2 + t2 * (self.k3 + t2 * self.k4))))
    }

    /// Apply forward equidistant fisheye distortion.
    pub fn distort(&self, x: f64, y: f64) -> (f64, f64) {
        let r = (x * x + y * y).sqrt();
        if r < RADIUS_EPS {
            return (x, y);
        }
        let theta = r.atan();
        let scale = self.theta_d(theta) / r;
        (x * scale, y * scale)
    }

    /// Invert the distortion with a scalar Newton–Raphson iteration on θ.
    pub fn undistort(&self, xd: f64, yd: f64) -> (f64, f64) {
        let rd = (xd * xd + yd * yd).sqrt();
        if rd < RADIUS_EPS {
            return (xd, yd);
        }
        // for normalized coordinates the distorted radius is θ_d itself
        let mut theta = rd;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let residual = self.theta_d(theta) - rd;
            if residual.abs() < NEWTON_TOLERANCE {
                break;
            }
            let t2 = theta * theta;
            let derivative = 1.0
                + t2 * (3.0 * self.k1
                    + t2 * (5.0 * self.k2 + t2 * (7.0 * self.k3 + t2 * 9.0 * self.k4)));
            if derivative.abs() < SINGULAR_EPS {
                break;
            }
            theta -= residual / derivative;
        }
        let scale = theta.tan() / rd;
        (xd * scale, yd * scale)
    }
}

/// Apply forward field-of-view distortion.
pub fn distort_fov(omega: f64, x: f64, y: f64) -> (f64, f64) {
    if omega.abs() < RADIUS_EPS {
        return (x, y);
    }
    let r = (x * x + y * y).sqrt();
    if r < RADIUS_EPS {
        return (x, y);
    }
    let rd = (2.0 * r * (omega / 2.0).tan()).atan() / omega;
    (x * rd / r, y * rd / r)
}

/// Invert field-of-view distortion. Unlike the polynomial models this
/// has a closed form.
pub fn undistort_fov(omega: f64, xd: f64, yd: f64) -> (f64, f64) {
    if omega.abs() < RADIUS_EPS {
        return (xd, yd);
    }
    let rd = (xd * xd + yd * yd).sqrt();
    if rd < RADIUS_EPS {
        return (xd, yd);
    }
    let r = (rd * omega).tan() / (2.0 * (omega / 2.0).tan());
    (xd * r / rd, yd * r / rd)
}
