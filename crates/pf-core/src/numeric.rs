use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PfError::OutOfRange { what, value: v })
    }
}

/// Finite and not below zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(PfError::OutOfRange { what, value: v })
    }
}

/// Linear interpolation on a table sorted by ascending `x`.
///
/// Returns `None` when `x` lies outside `[xs[0], xs[n-1]]` or the table is empty.
pub fn interpolate(xs: &[Real], ys: &[Real], x: Real) -> Option<Real> {
    if xs.is_empty() || xs.len() != ys.len() || !x.is_finite() {
        return None;
    }
    let last = xs.len() - 1;
    if x < xs[0] || x > xs[last] {
        return None;
    }
    if last == 0 {
        return Some(ys[0]);
    }

    let i = xs.windows(2).position(|w| x >= w[0] && x <= w[1])?;
    let (x0, x1) = (xs[i], xs[i + 1]);
    let (y0, y1) = (ys[i], ys[i + 1]);
    if x1 == x0 {
        return Some(y0);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}
