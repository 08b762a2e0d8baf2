//! Scalar values carrying a standard deviation, with first-order
//! (linearized) uncertainty propagation through the operations the
//! pipeline needs: negation, scaling, exponentiation, and powers.

use std::ops::{Div, Mul, Neg};

/// A value paired with the standard deviation of its estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uncertain {
    pub value: f64,
    pub std_dev: f64,
}

impl Uncertain {
    pub fn new(value: f64, std_dev: f64) -> Self {
        Uncertain {
            value,
            std_dev: std_dev.abs(),
        }
    }

    /// A value with no uncertainty attached
    pub fn exact(value: f64) -> Self {
        Uncertain::new(value, 0.0)
    }

    /// e^x, with σ_y = |y|·σ_x
    pub fn exp(self) -> Self {
        let value = self.value.exp();
        Uncertain::new(value, value.abs() * self.std_dev)
    }

    /// x^a for a scalar exponent, with σ_y = |a·x^(a−1)|·σ_x
    pub fn powf(self, exponent: f64) -> Self {
        let value = self.value.powf(exponent);
        let derivative = exponent * self.value.powf(exponent - 1.0);
        Uncertain::new(value, derivative.abs() * self.std_dev)
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite() && self.std_dev.is_finite()
    }
}

impl Neg for Uncertain {
    type Output = Uncertain;

    fn neg(self) -> Uncertain {
        Uncertain::new(-self.value, self.std_dev)
    }
}

impl Mul<f64> for Uncertain {
    type Output = Uncertain;

    fn mul(self, rhs: f64) -> Uncertain {
        Uncertain::new(self.value * rhs, self.std_dev * rhs.abs())
    }
}

impl Div<f64> for Uncertain {
    type Output = Uncertain;

    fn div(self, rhs: f64) -> Uncertain {
        Uncertain::new(self.value / rhs, self.std_dev / rhs.abs())
    }
}

#[cfg(test)]
mod tests {
    use crate::thermo::uncertain::Uncertain;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_exp_propagation() {
        let x = Uncertain::new(2.0, 0.1);
        let y = x.exp();
        assert!(close(y.value, 2.0f64.exp()));
        assert!(close(y.std_dev, 2.0f64.exp() * 0.1));
    }

    #[test]
    fn test_powf_propagation() {
        let x = Uncertain::new(4.0, 0.5);
        let y = x.powf(2.0);
        assert!(close(y.value, 16.0));
        // |2 * 4| * 0.5
        assert!(close(y.std_dev, 4.0));
    }

    #[test]
    fn test_scalar_ops() {
        let x = Uncertain::new(10.0, 2.0);
        let scaled = x / -4.0;
        assert!(close(scaled.value, -2.5));
        assert!(close(scaled.std_dev, 0.5));
        let negated = -x;
        assert!(close(negated.value, -10.0));
        assert!(close(negated.std_dev, 2.0));
        let product = x * 3.0;
        assert!(close(product.value, 30.0));
        assert!(close(product.std_dev, 6.0));
    }
}
