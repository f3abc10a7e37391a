use super::*;

pub type Floating = f64;

/// The sup-norm (`max_i |x_i|`). `nalgebra::DVector` ships 2-norms and dot
/// products directly but has no built-in infinity norm.
pub trait InfinityNorm {
    fn inf_norm(&self) -> Floating;
}

impl InfinityNorm for DVector<Floating> {
    fn inf_norm(&self) -> Floating {
        self.iter().fold(0.0, |acc, x| acc.max(x.abs()))
    }
}

/// `a * u + b * v`, built fresh rather than mutating either operand.
pub fn linear_combination(
    a: Floating,
    u: &DVector<Floating>,
    b: Floating,
    v: &DVector<Floating>,
) -> DVector<Floating> {
    u * a + v * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inf_norm_picks_largest_magnitude() {
        let v = DVector::from_vec(vec![-1.0, 3.0, -7.0, 2.0]);
        assert_eq!(v.inf_norm(), 7.0);
    }

    #[test]
    fn inf_norm_of_zero_is_zero() {
        let v: DVector<Floating> = DVector::zeros(5);
        assert_eq!(v.inf_norm(), 0.0);
    }

    #[test]
    fn linear_combination_matches_hand_computation() {
        let u = DVector::from_vec(vec![1.0, 2.0]);
        let v = DVector::from_vec(vec![3.0, 4.0]);
        let w = linear_combination(2.0, &u, -1.0, &v);
        assert_eq!(w, DVector::from_vec(vec![-1.0, 0.0]));
    }
}
