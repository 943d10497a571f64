use rand::Rng;

/// Fixed tilt and sideways shift of a photo, so the stack looks hand-made.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scatter {
    pub x: f64,
    pub degrees: f64,
}

impl Scatter {
    /// The photo dealt on top lies straight; the deeper a photo starts, the
    /// more it is tilted.
    pub fn random(index: usize, top: usize, rng: &mut impl Rng) -> Self {
        if index == top {
            return Self::default();
        }

        let i = index as i64;
        let degrees = rng.gen_range(i * 4 + 1..=i * 5 + 5);

        let (a, b) = (signed(20, rng), signed(40, rng));
        let x = rng.gen_range(a.min(b)..=a.max(b));

        Self {
            x: x as f64,
            degrees: degrees as f64,
        }
    }

    pub fn deal(count: usize, enabled: bool) -> Vec<Self> {
        if !enabled {
            return vec![Self::default(); count];
        }
        let mut rng = rand::thread_rng();
        let top = count.saturating_sub(1);
        (0..count).map(|i| Self::random(i, top, &mut rng)).collect()
    }
}

fn signed(value: i64, rng: &mut impl Rng) -> i64 {
    if rng.gen_bool(0.5) { value } else { -value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_top_photo_is_straight() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(Scatter::random(4, 4, &mut rng), Scatter::default());
    }

    #[test]
    fn test_scatter_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            for index in 0..6 {
                let scatter = Scatter::random(index, 6, &mut rng);
                let i = index as f64;
                assert!(scatter.degrees >= i * 4.0 + 1.0);
                assert!(scatter.degrees <= i * 5.0 + 5.0);
                assert!(scatter.x.abs() <= 40.0);
            }
        }
    }

    #[test]
    fn test_deal_disabled() {
        let dealt = Scatter::deal(3, false);

        assert_eq!(dealt, vec![Scatter::default(); 3]);
    }

    #[test]
    fn test_deal_keeps_last_straight() {
        let dealt = Scatter::deal(5, true);

        assert_eq!(dealt.len(), 5);
        assert_eq!(dealt[4], Scatter::default());
        assert!(dealt[..4].iter().all(|s| s.degrees >= 1.0));
    }
}
