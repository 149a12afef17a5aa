use rand::Rng;

#[inline]
pub fn interp(loc: f64, min: f64, max: f64) -> f64 {
    loc * (max - min) + min
}

#[inline]
pub fn clip(value: f64, low: f64, high: f64) -> f64 {
    value.max(low).min(high)
}

// whole number in [0, scale), e.g. random(rng, 3.0) is one of 0, 1, 2
pub fn random<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    (rng.random::<f64>() * scale).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_interp_midpoint() {
        assert!((interp(0.5, 0.2, 0.4) - 0.3).abs() < 1e-12);
        assert_eq!(interp(0.0, 0.7, 0.1), 0.7);
        assert!((interp(1.0, 0.7, 0.1) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip(1.3, 0.0, 1.0), 1.0);
        assert_eq!(clip(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(clip(0.4, 0.0, 1.0), 0.4);
    }

    #[test]
    fn test_random_is_whole_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let r = random(&mut rng, 3.0);
            assert_eq!(r, r.floor());
            assert!((0.0..3.0).contains(&r));
            seen[r as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
