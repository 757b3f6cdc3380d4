//! Unit tests for rb-core primitives.

#[cfg(test)]
mod ids {
    use crate::ListenerId;

    #[test]
    fn ordering_and_next() {
        let id = ListenerId(4);
        assert_eq!(id.next(), ListenerId(5));
        assert!(ListenerId(0) < ListenerId(1));
    }

    #[test]
    fn display() {
        assert_eq!(ListenerId(7).to_string(), "ListenerId(7)");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::{Point, apply_limits, normalize_radians};

    #[test]
    fn zero_distance() {
        let p = Point::new(100.0, 100.0);
        assert_eq!(p.distance_to(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn bearing_is_normalized() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(origin.bearing_to(Point::new(1.0, 0.0)), 0.0);
        assert!((origin.bearing_to(Point::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        // Straight "up" on screen is -π/2 from atan2, folded to 3π/2.
        assert!((origin.bearing_to(Point::new(0.0, -1.0)) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn normalize_range() {
        assert_eq!(normalize_radians(0.0), 0.0);
        assert_eq!(normalize_radians(TAU), 0.0);
        assert!((normalize_radians(-PI) - PI).abs() < 1e-12);
        assert!((normalize_radians(5.0 * TAU + 1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_tau() {
        let n = normalize_radians(-1e-20);
        assert!((0.0..TAU).contains(&n), "got {n}");
    }

    #[test]
    fn normalize_non_finite_maps_to_zero() {
        assert_eq!(normalize_radians(f64::NAN), 0.0);
        assert_eq!(normalize_radians(f64::INFINITY), 0.0);
    }

    #[test]
    fn limits_clamp() {
        assert_eq!(apply_limits(5.0, 0.0, 1.0), 1.0);
        assert_eq!(apply_limits(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(apply_limits(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn point_from_integer_pair() {
        assert_eq!(Point::from((150, 100)), Point::new(150.0, 100.0));
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{CoreError, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick::ZERO + 1, Tick(1));
        assert_eq!(Tick(3).to_string(), "T3");
    }

    #[test]
    fn default_config_matches_legacy_periods() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.step_period(), Duration::from_millis(10));
        assert_eq!(cfg.redraw_period(), Some(Duration::from_millis(50)));
        assert_eq!(cfg.step_dt_ms, 10.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_step_period_rejected() {
        let cfg = SimConfig { step_period_ms: 0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_redraw_period_rejected() {
        let cfg = SimConfig { redraw_period_ms: Some(0), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn no_redraw_period_is_valid() {
        let cfg = SimConfig { redraw_period_ms: None, ..SimConfig::default() };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.redraw_period(), None);
    }

    #[test]
    fn bad_dt_rejected() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig { step_dt_ms: dt, ..SimConfig::default() };
            assert!(cfg.validate().is_err(), "dt {dt} should be rejected");
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_config {
    use crate::SimConfig;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{ "redraw_period_ms": null }"#).unwrap();
        assert_eq!(cfg.redraw_period_ms, None);
        assert_eq!(cfg.step_period_ms, 10);
        assert_eq!(cfg.step_dt_ms, 10.0);
    }
}
