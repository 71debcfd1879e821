//! Easing functions over normalized progress.

use std::f32::consts::{PI, TAU};

/// Maps linear progress `t` in [0, 1] to eased progress. Every variant
/// fixes the endpoints: `apply(0) == 0` and `apply(1) == 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SinusoidalInOut,
    ExponentialOut,
    BounceOut,
    ElasticOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    1.0 - u * u * 0.5
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    u * u * u * 0.5 + 1.0
                }
            }
            Easing::SinusoidalInOut => -(0.5 * ((PI * t).cos() - 1.0)),
            Easing::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let p = 0.4;
                    let s = p / 4.0;
                    2f32.powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
                }
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / 2.75 {
        7.5625 * t * t
    } else if t < 2.0 / 2.75 {
        let u = t - 1.5 / 2.75;
        7.5625 * u * u + 0.75
    } else if t < 2.5 / 2.75 {
        let u = t - 2.25 / 2.75;
        7.5625 * u * u + 0.9375
    } else {
        let u = t - 2.625 / 2.75;
        7.5625 * u * u + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SinusoidalInOut,
        Easing::ExponentialOut,
        Easing::BounceOut,
        Easing::ElasticOut,
    ];

    #[test]
    fn test_every_easing_fixes_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_inputs_outside_the_interval_clamp() {
        assert_eq!(Easing::QuadIn.apply(-1.0), 0.0);
        assert_eq!(Easing::QuadIn.apply(2.0), 1.0);
    }

    #[test]
    fn test_quad_shapes() {
        assert!(Easing::QuadIn.apply(0.5) < 0.5);
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
        assert_eq!(Easing::QuadInOut.apply(0.5), 0.5);
    }

    #[test]
    fn test_elastic_overshoots() {
        let max = (1..100)
            .map(|i| Easing::ElasticOut.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max > 1.0);
    }
}
