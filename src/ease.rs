//! Easing curves that remap animation progress
//!
//! Every curve is defined by its ease-in form. Ease-out mirrors it with
//! `1 - in(1 - t)`, and ease-in-out runs ease-in over the first half and ease-out
//! over the second one.
use crate::{Error, PI, Scalar};
use std::str::FromStr;

/// Overshoot of the back curve
pub const BACK_OVERSHOOT: Scalar = 1.70158;

/// Shape of an easing curve, see [`Easing`] for the direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EaseCurve {
    Quad,
    Cubic,
    Quart,
    Quint,
    /// `t` raised to a non-negative degree
    Poly(Scalar),
    Sine,
    Expo,
    Circ,
    /// Decaying oscillation, amplitudes below one are treated as one
    Elastic { amplitude: Scalar, period: Scalar },
    /// Overshoots the target by the given amount before settling
    Back(Scalar),
    Bounce,
}

impl EaseCurve {
    fn validate(&self) -> Result<(), Error> {
        match *self {
            EaseCurve::Poly(degree) if !(degree >= 0.0 && degree.is_finite()) => {
                Err(Error::InvalidArgument {
                    reason: format!("polynomial degree must be non-negative, got {}", degree),
                })
            }
            EaseCurve::Elastic { period, .. } if period.is_nan() || period <= 0.0 => {
                Err(Error::InvalidArgument {
                    reason: format!("elastic period must be positive, got {}", period),
                })
            }
            _ => Ok(()),
        }
    }

    /// Ease-in form of the curve
    fn ease_in(&self, t: Scalar) -> Scalar {
        match *self {
            EaseCurve::Quad => t * t,
            EaseCurve::Cubic => t * t * t,
            EaseCurve::Quart => t.powi(4),
            EaseCurve::Quint => t.powi(5),
            EaseCurve::Poly(degree) => t.powf(degree),
            EaseCurve::Sine => 1.0 - (t * PI / 2.0).cos(),
            EaseCurve::Expo if t == 0.0 => 0.0,
            EaseCurve::Expo => (10.0 * (t - 1.0)).exp2(),
            EaseCurve::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            EaseCurve::Elastic { amplitude, period } => {
                1.0 - elastic_out(1.0 - t, amplitude, period)
            }
            EaseCurve::Back(s) => t * t * ((s + 1.0) * t - s),
            EaseCurve::Bounce => 1.0 - bounce_out(1.0 - t),
        }
    }
}

fn elastic_out(t: Scalar, amplitude: Scalar, period: Scalar) -> Scalar {
    let (amplitude, shift) = if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / (2.0 * PI) * (1.0 / amplitude).asin())
    };
    amplitude * (-10.0 * t).exp2() * ((t - shift) * 2.0 * PI / period).sin() + 1.0
}

fn bounce_out(t: Scalar) -> Scalar {
    const SCALE: Scalar = 7.5625;
    if t < 1.0 / 2.75 {
        SCALE * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        SCALE * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        SCALE * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        SCALE * t * t + 0.984375
    }
}

/// Maps animation progress `t` in `[0, 1]` onto eased progress
///
/// Ends are fixed: `0` maps to `0` and `1` maps to `1`, in between curves like
/// [`EaseCurve::Back`] or [`EaseCurve::Elastic`] leave the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    In(EaseCurve),
    Out(EaseCurve),
    InOut(EaseCurve),
}

impl Easing {
    pub fn apply(&self, t: Scalar) -> Result<Scalar, Error> {
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::InvalidArgument {
                reason: format!("easing parameter must be within [0, 1], got {}", t),
            });
        }
        let curve = match self {
            Easing::Linear => return Ok(t),
            Easing::In(curve) | Easing::Out(curve) | Easing::InOut(curve) => curve,
        };
        curve.validate()?;
        if t == 0.0 || t == 1.0 {
            return Ok(t);
        }
        let value = match self {
            Easing::In(_) => curve.ease_in(t),
            Easing::Out(_) => 1.0 - curve.ease_in(1.0 - t),
            _ => {
                let curve = match *curve {
                    EaseCurve::Back(s) => EaseCurve::Back(s * 1.525),
                    curve => curve,
                };
                if t < 0.5 {
                    curve.ease_in(2.0 * t) / 2.0
                } else {
                    1.0 - curve.ease_in(2.0 - 2.0 * t) / 2.0
                }
            }
        };
        Ok(value)
    }
}

impl FromStr for Easing {
    type Err = Error;

    /// Parse names like `linear`, `ease_in_quad`, `ease_out_bounce` or
    /// `ease_in_out_elastic`, parametrized curves get their usual defaults.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::InvalidArgument {
            reason: format!("unknown easing: {}", name),
        };
        let name = name.trim().to_ascii_lowercase();
        if name == "linear" {
            return Ok(Easing::Linear);
        }
        let rest = name.strip_prefix("ease_").ok_or_else(unknown)?;
        let (direction, curve): (fn(EaseCurve) -> Easing, _) =
            if let Some(curve) = rest.strip_prefix("in_out_") {
                (Easing::InOut, curve)
            } else if let Some(curve) = rest.strip_prefix("in_") {
                (Easing::In, curve)
            } else if let Some(curve) = rest.strip_prefix("out_") {
                (Easing::Out, curve)
            } else {
                return Err(unknown());
            };
        let curve = match curve {
            "quad" => EaseCurve::Quad,
            "cubic" => EaseCurve::Cubic,
            "quart" => EaseCurve::Quart,
            "quint" => EaseCurve::Quint,
            "poly" => EaseCurve::Poly(2.0),
            "sine" => EaseCurve::Sine,
            "expo" => EaseCurve::Expo,
            "circ" => EaseCurve::Circ,
            "elastic" => EaseCurve::Elastic {
                amplitude: 1.0,
                period: if rest.starts_with("in_out_") { 0.5 } else { 0.3 },
            },
            "back" => EaseCurve::Back(BACK_OVERSHOOT),
            "bounce" => EaseCurve::Bounce,
            _ => return Err(unknown()),
        };
        Ok(direction(curve))
    }
}
