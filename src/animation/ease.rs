/// Easing curves used by presentation transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    #[default]
    InOutQuad,
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Eased interpolation from `from` to `to` over `duration_secs`, sampled at `t_secs`.
    pub fn tween(self, from: f64, to: f64, t_secs: f64, duration_secs: f64) -> f64 {
        let p = if duration_secs <= 0.0 {
            1.0
        } else {
            t_secs / duration_secs
        };
        from + (to - from) * self.apply(p)
    }

    /// Looping `[0, 1, 0]` keyframe cycle of `period_secs`, sampled at `t_secs`.
    pub fn pulse(self, t_secs: f64, period_secs: f64) -> f64 {
        if period_secs <= 0.0 {
            return 0.0;
        }
        let phase = t_secs.rem_euclid(period_secs) / period_secs;
        if phase < 0.5 {
            self.apply(phase * 2.0)
        } else {
            self.apply((1.0 - phase) * 2.0)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
