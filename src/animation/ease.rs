/// Easing curves for the pulse ring sub-animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// `t * (2 - t)`: fast start, gentle landing.
    OutQuad,
}

impl Ease {
    /// Map normalized time `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => t * (2.0 - t),
        }
    }

    /// Value between `from` and `to` at eased time `t`.
    pub fn tween(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
