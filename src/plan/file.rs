use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FlypathError, FlypathResult};
use crate::plan::gazetteer::Gazetteer;
use crate::plan::model::{BorderGroup, BorderTiming, CompletedBorder, TripGroup, WaypointGroup};
use crate::plan::planner::{Throttle, plan_borders, plan_roads, plan_trips};

/// How editor input becomes paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Straight segments between geocoded stops.
    #[default]
    Direct,
    /// Road-routed segments between geocoded stops.
    Road,
    /// Traced outlines of named areas.
    Border,
}

impl PlanMode {
    /// Route modes mark the stops; border mode does not.
    pub fn shows_markers(self) -> bool {
        !matches!(self, Self::Border)
    }
}

/// Planning input file: editor groups plus the lookup table that resolves them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlanFile {
    pub mode: PlanMode,
    pub trips: Vec<TripGroup>,
    pub borders: Vec<BorderGroup>,
    pub border_timing: BorderTiming,
    pub gazetteer: Gazetteer,
}

/// Planning output handed to the animator.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ResolvedPlan {
    pub mode: PlanMode,
    pub groups: Vec<WaypointGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<CompletedBorder>,
}

impl PlanFile {
    pub fn from_path(path: &Path) -> FlypathResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read plan '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> FlypathResult<Self> {
        let plan: Self = serde_json::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> FlypathResult<()> {
        for group in &self.trips {
            if group.id.trim().is_empty() {
                return Err(FlypathError::validation("trip group id must be non-empty"));
            }
        }
        for group in &self.borders {
            if group.id.trim().is_empty() {
                return Err(FlypathError::validation(
                    "border group id must be non-empty",
                ));
            }
            for location in &group.locations {
                if let Some(secs) = location.duration_secs
                    && !(secs.is_finite() && secs >= 0.0)
                {
                    return Err(FlypathError::validation(format!(
                        "location '{}' has an invalid duration",
                        location.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve the groups for `mode` against the embedded gazetteer.
    pub async fn resolve(&self, mode: PlanMode, throttle: Throttle) -> FlypathResult<ResolvedPlan> {
        let g = &self.gazetteer;
        let (groups, borders) = match mode {
            PlanMode::Direct => (plan_trips(g, &self.trips, throttle).await?, Vec::new()),
            PlanMode::Road => (plan_roads(g, g, &self.trips, throttle).await?, Vec::new()),
            PlanMode::Border => {
                let plan = plan_borders(g, &self.borders, self.border_timing, throttle).await?;
                (plan.groups, plan.borders)
            }
        };
        Ok(ResolvedPlan {
            mode,
            groups,
            borders,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/file.rs"]
mod tests;
