use crate::position::{Position, Role};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VERTICAL_STEP: f64 = 20.0;
pub const DEFAULT_DEPTH_STEP: f64 = 10.0;

/// Distance covered per slot on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSteps {
    pub vertical: f64,
    pub depth: f64,
}

impl Default for AxisSteps {
    fn default() -> Self {
        Self {
            vertical: DEFAULT_VERTICAL_STEP,
            depth: DEFAULT_DEPTH_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisOffset {
    pub vertical: f64,
    pub depth: f64,
}

/// Below items hang under the top item, above items pile over it. This is the
/// only role-sensitive axis.
pub fn vertical_offset<I>(position: &Position<I>, step: f64) -> f64 {
    if position.is_on_top() {
        return 0.0;
    }
    let distance = position.distance() as f64;
    match position.role {
        Role::Below => step * distance,
        Role::Above => -step * distance,
        Role::OnTop => 0.0,
    }
}

/// Items recede the farther they are from the top, whatever their arc.
pub fn depth_offset<I>(position: &Position<I>, step: f64) -> f64 {
    if position.is_on_top() {
        return 0.0;
    }
    -step * position.distance() as f64
}

pub fn project<I>(position: &Position<I>, steps: AxisSteps) -> AxisOffset {
    AxisOffset {
        vertical: vertical_offset(position, steps.vertical),
        depth: depth_offset(position, steps.depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(slot: usize, role: Role) -> Position<&'static str> {
        Position::new("@", slot, role, 2)
    }

    #[test]
    fn test_top_sits_at_origin() {
        let top = at(2, Role::OnTop);

        assert_eq!(vertical_offset(&top, 10.0), 0.0);
        assert_eq!(depth_offset(&top, 10.0), 0.0);
    }

    #[test]
    fn test_vertical_offset_by_role() {
        assert_eq!(vertical_offset(&at(1, Role::Below), 10.0), 10.0);
        assert_eq!(vertical_offset(&at(0, Role::Below), 10.0), 20.0);
        assert_eq!(vertical_offset(&at(1, Role::Above), 10.0), -10.0);
        assert_eq!(vertical_offset(&at(0, Role::Above), 10.0), -20.0);
    }

    #[test]
    fn test_depth_ignores_role() {
        assert_eq!(depth_offset(&at(0, Role::Below), 10.0), -20.0);
        assert_eq!(depth_offset(&at(0, Role::Above), 10.0), -20.0);
        assert_eq!(depth_offset(&at(1, Role::Above), 4.0), -4.0);
    }

    #[test]
    fn test_project_uses_both_steps() {
        let offset = project(&at(0, Role::Above), AxisSteps::default());

        assert_eq!(
            offset,
            AxisOffset {
                vertical: -40.0,
                depth: -20.0
            }
        );
    }

    #[test]
    fn test_axis_steps_defaults_from_partial_json() {
        let steps: AxisSteps = serde_json::from_str(r#"{"depth": 4.5}"#).unwrap();

        assert_eq!(steps.vertical, DEFAULT_VERTICAL_STEP);
        assert_eq!(steps.depth, 4.5);
    }
}
