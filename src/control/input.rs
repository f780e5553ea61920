/// Level state of every crane control at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSample {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub trolley_forward: bool,
    pub trolley_backward: bool,
    pub hook_down: bool,
    pub hook_up: bool,
    /// Attach/detach toggle button
    pub attach: bool,
}

/// Tri-state of one control axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisDirection {
    #[default]
    Neutral,
    Negative,
    Positive,
}

impl AxisDirection {
    /// Combine the two buttons of an axis. Both held cancels out.
    pub fn resolve(negative: bool, positive: bool) -> Self {
        match (negative, positive) {
            (true, false) => AxisDirection::Negative,
            (false, true) => AxisDirection::Positive,
            _ => AxisDirection::Neutral,
        }
    }
}

/// Source of control samples, owned by the host.
///
/// The controller switches the service between crane and UI input maps
/// when controls are enabled or disabled.
pub trait InputService {
    fn switch_to_crane(&mut self);

    fn switch_to_ui(&mut self);

    /// Current level state of the crane controls
    fn sample(&mut self) -> ControlSample;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_axis() {
        assert_eq!(AxisDirection::resolve(false, false), AxisDirection::Neutral);
        assert_eq!(AxisDirection::resolve(true, false), AxisDirection::Negative);
        assert_eq!(AxisDirection::resolve(false, true), AxisDirection::Positive);
        assert_eq!(AxisDirection::resolve(true, true), AxisDirection::Neutral);
    }
}
