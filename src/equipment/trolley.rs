use std::rc::Rc;

use nalgebra as na;

use crate::equipment::cargo::Cargo;
use crate::equipment::hook::{AttachmentChange, Hook, HookError};
use crate::physics::{advance_fraction, clamp01, PhysicsWorld};
use crate::specification::CraneSpecification;
use crate::types::*;

/// Below this marker separation the travel axis is treated as degenerate
const MIN_MARKER_SEPARATION: f64 = 0.01;

/// Endpoints of trolley travel along the jib, in the jib frame (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelMarkers {
    /// Closest point to the mast (position 0)
    pub start: na::Point3<f64>,
    /// Farthest point out on the jib (position 1)
    pub end: na::Point3<f64>,
}

impl TravelMarkers {
    /// Markers synthesized when none are placed: from `placement` out
    /// along `facing` for `reach`.
    pub fn fallback(placement: na::Point3<f64>, facing: na::Vector3<f64>, reach: Length) -> Self {
        let direction = match facing.try_normalize(1e-9) {
            Some(direction) => direction,
            None => {
                log::warn!("Trolley facing direction is degenerate; travelling along +Z");
                na::Vector3::z()
            }
        };

        Self {
            start: placement,
            end: placement + direction * to_coord(reach),
        }
    }

    pub fn length(&self) -> f64 {
        na::distance(&self.start, &self.end)
    }

    /// Point at normalized `position` between the markers
    pub fn lerp(&self, position: f64) -> na::Point3<f64> {
        self.start + (self.end - self.start) * clamp01(position)
    }

    /// Normalized position of `point` projected onto the marker axis.
    /// A degenerate axis projects everything to 0.
    pub fn project(&self, point: &na::Point3<f64>) -> f64 {
        let axis = self.end - self.start;
        let length = axis.norm();
        if !(length > MIN_MARKER_SEPARATION) {
            return 0.0;
        }

        clamp01((*point - self.start).dot(&axis) / (length * length))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelIntent {
    #[default]
    Idle,
    /// Out along the jib, toward position 1
    Forward,
    /// In toward the mast, toward position 0
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoistIntent {
    #[default]
    Idle,
    Down,
    Up,
}

/// Carriage running along the jib with the hook hanging below.
///
/// Position and hook depth are normalized to [0, 1] and integrated at
/// `speed * dt / range`, where the ranges are the specification's trolley
/// reach and hook depth.
#[derive(Debug)]
pub struct Trolley {
    spec: CraneSpecification,

    /// Where the trolley was mounted, in the jib frame
    placement: na::Point3<f64>,
    markers: TravelMarkers,

    position: f64,
    hook_depth: f64,

    travel: TravelIntent,
    hoist: HoistIntent,

    hook: Option<Hook>,
}

impl Trolley {
    /// Trolley mounted at `placement`, travelling along `facing` for the
    /// specification's maximum distance
    pub fn new(spec: CraneSpecification, placement: na::Point3<f64>, facing: na::Vector3<f64>) -> Self {
        let markers = TravelMarkers::fallback(placement, facing, spec.trolley_max_distance);

        Self {
            spec,
            placement,
            markers,
            position: markers.project(&placement),
            hook_depth: 0.0,
            travel: TravelIntent::Idle,
            hoist: HoistIntent::Idle,
            hook: None,
        }
    }

    /// Use placed markers; the starting position is the mount point
    /// projected onto them
    pub fn with_markers(mut self, markers: TravelMarkers) -> Self {
        self.markers = markers;
        self.position = markers.project(&self.placement);
        self
    }

    /// Mount the hook at anchor level
    pub fn with_hook(mut self, mut hook: Hook) -> Self {
        hook.set_suspension_height(0.0);
        self.hook_depth = 0.0;
        self.hook = Some(hook);
        self
    }

    pub fn markers(&self) -> &TravelMarkers {
        &self.markers
    }

    pub fn hook(&self) -> Option<&Hook> {
        self.hook.as_ref()
    }

    pub fn hook_mut(&mut self) -> Option<&mut Hook> {
        self.hook.as_mut()
    }

    pub fn move_forward(&mut self) {
        self.travel = TravelIntent::Forward;
    }

    pub fn move_backward(&mut self) {
        self.travel = TravelIntent::Backward;
    }

    pub fn stop_movement(&mut self) {
        self.travel = TravelIntent::Idle;
    }

    /// Jump to a normalized position (0 = mast, 1 = jib tip)
    pub fn set_position(&mut self, position: f64) {
        self.position = clamp01(position);
    }

    pub fn move_hook_down(&mut self) {
        if self.hook.is_none() {
            log::warn!("Hoist command ignored: no hook mounted on trolley");
            return;
        }
        self.hoist = HoistIntent::Down;
    }

    pub fn move_hook_up(&mut self) {
        if self.hook.is_none() {
            log::warn!("Hoist command ignored: no hook mounted on trolley");
            return;
        }
        self.hoist = HoistIntent::Up;
    }

    pub fn stop_hook_movement(&mut self) {
        self.hoist = HoistIntent::Idle;
    }

    /// Jump to a normalized depth (0 = anchor level, 1 = max depth)
    pub fn set_hook_depth(&mut self, depth: f64) {
        self.hook_depth = clamp01(depth);
        self.write_hook_depth();
    }

    pub fn tick(&mut self, dt: Time) {
        let dt = dt.get::<second>();
        if !(dt > 0.0) {
            return;
        }

        let travel_speed = self.spec.trolley_move_speed.get::<meter_per_second>();
        let reach = self.spec.trolley_max_distance.get::<meter>();
        match self.travel {
            TravelIntent::Forward if self.position < 1.0 => {
                self.position = advance_fraction(self.position, 1.0, travel_speed, dt, reach);
            }
            TravelIntent::Backward if self.position > 0.0 => {
                self.position = advance_fraction(self.position, -1.0, travel_speed, dt, reach);
            }
            _ => {}
        }

        if self.hook.is_none() {
            return;
        }

        let hoist_speed = self.spec.hook_move_speed.get::<meter_per_second>();
        let max_depth = self.spec.hook_max_depth.get::<meter>();
        let moved = match self.hoist {
            HoistIntent::Down if self.hook_depth < 1.0 => {
                self.hook_depth = advance_fraction(self.hook_depth, 1.0, hoist_speed, dt, max_depth);
                true
            }
            HoistIntent::Up if self.hook_depth > 0.0 => {
                self.hook_depth = advance_fraction(self.hook_depth, -1.0, hoist_speed, dt, max_depth);
                true
            }
            _ => false,
        };

        if moved {
            self.write_hook_depth();
        }
    }

    fn write_hook_depth(&mut self) {
        let max_depth = self.spec.hook_max_depth.get::<meter>();
        if let Some(hook) = self.hook.as_mut() {
            hook.set_suspension_height(-max_depth * self.hook_depth);
        }
    }

    pub fn travel_intent(&self) -> TravelIntent {
        self.travel
    }

    pub fn hoist_intent(&self) -> HoistIntent {
        self.hoist
    }

    /// Normalized position in [0, 1]
    pub fn current_position(&self) -> f64 {
        self.position
    }

    /// Normalized hook depth in [0, 1]
    pub fn current_hook_depth(&self) -> f64 {
        self.hook_depth
    }

    /// Distance travelled out from the start marker
    pub fn travel_distance(&self) -> Length {
        from_coord(self.position * self.markers.length())
    }

    /// Cable paid out below the anchor
    pub fn hook_drop(&self) -> Length {
        from_coord(self.hook_depth * to_coord(self.spec.hook_max_depth))
    }

    /// Trolley position in the jib frame
    pub fn local_position(&self) -> na::Point3<f64> {
        self.markers.lerp(self.position)
    }

    /// Cable joint target offset, zero without a hook
    pub fn hook_target_position(&self) -> na::Vector3<f64> {
        self.hook
            .as_ref()
            .map(Hook::suspension_target)
            .unwrap_or_else(na::Vector3::zeros)
    }

    pub fn has_cargo_attached(&self) -> bool {
        self.hook.as_ref().is_some_and(Hook::has_cargo_attached)
    }

    /// Mass hanging on the hook
    pub fn current_hook_load(&self) -> Mass {
        self.hook
            .as_ref()
            .map(Hook::current_load_mass)
            .unwrap_or_else(|| Mass::new::<kilogram>(0.0))
    }

    /// Reaction force on the hook joint
    pub fn current_hook_load_force(&self, physics: &dyn PhysicsWorld) -> Force {
        self.hook
            .as_ref()
            .map(|hook| hook.current_load(physics))
            .unwrap_or_else(|| Force::new::<newton>(0.0))
    }

    fn mounted_hook(&mut self) -> Result<&mut Hook, HookError> {
        self.hook.as_mut().ok_or_else(|| {
            log::warn!("Cargo command ignored: no hook mounted on trolley");
            HookError::NotMounted
        })
    }

    pub fn attach_cargo(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Rc<Cargo>, HookError> {
        self.mounted_hook()?.attach(physics)
    }

    pub fn detach_cargo(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Option<Rc<Cargo>>, HookError> {
        self.mounted_hook()?.detach(physics)
    }

    pub fn toggle_cargo_attachment(
        &mut self,
        physics: &mut dyn PhysicsWorld,
    ) -> Result<AttachmentChange, HookError> {
        self.mounted_hook()?.toggle_attachment(physics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::hook::HookConfig;
    use crate::physics::{BodyHandle, KinematicWorld};
    use approx::assert_relative_eq;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn trolley() -> Trolley {
        Trolley::new(
            CraneSpecification::default(),
            na::Point3::new(0.0, 30.0, 2.0),
            na::Vector3::new(0.0, 0.0, 1.0),
        )
    }

    fn trolley_with_hook() -> Trolley {
        trolley().with_hook(Hook::new(BodyHandle(1), HookConfig::default()))
    }

    #[test]
    fn test_fallback_markers_span_max_distance() {
        let trolley = trolley();
        let markers = trolley.markers();

        assert_relative_eq!(markers.length(), 20.0, epsilon = 1e-12);
        assert_relative_eq!(markers.end.z, 22.0, epsilon = 1e-12);
        assert_relative_eq!(trolley.current_position(), 0.0);
    }

    #[test]
    fn test_forward_travel_rate() {
        let mut trolley = trolley();
        trolley.move_forward();
        trolley.tick(seconds(1.0));

        // 5 m/s over a 20 m reach
        assert_relative_eq!(trolley.current_position(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(trolley.travel_distance().get::<meter>(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(trolley.local_position().z, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_travel_clamps_at_end() {
        let mut trolley = trolley();
        trolley.set_position(0.9);
        trolley.move_forward();
        trolley.tick(seconds(1.0));

        assert_relative_eq!(trolley.current_position(), 1.0);
    }

    #[test]
    fn test_backward_travel_clamps_at_start() {
        let mut trolley = trolley();
        trolley.set_position(0.1);
        trolley.move_backward();
        trolley.tick(seconds(1.0));
        assert_relative_eq!(trolley.current_position(), 0.0);

        trolley.stop_movement();
        trolley.tick(seconds(1.0));
        assert_relative_eq!(trolley.current_position(), 0.0);
    }

    #[test]
    fn test_long_hold_stays_in_range() {
        let mut trolley = trolley_with_hook();
        trolley.move_forward();
        trolley.move_hook_down();
        for step in 0..2000 {
            trolley.tick(seconds(0.013 * (1 + step % 7) as f64));
            assert!((0.0..=1.0).contains(&trolley.current_position()));
            assert!((0.0..=1.0).contains(&trolley.current_hook_depth()));
        }
        assert_relative_eq!(trolley.current_position(), 1.0);
        assert_relative_eq!(trolley.current_hook_depth(), 1.0);
    }

    #[test]
    fn test_set_position_clamps() {
        let mut trolley = trolley();
        trolley.set_position(1.7);
        assert_relative_eq!(trolley.current_position(), 1.0);
        trolley.set_position(-0.3);
        assert_relative_eq!(trolley.current_position(), 0.0);
    }

    #[test]
    fn test_placed_markers_project_mount_point() {
        let trolley = trolley().with_markers(TravelMarkers {
            start: na::Point3::new(0.0, 30.0, -2.0),
            end: na::Point3::new(0.0, 30.0, 18.0),
        });

        assert_relative_eq!(trolley.current_position(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_markers_project_to_zero() {
        let mut trolley = trolley().with_markers(TravelMarkers {
            start: na::Point3::new(0.0, 30.0, 2.0),
            end: na::Point3::new(0.0, 30.0, 2.005),
        });
        assert_relative_eq!(trolley.current_position(), 0.0);

        trolley.move_forward();
        trolley.tick(seconds(0.5));
        assert!(trolley.current_position() <= 1.0);
    }

    #[test]
    fn test_hook_depth_drives_suspension_target() {
        let mut trolley = trolley_with_hook();
        trolley.move_hook_down();
        trolley.tick(seconds(1.0));

        // 3 m/s over a 15 m drop
        assert_relative_eq!(trolley.current_hook_depth(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(trolley.hook_target_position().y, -3.0, epsilon = 1e-9);
        assert_relative_eq!(trolley.hook_drop().get::<meter>(), 3.0, epsilon = 1e-9);

        trolley.move_hook_up();
        trolley.tick(seconds(2.0));
        assert_relative_eq!(trolley.current_hook_depth(), 0.0);
        assert_relative_eq!(trolley.hook_target_position().y, 0.0);
    }

    #[test]
    fn test_set_hook_depth_clamps_and_writes_target() {
        let mut trolley = trolley_with_hook();
        trolley.set_hook_depth(2.0);
        assert_relative_eq!(trolley.current_hook_depth(), 1.0);
        assert_relative_eq!(trolley.hook_target_position().y, -15.0);
    }

    #[test]
    fn test_mounting_hook_resets_depth() {
        let mut hook = Hook::new(BodyHandle(1), HookConfig::default());
        hook.set_suspension_height(-7.0);

        let trolley = trolley().with_hook(hook);
        assert_relative_eq!(trolley.hook_target_position().y, 0.0);
        assert_relative_eq!(trolley.current_hook_depth(), 0.0);
    }

    #[test]
    fn test_missing_hook_ignores_hoist_and_reports_no_load() {
        let mut trolley = trolley();
        let mut world = KinematicWorld::new();

        trolley.move_hook_down();
        trolley.tick(seconds(1.0));

        assert_eq!(trolley.hoist_intent(), HoistIntent::Idle);
        assert_relative_eq!(trolley.current_hook_depth(), 0.0);
        assert_relative_eq!(trolley.current_hook_load().get::<kilogram>(), 0.0);
        assert_relative_eq!(trolley.current_hook_load_force(&world).get::<newton>(), 0.0);
        assert!(!trolley.has_cargo_attached());
        assert_eq!(trolley.hook_target_position(), na::Vector3::zeros());
        assert!(matches!(
            trolley.toggle_cargo_attachment(&mut world),
            Err(HookError::NotMounted)
        ));
    }

    #[test]
    fn test_attach_through_trolley_reports_load() {
        let mut world = KinematicWorld::new();
        let hook_body = world.add_body(na::Point3::new(0.0, 20.0, 5.0), Mass::new::<kilogram>(80.0));
        let cargo_mass = Mass::new::<kilogram>(6000.0);
        let cargo_body = world.add_body(na::Point3::new(0.0, 19.0, 5.0), cargo_mass);
        let cargo = Rc::new(Cargo::new("rebar bundle", cargo_body, cargo_mass).unwrap());

        let mut trolley = trolley().with_hook(Hook::new(hook_body, HookConfig::default()));
        if let Some(hook) = trolley.hook_mut() {
            hook.on_proximity_enter(&cargo);
        }

        trolley.attach_cargo(&mut world).unwrap();
        assert!(trolley.has_cargo_attached());
        assert_relative_eq!(trolley.current_hook_load().get::<kilogram>(), 6000.0);
        assert_relative_eq!(
            trolley.current_hook_load_force(&world).get::<newton>(),
            6000.0 * 9.80665,
            epsilon = 1e-6
        );

        trolley.detach_cargo(&mut world).unwrap();
        assert!(!trolley.has_cargo_attached());
    }
}
