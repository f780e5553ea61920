use crate::control::input::{AxisDirection, ControlSample, InputService};
use crate::equipment::{AttachmentChange, Crane, HookError};
use crate::physics::PhysicsWorld;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Minimum time between two attach toggles
    pub attach_cooldown: Time,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            attach_cooldown: Time::new::<second>(0.3),
        }
    }
}

/// Turns level-triggered control samples into crane commands.
///
/// Axis commands are issued only when an axis changes state. The attach
/// button toggles on its rising edge, at most once per cooldown.
pub struct CraneController {
    config: ControllerConfig,
    input: Option<Box<dyn InputService>>,
    enabled: bool,

    rotation: AxisDirection,
    travel: AxisDirection,
    hoist: AxisDirection,

    attach_held: bool,
    /// Seconds since the last accepted toggle
    since_attach: f64,
}

impl CraneController {
    pub fn new(config: ControllerConfig, input: Box<dyn InputService>) -> Self {
        Self {
            input: Some(input),
            ..Self::without_input(config)
        }
    }

    /// Controller with no input service; controls can never be enabled
    pub fn without_input(config: ControllerConfig) -> Self {
        Self {
            config,
            input: None,
            enabled: false,
            rotation: AxisDirection::Neutral,
            travel: AxisDirection::Neutral,
            hoist: AxisDirection::Neutral,
            attach_held: false,
            since_attach: f64::INFINITY,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Route input to the crane. Returns `false` when there is no input
    /// service to route.
    pub fn enable_controls(&mut self) -> bool {
        let Some(input) = self.input.as_mut() else {
            log::warn!("Crane controls not enabled: no input service configured");
            return false;
        };

        input.switch_to_crane();
        self.enabled = true;
        self.reset_axes();
        // A button still held from the UI must be released before it counts
        self.attach_held = true;
        log::info!("Crane controls enabled");
        true
    }

    /// Stop listening, clear every motion intent and hand input back to the UI
    pub fn disable_controls(&mut self, crane: &mut Crane) {
        crane.halt();
        self.reset_axes();
        self.attach_held = false;

        if let Some(input) = self.input.as_mut() {
            input.switch_to_ui();
        }
        if self.enabled {
            log::info!("Crane controls disabled");
        }
        self.enabled = false;
    }

    fn reset_axes(&mut self) {
        self.rotation = AxisDirection::Neutral;
        self.travel = AxisDirection::Neutral;
        self.hoist = AxisDirection::Neutral;
    }

    /// Sample input and issue commands for this tick.
    ///
    /// Returns the outcome of an attach toggle when one was triggered.
    pub fn update(
        &mut self,
        crane: &mut Crane,
        physics: &mut dyn PhysicsWorld,
        dt: Time,
    ) -> Option<Result<AttachmentChange, HookError>> {
        if !self.enabled {
            return None;
        }

        let sample = self.input.as_mut()?.sample();
        self.since_attach += dt.get::<second>().max(0.0);

        self.apply_axes(crane, &sample);
        self.apply_attach(crane, physics, sample.attach)
    }

    fn apply_axes(&mut self, crane: &mut Crane, sample: &ControlSample) {
        let rotation = AxisDirection::resolve(sample.rotate_left, sample.rotate_right);
        if rotation != self.rotation {
            self.rotation = rotation;
            match rotation {
                AxisDirection::Negative => crane.rotate_left(),
                AxisDirection::Positive => crane.rotate_right(),
                AxisDirection::Neutral => crane.stop_rotation(),
            }
        }

        let travel = AxisDirection::resolve(sample.trolley_backward, sample.trolley_forward);
        if travel != self.travel {
            self.travel = travel;
            match travel {
                AxisDirection::Negative => crane.move_trolley_backward(),
                AxisDirection::Positive => crane.move_trolley_forward(),
                AxisDirection::Neutral => crane.stop_trolley(),
            }
        }

        let hoist = AxisDirection::resolve(sample.hook_up, sample.hook_down);
        if hoist != self.hoist {
            self.hoist = hoist;
            match hoist {
                AxisDirection::Negative => crane.raise_hook(),
                AxisDirection::Positive => crane.lower_hook(),
                AxisDirection::Neutral => crane.stop_hook(),
            }
        }
    }

    fn apply_attach(
        &mut self,
        crane: &mut Crane,
        physics: &mut dyn PhysicsWorld,
        pressed: bool,
    ) -> Option<Result<AttachmentChange, HookError>> {
        let rising = pressed && !self.attach_held;
        self.attach_held = pressed;
        if !rising {
            return None;
        }

        if self.since_attach < self.config.attach_cooldown.get::<second>() {
            log::debug!("Attach toggle ignored: cooldown active");
            return None;
        }
        self.since_attach = 0.0;

        let outcome = crane.toggle_cargo_attachment(physics);
        if let Err(e) = &outcome {
            log::debug!("Attach toggle rejected: {}", e);
        }
        Some(outcome)
    }
}
