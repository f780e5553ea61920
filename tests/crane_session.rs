use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use crane_sim::control::{ControlSample, ControllerConfig, CraneController, InputService};
use crane_sim::equipment::{AttachmentChange, Cargo, Crane, Hook, HookConfig, Trolley};
use crane_sim::physics::{BodyHandle, KinematicWorld, PhysicsWorld};
use crane_sim::specification::CraneSpecification;
use crane_sim::telemetry::{LoadStatus, TelemetryRecorder};
use crane_sim::types::*;

const DT: f64 = 0.02;

struct Panel(Rc<RefCell<ControlSample>>);

impl InputService for Panel {
    fn switch_to_crane(&mut self) {}

    fn switch_to_ui(&mut self) {}

    fn sample(&mut self) -> ControlSample {
        *self.0.borrow()
    }
}

struct Session {
    panel: Rc<RefCell<ControlSample>>,
    controller: CraneController,
    crane: Crane,
    world: KinematicWorld,
    hook_body: BodyHandle,
    cargo: Vec<Rc<Cargo>>,
    recorder: TelemetryRecorder<Vec<u8>>,
    elapsed: f64,
    toggles: Vec<Result<AttachmentChange, String>>,
}

impl Session {
    fn new(cargo_tonnes: f64) -> Self {
        let spec = CraneSpecification::default();
        let mut world = KinematicWorld::new();

        let hook_body = world.add_body(na::Point3::new(0.0, 30.0, 2.0), Mass::new::<kilogram>(250.0));
        let trolley = Trolley::new(spec, na::Point3::new(0.0, 30.0, 2.0), na::Vector3::z())
            .with_hook(Hook::new(hook_body, HookConfig::default()));
        let crane = Crane::new(spec, na::Point3::origin(), trolley).unwrap();

        let mass = Mass::new::<metric_ton>(cargo_tonnes);
        let body = world.add_body(na::Point3::new(0.0, 15.5, 12.0), mass);
        let cargo = vec![Rc::new(Cargo::new("precast wall", body, mass).unwrap())];

        let panel = Rc::new(RefCell::new(ControlSample::default()));
        let mut controller = CraneController::new(
            ControllerConfig::default(),
            Box::new(Panel(Rc::clone(&panel))),
        );
        assert!(controller.enable_controls());

        Self {
            panel,
            controller,
            crane,
            world,
            hook_body,
            cargo,
            recorder: TelemetryRecorder::new(Vec::new()),
            elapsed: 0.0,
            toggles: Vec::new(),
        }
    }

    fn hold(&self, edit: impl FnOnce(&mut ControlSample)) {
        let mut sample = ControlSample::default();
        edit(&mut sample);
        *self.panel.borrow_mut() = sample;
    }

    fn run(&mut self, seconds: f64) {
        let steps = (seconds / DT).round() as usize;
        for _ in 0..steps {
            let dt = Time::new::<second>(DT);
            if let Some(outcome) = self.controller.update(&mut self.crane, &mut self.world, dt) {
                self.toggles.push(outcome.map_err(|e| e.to_string()));
            }

            self.crane.tick(dt, &mut self.world);
            self.world
                .move_hook(self.hook_body, self.crane.hook_world_position())
                .unwrap();
            if let Some(hook) = self.crane.trolley_mut().hook_mut() {
                self.world.dispatch_trigger_events(hook, &self.cargo);
            }

            self.elapsed += DT;
            let snapshot = self.crane.telemetry(&self.world);
            self.recorder
                .record(Time::new::<second>(self.elapsed), &snapshot)
                .unwrap();
        }
    }

    fn tap_attach(&mut self) {
        self.hold(|s| s.attach = true);
        self.run(DT);
        self.hold(|_| {});
        self.run(DT);
    }
}

#[test]
fn test_pick_slew_and_set_down() {
    let mut session = Session::new(25.0);

    // Run out to 12 m and lower the hook over the wall panel
    session.hold(|s| s.trolley_forward = true);
    session.run(2.0);
    session.hold(|s| s.hook_down = true);
    session.run(4.5);
    session.hold(|_| {});
    session.run(0.1);

    let trolley = session.crane.trolley();
    assert_relative_eq!(trolley.current_position(), 0.5, epsilon = 1e-9);
    assert_relative_eq!(trolley.current_hook_depth(), 0.9, epsilon = 1e-9);

    session.tap_attach();
    assert!(matches!(session.toggles.as_slice(), [Ok(AttachmentChange::Attached)]));
    assert!(session.cargo[0].is_attached());
    assert_eq!(session.world.joint_count(), 1);

    // Hoist clear, then slew with the load
    session.hold(|s| s.hook_up = true);
    session.run(3.0);
    session.hold(|s| s.rotate_right = true);
    session.run(3.0);

    let snapshot = session.crane.telemetry(&session.world);
    assert_eq!(snapshot.load_status, LoadStatus::Overload);
    assert_relative_eq!(snapshot.load.get::<kilogram>(), 25000.0, epsilon = 1e-6);
    assert_relative_eq!(snapshot.rotation_speed.get::<degree_per_second>(), 18.75, epsilon = 1e-9);

    // The wall follows the hook
    let hook = session.crane.hook_world_position();
    let wall = session.world.body_pose(session.cargo[0].body()).unwrap().translation.vector;
    assert_relative_eq!(wall.x, hook.x, epsilon = 1e-9);
    assert_relative_eq!(wall.z, hook.z, epsilon = 1e-9);

    // Stop, wait out the cooldown, release
    session.hold(|_| {});
    session.run(1.0);
    session.tap_attach();
    assert!(matches!(
        session.toggles.as_slice(),
        [Ok(AttachmentChange::Attached), Ok(AttachmentChange::Detached)]
    ));
    assert!(!session.cargo[0].is_attached());
    assert_eq!(session.world.joint_count(), 0);

    let snapshot = session.crane.telemetry(&session.world);
    assert_relative_eq!(snapshot.load.get::<kilogram>(), 0.0);
    assert_eq!(snapshot.load_status, LoadStatus::Normal);
}

#[test]
fn test_attach_out_of_reach_is_rejected() {
    let mut session = Session::new(5.0);

    session.run(0.1);
    session.tap_attach();

    assert_eq!(session.toggles.len(), 1);
    assert!(session.toggles[0].is_err());
    assert!(!session.crane.trolley().has_cargo_attached());
    assert_eq!(session.world.joint_count(), 0);
}

#[test]
fn test_disable_mid_slew_stops_dead() {
    let mut session = Session::new(5.0);

    session.hold(|s| s.rotate_left = true);
    session.run(1.0);
    assert!(session.crane.turntable().rotation_speed().get::<degree_per_second>() < 0.0);

    session.controller.disable_controls(&mut session.crane);
    let angle = session.crane.turntable().rotation_angle().get::<degree>();
    session.run(1.0);

    assert_relative_eq!(session.crane.turntable().rotation_angle().get::<degree>(), angle);
    assert_relative_eq!(session.crane.turntable().rotation_speed().get::<degree_per_second>(), 0.0);
}

#[test]
fn test_session_telemetry_is_recorded() {
    let mut session = Session::new(5.0);
    session.hold(|s| s.trolley_forward = true);
    session.run(1.0);

    assert_eq!(session.recorder.rows(), 50);
    let Session { recorder, .. } = session;
    let csv = String::from_utf8(recorder.into_inner().unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 51);
}
