use std::rc::Rc;

use crane_sim::control::{ControlSample, ControllerConfig, CraneController, InputService};
use crane_sim::equipment::{Cargo, Crane, Hook, HookConfig, Trolley};
use crane_sim::physics::KinematicWorld;
use crane_sim::specification::CraneSpecification;
use crane_sim::telemetry::TelemetryRecorder;
use crane_sim::types::*;

const DT: f64 = 0.02;

type Press = fn(&mut ControlSample);

/// Operator script: which buttons are held over which time window
struct Timeline {
    elapsed: f64,
    steps: Vec<(f64, f64, Press)>,
}

fn hold(start: f64, end: f64, press: Press) -> (f64, f64, Press) {
    (start, end, press)
}

impl InputService for Timeline {
    fn switch_to_crane(&mut self) {
        println!("Input: crane controls");
    }

    fn switch_to_ui(&mut self) {
        println!("Input: UI");
    }

    fn sample(&mut self) -> ControlSample {
        let mut sample = ControlSample::default();
        for (start, end, press) in &self.steps {
            if self.elapsed >= *start && self.elapsed < *end {
                press(&mut sample);
            }
        }
        self.elapsed += DT;
        sample
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec = match CraneSpecification::from_toml_file("config/crane_specification.toml") {
        Ok(spec) => spec,
        Err(e) => {
            println!("Using default specification ({})", e);
            CraneSpecification::default()
        }
    };

    let mut world = KinematicWorld::new();

    // Jib 30 m up, trolley starting 2 m out from the mast
    let trolley = Trolley::new(spec, na::Point3::new(0.0, 30.0, 2.0), na::Vector3::z());
    let hook_body = world.add_body(na::Point3::new(0.0, 30.0, 2.0), Mass::new::<kilogram>(250.0));
    let trolley = trolley.with_hook(Hook::new(hook_body, HookConfig::default()));
    let mut crane = Crane::new(spec, na::Point3::origin(), trolley)?;

    let precast_mass = Mass::new::<metric_ton>(25.0);
    let precast_body = world.add_body(na::Point3::new(0.0, 15.5, 12.0), precast_mass);
    let site_cargo = vec![Rc::new(Cargo::new("precast wall", precast_body, precast_mass)?)];

    let timeline = Timeline {
        elapsed: 0.0,
        steps: vec![
            hold(0.0, 2.0, |s| s.trolley_forward = true),
            hold(2.0, 6.5, |s| s.hook_down = true),
            hold(6.6, 6.7, |s| s.attach = true),
            hold(7.0, 10.0, |s| s.hook_up = true),
            hold(10.0, 16.0, |s| s.rotate_right = true),
            hold(16.5, 18.0, |s| s.hook_down = true),
            hold(18.2, 18.3, |s| s.attach = true),
        ],
    };

    let mut controller = CraneController::new(ControllerConfig::default(), Box::new(timeline));
    controller.enable_controls();

    let csv_path = std::env::temp_dir().join("crane_session.csv");
    let mut recorder = TelemetryRecorder::create(&csv_path)?;

    let total_steps = (19.0 / DT) as usize;
    for step in 0..total_steps {
        let dt = Time::new::<second>(DT);
        let elapsed = Time::new::<second>(step as f64 * DT);

        match controller.update(&mut crane, &mut world, dt) {
            Some(Ok(change)) => println!("[{:>5.2} s] Hook {:?}", elapsed.get::<second>(), change),
            Some(Err(e)) => println!("[{:>5.2} s] Toggle rejected: {}", elapsed.get::<second>(), e),
            None => {}
        }

        crane.tick(dt, &mut world);

        world.move_hook(hook_body, crane.hook_world_position())?;
        if let Some(hook) = crane.trolley_mut().hook_mut() {
            world.dispatch_trigger_events(hook, &site_cargo);
        }

        let snapshot = crane.telemetry(&world);
        recorder.record(elapsed, &snapshot)?;
        if step % 50 == 0 {
            println!("[{:>5.2} s] {}", elapsed.get::<second>(), snapshot);
        }
    }

    controller.disable_controls(&mut crane);
    recorder.flush()?;

    println!("Recorded {} rows to {}", recorder.rows(), csv_path.display());
    Ok(())
}
