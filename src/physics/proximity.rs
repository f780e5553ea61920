//! Candidate cargo discovery for the hook.
//!
//! The physics engine reports trigger enter/exit events; the tracker keeps
//! the working set so attaching never needs a scene-wide search.

use std::fmt;
use std::rc::{Rc, Weak};

use nalgebra as na;

use crate::equipment::Cargo;

/// Working set of cargo currently inside the hook's trigger volume
pub trait ProximityTracker: fmt::Debug {
    /// Cargo entered the trigger volume
    fn enter(&mut self, cargo: &Rc<Cargo>);

    /// Cargo left the trigger volume
    fn exit(&mut self, cargo: &Rc<Cargo>);

    /// Live cargo in the volume, in the order they entered
    fn candidates(&self) -> Vec<Rc<Cargo>>;

    /// Drop entries whose cargo the scene has destroyed
    fn retain_live(&mut self);
}

/// Enter/exit bookkeeping over weak references
#[derive(Debug, Default)]
pub struct TriggerVolume {
    entries: Vec<Weak<Cargo>>,
}

impl TriggerVolume {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, cargo: &Rc<Cargo>) -> Option<usize> {
        let target = Rc::as_ptr(cargo);
        self.entries.iter().position(|entry| std::ptr::eq(entry.as_ptr(), target))
    }
}

impl ProximityTracker for TriggerVolume {
    fn enter(&mut self, cargo: &Rc<Cargo>) {
        // Engines may report overlapping colliders of the same body twice
        if self.position_of(cargo).is_none() {
            self.entries.push(Rc::downgrade(cargo));
        }
    }

    fn exit(&mut self, cargo: &Rc<Cargo>) {
        if let Some(index) = self.position_of(cargo) {
            self.entries.remove(index);
        }
    }

    fn candidates(&self) -> Vec<Rc<Cargo>> {
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }

    fn retain_live(&mut self) {
        self.entries.retain(|entry| entry.strong_count() > 0);
    }
}

/// Spherical trigger the host registers with its physics engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSphere {
    pub center: na::Point3<f64>,
    pub radius: f64,
}

impl TriggerSphere {
    pub fn contains(&self, point: &na::Point3<f64>) -> bool {
        na::distance_squared(&self.center, point) <= self.radius * self.radius
    }
}

/// Pick the candidate whose attach point is closest to `origin`.
///
/// Ties keep the earlier candidate, so iteration order decides.
pub fn nearest_candidate<T>(
    origin: &na::Point3<f64>,
    candidates: impl IntoIterator<Item = (T, na::Point3<f64>)>,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;

    for (candidate, point) in candidates {
        let distance = na::distance(origin, &point);
        let closer = match &best {
            Some((_, best_distance)) => distance < *best_distance,
            None => true,
        };
        if closer {
            best = Some((candidate, distance));
        }
    }

    best
}
