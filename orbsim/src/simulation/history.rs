//! Trajectory history recorded during a run
//!
//! One ordered list of positions per body. Sample 0 is the initial state;
//! after that a sample is taken after every step whose index is a multiple
//! of the report interval. The history is returned on completion and on
//! cancellation alike.

use serde::Serialize;

use super::states::{NVec3, System};

#[derive(Debug, Clone, Default)]
pub struct History {
    names: Vec<String>, // body names, same order as System::bodies
    samples: Vec<Vec<NVec3>>, // samples[i][k] = k-th sample of body i
}

/// One row of a flattened history, for CSV output
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow<'a> {
    pub body: &'a str,
    pub sample: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl History {
    /// Empty history sized for the bodies of `sys`
    pub fn new(sys: &System) -> Self {
        Self {
            names: sys.bodies.iter().map(|b| b.name.clone()).collect(),
            samples: vec![Vec::new(); sys.bodies.len()],
        }
    }

    /// Whether step `step` (0-based) lands on a report boundary
    pub fn is_report_step(step: usize, report_interval: usize) -> bool {
        step % report_interval == 0
    }

    /// Append the current position of every body
    pub fn record(&mut self, sys: &System) {
        for (track, b) in self.samples.iter_mut().zip(sys.bodies.iter()) {
            track.push(b.x);
        }
    }

    /// Number of samples per body
    pub fn len(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn body_count(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Samples of body `i`
    pub fn track(&self, i: usize) -> Option<&[NVec3]> {
        self.samples.get(i).map(Vec::as_slice)
    }

    /// Samples of the first body named `name`
    pub fn track_by_name(&self, name: &str) -> Option<&[NVec3]> {
        let i = self.names.iter().position(|n| n == name)?;
        self.track(i)
    }

    /// (name, samples) per body in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NVec3])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.samples.iter().map(Vec::as_slice))
    }

    /// Flatten into rows ordered by body, then sample
    pub fn rows(&self) -> impl Iterator<Item = SampleRow<'_>> {
        self.iter().flat_map(|(body, track)| {
            track.iter().enumerate().map(move |(sample, p)| SampleRow {
                body,
                sample,
                x: p.x,
                y: p.y,
                z: p.z,
            })
        })
    }

    /// Expected samples per body for a completed run of `steps` steps
    pub fn expected_len(steps: usize, report_interval: usize) -> usize {
        if steps == 0 {
            1
        } else {
            1 + (steps - 1) / report_interval + 1
        }
    }
}
