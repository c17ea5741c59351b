// ABOUTME: Timeline projection module for milepost
// ABOUTME: Display computations over task records, kept pure for property tests

pub mod projector;

pub use projector::{milestones, project, Milestone, TimelineProjection};
