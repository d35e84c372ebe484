// ABOUTME: Shared test fixtures for lactate threshold integration tests
// ABOUTME: Provides reference step tests, a recording observer, and a stub LT1 detector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `lactate_threshold`

use lactate_threshold::intelligence::{
    AnalysisEvent, AthleteProfile, Confidence, LactateThresholdEngine, Lt1Detector,
    NoopObserver, ThresholdMethod, ThresholdObserver, ThresholdResult,
};
use lactate_threshold::{IntensityUnit, StepTest};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Speed intensities 8, 10, 12, ... km/h with heart rate rising 10 bpm per stage
pub fn speed_test(lactate: &[f64]) -> StepTest {
    let intensity: Vec<f64> = (0..lactate.len()).map(|i| 8.0 + 2.0 * i as f64).collect();
    let heart_rate: Vec<u32> = (0..lactate.len()).map(|i| 120 + 10 * i as u32).collect();
    StepTest::from_columns(&intensity, IntensityUnit::KmPerHour, lactate, &heart_rate).unwrap()
}

/// Knee-shaped curve of a recreational runner
pub fn scenario_a() -> StepTest {
    speed_test(&[1.0, 1.2, 1.8, 2.9, 4.8, 7.5])
}

/// Flat curve of an elite athlete
pub fn scenario_b() -> StepTest {
    speed_test(&[0.9, 1.0, 1.0, 1.1, 1.3, 1.6])
}

/// Lactate strictly proportional to intensity
pub fn scenario_c() -> StepTest {
    let intensity = [8.0, 10.0, 12.0, 14.0, 16.0, 18.0];
    let lactate: Vec<f64> = intensity.iter().map(|x| 0.5 * x).collect();
    StepTest::from_columns(
        &intensity,
        IntensityUnit::KmPerHour,
        &lactate,
        &[120, 130, 140, 150, 160, 170],
    )
    .unwrap()
}

/// Noisy curve that never reaches 4.0 mmol/L
pub fn scenario_d() -> StepTest {
    speed_test(&[1.0, 2.0, 1.0, 2.0, 1.0, 2.0])
}

/// Engine that discards analysis events
pub fn quiet_engine() -> LactateThresholdEngine {
    init_test_logging();
    LactateThresholdEngine::default().with_observer(Arc::new(NoopObserver))
}

/// Engine that records analysis events into the returned observer
pub fn recording_engine() -> (LactateThresholdEngine, Arc<RecordingObserver>) {
    init_test_logging();
    let observer = Arc::new(RecordingObserver::default());
    let engine = LactateThresholdEngine::default().with_observer(observer.clone());
    (engine, observer)
}

/// Owned summary of an analysis event
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    Attempted(ThresholdMethod),
    Accepted(ThresholdMethod, Confidence),
    Rejected(ThresholdMethod, String),
    PoorFit(ThresholdMethod),
    NonMonotonic(usize),
    NoRise(usize),
    Profiled,
    Crossing { stage_index: usize, second: bool },
    Undetermined(&'static str),
    Other,
}

/// Observer that keeps every event in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn attempted(&self) -> Vec<ThresholdMethod> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::Attempted(method) => Some(method),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl ThresholdObserver for RecordingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        let recorded = match event {
            AnalysisEvent::MethodAttempted { method, .. } => RecordedEvent::Attempted(*method),
            AnalysisEvent::MethodAccepted { method, confidence } => {
                RecordedEvent::Accepted(*method, *confidence)
            }
            AnalysisEvent::MethodRejected { method, reason } => {
                RecordedEvent::Rejected(*method, (*reason).to_owned())
            }
            AnalysisEvent::PoorFit { method, .. } => RecordedEvent::PoorFit(*method),
            AnalysisEvent::NonMonotonicCurve { violations, .. } => {
                RecordedEvent::NonMonotonic(*violations)
            }
            AnalysisEvent::NoRiseDetected { anchor_index, .. } => {
                RecordedEvent::NoRise(*anchor_index)
            }
            AnalysisEvent::ProfileClassified { .. } => RecordedEvent::Profiled,
            AnalysisEvent::CrossingSelected {
                stage_index,
                second_crossing,
                ..
            } => RecordedEvent::Crossing {
                stage_index: *stage_index,
                second: *second_crossing,
            },
            AnalysisEvent::ThresholdUndetermined { threshold } => {
                RecordedEvent::Undetermined(*threshold)
            }
            _ => RecordedEvent::Other,
        };
        self.events.lock().unwrap().push(recorded);
    }
}

/// LT1 detector returning the stage nearest a fixed lactate level
#[derive(Debug)]
pub struct StubLt1Detector {
    pub level: f64,
}

impl Lt1Detector for StubLt1Detector {
    fn detect_lt1(&self, test: &StepTest, _profile: &AthleteProfile) -> Option<ThresholdResult> {
        let stage = test.stages().iter().min_by(|a, b| {
            (a.lactate - self.level)
                .abs()
                .total_cmp(&(b.lactate - self.level).abs())
        })?;
        Some(ThresholdResult::new(
            stage.intensity.value(),
            stage.lactate,
            f64::from(stage.heart_rate),
            test.unit(),
            ThresholdMethod::EnsembleLt1,
            Confidence::Medium,
        ))
    }
}

/// LT1 detector that never answers
#[derive(Debug)]
pub struct SilentLt1Detector;

impl Lt1Detector for SilentLt1Detector {
    fn detect_lt1(&self, _test: &StepTest, _profile: &AthleteProfile) -> Option<ThresholdResult> {
        None
    }
}
