// ABOUTME: Lactate threshold engine holding configuration, observer, and optional LT1 detector
// ABOUTME: Entry point for single-test analysis, parallel batch analysis, and training zone derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::algorithms::profile::{AthleteProfile, AthleteProfileClassifier};
use super::observer::{AnalysisEvent, ThresholdObserver, TracingObserver};
use super::threshold::ThresholdResult;
use crate::config::intelligence::LactateThresholdConfig;
use lactate_core::{EngineError, EngineResult, IntensityUnit, StepTest};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// External ensemble LT1 detector consulted for elite-flat athletes
///
/// Implementations return a result of the same shape as the built-in
/// detectors, typically tagged `ENSEMBLE_LT1`.
pub trait Lt1Detector: Send + Sync {
    /// Estimate LT1, or `None` when the detector has no answer
    fn detect_lt1(&self, test: &StepTest, profile: &AthleteProfile) -> Option<ThresholdResult>;
}

/// Stateless threshold engine
///
/// Every call owns its data; one engine can be shared across threads.
#[derive(Clone)]
pub struct LactateThresholdEngine {
    config: LactateThresholdConfig,
    observer: Arc<dyn ThresholdObserver>,
    lt1_detector: Option<Arc<dyn Lt1Detector>>,
}

impl fmt::Debug for LactateThresholdEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LactateThresholdEngine")
            .field("config", &self.config)
            .field("lt1_detector", &self.lt1_detector.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for LactateThresholdEngine {
    fn default() -> Self {
        Self {
            config: LactateThresholdConfig::default(),
            observer: Arc::new(TracingObserver),
            lt1_detector: None,
        }
    }
}

impl LactateThresholdEngine {
    /// Engine with a validated configuration and the tracing observer
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the configuration fails validation
    pub fn new(config: LactateThresholdConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::from)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Replace the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ThresholdObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Install an ensemble LT1 detector
    #[must_use]
    pub fn with_lt1_detector(mut self, detector: Arc<dyn Lt1Detector>) -> Self {
        self.lt1_detector = Some(detector);
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &LactateThresholdConfig {
        &self.config
    }

    pub(crate) fn lt1_detector(&self) -> Option<&dyn Lt1Detector> {
        self.lt1_detector.as_deref()
    }

    pub(crate) fn emit(&self, event: &AnalysisEvent<'_>) {
        self.observer.on_event(event);
    }

    /// Classify the athlete profile of a test
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for a test without stages
    pub fn classify(&self, test: &StepTest) -> EngineResult<AthleteProfile> {
        let profile = AthleteProfileClassifier::classify(&test.lactates(), &self.config.profile)?;
        self.emit(&AnalysisEvent::ProfileClassified { profile: &profile });
        Ok(profile)
    }

    /// Profile, both thresholds, and the ensemble LT2 estimate for one test
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for a test without stages
    pub fn analyze(&self, test: &StepTest) -> EngineResult<ThresholdReport> {
        let profile = self.classify(test)?;
        let aerobic = self.resolve_aerobic_with_profile(test, &profile);
        let anaerobic = self.resolve_anaerobic_with_profile(test, &profile);
        let ensemble_lt2 = self.detect_lt2(test, &profile);

        debug!(
            stages = test.len(),
            profile = %profile.profile_type,
            aerobic = ?aerobic.as_ref().map(|r| r.method),
            anaerobic = ?anaerobic.as_ref().map(|r| r.method),
            "Step test analyzed"
        );

        Ok(ThresholdReport {
            unit: test.unit(),
            stage_count: test.len(),
            profile,
            aerobic,
            anaerobic,
            ensemble_lt2,
        })
    }

    /// Analyze independent tests in parallel, preserving input order
    #[must_use]
    pub fn analyze_batch(&self, tests: &[StepTest]) -> Vec<EngineResult<ThresholdReport>> {
        tests.par_iter().map(|test| self.analyze(test)).collect()
    }
}

/// Complete analysis of one step test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Intensity unit of every threshold
    pub unit: IntensityUnit,
    /// Number of stages analyzed
    pub stage_count: usize,
    /// Athlete profile classification
    pub profile: AthleteProfile,
    /// Aerobic threshold (LT1)
    pub aerobic: Option<ThresholdResult>,
    /// Anaerobic threshold (LT2)
    pub anaerobic: Option<ThresholdResult>,
    /// LT2 from the unified three-method hierarchy
    pub ensemble_lt2: Option<ThresholdResult>,
}

impl ThresholdReport {
    /// Three-zone model bounded by LT1 and LT2
    ///
    /// `None` unless both thresholds exist and LT1 is the easier intensity.
    #[must_use]
    pub fn training_zones(&self) -> Option<TrainingZones> {
        let lt1 = self.aerobic.as_ref()?.intensity;
        let lt2 = self.anaerobic.as_ref()?.intensity;

        let ordered = if self.unit.is_inverted() {
            lt1 > lt2
        } else {
            lt1 < lt2
        };
        if !ordered {
            return None;
        }

        Some(TrainingZones {
            unit: self.unit,
            zones: [
                TrainingZone {
                    zone: 1,
                    name: "Aerobic",
                    from: None,
                    to: Some(lt1),
                },
                TrainingZone {
                    zone: 2,
                    name: "Threshold",
                    from: Some(lt1),
                    to: Some(lt2),
                },
                TrainingZone {
                    zone: 3,
                    name: "Severe",
                    from: Some(lt2),
                    to: None,
                },
            ],
        })
    }
}

/// Intensity band of one training zone; open bounds are `None`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingZone {
    /// Zone number, 1 is easiest
    pub zone: u8,
    /// Zone label
    pub name: &'static str,
    /// Lower intensity bound
    pub from: Option<f64>,
    /// Upper intensity bound
    pub to: Option<f64>,
}

/// Three-zone model derived from LT1 and LT2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingZones {
    /// Intensity unit of the bounds
    pub unit: IntensityUnit,
    /// Zones from easiest to hardest
    pub zones: [TrainingZone; 3],
}
