//! Video analysis pipeline.
//!
//! Drives a [`PerceptionProvider`] over the sampled frames of one stream,
//! folds every sample into the segmenter and accumulators in frame order and
//! scores the run.

use podium_models::{EmotionVector, PresentationMetrics, VideoAnalysisResult};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::attention::{classifier_for, AttentionClassifier};
use crate::config::AnalysisConfig;
use crate::emotion::{frame_emotion, EmotionAccumulator};
use crate::engagement::{self, AttentionTally};
use crate::error::{EngineError, EngineResult};
use crate::metrics;
use crate::perception::{FrameObservation, Perception, PerceptionProvider, ProviderGuard, StreamInfo};
use crate::posture::{PostureAccumulator, PostureEstimate, PostureEstimator};
use crate::scoring::{CompositeScorer, ScoringInputs};
use crate::segmenter::TemporalSegmenter;

/// Result of the pure per-frame stage.
#[derive(Debug, Clone)]
pub struct FrameEvaluation {
    pub frame_number: u64,
    pub timestamp: f64,
    pub attentive: bool,
    pub face: bool,
    pub emotion: Option<EmotionVector>,
    /// `None` when no pose was detected in the frame.
    pub posture: Option<PostureEstimate>,
}

/// Runs the video pass with a fixed configuration.
pub struct VideoAnalyzer {
    config: AnalysisConfig,
    classifier: Box<dyn AttentionClassifier>,
    estimator: PostureEstimator,
}

impl VideoAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let classifier = classifier_for(&config);
        Self {
            config,
            classifier,
            estimator: PostureEstimator::new(),
        }
    }

    /// Replace the configured attention classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn AttentionClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a whole stream.
    ///
    /// The provider is released before this returns, on success and on
    /// every error path.
    pub fn analyze<P: PerceptionProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> EngineResult<VideoAnalysisResult> {
        let started = Instant::now();
        let result = self.run(provider);

        match &result {
            Ok(r) => metrics::record_analysis_completed(
                "video",
                r.assessment.total_score,
                started.elapsed().as_secs_f64(),
            ),
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Video analysis failed");
                metrics::record_analysis_failed("video", e.kind());
            }
        }
        result
    }

    fn run<P: PerceptionProvider + ?Sized>(&self, provider: &mut P) -> EngineResult<VideoAnalysisResult> {
        let mut provider = ProviderGuard::new(provider);
        let info = provider.stream_info()?;
        if !info.fps.is_finite() || info.fps <= 0.0 || info.total_frames == 0 {
            return Err(EngineError::input_unavailable("Video file is empty or corrupted"));
        }

        info!(
            source = %info.source_name,
            provider = provider.name(),
            fps = info.fps,
            total_frames = info.total_frames,
            stride = self.config.sample_stride,
            attention = self.classifier.name(),
            "Starting video analysis"
        );

        let mut session = self.session(info.clone());
        let stride = self.config.sample_stride.max(1);
        let mut batch = Vec::new();

        for frame_number in (stride..=info.total_frames).step_by(stride as usize) {
            let timestamp = frame_number as f64 / info.fps;
            let perception = match provider.perceive(frame_number, timestamp) {
                Ok(p) => p,
                Err(e) => {
                    warn!(frame_index = frame_number, error = %e, "Perception failed, counting frame as empty");
                    metrics::record_frame_recovered("perception");
                    Perception::nothing()
                }
            };
            let observation = FrameObservation {
                frame_number,
                timestamp,
                perception,
            };

            if self.config.parallel_frames {
                batch.push(observation);
                if batch.len() >= self.config.batch_size {
                    session.ingest_batch(std::mem::take(&mut batch));
                }
            } else {
                session.ingest(&observation);
            }
        }
        if !batch.is_empty() {
            session.ingest_batch(batch);
        }

        // Release decode and model handles before scoring.
        drop(provider);
        session.finish()
    }

    /// Open a session for callers that push frames themselves.
    pub fn session(&self, info: StreamInfo) -> VideoSession<'_> {
        VideoSession {
            analyzer: self,
            segmenter: TemporalSegmenter::new(
                self.config.segment_duration_secs,
                info.fps,
                self.config.sample_stride,
            ),
            info,
            emotions: EmotionAccumulator::new(),
            posture: PostureAccumulator::new(),
            tally: AttentionTally::default(),
        }
    }

    /// Per-frame stage. Pure, so batches may run on the rayon pool.
    pub fn evaluate(&self, observation: &FrameObservation) -> FrameEvaluation {
        let perception = &observation.perception;
        let posture = perception
            .keypoints
            .as_ref()
            .filter(|kp| !kp.is_empty())
            .map(|kp| self.estimator.estimate(kp));

        FrameEvaluation {
            frame_number: observation.frame_number,
            timestamp: observation.timestamp,
            attentive: self.classifier.is_attentive(perception),
            face: perception.has_face(),
            emotion: frame_emotion(perception),
            posture,
        }
    }
}

impl Default for VideoAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Running state of one video pass.
pub struct VideoSession<'a> {
    analyzer: &'a VideoAnalyzer,
    info: StreamInfo,
    segmenter: TemporalSegmenter,
    emotions: EmotionAccumulator,
    posture: PostureAccumulator,
    tally: AttentionTally,
}

impl VideoSession<'_> {
    /// Evaluate and fold one sampled frame.
    pub fn ingest(&mut self, observation: &FrameObservation) {
        let evaluation = self.analyzer.evaluate(observation);
        self.fold(evaluation);
    }

    /// Evaluate a batch in parallel, then fold the results in frame order.
    pub fn ingest_batch(&mut self, observations: Vec<FrameObservation>) {
        let analyzer = self.analyzer;
        let evaluations: Vec<FrameEvaluation> = observations
            .par_iter()
            .map(|obs| analyzer.evaluate(obs))
            .collect();

        for evaluation in evaluations {
            self.fold(evaluation);
        }
    }

    /// Samples folded so far.
    pub fn samples(&self) -> u64 {
        self.tally.total()
    }

    fn fold(&mut self, evaluation: FrameEvaluation) {
        #[cfg(feature = "debug-frames")]
        debug!(
            frame_index = evaluation.frame_number,
            timestamp = evaluation.timestamp,
            attentive = evaluation.attentive,
            face = evaluation.face,
            posture = evaluation.posture.map(|p| p.score.overall_score),
            "Frame evaluated"
        );

        self.tally.record(evaluation.attentive, evaluation.face);
        if let Some(vector) = &evaluation.emotion {
            self.emotions.record(vector);
        }
        if let Some(estimate) = &evaluation.posture {
            self.posture.add(&estimate.score);
        }
        self.segmenter
            .ingest(evaluation.timestamp, evaluation.attentive, evaluation.emotion.as_ref());
    }

    /// Close the pass and build the result.
    pub fn finish(self) -> EngineResult<VideoAnalysisResult> {
        let config = &self.analyzer.config;
        let samples = self.tally.total();
        metrics::record_frames_sampled(samples);

        let eye_contact = self.tally.eye_contact()?;
        let segments = self.segmenter.finish(config.flush_final_segment);
        let engagement_patterns = engagement::aggregate(segments);
        let emotion_analysis = self.emotions.averages();
        let posture_analysis = self.posture.finish();

        let scorer = CompositeScorer::for_mode(config.scoring, &self.info.source_name);
        let assessment = scorer.assess(&ScoringInputs {
            emotions: &emotion_analysis,
            eye_contact: &eye_contact,
            posture: posture_analysis.as_ref(),
            engagement: &engagement_patterns,
        });

        let total_frames = self.info.total_frames as f64;
        let presentation_metrics = PresentationMetrics {
            duration: total_frames / self.info.fps,
            frames_analyzed: self.info.total_frames,
            analysis_quality: total_frames / samples as f64 * 100.0,
        };

        debug!(
            samples,
            posture_frames = self.posture.frames(),
            emotion_frames = self.emotions.frames(),
            "Video pass folded"
        );
        info!(
            source = %self.info.source_name,
            total_score = assessment.total_score,
            rating = %assessment.rating,
            attention_percentage = eye_contact.attention_percentage,
            segments = engagement_patterns.segments.len(),
            strategy = scorer.strategy_name(),
            "Video analysis completed"
        );

        Ok(VideoAnalysisResult {
            emotion_analysis,
            eye_contact_analysis: eye_contact,
            posture_analysis,
            engagement_patterns,
            presentation_metrics,
            assessment,
        })
    }
}
