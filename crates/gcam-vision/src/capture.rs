//! The capture & classification loop.
//!
//! Exactly one instance runs, on its own blocking thread, for as long as the
//! device delivers frames or until shutdown is signalled. It owns the video
//! source and the detector session exclusively; everything it produces is
//! published through the shared store, and gesture-change events additionally
//! go to the forwarder. It never blocks on network I/O.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use metrics::counter;
use tokio::sync::watch;
use tracing::{error, info};

use gcam_forwarder::EventForwarder;
use gcam_models::{GestureEvent, GestureLabel};
use gcam_store::SharedStore;

use crate::classifier;
use crate::config::CaptureConfig;
use crate::detector::LandmarkDetector;
use crate::error::VisionResult;
use crate::metric_names;
use crate::overlay;
use crate::pacing::Pacer;
use crate::source::{open_source, SourceProvider, VideoSource};

/// Frame publishes are decimated by this factor to bound lock/copy overhead;
/// skipped frames are dropped from the stream, not from classification.
const PUBLISH_STRIDE: u64 = 2;

pub struct CaptureLoop {
    source: Box<dyn VideoSource>,
    detector: Box<dyn LandmarkDetector>,
    store: Arc<SharedStore>,
    forwarder: EventForwarder,
    pacer: Pacer,
    camera_id: String,
    fps_window: u32,
    shutdown: watch::Receiver<bool>,
}

impl CaptureLoop {
    /// Open the configured device (probing if unselected) and assemble the
    /// loop. Failure to open any device is a fatal startup error for the
    /// caller to report.
    pub fn open(
        config: &CaptureConfig,
        provider: &dyn SourceProvider,
        detector: Box<dyn LandmarkDetector>,
        store: Arc<SharedStore>,
        forwarder: EventForwarder,
        shutdown: watch::Receiver<bool>,
    ) -> VisionResult<Self> {
        let (index, source) = open_source(provider, config.device, &config.format)?;
        info!(
            index,
            width = config.format.width,
            height = config.format.height,
            fps = config.format.target_fps,
            "Capture loop ready"
        );
        Ok(Self::new(source, detector, store, forwarder, config, shutdown))
    }

    /// Assemble the loop around an already-open source.
    pub fn new(
        source: Box<dyn VideoSource>,
        detector: Box<dyn LandmarkDetector>,
        store: Arc<SharedStore>,
        forwarder: EventForwarder,
        config: &CaptureConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            detector,
            store,
            forwarder,
            pacer: Pacer::new(config.pacing),
            camera_id: config.camera_id.clone(),
            fps_window: config.format.target_fps.max(1),
            shutdown,
        }
    }

    /// Run until a frame read fails or shutdown is signalled.
    ///
    /// Consumes the loop; dropping it on exit releases the device. Meant for
    /// a dedicated thread (`std::thread::spawn(move || capture.run())`).
    pub fn run(mut self) {
        let mut frame_count: u64 = 0;
        let mut fps_counter: u32 = 0;
        let mut fps_window_start = Instant::now();
        // Last label used for edge-triggered event comparison; distinct from
        // the momentary classification result
        let mut latched: Option<GestureLabel> = None;
        // Display text held over between classification runs for continuity
        let mut label: &'static str = "";

        loop {
            if *self.shutdown.borrow() {
                info!("Capture loop received shutdown signal");
                break;
            }

            let mut frame = match self.source.read_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!(error = %e, "Failed to read frame, stopping capture loop");
                    break;
                }
            };
            frame_count += 1;
            fps_counter += 1;
            counter!(metric_names::FRAMES_CAPTURED_TOTAL).increment(1);

            // fps runs on a frame-count cadence, independent of the
            // classification gate; the value stays stale between rollovers
            let mut fps_update = None;
            if fps_counter >= self.fps_window {
                let elapsed = fps_window_start.elapsed().as_secs_f64();
                fps_update = Some(if elapsed > 0.0 {
                    fps_counter as f64 / elapsed
                } else {
                    0.0
                });
                fps_counter = 0;
                fps_window_start = Instant::now();
            }

            if self.pacer.should_run(frame_count, Instant::now()) {
                counter!(metric_names::CLASSIFICATIONS_TOTAL).increment(1);
                let rgb = frame.to_rgb();
                let (gesture, text) = match self.detector.detect(&rgb) {
                    Some(landmarks) => {
                        classifier::classify(&landmarks, frame.height(), frame.width())
                    }
                    // No hand is the normal "no gesture" signal
                    None => (None, ""),
                };

                if let Some(gesture) = gesture {
                    if latched != Some(gesture) {
                        info!(gesture = %gesture, "{} detected", gesture.event_name());
                        let event = GestureEvent::gesture_change(gesture, &self.camera_id);
                        self.store.push_event(event.clone());
                        self.forwarder.forward(event);
                    }
                }
                // The latch follows every classification result, including
                // back to None, so Rock -> None -> Rock fires twice
                latched = gesture;
                label = text;
            }

            if !label.is_empty() {
                overlay::draw_label(&mut frame, label);
            }
            if frame_count % PUBLISH_STRIDE == 0 {
                self.store.publish_frame(frame);
            }

            let gesture = latched;
            let timestamp = Utc::now().timestamp_millis() as f64 / 1000.0;
            self.store.update_status(|status| {
                status.apply_gesture(gesture, label);
                status.frame_count = frame_count;
                status.timestamp = timestamp;
                if let Some(fps) = fps_update {
                    status.fps = fps;
                }
            });
        }

        info!(frame_count, "Capture loop stopped");
    }
}
