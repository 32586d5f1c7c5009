//! A video platform that runs entirely in process.
//!
//! Loading the API spawns a task that reports readiness after a delay, and
//! players report their state changes back through the page event channel.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::PageEvent;
use crate::modal::{PlayerOptions, PlayerState, VideoId, VideoPlatform, VideoPlayer};

pub struct SimulatedPlatform {
    event_tx: UnboundedSender<PageEvent>,
    cancellation_token: CancellationToken,
    /// `None` leaves readiness to the script.
    ready_after: Option<Duration>,
}

impl SimulatedPlatform {
    pub const fn new(
        event_tx: UnboundedSender<PageEvent>,
        cancellation_token: CancellationToken,
        ready_after: Option<Duration>,
    ) -> Self {
        Self {
            event_tx,
            cancellation_token,
            ready_after,
        }
    }
}

impl VideoPlatform for SimulatedPlatform {
    fn load_api(&mut self, script_src: &str) {
        let Some(delay) = self.ready_after else {
            info!("Requested video API {}, waiting for a scripted ready signal", script_src);
            return;
        };
        info!("Requested video API {}, ready in {:?}", script_src, delay);

        let event_tx = self.event_tx.clone();
        let cancellation_token = self.cancellation_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancellation_token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let _ = event_tx.send(PageEvent::VideoApiReady);
                }
            }
        });
    }

    fn create_player(&mut self, options: &PlayerOptions) -> Box<dyn VideoPlayer> {
        debug!(
            "Creating {}x{} player for {} in #{}",
            options.width, options.height, options.video, options.host
        );
        Box::new(SimulatedPlayer {
            video: options.video.clone(),
            event_tx: self.event_tx.clone(),
            position: 0.0,
        })
    }
}

struct SimulatedPlayer {
    video: VideoId,
    event_tx: UnboundedSender<PageEvent>,
    position: f64,
}

impl SimulatedPlayer {
    fn report(&self, state: PlayerState) {
        let _ = self.event_tx.send(PageEvent::PlayerState {
            video: self.video.clone(),
            state,
        });
    }
}

impl VideoPlayer for SimulatedPlayer {
    fn play(&mut self) {
        info!("Playing {} from {}s", self.video, self.position);
        self.report(PlayerState::Playing);
    }

    fn stop(&mut self) {
        info!("Stopping {}", self.video);
        self.report(PlayerState::Unstarted);
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        debug!("Seeking {} to {}s", self.video, seconds);
        self.position = seconds;
    }
}
