//! Page events and the scripted event source.
//!
//! Events flow INTO the application: from the script feeder task, and from
//! the video platform which reports readiness and player state changes.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::fixture::ScriptEvent;
use crate::modal::{PlayerState, VideoId};

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Click on the element with html id `element`.
    Click {
        element: String,
        target: Option<String>,
    },
    /// Click on the wrapper around `modal`.
    ClickWrapper {
        modal: String,
        target: Option<String>,
    },
    /// Escape key pressed
    Escape,
    /// The video API finished loading
    VideoApiReady,
    PlayerState {
        video: VideoId,
        state: PlayerState,
    },
    /// The script is exhausted
    Quit,
}

impl PageEvent {
    /// Convert a script step. `Wait` steps and unknown player codes have no event.
    pub fn from_script(event: ScriptEvent) -> Option<Self> {
        match event {
            ScriptEvent::Click { element, target } => Some(Self::Click { element, target }),
            ScriptEvent::ClickWrapper { modal, target } => {
                Some(Self::ClickWrapper { modal, target })
            }
            ScriptEvent::Escape => Some(Self::Escape),
            ScriptEvent::VideoReady => Some(Self::VideoApiReady),
            ScriptEvent::VideoState { video, code } => {
                let Some(state) = PlayerState::from_code(code) else {
                    warn!("Unknown player state code {} for video {}", code, video);
                    return None;
                };
                Some(Self::PlayerState {
                    video: VideoId::new(video),
                    state,
                })
            }
            ScriptEvent::Wait { .. } => None,
        }
    }
}

/// Spawn a task that replays `script` into `event_tx`, then sends [`PageEvent::Quit`].
pub fn spawn_script(
    script: Vec<ScriptEvent>,
    event_tx: UnboundedSender<PageEvent>,
    cancellation_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for step in script {
            if let ScriptEvent::Wait { ms } = step {
                tokio::select! {
                    () = cancellation_token.cancelled() => return,
                    () = tokio::time::sleep(Duration::from_millis(ms)) => continue,
                }
            }
            let Some(event) = PageEvent::from_script(step) else {
                continue;
            };
            debug!("Script event: {:?}", event);
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(PageEvent::Quit);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_from_script() {
        assert_eq!(
            PageEvent::from_script(ScriptEvent::VideoState {
                video: "dQw4w9WgXcQ".to_string(),
                code: 0
            }),
            Some(PageEvent::PlayerState {
                video: VideoId::new("dQw4w9WgXcQ"),
                state: PlayerState::Ended
            })
        );
        assert_eq!(
            PageEvent::from_script(ScriptEvent::VideoState {
                video: "dQw4w9WgXcQ".to_string(),
                code: 42
            }),
            None
        );
        assert_eq!(PageEvent::from_script(ScriptEvent::Wait { ms: 5 }), None);
    }

    #[tokio::test]
    async fn test_script_ends_with_quit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let script = vec![
            ScriptEvent::Escape,
            ScriptEvent::Wait { ms: 1 },
            ScriptEvent::VideoReady,
        ];

        spawn_script(script, tx, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(rx.recv().await, Some(PageEvent::Escape));
        assert_eq!(rx.recv().await, Some(PageEvent::VideoApiReady));
        assert_eq!(rx.recv().await, Some(PageEvent::Quit));
    }
}
