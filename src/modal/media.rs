//! Embedded video players for video-backed modals.
//!
//! The platform's embed API is loaded once per page. Until it signals
//! readiness, video modals wait in a queue; readiness drains the whole queue
//! so every waiting modal gets its player.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::VideoConfig;
use crate::modal::ModalId;

/// Prefix of the generated modal id for a video.
pub const VIDEO_MODAL_PREFIX: &str = "youtube-";
/// Prefix of the generated element id hosting a player.
pub const PLAYER_HOST_PREFIX: &str = "youtube-player-";

const VIDEO_ID_LEN: usize = 11;

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+$")
        .unwrap_or_else(|e| unreachable!("invalid video url pattern: {e}"))
});

static VIDEO_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*((youtu\.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*")
        .unwrap_or_else(|e| unreachable!("invalid video id pattern: {e}"))
});

/// Whether a trigger value points at the video platform.
pub fn is_video_url(value: &str) -> bool {
    VIDEO_URL.is_match(value)
}

/// Content id of a video on the platform, always 11 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VideoId(String);

impl VideoId {
    /// An id as reported by the platform itself, taken as is.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the content id from a watch, short, embed or `/v/` URL.
    ///
    /// ```
    /// use pagemodal::modal::VideoId;
    ///
    /// let id = VideoId::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    /// assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    /// assert!(VideoId::parse("https://example.com/video").is_none());
    /// ```
    pub fn parse(url: &str) -> Option<Self> {
        let captures = VIDEO_REFERENCE.captures(url)?;
        let id = captures.get(7)?.as_str();
        (id.len() == VIDEO_ID_LEN).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the modal generated for this video.
    pub fn modal_id(&self) -> ModalId {
        ModalId::new(format!("{VIDEO_MODAL_PREFIX}{}", self.0))
    }

    /// Element id of the player host inside the generated modal.
    pub fn player_host_id(&self) -> String {
        format!("{PLAYER_HOST_PREFIX}{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Playback state reported by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// Map the platform's numeric state code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }
}

/// Options a player is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Element id the player replaces.
    pub host: String,
    pub video: VideoId,
    pub width: String,
    pub height: String,
}

/// A player instance created by the platform.
pub trait VideoPlayer {
    fn play(&mut self);

    fn stop(&mut self);

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);
}

/// The external video platform.
///
/// State changes of created players are reported back through
/// [`MediaBridge::state_changed`].
pub trait VideoPlatform {
    /// Start loading the embed API. Readiness is signalled later through
    /// [`MediaBridge::api_ready`].
    fn load_api(&mut self, script_src: &str);

    fn create_player(&mut self, options: &PlayerOptions) -> Box<dyn VideoPlayer>;
}

struct VideoBinding {
    video: VideoId,
    host: String,
    player: Option<Box<dyn VideoPlayer>>,
}

/// Binds video players to the modals that show them.
pub struct MediaBridge {
    platform: Box<dyn VideoPlatform>,
    config: VideoConfig,
    api_requested: bool,
    api_ready: bool,
    bindings: HashMap<ModalId, VideoBinding>,
    pending: VecDeque<ModalId>,
}

impl MediaBridge {
    pub fn new(platform: Box<dyn VideoPlatform>, config: VideoConfig) -> Self {
        Self {
            platform,
            config,
            api_requested: false,
            api_ready: false,
            bindings: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Bind a video to a modal. The player is created now if the API is
    /// ready, otherwise once it becomes ready.
    pub fn bind(&mut self, modal: ModalId, video: VideoId, host: impl Into<String>) {
        if self.bindings.contains_key(&modal) {
            debug!("Modal '{}' already bound to video {}", modal, video);
            return;
        }

        self.ensure_api_loaded();
        self.bindings.insert(
            modal.clone(),
            VideoBinding {
                video,
                host: host.into(),
                player: None,
            },
        );

        if self.api_ready {
            self.create_player(&modal);
        } else {
            debug!("Queueing player for modal '{}' until the video API is ready", modal);
            self.pending.push_back(modal);
        }
    }

    fn ensure_api_loaded(&mut self) {
        if self.api_requested {
            return;
        }
        info!("Loading video API from {}", self.config.api_script);
        self.platform.load_api(&self.config.api_script);
        self.api_requested = true;
    }

    /// Readiness signal from the platform. Returns the number of players created.
    pub fn api_ready(&mut self) -> usize {
        if self.api_ready {
            debug!("Video API readiness signalled again, ignoring");
            return 0;
        }
        self.api_ready = true;

        let mut created = 0;
        while let Some(modal) = self.pending.pop_front() {
            if self.create_player(&modal) {
                created += 1;
            }
        }
        info!("Video API ready, created {} player(s)", created);
        created
    }

    fn create_player(&mut self, modal: &ModalId) -> bool {
        let Some(binding) = self.bindings.get_mut(modal) else {
            return false;
        };
        if binding.player.is_some() {
            return false;
        }

        let options = PlayerOptions {
            host: binding.host.clone(),
            video: binding.video.clone(),
            width: self.config.width.clone(),
            height: self.config.height.clone(),
        };
        debug!("Creating player for modal '{}' in #{}", modal, options.host);
        binding.player = Some(self.platform.create_player(&options));
        true
    }

    pub const fn is_api_ready(&self) -> bool {
        self.api_ready
    }

    pub fn has_player(&self, modal: &ModalId) -> bool {
        self.bindings
            .get(modal)
            .is_some_and(|binding| binding.player.is_some())
    }

    pub fn video(&self, modal: &ModalId) -> Option<&VideoId> {
        self.bindings.get(modal).map(|binding| &binding.video)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Start playback of the modal's video. Returns `false` when no player exists yet.
    pub fn play(&mut self, modal: &ModalId) -> bool {
        match self.player(modal) {
            Some(player) => {
                player.play();
                true
            }
            None => {
                warn!("No player for modal '{}' yet, opening without playback", modal);
                false
            }
        }
    }

    /// Stop playback and rewind so the next open starts from the beginning.
    pub fn stop(&mut self, modal: &ModalId) -> bool {
        match self.player(modal) {
            Some(player) => {
                player.stop();
                player.seek_to(0.0, true);
                true
            }
            None => {
                debug!("No player to stop for modal '{}'", modal);
                false
            }
        }
    }

    fn player(&mut self, modal: &ModalId) -> Option<&mut (dyn VideoPlayer + 'static)> {
        self.bindings
            .get_mut(modal)
            .and_then(|binding| binding.player.as_deref_mut())
    }

    /// Player state report. Returns the modal to close when its video ended.
    pub fn state_changed(&self, video: &VideoId, state: PlayerState) -> Option<ModalId> {
        debug!("Video {} changed state to {:?}", video, state);
        if state != PlayerState::Ended {
            return None;
        }
        self.bindings
            .iter()
            .find(|(_, binding)| &binding.video == video)
            .map(|(modal, _)| modal.clone())
    }
}

impl fmt::Debug for MediaBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaBridge")
            .field("api_requested", &self.api_requested)
            .field("api_ready", &self.api_ready)
            .field("bindings", &self.bindings.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingPlatform};
    use super::*;

    fn video(id: &str) -> VideoId {
        VideoId::parse(&format!("https://youtu.be/{id}")).unwrap()
    }

    fn bridge() -> (MediaBridge, RecordingPlatform) {
        let platform = RecordingPlatform::default();
        let bridge = MediaBridge::new(Box::new(platform.clone()), VideoConfig::default());
        (bridge, platform)
    }

    #[test]
    fn test_parse_video_urls() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://youtu.be/dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("http://youtube.com/v/dQw4w9WgXcQ?start=10", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/watch?v=short", None),
            ("https://example.com/video", None),
        ];
        for (url, expected) in cases {
            assert_eq!(
                VideoId::parse(url).as_ref().map(VideoId::as_str),
                expected,
                "{url}"
            );
        }
    }

    #[test]
    fn test_video_url_detection() {
        assert!(is_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("youtu.be/dQw4w9WgXcQ"));
        assert!(is_video_url("https://youtube.com/channel/abc"));
        assert!(!is_video_url("newsletter"));
        assert!(!is_video_url("https://vimeo.com/123"));
    }

    #[test]
    fn test_generated_ids() {
        let id = video("dQw4w9WgXcQ");
        assert_eq!(id.modal_id(), ModalId::new("youtube-dQw4w9WgXcQ"));
        assert_eq!(id.player_host_id(), "youtube-player-dQw4w9WgXcQ");
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(PlayerState::from_code(0), Some(PlayerState::Ended));
        assert_eq!(PlayerState::from_code(-1), Some(PlayerState::Unstarted));
        assert_eq!(PlayerState::from_code(4), None);
    }

    #[test]
    fn test_readiness_drains_every_pending_modal() {
        let (mut bridge, platform) = bridge();
        let first = video("aaaaaaaaaaa");
        let second = video("bbbbbbbbbbb");
        bridge.bind(first.modal_id(), first.clone(), first.player_host_id());
        bridge.bind(second.modal_id(), second.clone(), second.player_host_id());

        assert_eq!(bridge.pending(), 2);
        assert!(!bridge.has_player(&first.modal_id()));

        assert_eq!(bridge.api_ready(), 2);
        assert!(bridge.has_player(&first.modal_id()));
        assert!(bridge.has_player(&second.modal_id()));
        assert_eq!(bridge.pending(), 0);
        assert_eq!(
            platform.calls(),
            vec![
                Call::LoadApi(crate::config::DEFAULT_API_SCRIPT.to_string()),
                Call::Create("youtube-player-aaaaaaaaaaa".to_string()),
                Call::Create("youtube-player-bbbbbbbbbbb".to_string()),
            ]
        );

        // A second readiness signal creates nothing new.
        assert_eq!(bridge.api_ready(), 0);
    }

    #[test]
    fn test_bind_after_ready_creates_immediately() {
        let (mut bridge, platform) = bridge();
        bridge.api_ready();

        let id = video("ccccccccccc");
        bridge.bind(id.modal_id(), id.clone(), id.player_host_id());

        assert!(bridge.has_player(&id.modal_id()));
        assert_eq!(platform.count(|c| matches!(c, Call::LoadApi(_))), 1);
    }

    #[test]
    fn test_stop_rewinds() {
        let (mut bridge, platform) = bridge();
        let id = video("dQw4w9WgXcQ");
        bridge.bind(id.modal_id(), id.clone(), id.player_host_id());

        assert!(!bridge.stop(&id.modal_id()));
        bridge.api_ready();
        assert!(bridge.play(&id.modal_id()));
        assert!(bridge.stop(&id.modal_id()));

        let calls = platform.calls();
        assert_eq!(
            &calls[calls.len() - 3..],
            &[
                Call::Play("dQw4w9WgXcQ".to_string()),
                Call::Stop("dQw4w9WgXcQ".to_string()),
                Call::SeekTo("dQw4w9WgXcQ".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn test_ended_state_names_owning_modal() {
        let (mut bridge, _) = bridge();
        let id = video("dQw4w9WgXcQ");
        bridge.bind(id.modal_id(), id.clone(), id.player_host_id());

        assert_eq!(bridge.state_changed(&id, PlayerState::Playing), None);
        assert_eq!(bridge.state_changed(&id, PlayerState::Ended), Some(id.modal_id()));
        assert_eq!(bridge.state_changed(&video("zzzzzzzzzzz"), PlayerState::Ended), None);
    }
}
