//! The modals component of a section.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ModalAction;
use crate::modal::{
    ActionDispatcher, Click, Dispatch, MediaBridge, ModalId, ModalNames, ModalRegistry, ModalState,
    ModalsSettings, PlayerState, VideoId, VisibilityController, is_video_url, resolve,
};
use crate::page::{ElementId, Page, Section};

/// Result of routing a click through a section's modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An open-trigger opened its modal.
    Opened(ModalId),
    /// An open-trigger named a modal this section does not have.
    UnknownModal(ModalId),
    /// An action trigger was dispatched.
    Action(Dispatch),
    /// The element is not a modal trigger of this section.
    NotATrigger,
}

/// State of one modal, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalSnapshot {
    pub section: String,
    pub id: ModalId,
    pub state: ModalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoId>,
    pub player: bool,
}

/// Modal dialogs of one section.
///
/// Built once per section by [`Modals::init`]. The [`MediaBridge`] is shared
/// by every section of a page and passed into the operations that need it.
#[derive(Debug)]
pub struct Modals {
    section: String,
    section_element: ElementId,
    names: ModalNames,
    registry: ModalRegistry,
    visibility: VisibilityController,
    dispatcher: ActionDispatcher,
}

impl Modals {
    /// Initialize the modals of `section`.
    ///
    /// Video triggers get a generated modal each, then every modal container
    /// in the section is resolved, registered, wrapped and made focusable.
    pub fn init(section: &mut Section, page: &mut Page, media: &mut MediaBridge) -> Self {
        let names = ModalNames::new(&page.namespace);
        let mut modals = Self {
            section: section.name.clone(),
            section_element: section.element,
            names: names.clone(),
            registry: ModalRegistry::new(),
            visibility: VisibilityController::new(names.clone()),
            dispatcher: ActionDispatcher::new(names),
        };

        modals.prepare_video_triggers(page, media);

        let settings: &ModalsSettings = section.settings.get_or_default::<ModalsSettings>();
        let id_attr = modals.names.id_attr.clone();
        let containers = page
            .document
            .find(section.element, |doc, e| doc.has_attr(e, &id_attr));
        for container in containers {
            modals.prepare(page, container, settings);
        }

        info!(
            "Initialized {} modal(s) in section '{}'",
            modals.registry.len(),
            modals.section
        );
        modals
    }

    fn prepare_video_triggers(&self, page: &mut Page, media: &mut MediaBridge) {
        let open_attr = &self.names.open_attr;
        let triggers = page
            .document
            .find(self.section_element, |doc, e| doc.has_attr(e, open_attr));

        for trigger in triggers {
            let Some(value) = page.document.attr(trigger, open_attr).map(str::to_string) else {
                continue;
            };
            if !is_video_url(&value) {
                continue;
            }
            let Some(video) = VideoId::parse(&value) else {
                warn!("No video id in '{}', treating it as a plain trigger", value);
                continue;
            };

            let modal_id = video.modal_id();
            page.document
                .set_attr(trigger, self.names.video_attr.clone(), "true");
            page.document
                .set_attr(trigger, open_attr.clone(), modal_id.as_str());

            if self.find_container(page, &modal_id).is_none() {
                self.append_video_modal(page, &video);
            }
            media.bind(modal_id, video.clone(), video.player_host_id());
        }
    }

    fn append_video_modal(&self, page: &mut Page, video: &VideoId) {
        let doc = &mut page.document;
        let modal = doc.create_element("div");
        doc.set_attr(modal, self.names.id_attr.clone(), video.modal_id().as_str());
        doc.set_attr(modal, self.names.video_attr.clone(), "true");
        let host = doc.create_element("div");
        doc.set_attr(host, "id", video.player_host_id());
        doc.append_child(modal, host);
        doc.append_child(self.section_element, modal);
        debug!("Appended video modal for {} to section '{}'", video, self.section);
    }

    fn find_container(&self, page: &Page, id: &ModalId) -> Option<ElementId> {
        let id_attr = &self.names.id_attr;
        page.document
            .find(self.section_element, |doc, e| {
                doc.attr(e, id_attr) == Some(id.as_str())
            })
            .into_iter()
            .next()
    }

    fn prepare(&mut self, page: &mut Page, container: ElementId, settings: &ModalsSettings) {
        let Some(id) = page
            .document
            .attr(container, &self.names.id_attr)
            .map(ModalId::new)
        else {
            return;
        };

        let config = resolve(&settings.default, settings.modal(&id), container);
        self.registry.register(id.clone(), config);
        self.visibility.track(id);

        self.wrap(page, container);
        page.document.set_attr(container, "tabindex", "0");
    }

    fn wrap(&self, page: &mut Page, container: ElementId) {
        let doc = &mut page.document;
        let already_wrapped = doc
            .parent(container)
            .is_some_and(|parent| doc.has_class(parent, &self.names.wrapper_class));
        if already_wrapped {
            return;
        }

        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, self.names.wrapper_class.clone());
        doc.set_attr(
            wrapper,
            self.names.action_attr.clone(),
            ModalAction::WrapperClick.name(),
        );
        doc.wrap(container, wrapper);
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub const fn names(&self) -> &ModalNames {
        &self.names
    }

    pub const fn registry(&self) -> &ModalRegistry {
        &self.registry
    }

    pub fn state(&self, id: &ModalId) -> ModalState {
        self.visibility.state(id)
    }

    pub fn owns(&self, id: &ModalId) -> bool {
        self.registry.lookup(id).is_some()
    }

    pub fn open_modal(&self) -> Option<&ModalId> {
        self.visibility.open_modal()
    }

    /// Route a click. Elements outside the section are not triggers.
    pub fn click(&mut self, page: &mut Page, media: &mut MediaBridge, click: Click) -> ClickOutcome {
        let section = self.section_element;
        if page
            .document
            .closest(click.trigger, |_, e| e == section)
            .is_none()
        {
            return ClickOutcome::NotATrigger;
        }

        let doc = &page.document;
        if let Some(value) = doc.attr(click.trigger, &self.names.open_attr) {
            let id = ModalId::new(value);
            let is_video = doc.attr(click.trigger, &self.names.video_attr) == Some("true");
            let opened = if is_video {
                self.open_video(page, media, &id)
            } else {
                self.open(page, &id)
            };
            return if opened {
                ClickOutcome::Opened(id)
            } else {
                ClickOutcome::UnknownModal(id)
            };
        }

        if let Some(action) = doc
            .attr(click.trigger, &self.names.action_attr)
            .map(str::to_string)
        {
            return ClickOutcome::Action(self.dispatcher.handle(
                &action,
                click,
                page,
                &self.registry,
                &mut self.visibility,
                media,
            ));
        }

        ClickOutcome::NotATrigger
    }

    pub fn open(&mut self, page: &mut Page, id: &ModalId) -> bool {
        self.visibility.open(id, page, &self.registry)
    }

    /// Start the modal's video, then open it.
    pub fn open_video(&mut self, page: &mut Page, media: &mut MediaBridge, id: &ModalId) -> bool {
        if !self.owns(id) {
            debug!("Ignoring video open for unknown modal '{}'", id);
            return false;
        }
        media.play(id);
        self.open(page, id)
    }

    pub fn close(&mut self, page: &mut Page, media: &mut MediaBridge, id: &ModalId) -> bool {
        self.visibility.close(id, page, &self.registry, media)
    }

    /// Dispatch the escape action to the open modal.
    pub fn escape(&mut self, page: &mut Page, media: &mut MediaBridge) -> Option<Dispatch> {
        let id = self.visibility.open_modal()?.clone();
        let element = self.registry.lookup(&id)?.element;
        Some(self.dispatcher.dispatch(
            ModalAction::Escape,
            Click::direct(element),
            page,
            &self.registry,
            &mut self.visibility,
            media,
        ))
    }

    /// Player state report. Closes the modal whose video ended, if this
    /// section owns it.
    pub fn player_state_changed(
        &mut self,
        page: &mut Page,
        media: &mut MediaBridge,
        video: &VideoId,
        state: PlayerState,
    ) -> Option<ModalId> {
        let id = media.state_changed(video, state)?;
        if !self.owns(&id) {
            return None;
        }
        info!("Video {} ended, closing modal '{}'", video, id);
        self.close(page, media, &id);
        Some(id)
    }

    pub fn snapshot(&self, media: &MediaBridge) -> Vec<ModalSnapshot> {
        self.registry
            .ids()
            .into_iter()
            .map(|id| ModalSnapshot {
                section: self.section.clone(),
                id: id.clone(),
                state: self.visibility.state(id),
                video: media.video(id).cloned(),
                player: media.has_player(id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VideoConfig;
    use crate::modal::media::testing::{Call, RecordingPlatform};
    use crate::modal::{CallbackOutcome, Handler, IgnoreReason, ModalSettings, OPENED_CLASS};
    use crate::page::Namespace;

    const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    struct Fixture {
        page: Page,
        section: Section,
        media: MediaBridge,
        platform: RecordingPlatform,
        names: ModalNames,
    }

    impl Fixture {
        fn new() -> Self {
            let namespace = Namespace::default();
            let names = ModalNames::new(&namespace);
            let mut page = Page::new(namespace);
            let section = page.add_section("hero");
            let platform = RecordingPlatform::default();
            Self {
                page,
                section,
                media: MediaBridge::new(Box::new(platform.clone()), VideoConfig::default()),
                platform,
                names,
            }
        }

        fn element(&mut self, parent: ElementId, tag: &str, attrs: &[(&str, &str)]) -> ElementId {
            let doc = &mut self.page.document;
            let element = doc.create_element(tag);
            for (name, value) in attrs {
                doc.set_attr(element, *name, *value);
            }
            doc.append_child(parent, element);
            element
        }

        fn modal(&mut self, id: &str) -> ElementId {
            let attr = self.names.id_attr.clone();
            let section = self.section.element;
            self.element(section, "div", &[(attr.as_str(), id)])
        }

        fn open_trigger(&mut self, value: &str) -> ElementId {
            let attr = self.names.open_attr.clone();
            let section = self.section.element;
            self.element(section, "button", &[(attr.as_str(), value)])
        }

        fn action_trigger(&mut self, parent: ElementId, action: &str) -> ElementId {
            let attr = self.names.action_attr.clone();
            self.element(parent, "button", &[(attr.as_str(), action)])
        }

        fn init(&mut self) -> Modals {
            Modals::init(&mut self.section, &mut self.page, &mut self.media)
        }

        fn wrapper_of(&self, modal: ElementId) -> ElementId {
            self.page.document.parent(modal).unwrap()
        }
    }

    #[test]
    fn test_init_wraps_and_registers() {
        let mut fx = Fixture::new();
        let modal = fx.modal("newsletter");
        let modals = fx.init();

        let wrapper = fx.wrapper_of(modal);
        assert!(fx.page.document.has_class(wrapper, &fx.names.wrapper_class));
        assert_eq!(
            fx.page.document.attr(wrapper, &fx.names.action_attr),
            Some("wrapperClick")
        );
        assert_eq!(fx.page.document.parent(wrapper), Some(fx.section.element));
        assert_eq!(fx.page.document.attr(modal, "tabindex"), Some("0"));
        assert!(modals.owns(&ModalId::new("newsletter")));
        assert_eq!(modals.state(&ModalId::new("newsletter")), ModalState::Closed);
    }

    #[test]
    fn test_section_settings_apply() {
        let mut fx = Fixture::new();
        fx.modal("sign-up");
        fx.modal("other");
        let mut settings = ModalsSettings::new();
        settings.default = ModalSettings::new().with(
            ModalAction::Escape,
            Handler::callback(|_| CallbackOutcome::Keep),
        );
        settings.set_modal(
            &ModalId::new("sign-up"),
            ModalSettings::new().with(ModalAction::Escape, Handler::Close),
        );
        fx.section.settings.insert(settings);

        let modals = fx.init();
        let registry = modals.registry();

        let sign_up = registry.lookup(&ModalId::new("sign-up")).unwrap();
        assert!(sign_up.handler(ModalAction::Escape).is_close());
        let other = registry.lookup(&ModalId::new("other")).unwrap();
        assert!(!other.handler(ModalAction::Escape).is_close());
        assert!(other.handler(ModalAction::Confirm).is_close());
    }

    #[test]
    fn test_open_trigger_then_close_button() {
        let mut fx = Fixture::new();
        let modal = fx.modal("newsletter");
        let close = fx.action_trigger(modal, "close");
        let open = fx.open_trigger("newsletter");
        let mut modals = fx.init();

        let outcome = modals.click(&mut fx.page, &mut fx.media, Click::direct(open));
        assert_eq!(outcome, ClickOutcome::Opened(ModalId::new("newsletter")));
        assert!(fx.page.is_scroll_locked());
        assert!(
            fx.page
                .document
                .has_class(fx.wrapper_of(modal), OPENED_CLASS)
        );

        let outcome = modals.click(&mut fx.page, &mut fx.media, Click::direct(close));
        assert_eq!(
            outcome,
            ClickOutcome::Action(Dispatch::Closed(ModalId::new("newsletter")))
        );
        assert!(!fx.page.is_scroll_locked());
    }

    #[test]
    fn test_wrapper_click_guard() {
        let mut fx = Fixture::new();
        let modal = fx.modal("newsletter");
        let content = fx.element(modal, "p", &[]);
        let mut modals = fx.init();
        modals.open(&mut fx.page, &ModalId::new("newsletter"));
        let wrapper = fx.wrapper_of(modal);

        let bubbled = modals.click(
            &mut fx.page,
            &mut fx.media,
            Click {
                trigger: wrapper,
                target: content,
            },
        );
        assert_eq!(
            bubbled,
            ClickOutcome::Action(Dispatch::Ignored(IgnoreReason::BubbledClick))
        );
        assert_eq!(modals.state(&ModalId::new("newsletter")), ModalState::Open);

        modals.click(&mut fx.page, &mut fx.media, Click::direct(wrapper));
        assert_eq!(modals.state(&ModalId::new("newsletter")), ModalState::Closed);
    }

    #[test]
    fn test_misconfigured_trigger_does_not_break_others() {
        let mut fx = Fixture::new();
        fx.modal("newsletter");
        let broken = fx.open_trigger("missing");
        let working = fx.open_trigger("newsletter");
        let mut modals = fx.init();

        assert_eq!(
            modals.click(&mut fx.page, &mut fx.media, Click::direct(broken)),
            ClickOutcome::UnknownModal(ModalId::new("missing"))
        );
        assert!(!fx.page.is_scroll_locked());
        assert_eq!(
            modals.click(&mut fx.page, &mut fx.media, Click::direct(working)),
            ClickOutcome::Opened(ModalId::new("newsletter"))
        );
    }

    #[test]
    fn test_escape_closes_open_modal() {
        let mut fx = Fixture::new();
        fx.modal("newsletter");
        let mut modals = fx.init();

        assert_eq!(modals.escape(&mut fx.page, &mut fx.media), None);

        modals.open(&mut fx.page, &ModalId::new("newsletter"));
        assert_eq!(
            modals.escape(&mut fx.page, &mut fx.media),
            Some(Dispatch::Closed(ModalId::new("newsletter")))
        );
        assert_eq!(modals.open_modal(), None);
    }

    #[test]
    fn test_video_trigger_lifecycle() {
        let mut fx = Fixture::new();
        let trigger = fx.open_trigger(VIDEO_URL);
        let mut modals = fx.init();
        let video = VideoId::parse(VIDEO_URL).unwrap();
        let id = video.modal_id();

        assert_eq!(
            fx.page.document.attr(trigger, &fx.names.open_attr),
            Some("youtube-dQw4w9WgXcQ")
        );
        assert_eq!(
            fx.page.document.attr(trigger, &fx.names.video_attr),
            Some("true")
        );
        assert!(modals.owns(&id));
        assert!(
            fx.page
                .document
                .element_by_html_id("youtube-player-dQw4w9WgXcQ")
                .is_some()
        );

        fx.media.api_ready();
        assert_eq!(
            modals.click(&mut fx.page, &mut fx.media, Click::direct(trigger)),
            ClickOutcome::Opened(id.clone())
        );
        let playing =
            modals.player_state_changed(&mut fx.page, &mut fx.media, &video, PlayerState::Playing);
        assert_eq!(playing, None);
        let ended =
            modals.player_state_changed(&mut fx.page, &mut fx.media, &video, PlayerState::Ended);
        assert_eq!(ended, Some(id.clone()));
        assert_eq!(modals.state(&id), ModalState::Closed);
        assert!(!fx.page.is_scroll_locked());

        let calls = fx.platform.calls();
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
    fn test_several_video_modals_all_get_players() {
        let mut fx = Fixture::new();
        fx.open_trigger("https://youtu.be/aaaaaaaaaaa");
        fx.open_trigger("https://youtu.be/bbbbbbbbbbb");
        fx.open_trigger("https://youtu.be/aaaaaaaaaaa");
        let modals = fx.init();

        assert_eq!(fx.media.api_ready(), 2);
        let snapshot = modals.snapshot(&fx.media);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.iter().all(|modal| modal.player));
        assert_eq!(fx.platform.count(|c| matches!(c, Call::LoadApi(_))), 1);
    }

    #[test]
    fn test_unparseable_video_url_falls_back_to_plain_trigger() {
        let mut fx = Fixture::new();
        let trigger = fx.open_trigger("https://www.youtube.com/channel/xyz");
        let mut modals = fx.init();

        assert!(modals.registry().is_empty());
        assert!(!fx.page.document.has_attr(trigger, &fx.names.video_attr));
        assert!(fx.platform.calls().is_empty());
        assert_eq!(
            modals.click(&mut fx.page, &mut fx.media, Click::direct(trigger)),
            ClickOutcome::UnknownModal(ModalId::new("https://www.youtube.com/channel/xyz"))
        );
    }

    #[test]
    fn test_clicks_outside_section_are_not_triggers() {
        let mut fx = Fixture::new();
        fx.modal("newsletter");
        let mut modals = fx.init();
        let elsewhere = fx.page.add_section("footer");
        let attr = fx.names.open_attr.clone();
        let stray = fx.element(elsewhere.element, "button", &[(attr.as_str(), "newsletter")]);

        assert_eq!(
            modals.click(&mut fx.page, &mut fx.media, Click::direct(stray)),
            ClickOutcome::NotATrigger
        );
    }

    // Documents current behaviour: initializing twice re-registers every
    // modal, replacing its configuration, without adding a second wrapper.
    #[test]
    fn test_double_init_replaces_configuration() {
        let mut fx = Fixture::new();
        let modal = fx.modal("newsletter");
        let first = fx.init();
        assert!(
            first
                .registry()
                .lookup(&ModalId::new("newsletter"))
                .unwrap()
                .handler(ModalAction::Confirm)
                .is_close()
        );

        fx.section.settings.insert({
            let mut settings = ModalsSettings::new();
            settings.set_modal(
                &ModalId::new("newsletter"),
                ModalSettings::new().with(
                    ModalAction::Confirm,
                    Handler::callback(|_| CallbackOutcome::Keep),
                ),
            );
            settings
        });
        let second = fx.init();

        let wrapper = fx.wrapper_of(modal);
        assert_eq!(fx.page.document.parent(wrapper), Some(fx.section.element));
        assert!(
            !second
                .registry()
                .lookup(&ModalId::new("newsletter"))
                .unwrap()
                .handler(ModalAction::Confirm)
                .is_close()
        );
    }
}
