use std::time::Duration;

use color_eyre::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, SettingsResolver};
use crate::event::{PageEvent, spawn_script};
use crate::fixture::{PageFixture, ScriptEvent};
use crate::modal::{
    CallbackRegistry, Click, ClickOutcome, MediaBridge, ModalNames, ModalSnapshot, Modals,
};
use crate::page::{ElementId, Page};
use crate::platform::SimulatedPlatform;

/// Final page state after a session.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub scroll_locked: bool,
    pub focused: Option<String>,
    pub video_api_ready: bool,
    /// One line per handled event.
    pub transcript: Vec<String>,
    pub modals: Vec<ModalSnapshot>,
}

/// A page with its sections' modals, driven by page events.
pub struct App {
    page: Page,
    names: ModalNames,
    sections: Vec<Modals>,
    media: MediaBridge,
    transcript: Vec<String>,
    event_tx: UnboundedSender<PageEvent>,
    event_rx: UnboundedReceiver<PageEvent>,
    cancellation_token: CancellationToken,
}

impl App {
    /// Build the page from `fixture` and initialize every section.
    ///
    /// With `api_delay` set, the video API reports ready on its own after
    /// that delay; otherwise the script has to send `video_ready`.
    pub fn new(
        config: &AppConfig,
        fixture: &PageFixture,
        callbacks: CallbackRegistry,
        api_delay: Option<Duration>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();

        let namespace = config.namespace.namespace();
        let names = ModalNames::new(&namespace);
        let mut page = Page::new(namespace);
        let platform = SimulatedPlatform::new(event_tx.clone(), cancellation_token.clone(), api_delay);
        let mut media = MediaBridge::new(Box::new(platform), config.video.clone());

        let resolver = SettingsResolver::new(callbacks);
        let mut sections = fixture.build(&mut page);
        for name in config.sections.keys() {
            if !sections.iter().any(|section| &section.name == name) {
                warn!("Configured section '{}' is not on the page", name);
            }
        }

        let modals: Vec<Modals> = sections
            .iter_mut()
            .map(|section| {
                if let Some(section_config) = config.sections.get(&section.name) {
                    section
                        .settings
                        .insert(resolver.section_settings(section_config));
                }
                Modals::init(section, &mut page, &mut media)
            })
            .collect();

        Self {
            page,
            names,
            sections: modals,
            media,
            transcript: Vec::new(),
            event_tx,
            event_rx,
            cancellation_token,
        }
    }

    /// Replay `script` and return the final page state.
    pub async fn run(&mut self, script: Vec<ScriptEvent>) -> Result<PageReport> {
        info!("Replaying {} script event(s)", script.len());
        let feeder = spawn_script(
            script,
            self.event_tx.clone(),
            self.cancellation_token.clone(),
        );

        while let Some(event) = self.event_rx.recv().await {
            if event == PageEvent::Quit {
                break;
            }
            self.handle_event(event);
        }

        self.cancellation_token.cancel();
        feeder.await?;
        Ok(self.report())
    }

    pub fn handle_event(&mut self, event: PageEvent) {
        debug!("Handling event: {:?}", event);
        let line = match &event {
            PageEvent::Click { element, target } => {
                match self.click_on(element, target.as_deref()) {
                    Some(click) => format!("click {element}: {:?}", self.click(click)),
                    None => format!("click {element}: no such element"),
                }
            }
            PageEvent::ClickWrapper { modal, target } => {
                match self.click_wrapper(modal, target.as_deref()) {
                    Some(click) => format!("click wrapper of {modal}: {:?}", self.click(click)),
                    None => format!("click wrapper of {modal}: no such modal"),
                }
            }
            PageEvent::Escape => {
                let dispatched: Vec<_> = self
                    .sections
                    .iter_mut()
                    .filter_map(|modals| modals.escape(&mut self.page, &mut self.media))
                    .collect();
                format!("escape: {dispatched:?}")
            }
            PageEvent::VideoApiReady => {
                let created = self.media.api_ready();
                format!("video api ready: {created} player(s) created")
            }
            PageEvent::PlayerState { video, state } => {
                let closed: Vec<_> = self
                    .sections
                    .iter_mut()
                    .filter_map(|modals| {
                        modals.player_state_changed(&mut self.page, &mut self.media, video, *state)
                    })
                    .collect();
                format!("video {video} {state:?}: closed {closed:?}")
            }
            PageEvent::Quit => return,
        };
        info!("{}", line);
        self.transcript.push(line);
    }

    fn click(&mut self, click: Click) -> ClickOutcome {
        for modals in &mut self.sections {
            let outcome = modals.click(&mut self.page, &mut self.media, click);
            if outcome != ClickOutcome::NotATrigger {
                return outcome;
            }
        }
        ClickOutcome::NotATrigger
    }

    fn click_on(&self, element: &str, target: Option<&str>) -> Option<Click> {
        let trigger = self.page.document.element_by_html_id(element)?;
        let target = match target {
            Some(target) => self.page.document.element_by_html_id(target)?,
            None => trigger,
        };
        Some(Click { trigger, target })
    }

    fn click_wrapper(&self, modal: &str, target: Option<&str>) -> Option<Click> {
        let doc = &self.page.document;
        let id_attr = &self.names.id_attr;
        let container = doc
            .find(doc.root(), |doc, e| doc.attr(e, id_attr) == Some(modal))
            .into_iter()
            .next()?;
        let wrapper = doc
            .parent(container)
            .filter(|&parent| doc.has_class(parent, &self.names.wrapper_class))?;
        let target = match target {
            Some(target) => doc.element_by_html_id(target)?,
            None => wrapper,
        };
        Some(Click {
            trigger: wrapper,
            target,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn report(&self) -> PageReport {
        PageReport {
            scroll_locked: self.page.is_scroll_locked(),
            focused: self.page.document.focused().map(|e| self.describe(e)),
            video_api_ready: self.media.is_api_ready(),
            transcript: self.transcript.clone(),
            modals: self
                .sections
                .iter()
                .flat_map(|modals| modals.snapshot(&self.media))
                .collect(),
        }
    }

    fn describe(&self, element: ElementId) -> String {
        let doc = &self.page.document;
        if let Some(id) = doc.attr(element, "id") {
            format!("{}#{}", doc.tag(element), id)
        } else if let Some(modal) = doc.attr(element, &self.names.id_attr) {
            format!("{}[{}={}]", doc.tag(element), self.names.id_attr, modal)
        } else {
            doc.tag(element).to_string()
        }
    }
}
