//! Site session: the root that owns navigation and mounts one page subtree.
//!
//! Each page subtree owns its controllers. Leaving a page drops them, which
//! resets the FAQ accordion, clears map hover, and tears down the contact
//! form (discarding any submission still in flight). The scroll reset runs
//! after the new subtree is mounted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    contact::{ContactForm, ContactView, Field, Notifier, PendingSubmission, Submitter},
    content::Content,
    overlay::{AccordionRegistry, EntityId, HoverRegistry},
    page::{MobileMenu, NavigationController, Page, ScrollReset},
    projection::{MapView, MarkerProjection, PlacedMarker, RenderedMarker},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// Input events delivered by the host, in delivery order.
pub enum UiEvent {
    Navigate {
        page: String,
        #[serde(default)]
        from_menu: bool,
    },
    ToggleMenu,
    ToggleFaq {
        id: EntityId,
    },
    PointerEnter {
        id: EntityId,
    },
    PointerLeave {
        id: EntityId,
    },
    Focus {
        id: EntityId,
    },
    Blur {
        id: EntityId,
    },
    Input {
        field: Field,
        value: String,
    },
    BlurField {
        field: Field,
    },
    Submit,
}

enum Mounted {
    Static(Page),
    Faq(AccordionRegistry),
    Partners {
        markers: Vec<PlacedMarker>,
        hover: HoverRegistry,
    },
    Contact(ContactForm),
}

impl Mounted {
    fn page(&self) -> Page {
        match self {
            Mounted::Static(page) => *page,
            Mounted::Faq(_) => Page::Faq,
            Mounted::Partners { .. } => Page::Partners,
            Mounted::Contact(_) => Page::Contact,
        }
    }
}

pub struct Site {
    content: Arc<Content>,
    map_view: MapView,
    navigation: NavigationController,
    menu: MobileMenu,
    mounted: Mounted,
    submitter: Arc<dyn Submitter>,
    notifier: Arc<dyn Notifier>,
}

impl Site {
    pub fn new(
        content: Arc<Content>,
        scroll: impl ScrollReset + Send + 'static,
        submitter: Arc<dyn Submitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let navigation = NavigationController::new(scroll);
        let mut site = Self {
            content,
            map_view: MapView::default(),
            navigation,
            menu: MobileMenu::default(),
            mounted: Mounted::Static(Page::default()),
            submitter,
            notifier,
        };
        site.mounted = site.mount(site.navigation.current());
        site
    }

    pub fn with_map_view(mut self, map_view: MapView) -> Self {
        self.map_view = map_view;
        self
    }

    pub fn page(&self) -> Page {
        self.navigation.current()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The mounted contact form, when the contact page is active.
    pub fn contact(&self) -> Option<&ContactForm> {
        match &self.mounted {
            Mounted::Contact(form) => Some(form),
            _ => None,
        }
    }

    pub fn navigate(&mut self, page: Page) {
        if self.mounted.page() != page {
            // Drop the previous subtree before building the next one.
            self.mounted = Mounted::Static(page);
            self.mounted = self.mount(page);
        }
        self.navigation.navigate(page);
    }

    /// Apply one event. Returns the pending submission when the event started one.
    pub fn dispatch(&mut self, event: UiEvent) -> Option<PendingSubmission> {
        let page = self.page();
        trace!(?event, %page, "dispatch");
        match event {
            UiEvent::Navigate { page: target, from_menu } => {
                if from_menu {
                    self.menu.close();
                }
                self.navigate(Page::resolve(&target));
            }
            UiEvent::ToggleMenu => self.menu.toggle(),
            UiEvent::ToggleFaq { id } => match &mut self.mounted {
                Mounted::Faq(accordion) => accordion.toggle(id),
                _ => ignored("toggle_faq", page),
            },
            UiEvent::PointerEnter { id } | UiEvent::Focus { id } => match &mut self.mounted {
                Mounted::Partners { hover, .. } => hover.set_hover(Some(id)),
                _ => ignored("hover", page),
            },
            UiEvent::PointerLeave { id } | UiEvent::Blur { id } => match &mut self.mounted {
                Mounted::Partners { hover, .. } => {
                    hover.clear_hover(&id);
                }
                _ => ignored("hover_clear", page),
            },
            UiEvent::Input { field, value } => match &self.mounted {
                Mounted::Contact(form) => {
                    form.input(field, value);
                }
                _ => ignored("input", page),
            },
            UiEvent::BlurField { field } => match &self.mounted {
                Mounted::Contact(form) => {
                    form.blur(field);
                }
                _ => ignored("blur_field", page),
            },
            UiEvent::Submit => match &self.mounted {
                Mounted::Contact(form) => return Some(form.submit()),
                _ => ignored("submit", page),
            },
        }
        None
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let mut snapshot = ViewSnapshot {
            page: self.page(),
            menu_open: self.menu.is_open(),
            home: None,
            faq: None,
            map: None,
            contact: None,
        };
        match &self.mounted {
            Mounted::Static(Page::Home) => {
                snapshot.home = Some(HomeView {
                    show_updates: self.content.has_updates(),
                    news: self
                        .content
                        .news
                        .iter()
                        .map(|item| NewsCard {
                            title: item.title.clone(),
                            date: item.display_date(),
                            category: item.category.clone(),
                        })
                        .collect(),
                });
            }
            Mounted::Static(_) => {}
            Mounted::Faq(accordion) => {
                snapshot.faq = Some(FaqView {
                    entries: self
                        .content
                        .faq_entries()
                        .map(|(id, entry)| FaqItemView {
                            expanded: accordion.is_active(&id),
                            id,
                            question: entry.question.clone(),
                        })
                        .collect(),
                });
            }
            Mounted::Partners { markers, hover } => {
                snapshot.map = Some(MapSnapshot {
                    view: self.map_view.clone(),
                    markers: markers.iter().map(|marker| marker.render(hover)).collect(),
                });
            }
            Mounted::Contact(form) => snapshot.contact = Some(form.view()),
        }
        snapshot
    }

    fn mount(&self, page: Page) -> Mounted {
        debug!(%page, "mount");
        match page {
            Page::Faq => Mounted::Faq(AccordionRegistry::first_of(
                self.content.faq_entries().map(|(id, _)| id),
            )),
            Page::Partners => Mounted::Partners {
                markers: MarkerProjection::new(&self.content.coordinates)
                    .place(self.content.institutions()),
                hover: HoverRegistry::default(),
            },
            Page::Contact => Mounted::Contact(ContactForm::new(
                self.submitter.clone(),
                self.notifier.clone(),
            )),
            Page::Home | Page::Project => Mounted::Static(page),
        }
    }
}

fn ignored(event: &'static str, page: Page) {
    debug!(event, %page, "event targets a page that is not mounted; ignored");
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub page: Page,
    pub menu_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<HomeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub show_updates: bool,
    pub news: Vec<NewsCard>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub title: String,
    pub date: String,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaqView {
    pub entries: Vec<FaqItemView>,
}

impl FaqView {
    pub fn expanded(&self) -> Option<&EntityId> {
        self.entries
            .iter()
            .find(|entry| entry.expanded)
            .map(|entry| &entry.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaqItemView {
    pub id: EntityId,
    pub question: String,
    pub expanded: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub view: MapView,
    pub markers: Vec<RenderedMarker>,
}

impl MapSnapshot {
    pub fn tooltip_ids(&self) -> Vec<&EntityId> {
        self.markers
            .iter()
            .filter(|marker| marker.tooltip.is_some())
            .map(|marker| &marker.id)
            .collect()
    }
}
