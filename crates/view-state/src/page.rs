//! Page identifiers and the single-page navigation controller.
//!
//! The active page is a single mutable cell. Every write, including one that
//! stores the page already active, notifies the injected [`ScrollReset`]
//! observer so a re-click on the current navigation item returns to the top.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Closed set of pages rendered by the site.
pub enum Page {
    #[default]
    Home,
    Project,
    Partners,
    Faq,
    Contact,
}

impl Page {
    /// Navigation order used by the header and the mobile menu.
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Project,
        Page::Partners,
        Page::Faq,
        Page::Contact,
    ];

    /// Stable identifier used by links, scripts and the preview API.
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Project => "project",
            Page::Partners => "partners",
            Page::Faq => "faq",
            Page::Contact => "contact",
        }
    }

    /// Label shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Project => "Project",
            Page::Partners => "Partners",
            Page::Faq => "FAQ",
            Page::Contact => "Contact",
        }
    }

    /// Resolve an identifier, falling back to the default page when it is not
    /// one of the known pages.
    pub fn resolve(id: &str) -> Page {
        match id.parse() {
            Ok(page) => page,
            Err(err) => {
                warn!("{err}; falling back to {}", Page::default());
                Page::default()
            }
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| Error::InvalidPage(s.to_string()))
    }
}

/// Side effect fired after every navigation write.
pub trait ScrollReset {
    fn reset_scroll(&mut self);
}

impl<F: FnMut()> ScrollReset for F {
    fn reset_scroll(&mut self) {
        self();
    }
}

/// Owner of the active page cell.
pub struct NavigationController {
    current: Page,
    scroll: Box<dyn ScrollReset + Send>,
}

impl NavigationController {
    pub fn new(scroll: impl ScrollReset + Send + 'static) -> Self {
        Self::starting_at(Page::default(), scroll)
    }

    pub fn starting_at(page: Page, scroll: impl ScrollReset + Send + 'static) -> Self {
        Self {
            current: page,
            scroll: Box::new(scroll),
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Replace the active page and reset the scroll position. Returns the page
    /// that was active before the write.
    pub fn navigate(&mut self, page: Page) -> Page {
        let previous = std::mem::replace(&mut self.current, page);
        debug!(from = %previous, to = %page, "navigate");
        metrics::counter!("site_navigations_total", "page" => page.as_str()).increment(1);
        self.scroll.reset_scroll();
        previous
    }

    /// Navigate by string identifier; unknown identifiers land on the default page.
    pub fn navigate_to(&mut self, id: &str) -> Page {
        self.navigate(Page::resolve(id))
    }
}

impl fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Open/closed state of the collapsed navigation shown on narrow screens.
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn counting_controller() -> (NavigationController, Arc<AtomicUsize>) {
        let resets = Arc::new(AtomicUsize::new(0));
        let counter = resets.clone();
        let controller = NavigationController::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (controller, resets)
    }

    #[test]
    fn starts_on_home() {
        let (controller, resets) = counting_controller();
        assert_eq!(controller.current(), Page::Home);
        assert_eq!(resets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn repeated_navigation_still_resets_scroll() {
        let (mut controller, resets) = counting_controller();
        controller.navigate(Page::Faq);
        let previous = controller.navigate(Page::Faq);
        assert_eq!(previous, Page::Faq);
        assert_eq!(controller.current(), Page::Faq);
        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_identifier_falls_back_to_home() {
        let (mut controller, resets) = counting_controller();
        controller.navigate(Page::Contact);
        controller.navigate_to("news");
        assert_eq!(controller.current(), Page::Home);
        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn parse_rejects_unknown_identifier() {
        assert_eq!("partners".parse::<Page>(), Ok(Page::Partners));
        assert_eq!(
            "Partners".parse::<Page>(),
            Err(Error::InvalidPage("Partners".into()))
        );
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut menu = MobileMenu::default();
        menu.toggle();
        assert!(menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
