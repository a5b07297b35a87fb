//! View-state coordination for the STARS consortium site.
//!
//! The crate is split into focused modules:
//! - `page`: page identifiers, the navigation controller and the mobile menu.
//! - `overlay`: accordion and map-hover highlight registries.
//! - `projection`: coordinates, marker placement and the Web Mercator passthrough.
//! - `content`: the typed content model and the built-in STARS dataset.
//! - `contact`: field rules, the submission state machine and notifications.
//! - `site`: the session root that mounts one page subtree at a time.
//! - `error`: crate error type.

pub mod contact;
pub mod content;
pub mod error;
pub mod overlay;
pub mod page;
pub mod projection;
pub mod site;

pub use contact::{
    ChannelNotifier, ContactForm, ContactView, Field, FieldErrors, FormValues, Notification,
    Notifier, PendingSubmission, Severity, SimulatedSubmitter, SubmissionError,
    SubmissionMachine, SubmissionState, SubmitOutcome, Submitter, TracingNotifier,
};
pub use content::{Content, FaqEntry, Institution, NewsItem, PartnerGroup};
pub use error::{Error, Result};
pub use overlay::{AccordionRegistry, EntityId, HoverRegistry};
pub use page::{MobileMenu, NavigationController, Page, ScrollReset};
pub use projection::{
    Coordinate, CoordinateTable, MapEntity, MapProjection, MapView, MarkerProjection,
    PlacedMarker, RenderedMarker, ScreenPoint, Tooltip, WebMercator,
};
pub use site::{Site, UiEvent, ViewSnapshot};
