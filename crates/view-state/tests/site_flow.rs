use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crossbeam_channel::Receiver;
use view_state::{
    ChannelNotifier, Content, Field, Notification, Page, Severity, SimulatedSubmitter, Site,
    SubmissionState, SubmitOutcome, UiEvent,
};

struct Harness {
    site: Site,
    toasts: Receiver<Notification>,
    resets: Arc<AtomicUsize>,
}

fn harness(submitter: SimulatedSubmitter) -> Harness {
    let (notifier, toasts) = ChannelNotifier::new();
    let resets = Arc::new(AtomicUsize::new(0));
    let counter = resets.clone();
    let site = Site::new(
        Arc::new(Content::builtin().unwrap()),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        Arc::new(submitter),
        Arc::new(notifier),
    );
    Harness {
        site,
        toasts,
        resets,
    }
}

fn go(site: &mut Site, page: &str) {
    assert!(
        site.dispatch(UiEvent::Navigate {
            page: page.into(),
            from_menu: false,
        })
        .is_none()
    );
}

fn fill(site: &mut Site) {
    for (field, value) in [
        (Field::Name, "Jane Doe"),
        (Field::Email, "jane@uni.edu"),
        (Field::Organization, "UPTC"),
        (Field::Message, "When is the next field school?"),
    ] {
        site.dispatch(UiEvent::Input {
            field,
            value: value.into(),
        });
    }
}

#[tokio::test(start_paused = true)]
async fn contact_submission_round_trip() {
    let Harness {
        mut site, toasts, ..
    } = harness(SimulatedSubmitter::default());
    go(&mut site, "contact");
    fill(&mut site);

    let pending = site.dispatch(UiEvent::Submit).expect("submission started");
    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.state, SubmissionState::Submitting);
    assert!(!view.inputs_enabled);

    // A second submit while in flight has no effect.
    let again = site.dispatch(UiEvent::Submit).expect("submit returns a handle");
    assert_eq!(again.await, SubmitOutcome::Ignored);

    assert_eq!(pending.await, SubmitOutcome::Succeeded);
    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.state, SubmissionState::Idle);
    assert!(view.values.name.is_empty());
    assert_eq!(toasts.try_iter().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_submission_keeps_the_message() {
    let Harness {
        mut site, toasts, ..
    } = harness(SimulatedSubmitter::failing(Duration::from_millis(200)));
    go(&mut site, "contact");
    fill(&mut site);

    let pending = site.dispatch(UiEvent::Submit).unwrap();
    assert_eq!(pending.await, SubmitOutcome::Failed);

    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.values.message, "When is the next field school?");
    assert!(view.inputs_enabled);
    assert_eq!(toasts.try_recv().unwrap().severity, Severity::Failure);
}

#[tokio::test(start_paused = true)]
async fn leaving_contact_mid_flight_discards_the_result() {
    let Harness {
        mut site,
        toasts,
        resets,
    } = harness(SimulatedSubmitter::default());
    go(&mut site, "contact");
    fill(&mut site);

    let pending = site.dispatch(UiEvent::Submit).unwrap();
    go(&mut site, "faq");
    assert_eq!(pending.await, SubmitOutcome::Discarded);
    assert!(toasts.try_recv().is_err());

    // Coming back mounts a fresh, empty form.
    go(&mut site, "contact");
    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.state, SubmissionState::Idle);
    assert!(view.values.email.is_empty());
    assert_eq!(resets.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn invalid_submit_shows_inline_errors() {
    let Harness { mut site, .. } = harness(SimulatedSubmitter::default());
    go(&mut site, "contact");
    site.dispatch(UiEvent::Input {
        field: Field::Email,
        value: "jane@".into(),
    });

    let outcome = site.dispatch(UiEvent::Submit).unwrap().await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.len() == 4));
    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.errors.get(Field::Email), Some("Enter a valid email address"));
    assert_eq!(view.state, SubmissionState::Idle);
}

#[test]
fn script_events_deserialize() {
    let events: Vec<UiEvent> = serde_json::from_str(
        r#"[
            {"event": "navigate", "page": "faq"},
            {"event": "toggle_faq", "id": "faq-2"},
            {"event": "navigate", "page": "partners", "from_menu": true},
            {"event": "pointer_enter", "id": "Lund University (LU)"},
            {"event": "input", "field": "email", "value": "a@b.co"}
        ]"#,
    )
    .unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events[2],
        UiEvent::Navigate {
            page: "partners".into(),
            from_menu: true,
        }
    );

    let Harness { mut site, .. } = harness(SimulatedSubmitter::default());
    for event in events {
        site.dispatch(event);
    }
    // Input targets the contact page, which is not mounted.
    assert_eq!(site.page(), Page::Partners);
    let map = site.snapshot().map.unwrap();
    assert_eq!(map.tooltip_ids().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn ignored_submit_handle_leaves_the_form_usable() {
    let Harness {
        mut site, toasts, ..
    } = harness(SimulatedSubmitter::default());
    go(&mut site, "contact");
    fill(&mut site);

    let _ = site.dispatch(UiEvent::Submit);
    let view = site.snapshot().contact.unwrap();
    assert_eq!(view.state, SubmissionState::Idle);
    assert!(view.inputs_enabled);
    assert_eq!(view.values.organization, "UPTC");

    let pending = site.dispatch(UiEvent::Submit).unwrap();
    assert_eq!(pending.await, SubmitOutcome::Succeeded);
    assert_eq!(toasts.try_iter().count(), 1);
}
