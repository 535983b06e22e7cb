//! Property-based tests for the App state machine.
//!
//! Presentation invariants must hold under arbitrary event sequences:
//! notices expire exactly at their TTL, the composer stays usable unless a
//! terminal close happened, and terminal sessions never reach the wire.

use std::time::{Duration, Instant};

use loner_app::{App, AppAction, AppEvent, NOTICE_TTL};
use loner_client::{ClientAction, ClientEvent};
use loner_core::{RoomId, SessionContext};
use proptest::prelude::*;

fn started_app(now: Instant) -> App<Instant> {
    let mut app = App::new(RoomId::from("memes"), SessionContext::new(1, "quiet-fox"));
    let _ = app.start(now);
    let _ = app.handle(AppEvent::Client(ClientEvent::SocketOpened), now);
    app
}

/// Random user intents and sync events. Close codes stay in the transient
/// range; terminal codes are exercised separately.
fn event_strategy(now: Instant) -> impl Strategy<Value = AppEvent<Instant>> {
    prop_oneof![
        2 => (1u64..500).prop_map(|id| AppEvent::Client(ClientEvent::LivePayload {
            json: format!(r#"{{"id": {id}, "user": "loner", "message": "hi"}}"#),
        })),
        1 => ".{0,20}".prop_map(|text| AppEvent::SubmitText { text }),
        1 => Just(AppEvent::LoadMoreHistory),
        1 => Just(AppEvent::ForceReconnect),
        1 => Just(AppEvent::Client(ClientEvent::SocketOpened)),
        1 => (1001u16..3000).prop_map(|code| {
            AppEvent::Client(ClientEvent::SocketClosed { code })
        }),
        1 => (0u64..5000).prop_map(move |ms| AppEvent::Tick {
            now: now + Duration::from_millis(ms),
        }),
    ]
}

proptest! {
    #[test]
    fn prop_notice_visible_until_exactly_ttl(ms in 0u64..5000) {
        let now = Instant::now();
        let mut app = App::new(RoomId::from("memes"), SessionContext::new(1, "quiet-fox"));
        let _ = app.start(now);

        // Submitting mid-connect raises the timed notice.
        let _ = app.handle(AppEvent::SubmitText { text: "hi".into() }, now);
        prop_assert!(app.notice().is_some());

        let later = now + Duration::from_millis(ms);
        let _ = app.handle(AppEvent::Tick { now: later }, now);

        let expired = Duration::from_millis(ms) >= NOTICE_TTL;
        prop_assert_eq!(app.notice().is_none(), expired);
    }

    #[test]
    fn prop_composer_stays_usable_without_terminal_close(
        events in prop::collection::vec(event_strategy(Instant::now()), 0..40),
    ) {
        let now = Instant::now();
        let mut app = started_app(now);

        for event in events {
            let _ = app.handle(event, now);
            // No terminal code was delivered, so the composer never locks.
            prop_assert!(app.messagable());
            prop_assert!(app.close_reason().is_none());
        }
    }

    #[test]
    fn prop_terminal_close_never_reaches_the_wire(
        code in prop::sample::select(vec![3401u16, 3404]),
        events in prop::collection::vec(event_strategy(Instant::now()), 0..40),
    ) {
        let now = Instant::now();
        let mut app = started_app(now);
        let _ = app.handle(AppEvent::Client(ClientEvent::SocketClosed { code }), now);
        prop_assert!(!app.messagable());

        for event in events {
            let actions = app.handle(event, now);
            let touches_channel = actions.iter().any(|a| {
                matches!(
                    a,
                    AppAction::Client(
                        ClientAction::SendPayload { .. } | ClientAction::Connect { .. }
                    )
                )
            });
            prop_assert!(!touches_channel);
        }
        prop_assert!(!app.messagable());
        prop_assert!(app.close_reason().is_some());
    }
}
