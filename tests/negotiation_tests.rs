// Host-side tests for tilt/touch negotiation against a scripted platform.

use pano_core::negotiation::*;
use std::cell::Cell;

const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0";

struct FakePlatform {
    user_agent: &'static str,
    sensor_events: bool,
    gated: bool,
    query: Result<bool, NegotiationError>,
    grant: bool,
    queries: Cell<u32>,
    requests: Cell<u32>,
}

impl FakePlatform {
    fn mobile() -> Self {
        Self {
            user_agent: IPHONE_UA,
            sensor_events: true,
            gated: false,
            query: Ok(false),
            grant: true,
            queries: Cell::new(0),
            requests: Cell::new(0),
        }
    }

    fn gated(grant: bool) -> Self {
        Self {
            gated: true,
            grant,
            ..Self::mobile()
        }
    }
}

impl SensorPlatform for FakePlatform {
    fn user_agent(&self) -> String {
        self.user_agent.to_string()
    }

    fn has_sensor_events(&self) -> bool {
        self.sensor_events
    }

    fn has_gated_permission(&self) -> bool {
        self.gated
    }

    async fn query_permission(&self, _kind: SensorKind) -> Result<bool, NegotiationError> {
        self.queries.set(self.queries.get() + 1);
        self.query.clone()
    }

    type Request = std::future::Ready<Result<bool, NegotiationError>>;

    fn request_permission(&self, _kind: SensorKind) -> Self::Request {
        self.requests.set(self.requests.get() + 1);
        std::future::ready(Ok(self.grant))
    }
}

#[test]
fn mobile_user_agent_tokens() {
    assert!(is_mobile_user_agent(IPHONE_UA));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
    assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
    assert!(!is_mobile_user_agent(DESKTOP_UA));
    assert!(!is_mobile_user_agent(""));
}

#[test]
fn desktop_goes_straight_to_touch() {
    let platform = FakePlatform {
        user_agent: DESKTOP_UA,
        ..FakePlatform::mobile()
    };
    let mut negotiator = Negotiator::new();
    let state = pollster::block_on(negotiator.negotiate(&platform));
    assert_eq!(state, NegotiationState::TiltUnsupported);
    assert_eq!(negotiator.control_mode(), ControlMode::TouchEnabled);
    assert_eq!(platform.queries.get(), 0);
}

#[test]
fn mobile_without_sensor_events_uses_touch() {
    let platform = FakePlatform {
        sensor_events: false,
        ..FakePlatform::mobile()
    };
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));
    assert_eq!(negotiator.control_mode(), ControlMode::TouchEnabled);
}

#[test]
fn ungated_mobile_enables_tilt_without_a_gesture() {
    let platform = FakePlatform::mobile();
    let mut negotiator = Negotiator::new();
    let state = pollster::block_on(negotiator.negotiate(&platform));
    assert_eq!(state, NegotiationState::TiltReady);
    assert_eq!(negotiator.control_mode(), ControlMode::TiltEnabled);
    assert_eq!(platform.requests.get(), 0);
}

#[test]
fn previously_granted_gated_platform_skips_the_prompt() {
    let platform = FakePlatform {
        query: Ok(true),
        ..FakePlatform::gated(true)
    };
    let mut negotiator = Negotiator::new();
    let state = pollster::block_on(negotiator.negotiate(&platform));
    assert_eq!(state, NegotiationState::TiltReady);
    assert_eq!(platform.queries.get(), 2);
    assert_eq!(platform.requests.get(), 0);
}

#[test]
fn failed_query_waits_for_a_gesture() {
    let platform = FakePlatform {
        query: Err(NegotiationError::Query("TypeError".into())),
        ..FakePlatform::gated(true)
    };
    let mut negotiator = Negotiator::new();
    let state = pollster::block_on(negotiator.negotiate(&platform));
    assert_eq!(state, NegotiationState::TiltNeedsGesture);
    assert_eq!(negotiator.control_mode(), ControlMode::Undetermined);
}

#[test]
fn gesture_grant_enables_tilt() {
    let platform = FakePlatform::gated(true);
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));
    let mode = pollster::block_on(negotiator.on_user_gesture(&platform));
    assert_eq!(mode, ControlMode::TiltEnabled);
    assert_eq!(negotiator.state(), NegotiationState::TiltGranted);
    assert_eq!(platform.requests.get(), 2);
}

#[test]
fn gesture_rejection_falls_back_to_touch_after_one_attempt() {
    let platform = FakePlatform::gated(false);
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));
    let mode = pollster::block_on(negotiator.on_user_gesture(&platform));
    assert_eq!(mode, ControlMode::TouchEnabled);
    assert_eq!(negotiator.state(), NegotiationState::TiltDenied);
    assert_eq!(negotiator.permission_attempts(), 1);

    // further taps never prompt again
    let mode = pollster::block_on(negotiator.on_user_gesture(&platform));
    assert_eq!(mode, ControlMode::TouchEnabled);
    assert_eq!(negotiator.permission_attempts(), 1);
}

#[test]
fn only_one_permission_request_in_flight() {
    let platform = FakePlatform::gated(true);
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));

    assert!(negotiator.begin_permission_request());
    assert!(negotiator.request_in_flight());
    assert!(!negotiator.begin_permission_request());
    assert_eq!(negotiator.permission_attempts(), 1);

    let mode = negotiator.finish_permission_request(Ok(()));
    assert_eq!(mode, ControlMode::TiltEnabled);
    assert!(!negotiator.request_in_flight());
}

#[test]
fn refusal_is_reported_as_permission_denied() {
    let platform = FakePlatform::gated(false);
    assert_eq!(
        pollster::block_on(request_permissions(&platform)),
        Err(NegotiationError::PermissionDenied)
    );
    let granting = FakePlatform::gated(true);
    assert_eq!(pollster::block_on(request_permissions(&granting)), Ok(()));
}

#[test]
fn prompts_are_raised_before_anything_is_awaited() {
    let platform = FakePlatform::gated(true);
    let pending = request_permissions(&platform);
    // still inside the gesture handler: both prompts are already up
    assert_eq!(platform.requests.get(), 2);
    assert_eq!(pollster::block_on(pending), Ok(()));
    assert_eq!(platform.requests.get(), 2);
}

#[test]
fn request_error_counts_as_denied() {
    let platform = FakePlatform::gated(true);
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));
    assert!(negotiator.begin_permission_request());
    let mode = negotiator
        .finish_permission_request(Err(NegotiationError::Request("NotAllowedError".into())));
    assert_eq!(mode, ControlMode::TouchEnabled);
}

#[test]
fn negotiate_runs_once() {
    let platform = FakePlatform::mobile();
    let mut negotiator = Negotiator::new();
    pollster::block_on(negotiator.negotiate(&platform));
    let again = pollster::block_on(negotiator.negotiate(&FakePlatform {
        user_agent: DESKTOP_UA,
        ..FakePlatform::mobile()
    }));
    assert_eq!(again, NegotiationState::TiltReady);
}

#[test]
fn transitions_ignore_out_of_order_events() {
    let s = NegotiationState::Unchecked;
    assert_eq!(
        s.next(NegotiationEvent::PermissionResolved { granted: true }),
        NegotiationState::Unchecked
    );
    let s = s.next(NegotiationEvent::Start);
    assert_eq!(s, NegotiationState::Checking);
    assert_eq!(s.next(NegotiationEvent::Start), NegotiationState::Checking);

    let done = NegotiationState::TiltReady;
    assert!(done.is_terminal());
    assert_eq!(
        done.next(NegotiationEvent::PermissionResolved { granted: false }),
        done
    );
}
