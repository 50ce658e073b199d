//! Tilt-versus-touch capability negotiation.
//!
//! ```text
//! Unchecked -> Checking -> TiltReady
//!                       -> TiltUnsupported
//!                       -> TiltNeedsGesture -(gesture + request)-> TiltGranted | TiltDenied
//! ```
//!
//! The transition function is pure; the async helpers talk to a
//! [`SensorPlatform`] and feed their results back in as events.

use crate::constants::MOBILE_UA_TOKENS;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("device orientation sensors are not available")]
    Unsupported,
    #[error("sensor permission was denied")]
    PermissionDenied,
    #[error("permission query failed: {0}")]
    Query(String),
    #[error("permission request failed: {0}")]
    Request(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Orientation,
    Motion,
}

impl SensorKind {
    /// Name used with the Permissions API.
    pub fn permission_name(self) -> &'static str {
        match self {
            SensorKind::Orientation => "deviceorientation",
            SensorKind::Motion => "devicemotion",
        }
    }

    /// Global event constructor that carries `requestPermission` on gated platforms.
    pub fn event_interface(self) -> &'static str {
        match self {
            SensorKind::Orientation => "DeviceOrientationEvent",
            SensorKind::Motion => "DeviceMotionEvent",
        }
    }
}

/// What the viewer needs from the host environment to pick an input mode.
pub trait SensorPlatform {
    fn user_agent(&self) -> String;
    /// Both the orientation and motion event types exist.
    fn has_sensor_events(&self) -> bool;
    /// Both event types expose a `requestPermission` function.
    fn has_gated_permission(&self) -> bool;
    /// Whether access was already granted earlier, without prompting.
    fn query_permission(
        &self,
        kind: SensorKind,
    ) -> impl Future<Output = Result<bool, NegotiationError>>;
    /// Pending answer to a prompt. Owns everything it needs, so it can be
    /// awaited after the gesture handler has returned.
    type Request: Future<Output = Result<bool, NegotiationError>> + 'static;
    /// Prompts the user. Browsers only allow this from inside a user-gesture
    /// handler, so the prompt must be raised here, not when the returned
    /// future is first polled.
    fn request_permission(&self, kind: SensorKind) -> Self::Request;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    Undetermined,
    TiltEnabled,
    TouchEnabled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NegotiationState {
    #[default]
    Unchecked,
    Checking,
    TiltReady,
    TiltNeedsGesture,
    TiltUnsupported,
    TiltGranted,
    TiltDenied,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub mobile: bool,
    pub sensor_events: bool,
    pub gated_permission: bool,
    pub already_granted: bool,
}

impl Capabilities {
    fn outcome(&self) -> NegotiationState {
        if !self.mobile || !self.sensor_events {
            NegotiationState::TiltUnsupported
        } else if !self.gated_permission || self.already_granted {
            NegotiationState::TiltReady
        } else {
            NegotiationState::TiltNeedsGesture
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegotiationEvent {
    Start,
    Probed(Capabilities),
    PermissionResolved { granted: bool },
}

impl NegotiationState {
    /// Events that don't apply to the current state leave it unchanged.
    pub fn next(self, event: NegotiationEvent) -> Self {
        use NegotiationEvent as E;
        use NegotiationState as S;
        match (self, event) {
            (S::Unchecked, E::Start) => S::Checking,
            (S::Checking, E::Probed(caps)) => caps.outcome(),
            (S::TiltNeedsGesture, E::PermissionResolved { granted: true }) => S::TiltGranted,
            (S::TiltNeedsGesture, E::PermissionResolved { granted: false }) => S::TiltDenied,
            (state, _) => state,
        }
    }

    pub fn control_mode(self) -> ControlMode {
        match self {
            NegotiationState::TiltReady | NegotiationState::TiltGranted => ControlMode::TiltEnabled,
            NegotiationState::TiltUnsupported | NegotiationState::TiltDenied => {
                ControlMode::TouchEnabled
            }
            _ => ControlMode::Undetermined,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.control_mode() != ControlMode::Undetermined
    }
}

#[inline]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
}

/// Inspect the platform. A failing permission query counts as "not granted"
/// so the user is asked through a gesture instead.
pub async fn probe_capabilities<P: SensorPlatform>(platform: &P) -> Capabilities {
    let mobile = is_mobile_user_agent(&platform.user_agent());
    let sensor_events = platform.has_sensor_events();
    let gated_permission = mobile && sensor_events && platform.has_gated_permission();
    let already_granted = if gated_permission {
        match query_permissions(platform).await {
            Ok(granted) => granted,
            Err(e) => {
                log::warn!("[negotiate] {}", e);
                false
            }
        }
    } else {
        false
    };
    Capabilities {
        mobile,
        sensor_events,
        gated_permission,
        already_granted,
    }
}

async fn query_permissions<P: SensorPlatform>(platform: &P) -> Result<bool, NegotiationError> {
    let orientation = platform.query_permission(SensorKind::Orientation).await?;
    let motion = platform.query_permission(SensorKind::Motion).await?;
    Ok(orientation && motion)
}

/// Ask for both sensors; a refusal of either is `PermissionDenied`.
///
/// Both prompts are raised before this returns, so call it synchronously
/// from the gesture handler and await the result afterwards.
pub fn request_permissions<P: SensorPlatform>(
    platform: &P,
) -> impl Future<Output = Result<(), NegotiationError>> {
    let orientation = platform.request_permission(SensorKind::Orientation);
    let motion = platform.request_permission(SensorKind::Motion);
    async move {
        let orientation = orientation.await?;
        let motion = motion.await?;
        if orientation && motion {
            Ok(())
        } else {
            Err(NegotiationError::PermissionDenied)
        }
    }
}

/// Drives [`NegotiationState`] for one viewer session.
#[derive(Debug, Default)]
pub struct Negotiator {
    state: NegotiationState,
    permission_attempts: u32,
    request_in_flight: bool,
}

impl Negotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn control_mode(&self) -> ControlMode {
        self.state.control_mode()
    }

    pub fn permission_attempts(&self) -> u32 {
        self.permission_attempts
    }

    pub fn request_in_flight(&self) -> bool {
        self.request_in_flight
    }

    pub fn apply(&mut self, event: NegotiationEvent) -> NegotiationState {
        let next = self.state.next(event);
        if next != self.state {
            log::info!("[negotiate] {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        next
    }

    /// Startup check, up to either a final mode or `TiltNeedsGesture`.
    pub async fn negotiate<P: SensorPlatform>(&mut self, platform: &P) -> NegotiationState {
        if self.apply(NegotiationEvent::Start) != NegotiationState::Checking {
            return self.state;
        }
        let caps = probe_capabilities(platform).await;
        self.apply(NegotiationEvent::Probed(caps))
    }

    /// Claim the single permission request slot. Call synchronously from the
    /// gesture handler; false if a request is pending or none is needed.
    pub fn begin_permission_request(&mut self) -> bool {
        if self.state != NegotiationState::TiltNeedsGesture || self.request_in_flight {
            return false;
        }
        self.request_in_flight = true;
        self.permission_attempts += 1;
        true
    }

    pub fn finish_permission_request(
        &mut self,
        result: Result<(), NegotiationError>,
    ) -> ControlMode {
        self.request_in_flight = false;
        let granted = match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[negotiate] {}", e);
                false
            }
        };
        self.apply(NegotiationEvent::PermissionResolved { granted });
        self.control_mode()
    }

    /// Whole gesture step when the negotiator is not shared across tasks.
    pub async fn on_user_gesture<P: SensorPlatform>(&mut self, platform: &P) -> ControlMode {
        if !self.begin_permission_request() {
            return self.control_mode();
        }
        let result = request_permissions(platform).await;
        self.finish_permission_request(result)
    }
}
