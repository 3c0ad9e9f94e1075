//! Configured webhook endpoint shape.

use std::collections::HashMap;
use std::time::Duration;

use gobby_domain::value_objects::HookEventType;

/// One configured outbound webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookEndpointConfig {
    /// Unique name identifying this endpoint, referenced by `webhook_id`.
    pub name: String,
    /// Target URL, may contain `${VAR}`/`${VAR:-default}` references.
    pub url: String,
    /// Event types this endpoint receives; empty means all event types.
    pub events: Vec<HookEventType>,
    /// Custom headers, may contain `${VAR}` references. `Content-Type` is
    /// always set to `application/json` regardless of this map.
    pub headers: HashMap<String, String>,
    /// Per-call timeout, clamped to 1-60s.
    pub timeout: Duration,
    /// Retry attempts on failure, clamped to 0-10.
    pub retry_count: u32,
    /// Base delay between retries, clamped to 0.1-30s; doubles per attempt.
    pub retry_delay: Duration,
    /// Whether this endpoint may gate the pipeline's decision.
    pub can_block: bool,
    /// Whether this endpoint is currently active.
    pub enabled: bool,
}

impl WebhookEndpointConfig {
    /// `true` if this endpoint should receive `event_type`.
    #[must_use]
    pub fn matches(&self, event_type: HookEventType) -> bool {
        self.enabled && (self.events.is_empty() || self.events.contains(&event_type))
    }
}

const MIN_TIMEOUT: Duration = Duration::from_secs(1);
const MAX_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRY_COUNT: u32 = 10;
const MIN_RETRY_DELAY: Duration = Duration::from_millis(100);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Clamps a configured timeout into the 1-60s range spec'd for webhook calls.
#[must_use]
pub fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT)
}

/// Clamps a configured retry count into the 0-10 range.
#[must_use]
pub fn clamp_retry_count(retry_count: u32) -> u32 {
    retry_count.min(MAX_RETRY_COUNT)
}

/// Clamps a configured retry delay into the 0.1-30s range.
#[must_use]
pub fn clamp_retry_delay(retry_delay: Duration) -> Duration {
    retry_delay.clamp(MIN_RETRY_DELAY, MAX_RETRY_DELAY)
}

/// Converts the loaded YAML shape (seconds as `f64`, event names as bare
/// strings) into the typed runtime shape the dispatcher operates on.
/// Unrecognized event names are logged and dropped rather than rejecting
/// the whole endpoint, so a typo in one event name degrades gracefully
/// instead of disabling the endpoint's other event types.
impl From<&gobby_domain::value_objects::WebhookEndpointConfig> for WebhookEndpointConfig {
    fn from(raw: &gobby_domain::value_objects::WebhookEndpointConfig) -> Self {
        let events = raw
            .events
            .iter()
            .filter_map(|name| match parse_event_type(name) {
                Some(event_type) => Some(event_type),
                None => {
                    tracing::warn!(endpoint = raw.name, event = name, "unknown event type in webhook config, skipping");
                    None
                }
            })
            .collect();

        Self {
            name: raw.name.clone(),
            url: raw.url.clone(),
            events,
            headers: raw.headers.clone(),
            timeout: clamp_timeout(Duration::from_secs_f64(raw.timeout)),
            retry_count: clamp_retry_count(raw.retry_count),
            retry_delay: clamp_retry_delay(Duration::from_secs_f64(raw.retry_delay)),
            can_block: raw.can_block,
            enabled: raw.enabled,
        }
    }
}

fn parse_event_type(name: &str) -> Option<HookEventType> {
    match name {
        "session_start" => Some(HookEventType::SessionStart),
        "session_end" => Some(HookEventType::SessionEnd),
        "before_agent" => Some(HookEventType::BeforeAgent),
        "after_agent" => Some(HookEventType::AfterAgent),
        "before_tool" => Some(HookEventType::BeforeTool),
        "after_tool" => Some(HookEventType::AfterTool),
        "notification" => Some(HookEventType::Notification),
        "pre_compact" => Some(HookEventType::PreCompact),
        _ => None,
    }
}
