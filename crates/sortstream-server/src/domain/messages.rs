//! JSON event protocol between the browser and the server.
//!
//! Every frame is a JSON text message whose `"type"` field names the event:
//!
//! ```json
//! {"type":"startSort","algorithm":"bubbleSort","array":[5,3,8,1],"speed":"fast"}
//! {"type":"pauseSort"}
//! {"type":"sortStep","array":[3,5,8,1],"compare":[0,1],"swap":[0,1]}
//! {"type":"sortComplete","array":[1,3,5,8]}
//! {"type":"sortError","message":"Invalid array input"}
//! ```
//!
//! Browser → server events are [`ClientMsg`]; server → browser events are
//! [`ServerMsg`].  Two enums keep the directions apart at compile time.
//!
//! `startSort` fields are kept loosely typed ([`serde_json::Value`]) so that a
//! request with a malformed `array` still reaches the supervisor and gets a
//! `sortError` back instead of being dropped as unparseable.

use std::borrow::Cow;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sortstream_core::step::serialize_values;
use sortstream_core::StepRecord;

// ── Browser → server ──────────────────────────────────────────────────────────

/// Events a browser can send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMsg {
    /// Start a new sort job, superseding any running one.
    StartSort(StartSortRequest),
    /// Hold the running job after its next step.
    PauseSort,
    /// Release a paused job.
    ResumeSort,
}

/// Payload of a `startSort` event.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StartSortRequest {
    /// Algorithm key, e.g. `"quickSort"`.
    #[serde(default)]
    pub algorithm: Value,
    /// The array to sort; validated by the supervisor.
    #[serde(default)]
    pub array: Value,
    /// Playback speed label.
    #[serde(default)]
    pub speed: Value,
}

impl StartSortRequest {
    /// Convenience constructor used by tests and tools.
    pub fn new(algorithm: &str, array: Value, speed: &str) -> Self {
        Self {
            algorithm: Value::from(algorithm),
            array,
            speed: Value::from(speed),
        }
    }

    /// The algorithm key as text.  A non-string value is rendered as JSON so
    /// it can still appear in the "not supported" message.
    pub fn algorithm_key(&self) -> Cow<'_, str> {
        match &self.algorithm {
            Value::String(key) => Cow::Borrowed(key),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// The requested playback speed.
    pub fn speed(&self) -> Speed {
        Speed::from_label(self.speed.as_str())
    }
}

// ── Server → browser ──────────────────────────────────────────────────────────

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMsg {
    /// One step of the running job.
    SortStep(StepRecord),
    /// The job finished; `array` is the input sorted by the server itself.
    SortComplete {
        #[serde(serialize_with = "serialize_values")]
        array: Vec<f64>,
    },
    /// A request was rejected or the job failed.
    SortError { message: String },
}

impl ServerMsg {
    /// Short variant name for log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            ServerMsg::SortStep(_) => "sortStep",
            ServerMsg::SortComplete { .. } => "sortComplete",
            ServerMsg::SortError { .. } => "sortError",
        }
    }
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Playback speed: the pause between two consecutive steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
    UltraFast,
}

impl Speed {
    /// Maps a wire label to a speed.  Unknown or missing labels mean
    /// [`Speed::Medium`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("slow") => Speed::Slow,
            Some("fast") => Speed::Fast,
            Some("ultrafast") => Speed::UltraFast,
            _ => Speed::Medium,
        }
    }

    /// Delay after each emitted step.
    pub fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Speed::Slow => 1000,
            Speed::Medium => 500,
            Speed::Fast => 100,
            Speed::UltraFast => 10,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
