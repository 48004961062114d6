//! Live vehicle position relay.
//!
//! Producers publish `train_update` events; every current subscriber
//! receives them re-labelled as `new_train_position`. Delivery is best
//! effort: no acknowledgement, no replay, and a subscriber that falls
//! behind the channel capacity loses the updates it missed. The relay
//! never looks at the network graph.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::debug;

/// Event name producers use for position updates.
pub const TRAIN_UPDATE: &str = "train_update";

/// Event name subscribers receive position updates under.
pub const NEW_TRAIN_POSITION: &str = "new_train_position";

/// Event name of the greeting sent to each new subscriber.
pub const WELCOME_MESSAGE: &str = "welcome_message";

/// Default number of buffered updates per subscriber.
const DEFAULT_CAPACITY: usize = 256;

/// A vehicle position report.
///
/// Fields beyond the two required ones (such as a timestamp) are kept
/// as-is and relayed untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainUpdate {
    pub train_id: String,
    pub current_station: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrainUpdate {
    pub fn new(train_id: impl Into<String>, current_station: impl Into<String>) -> Self {
        Self {
            train_id: train_id.into(),
            current_station: current_station.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra field that will be relayed with the update.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A named event with a JSON payload, as carried over the websocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub event: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(event: impl Into<String>, data: T) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// Payload of the greeting sent on connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Welcome {
    pub data: String,
}

/// The greeting envelope sent to a newly connected subscriber.
pub fn welcome() -> Envelope<Welcome> {
    Envelope::new(
        WELCOME_MESSAGE,
        Welcome {
            data: "Welcome to the real-time server!".to_string(),
        },
    )
}

/// Error from decoding a client frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Frame is not a JSON envelope carrying a train update
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Frame names an event the relay does not accept
    #[error("unsupported event: {0}")]
    UnsupportedEvent(String),
}

/// Decode a client text frame into a train update.
///
/// Only `train_update` envelopes are accepted.
pub fn decode_frame(text: &str) -> Result<TrainUpdate, FrameError> {
    let envelope: Envelope<Value> = serde_json::from_str(text)?;
    if envelope.event != TRAIN_UPDATE {
        return Err(FrameError::UnsupportedEvent(envelope.event));
    }
    Ok(serde_json::from_value(envelope.data)?)
}

/// Fan-out of position updates to all current subscribers.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    sender: broadcast::Sender<Envelope<TrainUpdate>>,
}

impl Broadcaster {
    /// Create a broadcaster buffering up to `capacity` updates per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Relay an update to everyone subscribed right now.
    ///
    /// Returns how many subscribers it was queued for. Zero subscribers is
    /// not an error; the update is simply dropped.
    pub fn publish(&self, update: TrainUpdate) -> usize {
        debug!(
            train = %update.train_id,
            station = %update.current_station,
            "relaying train update"
        );
        self.sender
            .send(Envelope::new(NEW_TRAIN_POSITION, update))
            .unwrap_or(0)
    }

    /// Subscribe to updates published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Envelope<TrainUpdate>> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
