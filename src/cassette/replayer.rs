//! Serves recorded interactions back, in order, per port and method.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette.
///
/// Each `(port, method)` pair has its own queue, so the relative order of
/// calls on different methods does not need to match the recording.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer holding the interactions of `port`.
    #[must_use]
    pub fn for_port(cassette: &Cassette, port: &str) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in cassette.interactions.iter().filter(|i| i.port == port) {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Pops the next recorded output for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette holds no further interaction for the pair,
    /// naming the pairs that are still available.
    pub fn next_output(&mut self, port: &str, method: &str) -> serde_json::Value {
        let key = (port.to_string(), method.to_string());
        if let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            return interaction.output;
        }
        let remaining: Vec<String> = self
            .queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|((p, m), queue)| format!("{p}::{m} ({})", queue.len()))
            .collect();
        panic!(
            "Cassette exhausted: no interaction left for {port}::{method}. \
             Remaining: [{}]",
            remaining.join(", ")
        );
    }
}

/// Decodes a fallible output recorded as `{"ok": value}` or `{"err": "message"}`.
pub(crate) fn decode_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, String> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}"))
}
