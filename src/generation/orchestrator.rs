//! Generation orchestrator
//!
//! Coordinates per-kind and batch content generation for one planning
//! session. Tracks an in-flight counter and latest result per kind; batch
//! generation fires all four kinds concurrently and settles every one of
//! them regardless of individual failures.
//!
//! Overlapping attempts for the same kind are allowed. Each attempt gets a
//! per-kind sequence number and a completed attempt only stores its result
//! if no newer attempt has started since, so a slow stale response can never
//! overwrite a newer one.

use crate::domain::models::{
    GeneratedContent, GenerationKind, GenerationResult, MeetingDescription,
};
use crate::error::Result;
use crate::generation::client::GenerationClient;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct KindSlot {
    /// Number of attempts currently in flight for this kind
    active: u32,
    /// Sequence number of the most recently started attempt
    latest_seq: u64,
    result: Option<GenerationResult>,
}

/// Per-session coordinator for the four generation kinds
pub struct Orchestrator {
    client: Arc<GenerationClient>,
    slots: Mutex<HashMap<GenerationKind, KindSlot>>,
}

impl Orchestrator {
    pub fn new(client: Arc<GenerationClient>) -> Self {
        Self {
            client,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Generate one kind of content
    ///
    /// Returns `Err` only for caller preconditions (empty title); provider
    /// failures come back as a failed [`GenerationResult`].
    pub async fn generate(
        &self,
        kind: GenerationKind,
        data: &MeetingDescription,
    ) -> Result<GenerationResult> {
        data.validate()?;

        let seq = {
            let mut slots = self.slots.lock().unwrap();
            let slot = slots.entry(kind).or_default();
            slot.active += 1;
            slot.latest_seq += 1;
            slot.latest_seq
        };

        let result = self.client.generate(kind, data).await;

        {
            let mut slots = self.slots.lock().unwrap();
            let slot = slots.entry(kind).or_default();
            slot.active = slot.active.saturating_sub(1);
            if seq == slot.latest_seq {
                slot.result = Some(result.clone());
            } else {
                log::debug!("discarding stale {kind} result from attempt {seq}");
            }
        }

        Ok(result)
    }

    /// Generate all four kinds concurrently
    ///
    /// Waits for every kind to settle; one failing kind never cancels or
    /// blocks the others. The returned map always contains exactly the four
    /// kinds, successes and failures alike.
    pub async fn generate_all(
        &self,
        data: &MeetingDescription,
    ) -> Result<HashMap<GenerationKind, GenerationResult>> {
        data.validate()?;

        let results = join_all(
            GenerationKind::ALL
                .iter()
                .map(|&kind| self.generate(kind, data)),
        )
        .await;

        let mut map = HashMap::with_capacity(GenerationKind::ALL.len());
        for (&kind, result) in GenerationKind::ALL.iter().zip(results) {
            // generate can only fail on preconditions, which were checked
            // above for the whole batch
            let result =
                result.unwrap_or_else(|e| GenerationResult::failure(e.to_string(), None));
            map.insert(kind, result);
        }

        Ok(map)
    }

    /// With a kind: is that kind in flight. Without: is anything in flight.
    pub fn is_generating(&self, kind: Option<GenerationKind>) -> bool {
        let slots = self.slots.lock().unwrap();
        match kind {
            Some(kind) => slots.get(&kind).map(|s| s.active > 0).unwrap_or(false),
            None => slots.values().any(|s| s.active > 0),
        }
    }

    /// Latest stored result for a kind
    pub fn result(&self, kind: GenerationKind) -> Option<GenerationResult> {
        self.slots
            .lock()
            .unwrap()
            .get(&kind)
            .and_then(|s| s.result.clone())
    }

    /// Reset every kind to idle with no result
    pub fn clear(&self) {
        self.slots.lock().unwrap().clear();
    }

    /// Project the successful results into a persistable content bundle
    pub fn bundle(&self) -> GeneratedContent {
        let slots = self.slots.lock().unwrap();
        let mut bundle = GeneratedContent::default();
        for kind in GenerationKind::ALL {
            if let Some(result) = slots.get(&kind).and_then(|s| s.result.as_ref()) {
                if result.success {
                    bundle.set(kind, result.content.clone());
                }
            }
        }
        bundle
    }
}

/// Kinds that failed in a batch result, in canonical order
pub fn failed_kinds(results: &HashMap<GenerationKind, GenerationResult>) -> Vec<GenerationKind> {
    GenerationKind::ALL
        .iter()
        .copied()
        .filter(|kind| results.get(kind).map(|r| !r.success).unwrap_or(true))
        .collect()
}
