use std::sync::atomic::{AtomicU64, Ordering};

use articlemeta_engine::{HarvestEvent, ProgressSink};
use harvest_logging::{harvest_debug, harvest_info, harvest_warn};

/// Stored documents between two info-level progress lines.
const REPORT_EVERY: u64 = 1000;

/// Turns harvest events into log lines.
#[derive(Debug, Default)]
pub struct LogProgressSink {
    stored: AtomicU64,
}

impl LogProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> u64 {
        self.stored.load(Ordering::Relaxed)
    }
}

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::PageFetched {
                offset,
                identifiers,
            } => {
                harvest_debug!("Identifier page offset={} size={}", offset, identifiers);
            }
            HarvestEvent::DocumentStored {
                identifier, path, ..
            } => {
                harvest_debug!("Stored {} as {}", identifier, path);
                let stored = self.stored.fetch_add(1, Ordering::Relaxed) + 1;
                if stored % REPORT_EVERY == 0 {
                    harvest_info!("{} documents stored", stored);
                }
            }
            HarvestEvent::DocumentSkipped { identifier, reason } => {
                harvest_warn!("Skipped {}: {}", identifier, reason);
            }
            HarvestEvent::SchemaIncluded { entry } => {
                harvest_info!("Schema stored as {}", entry);
            }
            HarvestEvent::SchemaSkipped { reason } => {
                harvest_warn!("Archive has no schema: {}", reason);
            }
        }
    }
}
