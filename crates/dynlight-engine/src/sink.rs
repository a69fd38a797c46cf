use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use dynlight_region::{RegionCoord, RegionSet};
use parking_lot::Mutex;

/// Receives re-mesh requests for regions whose dynamic light changed.
pub trait RemeshSink: Send + Sync {
    fn request_remesh(&self, region: RegionCoord);

    /// A request for `region` is already queued or in flight.
    fn is_remesh_pending(&self, _region: RegionCoord) -> bool {
        false
    }
}

/// Forwards requests to a mesher thread over a channel.
#[derive(Clone)]
pub struct ChannelRemeshSink {
    tx: Sender<RegionCoord>,
}

impl ChannelRemeshSink {
    pub fn new(tx: Sender<RegionCoord>) -> Self {
        Self { tx }
    }

    pub fn unbounded() -> (Self, Receiver<RegionCoord>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }
}

impl RemeshSink for ChannelRemeshSink {
    fn request_remesh(&self, region: RegionCoord) {
        // Receiver gone means the session is shutting down.
        let _ = self.tx.send(region);
    }
}

/// Collects pending regions into a set until drained.
#[derive(Debug, Default)]
pub struct CollectingRemeshSink {
    pending: Mutex<RegionSet>,
    requests: AtomicUsize,
}

impl CollectingRemeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending region, leaving the set empty.
    pub fn drain(&self) -> Vec<RegionCoord> {
        let mut pending = self.pending.lock();
        std::mem::take(&mut *pending).into_iter().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Requests received so far, duplicates included.
    pub fn total_requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

impl RemeshSink for CollectingRemeshSink {
    fn request_remesh(&self, region: RegionCoord) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.pending.lock().insert(region);
    }

    fn is_remesh_pending(&self, region: RegionCoord) -> bool {
        self.pending.lock().contains(&region)
    }
}
