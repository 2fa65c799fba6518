// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Outbound spike delivery

use cerebellum_npu_neural::SpikeEvent;

/// Receiver of spike events emitted during an update
///
/// Generators emit at most one event per step; `multiplicity` carries the
/// number of simultaneous spikes.
pub trait SpikeSink {
    fn send(&mut self, event: SpikeEvent);
}

impl SpikeSink for Vec<SpikeEvent> {
    #[inline]
    fn send(&mut self, event: SpikeEvent) {
        self.push(event);
    }
}

/// Sink that only keeps totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpikeCounter {
    /// Number of events received
    pub events: u64,
    /// Sum of multiplicities
    pub spikes: u64,
}

impl SpikeSink for SpikeCounter {
    #[inline]
    fn send(&mut self, event: SpikeEvent) {
        self.events += 1;
        self.spikes += event.multiplicity as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerebellum_npu_neural::DeviceId;

    #[test]
    fn test_counter_sums_multiplicity() {
        let mut counter = SpikeCounter::default();
        counter.send(SpikeEvent::new(DeviceId(1), 0, 0, 3));
        counter.send(SpikeEvent::new(DeviceId(1), 0, 4, 1));
        assert_eq!(counter.events, 2);
        assert_eq!(counter.spikes, 4);
    }
}
