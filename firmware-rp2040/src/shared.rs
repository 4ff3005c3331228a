//! Shared controller-state snapshot.

use core::cell::Cell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use joystick_core::StateSink;
use joystick_proto::ControllerState;

/// Process-wide snapshot of the latest decoded controller state.
///
/// Written by the decode pipeline on each successful full-line decode;
/// read by the HID IN task when building reports and by the control
/// request handler for GetReport. The whole snapshot is replaced
/// inside one critical section, so readers never observe a torn mix
/// of old and new fields.
pub struct SharedState {
    inner: Mutex<CriticalSectionRawMutex, Cell<ControllerState>>,
}

impl SharedState {
    /// Create a snapshot holding the neutral state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(ControllerState::neutral())),
        }
    }

    /// Copy out the current snapshot.
    #[inline]
    pub fn get(&self) -> ControllerState {
        self.inner.lock(|cell| cell.get())
    }

    /// Replace the snapshot as a single logical update.
    #[inline]
    pub fn set(&self, state: ControllerState) {
        self.inner.lock(|cell| cell.set(state));
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Let the drain pipeline publish straight into a shared snapshot.
impl StateSink for &SharedState {
    fn publish(&mut self, state: ControllerState) {
        self.set(state);
    }
}
