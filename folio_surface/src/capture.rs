// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Exclusive pointer capture.
///
/// At most one pointer id is held. Releasing an id that is not held does
/// nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerCapture {
    held: Option<u64>,
}

impl PointerCapture {
    /// Claims `pointer_id`. Returns `false` if another pointer already holds
    /// the capture.
    pub fn capture(&mut self, pointer_id: u64) -> bool {
        match self.held {
            Some(held) if held != pointer_id => false,
            _ => {
                self.held = Some(pointer_id);
                true
            }
        }
    }

    /// Releases `pointer_id` if it holds the capture. Returns `true` if it did.
    pub fn release(&mut self, pointer_id: u64) -> bool {
        if self.held == Some(pointer_id) {
            self.held = None;
            true
        } else {
            tracing::trace!(pointer_id, "release of uncaptured pointer ignored");
            false
        }
    }

    /// Returns `true` while any pointer is captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.held.is_some()
    }

    /// The captured pointer id.
    #[must_use]
    pub fn holder(&self) -> Option<u64> {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_release_is_a_no_op() {
        let mut capture = PointerCapture::default();
        assert!(capture.capture(7));
        assert!(capture.release(7));
        assert!(!capture.release(7));
        assert!(!capture.is_captured());
    }

    #[test]
    fn second_pointer_cannot_steal() {
        let mut capture = PointerCapture::default();
        assert!(capture.capture(1));
        assert!(!capture.capture(2));
        assert!(capture.capture(1));
        assert!(!capture.release(2));
        assert_eq!(capture.holder(), Some(1));
    }
}
