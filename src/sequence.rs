//! Rolling request sequence number.

/// Tag correlating a request with its acknowledgment.
///
/// A connection starts at 0, which is never sent. Each dispatch advances the
/// counter within 1..=255, wrapping from 255 back to 1.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceNumber(u8);

impl SequenceNumber {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_raw(value: u8) -> Self {
        SequenceNumber(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Move to the next value and return it.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::SequenceNumber;
    ///
    /// let mut seq = SequenceNumber::new();
    /// assert_eq!(seq.advance().value(), 1);
    /// assert_eq!(seq.advance().value(), 2);
    /// ```
    pub fn advance(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        if self.0 == 0 {
            self.0 = 1;
        }
        *self
    }
}
