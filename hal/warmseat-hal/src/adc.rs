//! Analog input abstraction
//!
//! Samples are normalised to 10 bits regardless of the converter's native
//! width, so calibration constants are portable between boards.

/// Raw converter sample, 0..=[`SAMPLE_MAX`]
pub type RawSample = u16;

/// Largest value a [`RawSample`] can take (10-bit)
pub const SAMPLE_MAX: RawSample = 1023;

/// Index-addressed analog input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogChannel(pub u8);

impl AnalogChannel {
    /// Channel index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reference voltage used for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// Supply-relative; a reading is a fraction of the supply rail
    #[default]
    Supply,
    /// Fixed internal bandgap; a reading is an absolute voltage
    Internal,
}

/// Blocking analog sampler
///
/// `read` blocks the calling context until the conversion has completed.
/// There is no timeout: a converter that never finishes hangs the caller.
/// Implementations that can fail report the failure as sample 0, which
/// every consumer in this firmware treats as the safe value.
pub trait AnalogInput {
    /// Take one sample from `channel` against `reference`
    fn read(&mut self, channel: AnalogChannel, reference: Reference) -> RawSample;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read(&mut self, channel: AnalogChannel, reference: Reference) -> RawSample {
        (**self).read(channel, reference)
    }
}
