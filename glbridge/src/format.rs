//! Pixel format negotiation policy.
//!
//! Native APIs don’t let you _set_ a pixel format; they let you describe one and hand you back
//! the closest match they know of. A [`FormatPolicy`] carries both the description sent to the
//! windowing system ([`FormatPolicy::preferred`]) and the minimum a returned format must meet to
//! be accepted ([`FormatPolicy::minimum`]).

/// Description of a pixel format.
///
/// Bit counts are totals: `color_bits` is the sum of the red, green and blue channels (and, on
/// platforms that count it there, alpha).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PixelFormat {
  /// Color bits.
  pub color_bits: u8,
  /// Alpha bits.
  pub alpha_bits: u8,
  /// Depth buffer bits.
  pub depth_bits: u8,
  /// Stencil buffer bits.
  pub stencil_bits: u8,
  /// Front and back buffers.
  pub double_buffer: bool,
  /// Can be drawn to a window.
  pub draw_to_window: bool,
  /// Hardware accelerated.
  pub accelerated: bool,
}

impl PixelFormat {
  /// Bits per color channel, assuming three equally-sized RGB channels.
  #[inline]
  pub fn channel_bits(&self) -> u8 {
    self.color_bits.min(24) / 3
  }

  /// Whether this format meets `minimum`: every flag `minimum` requires is set and every bit
  /// count is at least the minimum one.
  pub fn meets(&self, minimum: &PixelFormat) -> bool {
    (self.double_buffer || !minimum.double_buffer)
      && (self.draw_to_window || !minimum.draw_to_window)
      && (self.accelerated || !minimum.accelerated)
      && self.color_bits >= minimum.color_bits
      && self.alpha_bits >= minimum.alpha_bits
      && self.depth_bits >= minimum.depth_bits
      && self.stencil_bits >= minimum.stencil_bits
  }
}

/// Format negotiation policy.
///
/// Feel free to look at the different methods available to tweak the policy. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FormatPolicy {
  preferred: PixelFormat,
  minimum: PixelFormat,
}

impl Default for FormatPolicy {
  /// Defaults:
  ///
  /// - `preferred`: 32-bit RGBA color, 24-bit depth, 8-bit stencil, double-buffered,
  ///   window-drawable, hardware-accelerated.
  /// - `minimum`: 24-bit color, 8-bit depth, no alpha nor stencil requirement, double-buffered,
  ///   window-drawable, hardware-accelerated.
  fn default() -> Self {
    FormatPolicy {
      preferred: PixelFormat {
        color_bits: 32,
        alpha_bits: 0,
        depth_bits: 24,
        stencil_bits: 8,
        double_buffer: true,
        draw_to_window: true,
        accelerated: true,
      },
      minimum: PixelFormat {
        color_bits: 24,
        alpha_bits: 0,
        depth_bits: 8,
        stencil_bits: 0,
        double_buffer: true,
        draw_to_window: true,
        accelerated: true,
      },
    }
  }
}

impl FormatPolicy {
  /// Change the format described to the windowing system.
  #[inline]
  pub fn set_preferred(self, preferred: PixelFormat) -> Self {
    FormatPolicy { preferred, ..self }
  }

  /// Change the minimum accepted format.
  #[inline]
  pub fn set_minimum(self, minimum: PixelFormat) -> Self {
    FormatPolicy { minimum, ..self }
  }

  /// Format described to the windowing system.
  #[inline]
  pub fn preferred(&self) -> &PixelFormat {
    &self.preferred
  }

  /// Minimum accepted format.
  #[inline]
  pub fn minimum(&self) -> &PixelFormat {
    &self.minimum
  }

  /// Whether a format returned by the windowing system is acceptable.
  #[inline]
  pub fn accepts(&self, candidate: &PixelFormat) -> bool {
    candidate.meets(&self.minimum)
  }
}
