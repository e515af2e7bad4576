// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Packed colour.
//!
//! A pixel is one `u32` with red in the least significant byte, then
//! green, blue and alpha.  This is the only bit-exact contract between
//! the carver and whatever supplies or displays its pixels.

/// Pack `[r, g, b, a]` into a single pixel.
#[inline]
pub fn pack_rgba(channels: [u8; 4]) -> u32 {
    u32::from_le_bytes(channels)
}

/// Split a pixel back into `[r, g, b, a]`.
#[inline]
pub fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_is_the_low_byte() {
        assert_eq!(pack_rgba([0xff, 0, 0, 0]), 0x0000_00ff);
        assert_eq!(pack_rgba([0, 0xff, 0, 0]), 0x0000_ff00);
        assert_eq!(pack_rgba([0, 0, 0xff, 0]), 0x00ff_0000);
        assert_eq!(pack_rgba([0, 0, 0, 0xff]), 0xff00_0000);
    }

    #[test]
    fn unpack_reads_the_same_order() {
        assert_eq!(unpack_rgba(0x8040_2010), [0x10, 0x20, 0x40, 0x80]);
    }
}
