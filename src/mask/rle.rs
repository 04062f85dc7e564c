//! Run-length encoding of binary masks.
//!
//! Runs alternate background/foreground starting with background, in
//! row-major pixel order. The compressed wire form packs each run count into
//! a printable LEB128-style string (5-bit groups offset by 48, bit 5 as the
//! continuation flag).

use crate::foundation::error::{ConvertError, ConvertResult};
use crate::label::model::{Box2D, Rle};

/// Decoded run lengths of a binary mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RleRuns {
    /// Mask dimensions as `[height, width]`.
    pub size: [u32; 2],
    /// Alternating run counts, background first.
    pub counts: Vec<u32>,
}

impl RleRuns {
    /// Encode a row-major binary mask (`0` background, nonzero foreground).
    ///
    /// `mask` length must equal `height * width`.
    pub fn encode_mask(mask: &[u8], height: u32, width: u32) -> ConvertResult<Self> {
        let n = (height as usize) * (width as usize);
        if mask.len() != n {
            return Err(ConvertError::rasterize(format!(
                "mask length {} does not match {height}x{width} canvas",
                mask.len()
            )));
        }

        let mut counts = Vec::new();
        let mut prev = 0u8;
        let mut run = 0u32;
        for &v in mask {
            let v = u8::from(v != 0);
            if v != prev {
                counts.push(run);
                run = 0;
                prev = v;
            }
            run += 1;
        }
        counts.push(run);

        Ok(Self {
            size: [height, width],
            counts,
        })
    }

    /// Decode back to a row-major binary mask of `height * width` bytes.
    pub fn decode(&self) -> Vec<u8> {
        let n = (self.size[0] as usize) * (self.size[1] as usize);
        let mut mask = vec![0u8; n];
        let mut idx = 0usize;
        let mut v = 0u8;
        for &c in &self.counts {
            let end = (idx + c as usize).min(n);
            for slot in &mut mask[idx..end] {
                *slot = v;
            }
            idx += c as usize;
            v = 1 - v;
        }
        mask
    }

    /// Number of foreground pixels (sum of odd-indexed runs).
    pub fn area(&self) -> u64 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, &c)| u64::from(c))
            .sum()
    }

    /// Compress into the wire representation.
    pub fn to_compressed(&self) -> Rle {
        let mut s = String::new();
        for &c in &self.counts {
            encode_count(&mut s, c);
        }
        Rle {
            counts: s,
            size: self.size,
        }
    }

    /// Decompress a wire representation back into raw runs.
    pub fn from_compressed(rle: &Rle) -> Self {
        let bytes = rle.counts.as_bytes();
        let mut counts = Vec::new();
        let mut i = 0usize;
        while i < bytes.len() {
            let mut x: i64 = 0;
            let mut shift = 0;
            let mut more = true;
            while more && i < bytes.len() {
                let c = i64::from(bytes[i].wrapping_sub(48));
                i += 1;
                x |= (c & 0x1f) << shift;
                more = (c & 0x20) != 0;
                shift += 5;
            }
            // Sign extend when the top bit of the last group is set.
            if shift > 0 && (x & (1 << (shift - 1))) != 0 {
                x |= !0i64 << shift;
            }
            counts.push(x as u32);
        }
        Self {
            size: rle.size,
            counts,
        }
    }
}

/// Pack one run count into the printable 5-bit-group encoding.
fn encode_count(s: &mut String, count: u32) {
    let mut x = i64::from(count);
    loop {
        let mut c = (x & 0x1f) as u8;
        x >>= 5;
        let more = if c & 0x10 != 0 { x != -1 } else { x != 0 };
        if more {
            c |= 0x20;
        }
        s.push((c + 48) as char);
        if !more {
            break;
        }
    }
}

/// Derive the bounding box of a mask's foreground pixels.
///
/// Returns `None` for an all-background mask. Corners are inclusive pixel
/// coordinates.
pub fn rle_to_box2d(rle: &Rle) -> Option<Box2D> {
    let runs = RleRuns::from_compressed(rle);
    let w = runs.size[1] as usize;
    if w == 0 || runs.size[0] == 0 {
        return None;
    }

    let mut min_x = usize::MAX;
    let mut max_x = 0usize;
    let mut min_y = usize::MAX;
    let mut max_y = 0usize;
    let mut any = false;

    let mut offset = 0usize;
    for (i, &c) in runs.counts.iter().enumerate() {
        let c = c as usize;
        if i % 2 == 1 && c > 0 {
            any = true;
            let (y1, x1) = (offset / w, offset % w);
            let end = offset + c - 1;
            let (y2, x2) = (end / w, end % w);
            min_y = min_y.min(y1);
            max_y = max_y.max(y2);
            if y1 == y2 {
                min_x = min_x.min(x1);
                max_x = max_x.max(x2);
            } else {
                // A run wrapping across rows touches every column.
                min_x = 0;
                max_x = w - 1;
            }
        }
        offset += c;
    }

    any.then(|| Box2D {
        x1: min_x as f64,
        y1: min_y as f64,
        x2: max_x as f64,
        y2: max_y as f64,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mask/rle.rs"]
mod tests;
