//! Blob-47 neighbour mask and lookup table.

use super::dir;

/// Maps an 8-bit neighbour mask to one of 47 canonical frames.
///
/// Bit layout (bit 7 to bit 0): TL, T, TR, R, BR, B, BL, L.
pub const BLOB_TABLE: [u8; 256] = [
    0, 1, 2, 2, 3, 4, 2, 2, 5, 5, 6, 6, 7, 7, 6, 6, //
    8, 9, 10, 10, 8, 9, 10, 10, 11, 11, 12, 12, 11, 11, 12, 12, //
    13, 14, 15, 15, 16, 17, 15, 15, 5, 5, 6, 6, 7, 7, 6, 6, //
    18, 19, 20, 20, 18, 19, 20, 20, 11, 11, 12, 12, 11, 11, 12, 12, //
    21, 22, 23, 23, 24, 25, 23, 23, 26, 26, 27, 27, 28, 28, 27, 27, //
    29, 30, 31, 31, 29, 30, 31, 31, 32, 32, 33, 33, 32, 32, 33, 33, //
    21, 22, 23, 23, 24, 25, 23, 23, 26, 26, 27, 27, 28, 28, 27, 27, //
    29, 30, 31, 31, 29, 30, 31, 31, 32, 32, 33, 33, 32, 32, 33, 33, //
    34, 35, 36, 36, 37, 38, 36, 36, 39, 39, 40, 40, 41, 41, 40, 40, //
    8, 9, 10, 10, 8, 9, 10, 10, 11, 11, 12, 12, 11, 11, 12, 12, //
    42, 43, 44, 44, 45, 46, 44, 44, 39, 39, 40, 40, 41, 41, 40, 40, //
    18, 19, 20, 20, 18, 19, 20, 20, 11, 11, 12, 12, 11, 11, 12, 12, //
    21, 22, 23, 23, 24, 25, 23, 23, 26, 26, 27, 27, 28, 28, 27, 27, //
    29, 30, 31, 31, 29, 30, 31, 31, 32, 32, 33, 33, 32, 32, 33, 33, //
    21, 22, 23, 23, 24, 25, 23, 23, 26, 26, 27, 27, 28, 28, 27, 27, //
    29, 30, 31, 31, 29, 30, 31, 31, 32, 32, 33, 33, 32, 32, 33, 33, //
];

/// Highest frame `BLOB_TABLE` can produce.
pub const MAX_BLOB_FRAME: u8 = 46;

/// Builds the blob mask from raw connectivity bits.
///
/// Cardinal bits pass through. A diagonal bit is only kept when both
/// cardinals beside it connect too, so a lone diagonal neighbour never
/// rounds off a corner.
#[inline]
#[must_use]
pub const fn neighbor_mask(connect: u8) -> u8 {
    const BL_GATE: u8 = dir::B | dir::L | dir::BL;
    const BR_GATE: u8 = dir::B | dir::R | dir::BR;
    const TR_GATE: u8 = dir::T | dir::R | dir::TR;
    const TL_GATE: u8 = dir::T | dir::L | dir::TL;

    let mut mask = connect & dir::CARDINALS;
    if connect & BL_GATE == BL_GATE {
        mask |= dir::BL;
    }
    if connect & BR_GATE == BR_GATE {
        mask |= dir::BR;
    }
    if connect & TR_GATE == TR_GATE {
        mask |= dir::TR;
    }
    if connect & TL_GATE == TL_GATE {
        mask |= dir::TL;
    }
    mask
}

/// Looks up the blob frame for raw connectivity bits.
#[inline]
#[must_use]
pub const fn blob_frame(connect: u8) -> u8 {
    BLOB_TABLE[neighbor_mask(connect) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total_and_bounded() {
        assert_eq!(BLOB_TABLE.len(), 256);
        for (mask, &frame) in BLOB_TABLE.iter().enumerate() {
            assert!(frame <= MAX_BLOB_FRAME, "mask {mask:#010b} maps to {frame}");
        }
    }

    #[test]
    fn test_table_uses_all_47_frames() {
        let mut seen = [false; 47];
        for &frame in &BLOB_TABLE {
            seen[frame as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "Every canonical frame should be reachable");
    }

    #[test]
    fn test_diagonal_requires_both_cardinals() {
        // Diagonal alone contributes nothing.
        assert_eq!(neighbor_mask(dir::TL), 0);
        // Diagonal with only one cardinal is dropped.
        assert_eq!(neighbor_mask(dir::TL | dir::T), dir::T);
        // Diagonal with both cardinals is kept.
        assert_eq!(neighbor_mask(dir::TL | dir::T | dir::L), dir::TL | dir::T | dir::L);
    }

    #[test]
    fn test_known_frames() {
        assert_eq!(blob_frame(0), 0);
        assert_eq!(blob_frame(dir::ALL), 33);
        assert_eq!(blob_frame(dir::L), 1);
        assert_eq!(blob_frame(dir::B), 3);
    }
}
