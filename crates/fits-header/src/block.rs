/// FITS block size in bytes (each logical record is one block).
pub const BLOCK_SIZE: usize = 2880;

/// FITS card (keyword record) size in bytes.
pub const CARD_SIZE: usize = 80;

/// Number of cards that fit in a single block.
pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// Padding byte used for header blocks (ASCII space).
pub const HEADER_PAD_BYTE: u8 = 0x20;

/// Returns the number of FITS blocks required to hold `num_bytes` bytes.
///
/// 0 bytes requires 0 blocks, 1 byte requires 1 block, 2880 bytes requires
/// 1 block, 2881 bytes requires 2 blocks.
pub const fn blocks_needed(num_bytes: u64) -> u64 {
    num_bytes.div_ceil(BLOCK_SIZE as u64)
}

/// Returns the on-disk length of a segment of `num_bytes`, rounded up to
/// whole blocks.
pub const fn padded_byte_len(num_bytes: u64) -> u64 {
    blocks_needed(num_bytes) * BLOCK_SIZE as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_per_block() {
        assert_eq!(CARDS_PER_BLOCK, 36);
    }

    #[test]
    fn blocks_needed_boundaries() {
        assert_eq!(blocks_needed(0), 0);
        assert_eq!(blocks_needed(1), 1);
        assert_eq!(blocks_needed(BLOCK_SIZE as u64), 1);
        assert_eq!(blocks_needed(BLOCK_SIZE as u64 + 1), 2);
    }

    #[test]
    fn padded_byte_len_rounds_up() {
        assert_eq!(padded_byte_len(0), 0);
        assert_eq!(padded_byte_len(100), 2880);
        assert_eq!(padded_byte_len(2880 * 3), 2880 * 3);
        assert_eq!(padded_byte_len(2880 * 3 + 1), 2880 * 4);
    }
}
