/// Two-digit seven-segment encoding.

/// Segment pattern for digits 0-9 (bit0 = segment a ... bit6 = segment g).
pub const SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Encode a value for the HEX1:HEX0 register, clamped to 0..=99.
pub fn encode(value: i32) -> u32 {
    let n = value.clamp(0, 99) as usize;
    ((SEGMENTS[n / 10] as u32) << 8) | SEGMENTS[n % 10] as u32
}

/// Inverse of `encode`. Unknown patterns yield `None`.
pub fn decode(pattern: u32) -> Option<u8> {
    let digit = |bits: u32| SEGMENTS.iter().position(|&s| s as u32 == bits);
    let tens = digit((pattern >> 8) & 0xFF)?;
    let ones = digit(pattern & 0xFF)?;
    Some((tens * 10 + ones) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_two_digits() {
        assert_eq!(encode(88), 0x7F7F);
        assert_eq!(encode(10), 0x063F);
        assert_eq!(encode(7), 0x3F07);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(encode(-1), encode(0));
        assert_eq!(encode(123), encode(99));
    }

    #[test]
    fn decode_inverts_encode() {
        for v in [0, 9, 10, 11, 60, 88, 99] {
            assert_eq!(decode(encode(v)), Some(v as u8));
        }
        assert_eq!(decode(0xFFFF), None);
    }
}
