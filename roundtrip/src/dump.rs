use std::fmt::{LowerHex, Write};

/**
    Join values as unpadded lower-case hex, e.g. `1000-1050-10a0`.

    Signed values print as their two's complement bit pattern.
*/
pub fn hex_join<T: LowerHex>(values: &[T], sep: &str) -> String {
    let mut out = String::with_capacity(values.len() * 5);
    for (i, value) in values.iter().enumerate() {
        if i != 0 {
            out.push_str(sep);
        }
        let _ = write!(out, "{:x}", value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(hex_join(&[0x1au8, 0x00, 0xff], "-"), "1a-0-ff");
    }

    #[test]
    fn signed_words_print_as_bit_patterns() {
        assert_eq!(hex_join(&[0x1000i16, -1, i16::MIN], "-"), "1000-ffff-8000");
    }

    #[test]
    fn custom_separator() {
        assert_eq!(hex_join(&[1u8, 2, 3], " "), "1 2 3");
        assert_eq!(hex_join(&[1u8, 2], ""), "12");
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(hex_join::<u8>(&[], "-"), "");
        assert_eq!(hex_join(&[0xabcu16], "-"), "abc");
    }
}
