use std::fmt;

/// A bit-string, packed MSB-first into bytes.
///
/// Unused trailing bits of the last byte are always zero, so two `BitVec`s
/// holding the same bits compare equal.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }
        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    /// Remove and return the last bit.
    pub fn pop_bit(&mut self) -> Option<bool> {
        if self.bit_count == 0 {
            return None;
        }
        self.bit_count -= 1;
        let byte_index = self.bit_count / 8;
        let mask = 1 << (7 - self.bit_count % 8);
        let bit = self.bits[byte_index] & mask != 0;
        self.bits[byte_index] &= !mask;
        if self.bit_count % 8 == 0 {
            self.bits.pop();
        }
        Some(bit)
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).filter_map(move |i| self.get(i))
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.bit_count <= other.bit_count
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut result = BitVec::new();
        for bit in iter {
            result.push_bit(bit);
        }
        result
    }
}

#[cfg(test)]
impl From<&str> for BitVec {
    fn from(text: &str) -> Self {
        text.chars()
            .map(|c| match c {
                '0' => false,
                '1' => true,
                other => panic!("not a bit: {:?}", other),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_display() {
        let mut bits = BitVec::new();
        assert!(bits.is_empty());
        assert_eq!(bits.to_string(), "");
        for c in "101100111".chars() {
            bits.push_bit(c == '1');
        }
        assert_eq!(bits.len(), 9);
        assert_eq!(bits.as_bytes(), &[0b1011_0011, 0b1000_0000]);
        assert_eq!(bits.to_string(), "101100111");
    }

    #[test]
    fn test_pop_restores_state() {
        let before = BitVec::from("1010101");
        let mut bits = before.clone();
        bits.push_bit(true);
        bits.push_bit(true);
        assert_eq!(bits.pop_bit(), Some(true));
        assert_eq!(bits.pop_bit(), Some(true));
        assert_eq!(bits, before);

        let mut one = BitVec::from("1");
        assert_eq!(one.pop_bit(), Some(true));
        assert_eq!(one, BitVec::new());
        assert_eq!(one.pop_bit(), None);
    }

    #[test]
    fn test_prefix() {
        let a = BitVec::from("10");
        assert!(a.is_prefix_of(&BitVec::from("101")));
        assert!(a.is_prefix_of(&a));
        assert!(!a.is_prefix_of(&BitVec::from("11")));
        assert!(!a.is_prefix_of(&BitVec::from("1")));
        assert!(BitVec::new().is_prefix_of(&a));
    }
}
