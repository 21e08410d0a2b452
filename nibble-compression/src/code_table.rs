use crate::nibble::Nibble;

/// Index 0 is the escape marker and never matches a byte; the other slots
/// hold the 15 most frequent English characters.
pub const CODE_TABLE: [u8; 16] = [
    b'\0', b' ', b'e', b't', b'n', b'r', b'o', b'a', b'i', b's', b'd', b'l', b'h', b'c', b'f',
    b'p',
];

pub fn code_for(byte: u8) -> Option<Nibble> {
    CODE_TABLE
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, entry)| **entry == byte)
        .map(|(index, _)| Nibble::truncate(index as u8))
}

/// `None` for the escape nibble.
pub fn byte_for(nibble: Nibble) -> Option<u8> {
    if nibble.is_escape() {
        return None;
    }
    Some(CODE_TABLE[nibble.value() as usize])
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{byte_for, code_for, CODE_TABLE};
    use crate::nibble::Nibble;

    #[rstest]
    #[case(b' ', Some(1))]
    #[case(b'e', Some(2))]
    #[case(b't', Some(3))]
    #[case(b'a', Some(7))]
    #[case(b'p', Some(15))]
    #[case(b'\0', None)]
    #[case(b'Z', None)]
    #[case(b'E', None)]
    #[case(0xFF, None)]
    fn test_code_for(#[case] byte: u8, #[case] expected: Option<u8>) {
        assert_eq!(code_for(byte).map(Nibble::value), expected);
    }

    #[test]
    fn test_every_direct_code_maps_back_to_its_byte() {
        for index in 1..=Nibble::MAX {
            let nibble = Nibble::truncate(index);
            let byte = byte_for(nibble).unwrap();
            assert_eq!(code_for(byte), Some(nibble));
        }
    }

    #[test]
    fn test_escape_has_no_byte() {
        assert_eq!(byte_for(Nibble::ESCAPE), None);
    }

    #[test]
    fn test_table_entries_are_distinct() {
        let mut entries = CODE_TABLE.to_vec();
        entries.sort_unstable();
        entries.dedup();
        assert_eq!(entries.len(), CODE_TABLE.len());
    }
}
