use crate::error::{Result, TableError};

/// Convert spreadsheet column letters to a 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
///
/// Letters are case-insensitive.
pub fn parse_column_letters(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(TableError::InvalidColumnLetters(letters.to_string()));
    }

    let mut col = 0usize;
    for b in letters.bytes() {
        let b = b.to_ascii_uppercase();
        if !b.is_ascii_uppercase() {
            return Err(TableError::InvalidColumnLetters(letters.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add((b - b'A') as usize + 1))
            .ok_or_else(|| TableError::InvalidColumnLetters(letters.to_string()))?;
    }

    Ok(col - 1)
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_letters() {
        assert_eq!(parse_column_letters("A").unwrap(), 0);
        assert_eq!(parse_column_letters("Z").unwrap(), 25);
        assert_eq!(parse_column_letters("AA").unwrap(), 26);
        assert_eq!(parse_column_letters("AZ").unwrap(), 51);
        assert_eq!(parse_column_letters("BA").unwrap(), 52);
        assert_eq!(parse_column_letters("ZZ").unwrap(), 701);
        assert_eq!(parse_column_letters("ab").unwrap(), 27);
    }

    #[test]
    fn test_parse_column_letters_errors() {
        assert!(parse_column_letters("").is_err());
        assert!(parse_column_letters("A1").is_err());
        assert!(parse_column_letters("_").is_err());
    }

    #[test]
    fn test_column_index_to_letters() {
        assert_eq!(column_index_to_letters(0), "A");
        assert_eq!(column_index_to_letters(25), "Z");
        assert_eq!(column_index_to_letters(26), "AA");
        assert_eq!(column_index_to_letters(52), "BA");
        assert_eq!(column_index_to_letters(701), "ZZ");
        assert_eq!(column_index_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_agree_with_parser() {
        for col in 0..800 {
            let letters = column_index_to_letters(col);
            assert_eq!(parse_column_letters(&letters).unwrap(), col);
        }
    }
}
