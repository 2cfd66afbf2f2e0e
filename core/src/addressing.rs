/// Parse an A1-style cell reference into zero-based (row, col) indices.
///
/// Returns `None` for anything that is not a plain letters-then-digits
/// reference (absolute markers like `$A$1` are not produced by worksheet
/// cell elements and are rejected).
pub fn parse_cell_ref(a1: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut letters = 0usize;
    let mut digits = 0usize;

    for ch in a1.chars() {
        if ch.is_ascii_alphabetic() {
            if digits > 0 {
                return None;
            }
            letters += 1;
            let v = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as u32;
            col = col.checked_mul(26)?.checked_add(v)?;
        } else if ch.is_ascii_digit() {
            digits += 1;
            row = row.checked_mul(10)?.checked_add((ch as u8 - b'0') as u32)?;
        } else {
            return None;
        }
    }

    if letters == 0 || digits == 0 || row == 0 || col == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// Render a zero-based column index as Excel column letters ("A", "Z", "AA", ...).
pub fn column_letters(col: usize) -> String {
    let mut n = col;
    let mut out = Vec::new();
    loop {
        out.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_ref_examples() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("B2"), Some((1, 1)));
        assert_eq!(parse_cell_ref("Z1"), Some((0, 25)));
        assert_eq!(parse_cell_ref("AA10"), Some((9, 26)));
    }

    #[test]
    fn parse_cell_ref_rejects_malformed() {
        for bad in ["", "1A", "A0", "A", "7", "A-1", "A1A"] {
            assert!(parse_cell_ref(bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn column_letters_round_trip() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(52), "BA");
    }
}
