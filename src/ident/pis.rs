// src/ident/pis.rs

/// Positional weights for the PIS check digit.
pub const PIS_WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// `11 - (weighted_sum % 11)` before coercion; always in `1..=11`.
pub fn pis_raw_check_digit(body: &[u8; 10]) -> u32 {
    let sum: u32 = body
        .iter()
        .zip(PIS_WEIGHTS)
        .map(|(&d, w)| d as u32 * w)
        .sum();
    11 - (sum % 11)
}

/// PIS check digit for a 10-digit body. Raw values 10 and 11 both map to 0.
pub fn pis_check_digit(body: &[u8; 10]) -> u8 {
    let raw = pis_raw_check_digit(body);
    if raw == 10 || raw == 11 {
        0
    } else {
        raw as u8
    }
}

/// True when `s` is 11 ASCII digits whose last one matches [`pis_check_digit`].
pub fn is_valid_pis(s: &str) -> bool {
    let Some(digits) = super::parse_digits::<11>(s) else {
        return false;
    };
    let mut body = [0u8; 10];
    body.copy_from_slice(&digits[..10]);
    pis_check_digit(&body) == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_check_digit() {
        let body = [1, 7, 0, 3, 3, 2, 5, 9, 9, 6];
        assert_eq!(pis_raw_check_digit(&body), 2);
        assert_eq!(pis_check_digit(&body), 2);
        assert!(is_valid_pis("17033259962"));
    }

    #[test]
    fn raw_ten_coerces_to_zero() {
        let body = [1, 2, 0, 5, 6, 3, 4, 8, 7, 4];
        assert_eq!(pis_raw_check_digit(&body), 10);
        assert_eq!(pis_check_digit(&body), 0);
        assert!(is_valid_pis("12056348740"));
    }

    #[test]
    fn raw_eleven_coerces_to_zero() {
        // weighted sum 0 ≡ 0 (mod 11)
        let body = [0; 10];
        assert_eq!(pis_raw_check_digit(&body), 11);
        assert_eq!(pis_check_digit(&body), 0);
    }

    #[test]
    fn rejects_bad_check_digit() {
        assert!(!is_valid_pis("17033259961"));
        assert!(!is_valid_pis("1703325996"));
        assert!(!is_valid_pis("1703325996x"));
    }
}
