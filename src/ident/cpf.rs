// src/ident/cpf.rs

/// Compute both CPF check digits for a 9-digit body.
///
/// Each digit is `(weighted_sum * 10) % 11 % 10`; the first weights the body by
/// 10..=2, the second weights body + first digit by 11..=2.
pub fn cpf_check_digits(body: &[u8; 9]) -> [u8; 2] {
    let sum_first: u32 = body
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * (10 - i as u32))
        .sum();
    let first = ((sum_first * 10 % 11) % 10) as u8;

    let sum_second: u32 = body
        .iter()
        .chain(std::iter::once(&first))
        .enumerate()
        .map(|(i, &d)| d as u32 * (11 - i as u32))
        .sum();
    let second = ((sum_second * 10 % 11) % 10) as u8;

    [first, second]
}

/// True when `s` is 11 ASCII digits whose last two match [`cpf_check_digits`].
pub fn is_valid_cpf(s: &str) -> bool {
    let Some(digits) = super::parse_digits::<11>(s) else {
        return false;
    };
    let mut body = [0u8; 9];
    body.copy_from_slice(&digits[..9]);
    cpf_check_digits(&body) == [digits[9], digits[10]]
}
