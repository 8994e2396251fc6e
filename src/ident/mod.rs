// src/ident/mod.rs

pub mod cpf;
pub mod pis;

pub use cpf::{cpf_check_digits, is_valid_cpf};
pub use pis::{is_valid_pis, pis_check_digit, pis_raw_check_digit};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;

/// Generates synthetic, checksum-valid CPF and PIS identifiers.
///
/// The random source is owned by the generator so callers (and tests) decide
/// whether runs are reproducible.
pub struct IdentifierGenerator<R = StdRng> {
    rng: R,
}

impl IdentifierGenerator<StdRng> {
    /// Generator backed by an OS-seeded `StdRng`.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator: the same seed yields the same identifiers.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IdentifierGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 9 random digits followed by the two CPF check digits.
    pub fn generate_taxpayer_id(&mut self) -> String {
        let body: [u8; 9] = self.draw_digits();
        let check = cpf_check_digits(&body);
        let id = render_digits(body.iter().chain(check.iter()));
        trace!(cpf = %id, "generated");
        id
    }

    /// 10 random digits followed by the PIS check digit.
    pub fn generate_social_insurance_id(&mut self) -> String {
        let body: [u8; 10] = self.draw_digits();
        let check = pis_check_digit(&body);
        let id = render_digits(body.iter().chain(std::iter::once(&check)));
        trace!(pis = %id, "generated");
        id
    }

    fn draw_digits<const N: usize>(&mut self) -> [u8; N] {
        let mut digits = [0u8; N];
        for d in digits.iter_mut() {
            *d = self.rng.random_range(0..10);
        }
        digits
    }
}

fn render_digits<'a>(digits: impl Iterator<Item = &'a u8>) -> String {
    digits.map(|&d| char::from(b'0' + d)).collect()
}

/// Split an exact-length string of ASCII digits into numeric digits.
pub(crate) fn parse_digits<const N: usize>(s: &str) -> Option<[u8; N]> {
    let bytes = s.as_bytes();
    if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut out = [0u8; N];
    for (o, b) in out.iter_mut().zip(bytes) {
        *o = b - b'0';
    }
    Some(out)
}
