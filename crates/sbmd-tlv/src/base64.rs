//! Standard-alphabet Base64 (RFC 4648) with `=` padding.
//!
//! Decoding is lenient and never fails: characters outside the alphabet
//! contribute zero bits and a short final group is treated as padded.

pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
pub const PAD: u8 = b'=';

const SEXTETS: [u8; 256] = build_sextets();

const fn build_sextets() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub fn encode(bytes: &[u8]) -> String {
    let symbol = |sextet: u8| ALPHABET[(sextet & 0x3F) as usize] as char;

    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        out.push(symbol(b0 >> 2));
        out.push(symbol(((b0 & 0x03) << 4) | (b1 >> 4)));
        out.push(if chunk.len() > 1 {
            symbol(((b1 & 0x0F) << 2) | (b2 >> 6))
        } else {
            PAD as char
        });
        out.push(if chunk.len() > 2 {
            symbol(b2)
        } else {
            PAD as char
        });
    }
    out
}

pub fn decode(text: &str) -> Vec<u8> {
    let input = text.as_bytes();
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    for group in input.chunks(4) {
        let sextet = |i: usize| group.get(i).map_or(0, |&c| SEXTETS[c as usize]);
        let carries_data = |i: usize| group.get(i).is_some_and(|&c| c != PAD);

        let (c0, c1, c2, c3) = (sextet(0), sextet(1), sextet(2), sextet(3));
        out.push((c0 << 2) | (c1 >> 4));
        if carries_data(2) {
            out.push(((c1 & 0x0F) << 4) | (c2 >> 2));
        }
        if carries_data(3) {
            out.push(((c2 & 0x03) << 6) | c3);
        }
    }
    out
}
