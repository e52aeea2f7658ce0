//! Codepoint-level UTF-8 transcoding that never fails.
//!
//! Decoding only looks at the leading byte of each sequence: continuation
//! bytes are masked, not validated, and bytes missing at the end of the input
//! read as zero. A leading byte that starts no sequence becomes U+FFFD and
//! decoding resumes at the next byte. Script text is UTF-16, so the primary
//! forms work on UTF-16 code units; [`decode`] and [`encode`] adapt them to
//! Rust strings.

const REPLACEMENT: u16 = 0xFFFD;

/// Decodes `bytes` into UTF-16 code units, pairing surrogates for codepoints
/// above the basic plane.
pub fn decode_utf16(bytes: &[u8]) -> Vec<u16> {
    let cont = |i: usize| bytes.get(i).map_or(0, |b| (*b & 0x3F) as u32);

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i] as u32;
        if b0 < 0x80 {
            units.push(b0 as u16);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            units.push((((b0 & 0x1F) << 6) | cont(i + 1)) as u16);
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            units.push((((b0 & 0x0F) << 12) | (cont(i + 1) << 6) | cont(i + 2)) as u16);
            i += 3;
        } else if b0 & 0xF8 == 0xF0 {
            let code_point =
                ((b0 & 0x07) << 18) | (cont(i + 1) << 12) | (cont(i + 2) << 6) | cont(i + 3);
            // Overlong input leaves this negative; the units still fit in u16.
            let adjusted = code_point as i32 - 0x10000;
            units.push((0xD800 + (adjusted >> 10)) as u16);
            units.push((0xDC00 + (adjusted & 0x3FF)) as u16);
            i += 4;
        } else {
            units.push(REPLACEMENT);
            i += 1;
        }
    }
    units
}

/// Decodes `bytes` into a string. Unpaired surrogates produced by malformed
/// input are replaced with U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    char::decode_utf16(decode_utf16(bytes))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encodes UTF-16 code units. A lead surrogate directly followed by a trail
/// surrogate is combined into one codepoint; any other unit, including a lone
/// surrogate, is encoded on its own.
pub fn encode_utf16<I: IntoIterator<Item = u16>>(units: I) -> Vec<u8> {
    let mut units = units.into_iter().peekable();
    let mut out = Vec::new();
    while let Some(unit) = units.next() {
        let mut code_point = unit as u32;
        if (0xD800..=0xDBFF).contains(&code_point) {
            if let Some(&next) = units.peek() {
                if (0xDC00..=0xDFFF).contains(&next) {
                    code_point = 0x10000 + ((code_point & 0x3FF) << 10) + (next as u32 & 0x3FF);
                    units.next();
                }
            }
        }
        push_code_point(&mut out, code_point);
    }
    out
}

pub fn encode(text: &str) -> Vec<u8> {
    encode_utf16(text.encode_utf16())
}

fn push_code_point(out: &mut Vec<u8>, cp: u32) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x10000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
}
