//! Fuzz target for UTF-8 and UCS-4 text import.
//!
//! Arbitrary bytes and code units must either import cleanly or report an
//! error, never panic, and an import must stop at the first NUL.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textfield::TextBuffer;

fuzz_target!(|data: &[u8]| {
    if let Ok(buf) = TextBuffer::from_utf8(data) {
        assert!(!buf.as_slice().contains(&'\0'));
        let nul = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        assert_eq!(buf.to_string().len(), nul);
    }

    let units: Vec<u32> = data
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if let Ok(buf) = TextBuffer::from_ucs4(&units) {
        let exported = buf.to_ucs4();
        assert_eq!(exported.last(), Some(&0));
        let nul = units.iter().position(|&u| u == 0).unwrap_or(units.len());
        assert_eq!(&exported[..exported.len() - 1], &units[..nul]);
    }
});
