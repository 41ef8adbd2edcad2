/// XOR-fold of every byte, the NMEA 0183 sentence checksum.
pub fn xor_fold(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &byte| acc ^ byte)
}

/// Wraps a sentence body (everything between `$` and `*`) into a complete,
/// checksummed, CR LF terminated sentence.
pub fn frame_sentence(body: &str) -> String {
    let body = body.trim_start_matches('$');
    format!("${}*{:02X}\r\n", body, xor_fold(body.as_bytes()))
}
