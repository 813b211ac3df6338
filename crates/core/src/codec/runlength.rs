//! `/RunLengthDecode` streams.

/// Expand run-length data. A control byte `n` below 128 introduces `n + 1`
/// literal bytes, 128 marks the end, and anything above repeats the
/// following byte `257 - n` times. Input that ends mid-run yields what was
/// decoded so far.
pub fn rldecode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let length = data[i];
        i += 1;

        match length {
            128 => break,
            0..=127 => {
                let count = length as usize + 1;
                let end = (i + count).min(data.len());
                result.extend_from_slice(&data[i..end]);
                i = end;
            }
            129..=255 => {
                if let Some(&byte) = data.get(i) {
                    i += 1;
                    result.extend(std::iter::repeat_n(byte, 257 - length as usize));
                }
            }
        }
    }

    result
}
