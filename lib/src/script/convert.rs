/// Minimal little-endian sign-magnitude encoding, as pushed by script numbers.
pub fn encode_int(n: i64) -> Vec<u8> {
    let mut ret = Vec::new();

    let neg = n < 0;
    let mut abs = n.unsigned_abs();
    while abs != 0 {
        ret.push(abs as u8);
        abs >>= 8;
    }

    if let Some(&last) = ret.last() {
        if last & 0x80 != 0 {
            ret.push(if neg { 0x80 } else { 0x00 });
        } else if neg {
            let i = ret.len() - 1;
            ret[i] |= 0x80;
        }
    }

    ret
}
