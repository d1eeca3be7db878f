//! Minimal script assembly: data pushes, small integers and opcodes.

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_CHECKSIG: u8 = 0xac;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an integer, using `OP_0`, `OP_1NEGATE` or `OP_1`..`OP_16` when
    /// the value has a dedicated opcode.
    pub fn push_int(mut self, value: i64) -> Self {
        match value {
            0 => self.bytes.push(OP_0),
            -1 => self.bytes.push(OP_1NEGATE),
            1..=16 => self.bytes.push(OP_1 + (value as u8 - 1)),
            _ => return self.push_num(value),
        }
        self
    }

    /// Pushes the minimal script-number encoding of `value` as data, even when
    /// a small-integer opcode exists.
    pub fn push_num(self, value: i64) -> Self {
        self.push_slice(&script_num_to_vec(value))
    }

    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.bytes.push(len as u8);
        } else if len <= 0xff {
            self.bytes.push(OP_PUSHDATA1);
            self.bytes.push(len as u8);
        } else if len <= 0xffff {
            self.bytes.push(OP_PUSHDATA2);
            self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.bytes.push(OP_PUSHDATA4);
            self.bytes.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.bytes.push(opcode);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn script_num_to_vec(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let mut abs = value.unsigned_abs();
    let mut result = Vec::new();
    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let sign_bit = 0x80u8;
    if let Some(last) = result.last_mut() {
        if (*last & sign_bit) != 0 {
            result.push(if value < 0 { sign_bit } else { 0 });
        } else if value < 0 {
            *last |= sign_bit;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_coinbase_prefix() {
        let script = ScriptBuilder::new()
            .push_int(486_604_799)
            .push_num(4)
            .into_bytes();
        assert_eq!(script, vec![0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
    }

    #[test]
    fn small_ints_use_opcodes() {
        let script = ScriptBuilder::new()
            .push_int(0)
            .push_int(-1)
            .push_int(16)
            .push_int(17)
            .into_bytes();
        assert_eq!(script, vec![OP_0, OP_1NEGATE, 0x60, 0x01, 0x11]);
    }

    #[test]
    fn script_numbers_carry_sign() {
        assert_eq!(script_num_to_vec(0x80), vec![0x80, 0x00]);
        assert_eq!(script_num_to_vec(-0x80), vec![0x80, 0x80]);
        assert_eq!(script_num_to_vec(-1), vec![0x81]);
    }

    #[test]
    fn long_pushes_use_pushdata() {
        let script = ScriptBuilder::new().push_slice(&[7u8; 76]).into_bytes();
        assert_eq!(&script[..2], &[OP_PUSHDATA1, 76]);
        let script = ScriptBuilder::new().push_slice(&[7u8; 300]).into_bytes();
        assert_eq!(&script[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
        assert_eq!(script.len(), 303);
    }
}
