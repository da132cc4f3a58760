/// A forward-only reader over a script buffer.
///
/// Reading past the end never panics: it yields `0`, leaves the cursor empty
/// and marks it as overrun. Grammars built on top rely on that zero failing
/// whatever comparison follows, so they need no bounds check per step.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    overrun: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            overrun: false,
        }
    }

    pub fn read_u8(&mut self) -> u8 {
        let bytes = self.bytes;
        match bytes.split_first() {
            Some((&byte, rest)) if !self.overrun => {
                self.bytes = rest;
                byte
            }
            _ => {
                self.fail();
                0
            }
        }
    }

    /// Reads exactly `n` bytes, or nothing at all if fewer remain.
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.overrun || n > self.bytes.len() {
            self.fail();
            return None;
        }
        let bytes = self.bytes;
        let (head, tail) = bytes.split_at(n);
        self.bytes = tail;
        Some(head)
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    pub fn rest(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sticky: once a read ran out of input every later read fails too.
    pub fn has_overrun(&self) -> bool {
        self.overrun
    }

    fn fail(&mut self) {
        self.bytes = &[];
        self.overrun = true;
    }
}
