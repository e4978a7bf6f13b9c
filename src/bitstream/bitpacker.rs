use log::trace;

/// Largest code width the packer accepts. The queue holds at most 7 leftover bits plus one code.
pub const MAX_WIDTH: u32 = 32;

/// Packs variable width codes into a byte stream, least significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u32,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the capacity specified. Call flush()
    /// to push the last partial byte before taking the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every whole byte from the queue to the output. Leaves fewer than 8 bits queued.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            self.output.push(self.queue as u8); //push the low byte out
            self.queue >>= 8;
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put the low `width` bits of `code` on the stream.
    pub fn out_code(&mut self, code: u32, width: u32) {
        debug_assert!(width <= MAX_WIDTH);
        debug_assert!(width == MAX_WIDTH || code >> width == 0);
        self.queue |= (code as u64) << self.q_bits;
        self.q_bits += width;
        self.write_stream();
    }

    /// Flushes the remaining bits from the queue, padding the last byte with 0s in the most
    /// significant bits. Emits as many bytes as the queue needs, so it never truncates a code.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            trace!("Flushing {} trailing bits", self.q_bits);
        }
        while self.q_bits > 0 {
            self.output.push(self.queue as u8);
            self.queue >>= 8;
            self.q_bits = self.q_bits.saturating_sub(8);
        }
        self.queue = 0;
    }

    /// Number of bits written so far, including any still waiting in the queue.
    fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_len() / 8, self.bit_len() % 8)
    }
}
