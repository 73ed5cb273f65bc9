//! Random test values through [`arbitrary`].

use arbitrary::{Arbitrary, Unstructured};
use rand::RngCore;
use relayer_db_types::event::ChainEvent;

const ARB_GEN_LEN: usize = 4096;

#[derive(Debug)]
pub struct ArbitraryGenerator {
    buf: Vec<u8>,
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; ARB_GEN_LEN],
        }
    }

    /// Generates an arbitrary `T` from fresh random bytes.
    ///
    /// # Panics
    ///
    /// If `T` cannot be built from the buffer after several attempts.
    pub fn generate<T>(&mut self) -> T
    where
        T: for<'a> Arbitrary<'a>,
    {
        const MAX_ATTEMPTS: usize = 16;
        let mut rng = rand::thread_rng();
        let mut last_error = None;

        for _ in 0..MAX_ATTEMPTS {
            rng.fill_bytes(&mut self.buf);
            let mut u = Unstructured::new(&self.buf);
            match T::arbitrary(&mut u) {
                Ok(value) => return value,
                Err(err) => last_error = Some(err),
            }
        }

        panic!("failed to generate arbitrary instance: {last_error:?}");
    }

    /// Random event with a recognizable block number.
    pub fn event(&mut self, block_number: u64) -> ChainEvent {
        ChainEvent {
            block_number,
            ..self.generate()
        }
    }
}

/// Lowercase hex tx hash derived from `n`, distinct for distinct `n` and
/// ordered like `n`.
pub fn tx_hash(n: u32) -> String {
    hex::encode(n.to_be_bytes())
}
