use std::{fmt, io};

use aws_lc_rs::digest;
use bytes::BufMut;
use signet_error::{ErrorContext, OpaqueError};
use zeroize::Zeroizing;

/// Concatenation key derivation function, the single step KDF of
/// [`NIST SP 800-56A`] as profiled by [`rfc7518, section 4.6.2`].
///
/// Derived key material is an infinite stream: every round hashes
/// `round || Z || OtherInfo`, with the 32-bit big-endian round counter
/// starting at 1. The stream can be consumed in any number of reads,
/// reading `n` bytes at once yields the same bytes as reading them in parts.
///
/// [`NIST SP 800-56A`]: https://csrc.nist.gov/pubs/sp/800/56/a/r3/final
/// [`rfc7518, section 4.6.2`]: https://datatracker.ietf.org/doc/html/rfc7518#section-4.6.2
pub struct ConcatKdf {
    hash: &'static digest::Algorithm,
    z: Zeroizing<Vec<u8>>,
    other_info: Vec<u8>,
    // next round, none once all 2^32-1 rounds are used
    round: Option<u32>,
    // digest of the last round, `consumed` bytes of it are read
    block: Zeroizing<[u8; digest::MAX_OUTPUT_LEN]>,
    block_len: usize,
    consumed: usize,
}

impl ConcatKdf {
    /// Create a new [`ConcatKdf`] for the shared secret `z`.
    ///
    /// The algorithm identifier, `apu` and `apv` are length prefixed in
    /// the OtherInfo, `supp_pub_info` and `supp_priv_info` are appended as is.
    /// Fails if one of the prefixed inputs is longer than `u32::MAX` bytes.
    pub fn new(
        hash: &'static digest::Algorithm,
        algorithm_id: &[u8],
        z: &[u8],
        apu: &[u8],
        apv: &[u8],
        supp_pub_info: &[u8],
        supp_priv_info: &[u8],
    ) -> Result<Self, OpaqueError> {
        let mut other_info = Vec::with_capacity(
            12 + algorithm_id.len()
                + apu.len()
                + apv.len()
                + supp_pub_info.len()
                + supp_priv_info.len(),
        );
        for (name, value) in [("algorithm id", algorithm_id), ("apu", apu), ("apv", apv)] {
            let len = u32::try_from(value.len())
                .with_context(|| format!("concat kdf: {name} length exceeds u32"))?;
            other_info.put_u32(len);
            other_info.put_slice(value);
        }
        other_info.put_slice(supp_pub_info);
        other_info.put_slice(supp_priv_info);

        Ok(Self {
            hash,
            z: Zeroizing::new(z.to_vec()),
            other_info,
            round: Some(1),
            block: Zeroizing::new([0; digest::MAX_OUTPUT_LEN]),
            block_len: 0,
            consumed: 0,
        })
    }

    /// Fill `out` with the next derived bytes.
    pub fn fill(&mut self, out: &mut [u8]) -> io::Result<()> {
        let mut written = 0;
        while written < out.len() {
            if self.consumed == self.block_len {
                self.next_round()?;
            }
            let n = (self.block_len - self.consumed).min(out.len() - written);
            out[written..written + n]
                .copy_from_slice(&self.block[self.consumed..self.consumed + n]);
            self.consumed += n;
            written += n;
        }
        Ok(())
    }

    /// Read the next `n` derived bytes.
    pub fn read_key(&mut self, n: usize) -> io::Result<Zeroizing<Vec<u8>>> {
        let mut key = Zeroizing::new(vec![0; n]);
        self.fill(&mut key)?;
        Ok(key)
    }

    fn next_round(&mut self) -> io::Result<()> {
        let Some(round) = self.round else {
            return Err(io::Error::other("concat kdf: round counter exhausted"));
        };

        let mut ctx = digest::Context::new(self.hash);
        ctx.update(&round.to_be_bytes());
        ctx.update(&self.z);
        ctx.update(&self.other_info);
        let digest = ctx.finish();
        let digest = digest.as_ref();
        self.block[..digest.len()].copy_from_slice(digest);
        self.block_len = digest.len();
        self.consumed = 0;

        self.round = round.checked_add(1);
        Ok(())
    }
}

impl io::Read for ConcatKdf {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill(buf)?;
        Ok(buf.len())
    }
}

impl fmt::Debug for ConcatKdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatKdf")
            .field("hash", self.hash)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

/// SuppPubInfo for a derived key of `bits` length,
/// the 32-bit big-endian key data length in bits.
pub fn key_data_len(bits: u32) -> [u8; 4] {
    bits.to_be_bytes()
}
