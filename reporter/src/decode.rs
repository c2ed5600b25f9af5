//! Account decoding
//!
//! Manual byte-layout parsers for the pool and custody accounts. The
//! reporter only needs a handful of fields, so parsing walks each layout
//! with a cursor instead of pulling in the full program types.

use anyhow::{bail, Context, Result};
use solana_sdk::pubkey::Pubkey;
use valuation::CustodyState;

use crate::constants;

/// 8-byte account tag preceding every account body.
pub const ACCOUNT_TAG_LEN: usize = 8;

/// Most custodies a pool account may list.
pub const MAX_CUSTODIES: usize = 32;

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .context("account data offset overflow")?;
        if end > self.data.len() {
            bail!(
                "account data truncated at offset {} (wanted {} bytes, have {})",
                self.pos,
                len,
                self.data.len() - self.pos
            );
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().context("u32 field")?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().context("u64 field")?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn read_pubkey(&mut self) -> Result<Pubkey> {
        Pubkey::try_from(self.take(32)?).context("pubkey field")
    }
}

/// Decode the pool account into its ordered custody address list.
///
/// Layout: account tag, length-prefixed UTF-8 name, then a length-prefixed
/// vector of 32-byte custody addresses.
pub fn decode_pool(data: &[u8]) -> Result<Vec<Pubkey>> {
    let mut cur = Cursor::new(data);

    cur.skip(ACCOUNT_TAG_LEN).context("pool account: tag")?;

    let name_len = cur.read_u32().context("pool account: name length")? as usize;
    cur.skip(name_len).context("pool account: name")?;

    let custody_count = cur.read_u32().context("pool account: custody count")? as usize;
    if custody_count > MAX_CUSTODIES {
        bail!(
            "pool account lists {} custodies (limit {})",
            custody_count,
            MAX_CUSTODIES
        );
    }

    let mut custodies = Vec::with_capacity(custody_count);
    for i in 0..custody_count {
        let key = cur
            .read_pubkey()
            .with_context(|| format!("pool account: custody {}", i))?;
        custodies.push(key);
    }

    Ok(custodies)
}

/// Decode a custody account into the valuer's input state.
///
/// Layout: account tag, pool (32), mint (32), token account (32),
/// decimals (u8), stable flag (u8), then the assets block of six
/// little-endian u64s: fees reserves, owned, locked, guaranteed USD,
/// global short sizes, global short average prices. Trailing bytes are
/// parameters the reporter does not consume.
pub fn decode_custody(address: &Pubkey, data: &[u8]) -> Result<CustodyState> {
    let mut cur = Cursor::new(data);

    cur.skip(ACCOUNT_TAG_LEN).context("custody account: tag")?;
    cur.skip(32).context("custody account: pool")?;
    cur.skip(32).context("custody account: mint")?;
    cur.skip(32).context("custody account: token account")?;

    let decimals = cur.read_u8().context("custody account: decimals")?;
    // Stable flag is informational; classification goes by address.
    cur.skip(1).context("custody account: stable flag")?;

    cur.skip(8).context("custody account: fees reserves")?;
    let owned = cur.read_u64().context("custody account: owned")?;
    let locked = cur.read_u64().context("custody account: locked")?;
    let guaranteed_usd = cur.read_u64().context("custody account: guaranteed usd")?;
    cur.skip(8).context("custody account: global short sizes")?;
    let fallback_avg_price = cur
        .read_u64()
        .context("custody account: global short average prices")?;

    Ok(CustodyState {
        kind: constants::classify_custody(address),
        decimals,
        owned,
        locked,
        guaranteed_usd,
        fallback_avg_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use valuation::AssetKind;

    fn pool_fixture(name: &[u8], custodies: &[Pubkey]) -> Vec<u8> {
        let mut data = vec![0u8; ACCOUNT_TAG_LEN];
        data.extend_from_slice(&(name.len() as u32).to_le_bytes());
        data.extend_from_slice(name);
        data.extend_from_slice(&(custodies.len() as u32).to_le_bytes());
        for custody in custodies {
            data.extend_from_slice(custody.as_ref());
        }
        data
    }

    fn custody_fixture(
        decimals: u8,
        owned: u64,
        locked: u64,
        guaranteed_usd: u64,
        short_avg_price: u64,
    ) -> Vec<u8> {
        let mut data = vec![0u8; ACCOUNT_TAG_LEN];
        data.extend_from_slice(Pubkey::new_unique().as_ref()); // pool
        data.extend_from_slice(Pubkey::new_unique().as_ref()); // mint
        data.extend_from_slice(Pubkey::new_unique().as_ref()); // token account
        data.push(decimals);
        data.push(0); // stable flag
        data.extend_from_slice(&7u64.to_le_bytes()); // fees reserves
        data.extend_from_slice(&owned.to_le_bytes());
        data.extend_from_slice(&locked.to_le_bytes());
        data.extend_from_slice(&guaranteed_usd.to_le_bytes());
        data.extend_from_slice(&11u64.to_le_bytes()); // global short sizes
        data.extend_from_slice(&short_avg_price.to_le_bytes());
        data.extend_from_slice(&[0u8; 64]); // trailing parameters
        data
    }

    #[test]
    fn test_decode_pool_preserves_order() {
        let keys = vec![Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let data = pool_fixture(b"Pool", &keys);

        let decoded = decode_pool(&data).unwrap();
        assert_eq!(decoded, keys);
    }

    #[test]
    fn test_decode_pool_empty() {
        let data = pool_fixture(b"Pool", &[]);
        assert!(decode_pool(&data).unwrap().is_empty());
    }

    #[test]
    fn test_decode_pool_truncated() {
        let keys = vec![Pubkey::new_unique()];
        let mut data = pool_fixture(b"Pool", &keys);
        data.truncate(data.len() - 1);

        let err = decode_pool(&data).unwrap_err();
        assert!(err.to_string().contains("custody 0"));
    }

    #[test]
    fn test_decode_pool_rejects_absurd_count() {
        let mut data = vec![0u8; ACCOUNT_TAG_LEN];
        data.extend_from_slice(&0u32.to_le_bytes()); // empty name
        data.extend_from_slice(&u32::MAX.to_le_bytes());

        assert!(decode_pool(&data).is_err());
    }

    #[test]
    fn test_decode_custody_fields() {
        let address = Pubkey::from_str(constants::CUSTODY_SOL).unwrap();
        let data = custody_fixture(9, 1_000_000_000_000, 100_000_000_000, 42, 13);

        let custody = decode_custody(&address, &data).unwrap();

        assert_eq!(custody.kind, AssetKind::Sol);
        assert_eq!(custody.decimals, 9);
        assert_eq!(custody.owned, 1_000_000_000_000);
        assert_eq!(custody.locked, 100_000_000_000);
        assert_eq!(custody.guaranteed_usd, 42);
        assert_eq!(custody.fallback_avg_price, 13);
    }

    #[test]
    fn test_decode_custody_unknown_address() {
        let address = Pubkey::new_unique();
        let data = custody_fixture(6, 1, 0, 0, 0);

        let custody = decode_custody(&address, &data).unwrap();
        assert!(matches!(custody.kind, AssetKind::Other(_)));
    }

    #[test]
    fn test_decode_custody_truncated() {
        let address = Pubkey::new_unique();
        let data = vec![0u8; ACCOUNT_TAG_LEN + 32];

        let err = decode_custody(&address, &data).unwrap_err();
        assert!(err.to_string().contains("custody account"));
    }
}
