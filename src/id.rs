//! Object identifiers for the package.
//!
//! Every record carrying a `do_objectID` gets one of these: a 36-character
//! uppercase string in UUID v4 layout. Identifiers are drawn from the OS
//! random source when it is available, otherwise from a seeded
//! non-cryptographic generator that still fixes the version and variant
//! nibbles so the consuming schema accepts them.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Length of an identifier in its textual form
pub const ID_LEN: usize = 36;

const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Where identifiers are currently being drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Operating system CSPRNG, formatted through `uuid`
    System,
    /// Seeded PRNG, assembled by hand
    Fallback,
}

/// Issues identifiers that are unique for the lifetime of one conversion.
pub struct IdGenerator {
    source: IdSource,
    fallback: Option<StdRng>,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_source(IdSource::System)
    }

    /// Start from a specific source; `Fallback` skips the OS entirely.
    pub fn with_source(source: IdSource) -> Self {
        Self {
            source,
            fallback: None,
            issued: HashSet::new(),
        }
    }

    pub fn source(&self) -> IdSource {
        self.source
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// Produce a fresh identifier never returned before by this generator.
    pub fn next_id(&mut self) -> String {
        loop {
            let id = self.generate();
            if self.issued.insert(id.clone()) {
                return id;
            }
            log::trace!("identifier collision on {}, drawing again", id);
        }
    }

    fn generate(&mut self) -> String {
        if self.source == IdSource::System {
            match system_id() {
                Some(id) => return id,
                None => {
                    log::warn!("OS random source unavailable; using fallback identifier generator");
                    self.source = IdSource::Fallback;
                }
            }
        }
        let rng = self.fallback.get_or_insert_with(seeded_rng);
        fallback_id(rng)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn system_id() -> Option<String> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes).ok()?;
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    Some(uuid.hyphenated().to_string().to_uppercase())
}

fn seeded_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    StdRng::seed_from_u64(nanos ^ (std::process::id() as u64).rotate_left(32))
}

/// Assemble a v4-shaped identifier from any random source.
pub fn fallback_id<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    // version 4, variant 10xx
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    let h = hex::encode_upper(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

/// Check that `id` has the textual shape the package format requires.
pub fn is_valid_id(id: &str) -> bool {
    if id.len() != ID_LEN {
        return false;
    }
    let bytes = id.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        let ok = if HYPHENS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_digit() || (b'A'..=b'F').contains(b)
        };
        if !ok {
            return false;
        }
    }
    bytes[14] == b'4' && matches!(bytes[19], b'8' | b'9' | b'A' | b'B')
}
