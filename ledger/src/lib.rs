mod errors;
pub mod structs;

pub use errors::{Error, Result};

use log::{debug, info};
use structs::RepostRecord;

use std::fs;
use std::path::{Path, PathBuf};

const LEDGER_PATH: &str = "./reposted.json";

/// File backed record of every repost the bot has made. Owns both the
/// in-memory list and the backing file, nothing else touches either.
pub struct Ledger {
    path: PathBuf,
    records: Vec<RepostRecord>,
}

impl Ledger {
    /// Open the ledger at the path the running bot uses.
    #[inline]
    pub fn open_default() -> Result<Ledger> {
        Ledger::load(LEDGER_PATH)
    }

    /// Load the ledger from `path`. A missing file is an empty ledger. A
    /// file that exists but does not parse is an error, guessing at the
    /// contents would risk double reposts.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Ledger> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<RepostRecord> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };

        info!(
            "loaded {} repost records from {}",
            records.len(),
            path.display()
        );
        Ok(Ledger { path, records })
    }

    /// Returns true if `original_id` has already been reposted. Linear
    /// scan, the ledger stays small enough that an index isn't worth it.
    #[inline]
    pub fn has_repost(&self, original_id: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.original == original_id)
    }

    /// Record a completed repost and rewrite the backing file with the
    /// full updated list. Not an incremental append, the whole file is
    /// replaced in place on every call.
    pub fn append(&mut self, original: &str, repost: &str, emoji: &str) -> Result<()> {
        self.records.push(RepostRecord::new(original, repost, emoji));
        fs::write(&self.path, serde_json::to_string_pretty(&self.records)?)?;

        debug!("recorded repost {original} -> {repost} for emoji {emoji}");
        Ok(())
    }

    #[inline]
    pub fn records(&self) -> &[RepostRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
