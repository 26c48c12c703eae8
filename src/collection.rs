use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, ParseError};
use crate::pipeline::ingest;
use crate::types::track::{RawFile, Track};
use crate::types::unit::UnitSystem;

/// Identifies one load of a collection. Only the most recently issued token
/// may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchToken(u64);

impl BatchToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generation: u64,
    pub loaded: usize,
    pub skipped: usize,
}

/// The tracks of one session together with the unit they are displayed in.
#[derive(Debug, Clone, Default)]
pub struct TrackCollection {
    tracks: Vec<Track>,
    unit: UnitSystem,
    generation: u64,
}

impl TrackCollection {
    pub fn new(unit: UnitSystem) -> Self {
        Self {
            tracks: Vec::new(),
            unit,
            generation: 0,
        }
    }

    /// Starts a new load: drops the current tracks and invalidates every
    /// token issued before.
    pub fn begin_batch(&mut self) -> BatchToken {
        self.generation += 1;
        self.tracks.clear();
        BatchToken(self.generation)
    }

    /// Stores the tracks of a finished load, keeping input order. Files that
    /// failed to parse are left out.
    pub fn commit(
        &mut self,
        token: BatchToken,
        results: Vec<Result<Track, ParseError>>,
    ) -> Result<BatchReport, CollectionError> {
        if token.0 != self.generation {
            return Err(CollectionError::StaleBatch {
                token: token.0,
                current: self.generation,
            });
        }

        let mut tracks = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for result in results {
            match result {
                Ok(track) => tracks.push(track),
                Err(err) => {
                    tracing::debug!("Dropping file from batch {}: {}", token.0, err);
                    skipped += 1;
                }
            }
        }

        self.tracks = tracks;
        Ok(BatchReport {
            generation: token.0,
            loaded: self.tracks.len(),
            skipped,
        })
    }

    /// Replaces the collection with the tracks parsed from `files`.
    pub fn load(&mut self, files: &[RawFile]) -> Result<BatchReport, CollectionError> {
        let token = self.begin_batch();
        self.commit(token, ingest::ingest(files))
    }

    pub fn set_unit(&mut self, unit: UnitSystem) {
        self.unit = unit;
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
