//! Per-track record stream.
//!
//! One comma-separated line per distinct classified truth muon, written to
//! an explicit sink. The stream is append-only: a header on creation, then
//! records in emission order.

use crate::parser::schema::{McParticle, ParticleId, Track};
use crate::truth::Classification;
use crate::utils::config::RECORD_HEADER;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One output line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub id: ParticleId,
    pub eta: f64,
    pub pt: f64,
    pub p: f64,
    pub phi: f64,
    pub mother_pdg: u32,
    pub n_clusters: i32,
    pub p_dca: f64,
    pub chi2: f64,
    pub chi2_match_mch_mid: f64,
    pub chi2_match_mch_mft: f64,
    pub is_prompt: bool,
}

impl OutputRecord {
    /// Truth identity plus reconstructed kinematics and fit quality
    pub fn new(track: &Track, particle: &McParticle, classification: &Classification) -> Self {
        Self {
            id: particle.id,
            eta: track.eta,
            pt: track.pt,
            p: track.p,
            phi: track.phi,
            mother_pdg: classification.mother_pdg(),
            n_clusters: track.n_clusters,
            p_dca: track.p_dca,
            chi2: track.chi2,
            chi2_match_mch_mid: track.chi2_match_mch_mid,
            chi2_match_mch_mft: track.chi2_match_mch_mft,
            is_prompt: classification.is_prompt_lepton,
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.id,
            self.eta,
            self.pt,
            self.p,
            self.phi,
            self.mother_pdg,
            self.n_clusters,
            self.p_dca,
            self.chi2,
            self.chi2_match_mch_mid,
            self.chi2_match_mch_mft,
            u8::from(self.is_prompt)
        )
    }
}

/// Writes records to a sink it owns until [`RecordEmitter::finish`]
pub struct RecordEmitter<W: Write> {
    sink: W,
    emitted: u64,
}

impl<W: Write> RecordEmitter<W> {
    /// Take ownership of the sink and write the header line
    pub fn new(mut sink: W) -> Result<Self, OutputError> {
        writeln!(sink, "{}", RECORD_HEADER)?;
        Ok(Self { sink, emitted: 0 })
    }

    /// Append one record
    pub fn emit(
        &mut self,
        track: &Track,
        particle: &McParticle,
        classification: &Classification,
    ) -> Result<(), OutputError> {
        let record = OutputRecord::new(track, particle, classification);
        writeln!(self.sink, "{}", record)?;
        self.emitted += 1;
        debug!("Emitted record for truth particle {}", record.id);
        Ok(())
    }

    /// Records written so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Flush and hand the sink back
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Create the record file and an emitter over it
///
/// **Public** - used by commands to open the record stream once per run
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - File cannot be created or the header cannot be written
pub fn create_record_file(
    output_path: impl AsRef<Path>,
) -> Result<RecordEmitter<BufWriter<File>>, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing track records to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    RecordEmitter::new(BufWriter::new(file))
}
