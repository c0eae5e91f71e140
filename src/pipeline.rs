//! Batch orchestration: list, outline, infer persona, rank, write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::{flatten_sections, format_timestamp, Document, OutputRecord, RunMetadata};
use crate::outline::load_document_file;
use crate::parser::{ErrorMode, ParseOptions};
use crate::persona::infer_for_documents;
use crate::rank::{
    load_embedder, Embedder, EmbeddingRanker, DEFAULT_EMBEDDING_MODEL, DEFAULT_TOP_K,
};
use crate::render::{to_json, JsonFormat};

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Identifier of the embedding model
    pub embedding_model: String,

    /// Number of sections kept in the output
    pub top_k: usize,

    /// Location of an external rasterizer; accepted but not used
    pub rasterizer_path: Option<PathBuf>,

    /// How documents are read
    pub parse: ParseOptions,

    /// Layout of the written JSON
    pub json_format: JsonFormat,
}

impl PipelineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedding model identifier.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the number of sections kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the rasterizer location.
    pub fn with_rasterizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rasterizer_path = Some(path.into());
        self
    }

    /// Set the error mode for failing documents.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.parse = self.parse.with_error_mode(mode);
        self
    }

    /// Enable or disable parallel document parsing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parse = self.parse.with_parallel(parallel);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            rasterizer_path: None,
            parse: ParseOptions::default(),
            json_format: JsonFormat::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The record was written to `path` with `sections` ranked entries.
    Written { path: PathBuf, sections: usize },
    /// No document yielded a heading; nothing was written.
    NoSections,
}

/// List the PDF files directly inside `dir`, sorted by file name.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let input_error = |source: io::Error| Error::InputDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(input_error)? {
        let entry = entry.map_err(input_error)?;
        let is_file = entry.file_type().map_err(input_error)?.is_file();
        let name = entry.file_name();
        if is_file && has_pdf_extension(&name.to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Build a [`Document`] for every file, keeping the input order.
///
/// In strict mode the first failure aborts; in lenient mode failing files
/// are logged and left out.
pub fn load_documents(files: &[PathBuf], options: &ParseOptions) -> Result<Vec<Document>> {
    let load = |path: &PathBuf| load_document_file(path).map_err(|e| e.in_document(path));

    let results: Vec<Result<Document>> = if options.parallel {
        files.par_iter().map(load).collect()
    } else {
        files.iter().map(load).collect()
    };

    match options.error_mode {
        ErrorMode::Strict => results.into_iter().collect(),
        ErrorMode::Lenient => Ok(results
            .into_iter()
            .filter_map(|result| match result {
                Ok(doc) => Some(doc),
                Err(e) => {
                    log::warn!("Skipping document: {}", e);
                    None
                }
            })
            .collect()),
    }
}

/// The batch pipeline, holding its configuration and a loaded embedder.
pub struct Pipeline<E: Embedder = Box<dyn Embedder>> {
    config: PipelineConfig,
    ranker: EmbeddingRanker<E>,
}

impl Pipeline {
    /// Create a pipeline, loading the embedder named in the configuration.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let embedder = load_embedder(&config.embedding_model)?;
        Ok(Self::new(config, embedder))
    }
}

impl<E: Embedder> Pipeline<E> {
    /// Create a pipeline with an already loaded embedder.
    pub fn new(config: PipelineConfig, embedder: E) -> Self {
        let ranker = EmbeddingRanker::new(embedder, config.top_k);
        Self { config, ranker }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every PDF in `input` and build the output record.
    ///
    /// Returns `None` when no document contributed a section.
    pub fn run(&self, input: &Path) -> Result<Option<OutputRecord>> {
        let files = list_pdfs(input)?;
        log::info!("Found {} PDF files in {}", files.len(), input.display());
        if let Some(path) = &self.config.rasterizer_path {
            log::debug!("Rasterizer path {} is not used", path.display());
        }

        let documents = load_documents(&files, &self.config.parse)?;
        let sections = flatten_sections(&documents);
        if sections.is_empty() {
            log::warn!("No sections found.");
            return Ok(None);
        }

        let persona = infer_for_documents(&documents);
        log::info!("Persona: {} ({})", persona, persona.job());

        let ranked = self.ranker.rank(&persona.query(), &sections)?;
        let metadata = RunMetadata {
            persona: persona.name().to_string(),
            job: persona.job().to_string(),
            documents: documents.iter().map(|d| d.source.clone()).collect(),
            timestamp: format_timestamp(Utc::now()),
        };

        Ok(Some(OutputRecord::new(metadata, ranked)))
    }

    /// Process `input` and write the record to `output`.
    pub fn run_to_file(&self, input: &Path, output: &Path) -> Result<RunOutcome> {
        match self.run(input)? {
            Some(record) => self.write(&record, output),
            None => Ok(RunOutcome::NoSections),
        }
    }

    /// Write a record to `output` in the configured JSON layout.
    pub fn write(&self, record: &OutputRecord, output: &Path) -> Result<RunOutcome> {
        let json = to_json(record, self.config.json_format)?;
        fs::write(output, json)?;
        log::info!("Output saved to {}", output.display());

        Ok(RunOutcome::Written {
            path: output.to_path_buf(),
            sections: record.extracted_sections.len(),
        })
    }
}

/// Run the pipeline with `config` on `input`, writing to `output`.
pub fn process_folder(input: &Path, output: &Path, config: PipelineConfig) -> Result<RunOutcome> {
    Pipeline::from_config(config)?.run_to_file(input, output)
}
