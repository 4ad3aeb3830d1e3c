//! Compiling many pages in parallel.

use crate::page::{PageOutput, compile_page};
use crate::probe::FileProbe;
use crate::transform::FrontMatterLayout;
use mdxlayout_core::SourceFile;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Whether to continue processing after an error. Defaults to true.
    pub continue_on_error: Option<bool>,
}

/// Result for a single page in a batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Original source path of the page.
    pub id: String,
    /// Compiled page (present on success).
    pub output: Option<PageOutput>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Total number of pages submitted.
    pub total: u32,
    /// Number of successfully compiled pages.
    pub succeeded: u32,
    /// Number of failed compilations.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Results in input order plus statistics.
#[derive(Debug)]
pub struct BatchProcessingResult {
    /// Individual results, one per processed input.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Compiles every page with the same transform.
///
/// Pages are independent, so they are compiled in parallel. With
/// `continue_on_error: Some(false)` pages are compiled one by one and
/// processing stops after the first failure.
pub fn compile_batch<P: FileProbe + Sync>(
    inputs: Vec<SourceFile>,
    transform: &FrontMatterLayout<P>,
    options: BatchOptions,
) -> BatchProcessingResult {
    let start = Instant::now();
    let continue_on_error = options.continue_on_error.unwrap_or(true);

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("falling back to the global thread pool: {}", err))
            .ok()
    });

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |file: SourceFile| -> BatchResult {
        let id = file
            .path()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        match compile_page(&file, transform) {
            Ok(output) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id,
                    output: Some(output),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                if err.is_document_error() {
                    log::debug!("failed to compile {}: {}", id, err);
                } else {
                    log::warn!("failed to compile {}: {}", id, err);
                }
                BatchResult {
                    id,
                    output: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        match &pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.error.is_some();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutOptions;
    use crate::probe::LayoutPattern;
    use mdxlayout_core::PipelineError;

    fn transform() -> FrontMatterLayout<impl FileProbe + Sync> {
        FrontMatterLayout::with_probe(
            LayoutOptions::default(),
            |_: &LayoutPattern| -> Result<bool, PipelineError> { Ok(true) },
        )
    }

    fn page(name: &str, source: &str) -> SourceFile {
        SourceFile::new("/site", format!("/site/pages/{name}"), source)
    }

    fn inputs() -> Vec<SourceFile> {
        vec![
            page("a.mdx", "---\ntitle: A\n---\n\n# A\n"),
            page("broken.mdx", "---\ntitle: [oops\n---\n\n# B\n"),
            page("c.mdx", "# C\n"),
        ]
    }

    #[test]
    fn keeps_input_order_and_counts() {
        let batch = compile_batch(inputs(), &transform(), BatchOptions::default());

        let ids: Vec<&str> = batch.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["/site/pages/a.mdx", "/site/pages/broken.mdx", "/site/pages/c.mdx"]);
        assert_eq!(batch.stats.total, 3);
        assert_eq!(batch.stats.succeeded, 2);
        assert_eq!(batch.stats.failed, 1);
        assert!(batch.results[1].error.as_deref().unwrap().contains("Frontmatter"));
        assert_eq!(
            batch.results[2].output.as_ref().unwrap().resource_path,
            "c.mdx"
        );
    }

    #[test]
    fn stops_on_first_error_when_asked() {
        let options = BatchOptions {
            continue_on_error: Some(false),
            ..BatchOptions::default()
        };
        let batch = compile_batch(inputs(), &transform(), options);

        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.stats.succeeded, 1);
        assert_eq!(batch.stats.failed, 1);
    }

    #[test]
    fn bounded_thread_pool() {
        let options = BatchOptions {
            max_threads: Some(2),
            ..BatchOptions::default()
        };
        let batch = compile_batch(inputs(), &transform(), options);
        assert_eq!(batch.results.len(), 3);
        assert_eq!(batch.stats.failed, 1);
    }
}
