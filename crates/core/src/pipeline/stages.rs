//! Concurrent filter, extract, map and reduce over a parsed document.
//!
//! The document is parsed first on the calling thread. Its objects are
//! split into contiguous partitions, one per worker. Each partition gets
//! its own chain of threads (feed, filter, extract) joined by bounded
//! channels. Extraction appends character maps to a shared map; the
//! mapping wave starts only after every extractor has finished, so it
//! reads a complete map without locking. Outputs are handed to the
//! reducer as one receiver per partition, in partition order.

use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::api::high_level::ExtractOptions;
use crate::error::{PdfError, Result};
use crate::font::cmap::{CMap, SharedCMap};
use crate::model::document::{Pdf, PdfObject};
use crate::parser::reader::PdfReader;
use crate::parser::source::{ByteSource, RefreshingReader};
use crate::pipeline::extractor::ExtractorResult;
use crate::pipeline::processor::ProcessorResult;

/// Split `count` indices into `workers` contiguous ranges that cover every
/// index exactly once. The first `count % workers` ranges are one longer.
/// `workers` is clamped to `1..=count` (and to 1 when `count` is 0).
pub fn partition(count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, count.max(1));
    let step = count / workers;
    let extra = count % workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut first = 0;
    for i in 0..workers {
        let len = step + usize::from(i < extra);
        ranges.push(first..first + len);
        first += len;
    }
    ranges
}

/// Parses one document and runs the stage functions over its objects.
pub struct ConcurrentPipeline<S> {
    reader: PdfReader<S>,
    options: ExtractOptions,
    cancel: Arc<AtomicBool>,
}

impl ConcurrentPipeline<RefreshingReader<File>> {
    pub fn open(path: impl AsRef<Path>, options: ExtractOptions) -> Result<Self> {
        let reader = PdfReader::open(path, options.buffer_size)?;
        Ok(Self::new(reader, options))
    }
}

impl<R: Read> ConcurrentPipeline<RefreshingReader<R>> {
    pub fn from_reader(name: impl Into<String>, reader: R, options: ExtractOptions) -> Self {
        let reader = PdfReader::from_reader(name, reader, options.buffer_size);
        Self::new(reader, options)
    }
}

impl<S: ByteSource> ConcurrentPipeline<S> {
    pub fn new(reader: PdfReader<S>, options: ExtractOptions) -> Self {
        Self {
            reader,
            options,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked by every stage; setting it makes `run` return
    /// [`PdfError::Cancelled`].
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Parse the document, then run the stages over it.
    pub fn run<F, E, M, R, T>(self, filter: F, extract: E, map: M, reduce: R) -> Result<T>
    where
        F: Fn(&PdfObject) -> bool + Sync,
        E: Fn(&PdfObject, &SharedCMap) -> ExtractorResult + Sync,
        M: Fn(ExtractorResult, &CMap) -> ProcessorResult + Sync,
        R: FnOnce(Vec<Receiver<ProcessorResult>>, &Pdf) -> Result<T>,
    {
        tracing::info!(document = self.reader.name(), "running pipeline");
        let pdf = self.reader.read_all()?;
        run_document(&pdf, &self.options, &self.cancel, filter, extract, map, reduce)
    }
}

/// Run the stages over an already parsed document.
pub fn run_document<F, E, M, R, T>(
    pdf: &Pdf,
    options: &ExtractOptions,
    cancel: &AtomicBool,
    filter: F,
    extract: E,
    map: M,
    reduce: R,
) -> Result<T>
where
    F: Fn(&PdfObject) -> bool + Sync,
    E: Fn(&PdfObject, &SharedCMap) -> ExtractorResult + Sync,
    M: Fn(ExtractorResult, &CMap) -> ProcessorResult + Sync,
    R: FnOnce(Vec<Receiver<ProcessorResult>>, &Pdf) -> Result<T>,
{
    let ranges = partition(pdf.count(), options.worker_count());
    let capacity = options.queue_capacity.max(1);
    tracing::debug!(
        objects = pdf.count(),
        workers = ranges.len(),
        capacity,
        "partitioned document"
    );

    let shared = SharedCMap::new();
    let extracted = extract_partitions(pdf, &ranges, capacity, cancel, &filter, &extract, &shared)?;
    check_cancelled(cancel)?;

    let cmap = shared.into_inner();
    tracing::debug!(entries = cmap.len(), "character map complete");

    let processed = map_partitions(extracted, &ranges, &cmap, cancel, &map)?;
    check_cancelled(cancel)?;

    let result = reduce(processed, pdf)?;
    tracing::info!(document = pdf.name(), "pipeline finished");
    Ok(result)
}

fn check_cancelled(cancel: &AtomicBool) -> Result<()> {
    if cancel.load(Ordering::Relaxed) {
        return Err(PdfError::Cancelled);
    }
    Ok(())
}

/// Feed, filter and extract every partition. Returns once all extractors
/// have drained their input; each receiver then holds that partition's
/// results.
fn extract_partitions<F, E>(
    pdf: &Pdf,
    ranges: &[Range<usize>],
    capacity: usize,
    cancel: &AtomicBool,
    filter: &F,
    extract: &E,
    shared: &SharedCMap,
) -> Result<Vec<Receiver<ExtractorResult>>>
where
    F: Fn(&PdfObject) -> bool + Sync,
    E: Fn(&PdfObject, &SharedCMap) -> ExtractorResult + Sync,
{
    thread::scope(|scope| -> Result<Vec<Receiver<ExtractorResult>>> {
        let mut outputs = Vec::with_capacity(ranges.len());
        for (index, range) in ranges.iter().enumerate() {
            let (feed_tx, feed_rx) = sync_channel(capacity);
            let (filtered_tx, filtered_rx) = sync_channel(capacity);
            // Nobody reads extractor output until the barrier, so it must
            // hold the whole partition.
            let (extracted_tx, extracted_rx) = sync_channel(range.len().max(1));
            outputs.push(extracted_rx);

            let range = range.clone();
            thread::Builder::new()
                .name(format!("pdfsift-feed-{index}"))
                .spawn_scoped(scope, move || feed(pdf, range, feed_tx, cancel))?;
            thread::Builder::new()
                .name(format!("pdfsift-filter-{index}"))
                .spawn_scoped(scope, move || {
                    filter_stage(filter, feed_rx, filtered_tx, cancel)
                })?;
            thread::Builder::new()
                .name(format!("pdfsift-extract-{index}"))
                .spawn_scoped(scope, move || {
                    extract_stage(extract, shared, filtered_rx, extracted_tx, cancel)
                })?;
        }
        Ok(outputs)
    })
}

fn feed<'a>(pdf: &'a Pdf, range: Range<usize>, tx: SyncSender<&'a PdfObject>, cancel: &AtomicBool) {
    for object in &pdf.objects()[range] {
        if cancel.load(Ordering::Relaxed) || tx.send(object).is_err() {
            break;
        }
    }
}

fn filter_stage<'a, F>(
    filter: &F,
    rx: Receiver<&'a PdfObject>,
    tx: SyncSender<&'a PdfObject>,
    cancel: &AtomicBool,
) where
    F: Fn(&PdfObject) -> bool,
{
    for object in rx {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        if filter(object) && tx.send(object).is_err() {
            break;
        }
    }
}

fn extract_stage<E>(
    extract: &E,
    shared: &SharedCMap,
    rx: Receiver<&PdfObject>,
    tx: SyncSender<ExtractorResult>,
    cancel: &AtomicBool,
) where
    E: Fn(&PdfObject, &SharedCMap) -> ExtractorResult,
{
    for object in rx {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let result = extract(object, shared);
        if let Some(error) = &result.error {
            tracing::debug!(object = %result.position, %error, "extraction failed");
        }
        if tx.send(result).is_err() {
            break;
        }
    }
}

/// Run the mapping function over every partition's extractor output on a
/// pool with one thread per partition.
fn map_partitions<M>(
    extracted: Vec<Receiver<ExtractorResult>>,
    ranges: &[Range<usize>],
    cmap: &CMap,
    cancel: &AtomicBool,
    map: &M,
) -> Result<Vec<Receiver<ProcessorResult>>>
where
    M: Fn(ExtractorResult, &CMap) -> ProcessorResult + Sync,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(extracted.len().max(1))
        .thread_name(|i| format!("pdfsift-map-{i}"))
        .build()
        .map_err(|e| PdfError::ThreadPool(e.to_string()))?;
    let sizes: Vec<usize> = ranges.iter().map(|r| r.len().max(1)).collect();

    Ok(pool.install(|| {
        extracted
            .into_par_iter()
            .zip(sizes)
            .map(|(rx, size)| {
                // Sized like the extractor channel: the reducer only starts
                // reading after every partition is mapped.
                let (tx, out) = sync_channel(size);
                for result in rx {
                    if cancel.load(Ordering::Relaxed) || tx.send(map(result, cmap)).is_err() {
                        break;
                    }
                }
                out
            })
            .collect()
    }))
}
