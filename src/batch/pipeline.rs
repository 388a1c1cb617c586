//! C4: the batch pipeline. Drives the C1+C2+C3 stack over a stream of
//! verbatim names across `cfg.jobs_num` worker threads, per `spec.md` §4.4.
//!
//! Grounded on the teacher's worker-pool pattern (a fixed `rayon` pool sized
//! once, a bounded channel carrying results back to the caller) adapted from
//! a batch-query-execution shape to a parse pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::ParserConfig;
use crate::error::BatchError;
use crate::semantic::ParsedName;

/// A cooperative cancellation flag shared between the caller and the
/// pipeline's driver thread. Checked at batch boundaries (streaming mode:
/// at every item), never pre-empting mid-parse.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run the batch pipeline over `input`, an iterator of raw lines (`Err`
/// entries propagate the reader's I/O failure, matching `spec.md` §7's "I/O
/// errors are surfaced verbatim").
///
/// Returns a bounded-capacity [`Receiver`] the caller drains; the driver
/// runs on its own thread so this function returns immediately. The
/// receiver closes (further `recv()` calls return `Err`) once the input is
/// exhausted, the reader errors, or `cancel` is set.
///
/// Ordering follows `cfg.with_no_order` and `cfg.with_stream`:
/// - default: names are emitted in input order (a per-batch reorder buffer
///   is implicit in `par_iter().map().collect()`, which preserves index
///   order within a batch).
/// - `with_no_order`: names are emitted as each worker finishes them.
/// - `with_stream`: `jobs_num`/`batch_size` are treated as 1 and each name
///   is emitted the instant it is parsed, with no batch boundary at all.
pub fn run<I>(input: I, cfg: &ParserConfig, cancel: CancelToken) -> Receiver<Result<ParsedName, BatchError>>
where
    I: IntoIterator<Item = std::io::Result<String>> + Send + 'static,
    I::IntoIter: Send,
{
    let cfg = cfg.clone();
    let (tx, rx) = sync_channel(cfg.batch_size.max(1));

    std::thread::spawn(move || {
        if cfg.with_stream {
            tracing::debug!("batch::run: streaming mode, bypassing the worker pool");
            drive_streaming(input, &cfg, &cancel, &tx);
            return;
        }

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.jobs_num)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("batch::run: failed to build a {}-thread pool ({e}), falling back to streaming", cfg.jobs_num);
                drive_streaming(input, &cfg, &cancel, &tx);
                return;
            }
        };
        tracing::info!(
            "batch::run: pool started, jobs_num={}, batch_size={}, with_no_order={}",
            cfg.jobs_num,
            cfg.batch_size,
            cfg.with_no_order
        );

        let mut iter = input.into_iter();
        loop {
            if cancel.is_cancelled() {
                tracing::debug!("batch::run: cancelled, stopping before next batch");
                return;
            }
            let mut batch = Vec::with_capacity(cfg.batch_size);
            let mut io_err = None;
            for _ in 0..cfg.batch_size {
                match iter.next() {
                    Some(Ok(line)) => batch.push(line),
                    Some(Err(e)) => {
                        io_err = Some(e);
                        break;
                    }
                    None => break,
                }
            }
            if batch.is_empty() && io_err.is_none() {
                return;
            }

            if cfg.with_no_order {
                // Each worker sends as soon as it finishes its own item;
                // no reorder buffer, so completion order leaks through.
                let send_failed = AtomicBool::new(false);
                pool.install(|| {
                    batch.par_iter().for_each(|verbatim| {
                        if send_failed.load(Ordering::Relaxed) {
                            return;
                        }
                        let parsed = crate::parse(verbatim, &cfg);
                        if tx.send(Ok(parsed)).is_err() {
                            send_failed.store(true, Ordering::Relaxed);
                        }
                    });
                });
                if send_failed.load(Ordering::Relaxed) {
                    return;
                }
            } else {
                // `collect()` over an indexed parallel iterator preserves
                // input order regardless of which worker finishes first.
                let results: Vec<ParsedName> = pool.install(|| {
                    batch
                        .par_iter()
                        .map(|verbatim| crate::parse(verbatim, &cfg))
                        .collect()
                });
                for name in results {
                    if tx.send(Ok(name)).is_err() {
                        return;
                    }
                }
            }

            if let Some(e) = io_err {
                let _ = tx.send(Err(BatchError::Io(e)));
                return;
            }
        }
    });

    rx
}

fn drive_streaming<I>(
    input: I,
    cfg: &ParserConfig,
    cancel: &CancelToken,
    tx: &std::sync::mpsc::SyncSender<Result<ParsedName, BatchError>>,
) where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    for line in input {
        if cancel.is_cancelled() {
            return;
        }
        match line {
            Ok(verbatim) => {
                let parsed = crate::parse(&verbatim, cfg);
                if tx.send(Ok(parsed)).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(BatchError::Io(e)));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn lines(items: &[&str]) -> Vec<std::io::Result<String>> {
        items.iter().map(|s| Ok(s.to_string())).collect()
    }

    #[test]
    fn ordered_preserves_input_order() {
        let cfg = ConfigBuilder::new().jobs_num(4).batch_size(8).build().unwrap();
        let input = lines(&[
            "Pardosa moesta Banks, 1892",
            "Homo sapiens",
            "Canis lupus Linnaeus, 1758",
        ]);
        let rx = run(input, &cfg, CancelToken::new());
        let out: Vec<_> = rx.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].verbatim, "Pardosa moesta Banks, 1892");
        assert_eq!(out[1].verbatim, "Homo sapiens");
        assert_eq!(out[2].verbatim, "Canis lupus Linnaeus, 1758");
    }

    #[test]
    fn unordered_yields_every_item() {
        let cfg = ConfigBuilder::new()
            .jobs_num(4)
            .batch_size(8)
            .with_no_order(true)
            .build()
            .unwrap();
        let input = lines(&["Homo sapiens", "Canis lupus", "Pardosa moesta"]);
        let rx = run(input, &cfg, CancelToken::new());
        let mut out: Vec<_> = rx
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .into_iter()
            .map(|n| n.verbatim)
            .collect();
        out.sort();
        assert_eq!(out, vec!["Canis lupus", "Homo sapiens", "Pardosa moesta"]);
    }

    #[test]
    fn streaming_emits_everything_immediately() {
        let cfg = ConfigBuilder::new().with_stream(true).build().unwrap();
        let input = lines(&["Homo sapiens", "Canis lupus"]);
        let rx = run(input, &cfg, CancelToken::new());
        let out: Vec<_> = rx.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn io_error_propagates() {
        let cfg = ConfigBuilder::new().build().unwrap();
        let input: Vec<std::io::Result<String>> = vec![
            Ok("Homo sapiens".to_string()),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom")),
        ];
        let rx = run(input, &cfg, CancelToken::new());
        let results: Vec<_> = rx.into_iter().collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn cancellation_stops_emission() {
        let cfg = ConfigBuilder::new().batch_size(1).jobs_num(1).build().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let input = lines(&["Homo sapiens", "Canis lupus"]);
        let rx = run(input, &cfg, cancel);
        let out: Vec<_> = rx.into_iter().collect();
        assert!(out.len() <= 2);
    }
}
