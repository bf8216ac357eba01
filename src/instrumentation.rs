//! Span timing for the search, compiled in with `--features instrumentation`.
//!
//! Every span opened through `tracing::instrument` is timed between enter and
//! exit; call counts and total time are aggregated per span name and printed
//! when the program ends.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;
use thread_local::ThreadLocal;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Default, Clone, Copy)]
struct SpanTiming {
    calls: u64,
    nanos: u64,
}

static SPAN_TIMINGS: Lazy<ThreadLocal<Mutex<HashMap<&'static str, SpanTiming>>>> =
    Lazy::new(ThreadLocal::new);

struct SpanTimingLayer;

impl<S> Layer<S> for SpanTimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };
        let started = match span.extensions_mut().remove::<Instant>() {
            Some(started) => started,
            None => return,
        };

        let timings = SPAN_TIMINGS.get_or(|| Mutex::new(HashMap::new()));
        if let Ok(mut timings) = timings.lock() {
            let timing = timings.entry(span.name()).or_default();
            timing.calls += 1;
            timing.nanos += started.elapsed().as_nanos() as u64;
        }
    }
}

/// Installs the timing layer. With `RUST_LOG` unset or `off` spans are only
/// timed; otherwise span events are printed as well.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let verbose = std::env::var("RUST_LOG")
        .map_or(false, |filter| !filter.is_empty() && filter != "off");

    let result = if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(false)
            .compact();
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(SpanTimingLayer)
                .with(fmt_layer),
        )
    } else {
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(EnvFilter::new("trace"))
                .with(SpanTimingLayer),
        )
    };

    if let Err(error) = result {
        eprintln!("failed to install tracing subscriber: {}", error);
    }
}

/// Prints call counts and time per span, slowest first.
pub fn print_timing_statistics() {
    let mut totals: HashMap<&'static str, SpanTiming> = HashMap::new();
    for timings in SPAN_TIMINGS.iter() {
        if let Ok(timings) = timings.lock() {
            for (name, timing) in timings.iter() {
                let total = totals.entry(*name).or_default();
                total.calls += timing.calls;
                total.nanos += timing.nanos;
            }
        }
    }

    if totals.is_empty() {
        eprintln!("\nNo timing data collected.");
        return;
    }

    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.nanos));

    eprintln!("\n{:=<72}", "");
    eprintln!(
        "{:<32} {:>10} {:>14} {:>12}",
        "Span", "Calls", "Total (ms)", "Avg (µs)"
    );
    eprintln!("{:-<72}", "");
    for (name, timing) in &rows {
        eprintln!(
            "{:<32} {:>10} {:>14.2} {:>12.2}",
            name,
            timing.calls,
            timing.nanos as f64 / 1_000_000.0,
            timing.nanos as f64 / timing.calls.max(1) as f64 / 1_000.0
        );
    }
    eprintln!("{:=<72}", "");
}
