//! Trace Context - request correlation keys
//!
//! Generates short trace IDs and provides context keys (plus the matching
//! decorators) that stamp them onto every record logged under a request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::Utc;

use crate::context::{Context, ContextKey};
use crate::enrich::ContextAttr;

/// Width of a trace ID in bits (six hex digits)
const TRACE_ID_BITS: u32 = 24;

/// Odd multiplier, so successive sequence numbers visit every 24-bit ID
/// before any repeats
const TRACE_ID_STRIDE: u64 = 0x9E37_79B1;

static TRACE_SEQUENCE: AtomicU64 = AtomicU64::new(0);
static TRACE_SEED: OnceLock<u64> = OnceLock::new();

/// Next short correlation ID, six lowercase hex digits.
///
/// The sequence is seeded from the clock on first use so separate processes
/// start at different points, and never repeats within 2^24 calls.
pub fn generate_trace_id() -> String {
    let seed = *TRACE_SEED.get_or_init(|| Utc::now().timestamp_micros() as u64);
    let seq = TRACE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let id = seed.wrapping_add(seq.wrapping_mul(TRACE_ID_STRIDE)) & ((1 << TRACE_ID_BITS) - 1);
    format!("{:06x}", id)
}

/// Context key for the request trace ID
pub struct TraceIdKey;

impl ContextKey for TraceIdKey {
    type Value = String;
    const ATTR: &'static str = "trace_id";
}

/// Context key for the authenticated client ID
pub struct ClientIdKey;

impl ContextKey for ClientIdKey {
    type Value = String;
    const ATTR: &'static str = "client_id";
}

/// Decorator adding `trace_id` from the context
pub type TraceIdHandler<H> = ContextAttr<TraceIdKey, H>;

/// Decorator adding `client_id` from the context
pub type ClientIdHandler<H> = ContextAttr<ClientIdKey, H>;

/// Derive a context carrying `trace_id`
pub fn with_trace_id(ctx: &Context, trace_id: impl Into<String>) -> Context {
    ctx.with_value::<TraceIdKey>(trace_id.into())
}

/// Derive a context carrying a freshly generated trace ID
pub fn with_new_trace_id(ctx: &Context) -> Context {
    with_trace_id(ctx, generate_trace_id())
}

/// Derive a context carrying `client_id`
pub fn with_client_id(ctx: &Context, client_id: impl Into<String>) -> Context {
    ctx.with_value::<ClientIdKey>(client_id.into())
}

pub fn trace_id(ctx: &Context) -> Option<&str> {
    ctx.value::<TraceIdKey>().map(String::as_str)
}

pub fn client_id(ctx: &Context) -> Option<&str> {
    ctx.value::<ClientIdKey>().map(String::as_str)
}
