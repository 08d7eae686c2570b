//! Secrets never reach the output unmasked

use std::sync::Arc;

use ctxlog_core::{
    Attr, CaptureBuffer, Context, ContextAttr, ContextKey, Handler, HandlerOptions, JsonHandler,
    Logger, Secret, MASK,
};
use tests::keys::{AKey, BKey};
use tests::wrappers::{a_wrapper, ab_wrapper, ba_wrapper};
use tests::{capture_one, init_test_tracing, no_wrapper, parse_record, Wrapper};

const RAW: &str = "123456";

struct ApiKey;

impl ContextKey for ApiKey {
    type Value = Secret;
    const ATTR: &'static str = "api_key";
}

#[test]
fn test_secret_masked_for_every_chain() {
    init_test_tracing();
    let ctx = Context::background()
        .with_value::<AKey>("a".to_string())
        .with_value::<BKey>(2);

    for wrapper in [no_wrapper as Wrapper, a_wrapper, ab_wrapper, ba_wrapper] {
        let bytes = capture_one(&ctx, wrapper, vec![Attr::new("password", Secret::new(RAW))])
            .expect("in-memory write cannot fail");
        let output = String::from_utf8_lossy(&bytes);

        assert!(!output.contains(RAW), "raw secret leaked: {}", output);
        let record = parse_record(&bytes).expect("valid record");
        assert_eq!(record["password"], MASK);
    }
}

#[test]
fn test_secret_masked_inside_group() {
    init_test_tracing();
    let bytes = capture_one(
        &Context::background(),
        no_wrapper,
        vec![Attr::group(
            "login",
            vec![Attr::new("user", "alice"), Attr::new("password", Secret::new(RAW))],
        )],
    )
    .expect("in-memory write cannot fail");

    let record = parse_record(&bytes).expect("valid record");
    assert_eq!(record["login"]["user"], "alice");
    assert_eq!(record["login"]["password"], MASK);
}

#[test]
fn test_secret_from_context_is_masked() {
    init_test_tracing();
    let buf = CaptureBuffer::new();
    let terminal: Arc<dyn Handler> =
        Arc::new(JsonHandler::new(buf.clone(), HandlerOptions::default()));
    let logger = Logger::new(ContextAttr::<ApiKey, _>::wrap(terminal));
    let ctx = Context::background().with_value::<ApiKey>(Secret::new(RAW));

    logger.info_ctx(&ctx, "msg", []).expect("in-memory write cannot fail");

    assert!(!buf.as_string().contains(RAW));
    let record = parse_record(&buf.contents()).expect("valid record");
    assert_eq!(record["api_key"], MASK);
}

#[test]
fn test_secret_bound_on_logger_is_masked() {
    init_test_tracing();
    let buf = CaptureBuffer::new();
    let terminal = JsonHandler::new(buf.clone(), HandlerOptions::default());
    let logger = Logger::new(a_wrapper(Arc::new(terminal)))
        .with(vec![Attr::new("token", Secret::new(RAW))]);

    logger.info("msg", []).expect("in-memory write cannot fail");

    assert!(!buf.as_string().contains(RAW));
    let record = parse_record(&buf.contents()).expect("valid record");
    assert_eq!(record["token"], MASK);
}
