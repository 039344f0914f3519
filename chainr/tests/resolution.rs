//! Resolution: matching, priority ordering, tie-breaking and fallback.

use chainr::{
    BoxError, Handler, HandlerFn, ResolveError, Resolver, SharedHandler, Structured, share,
    testing::{CallLog, RecordingHandler},
};
use serde::Serialize;
use serde_json::json;

mod common;
use common::{PrefixHandler, Request};

type Shared = SharedHandler<str, (), String>;

fn recording(name: &str, token: &str, priority: i32, log: &CallLog) -> Shared {
    share(
        RecordingHandler::new(name, log)
            .supporting([token])
            .at_priority(priority),
    )
}

#[test]
fn test_empty_resolver_is_unassigned() {
    let mut resolver = Resolver::<str, (), String>::new();

    assert_eq!(
        resolver.resolve("anything").unwrap_err(),
        ResolveError::UnassignedTarget
    );
    assert_eq!(
        resolver.resolve_all("anything").unwrap_err(),
        ResolveError::UnassignedTarget
    );

    // A fallback does not exempt the check.
    resolver.set_fallback(|_: &()| async { Ok::<_, BoxError>("fallback".to_string()) });
    assert_eq!(
        resolver.resolve("anything").unwrap_err(),
        ResolveError::UnassignedTarget
    );
    assert_eq!(
        resolver.resolve_all("anything").unwrap_err(),
        ResolveError::UnassignedTarget
    );
}

#[test]
fn test_resolve_by_token() {
    let log = CallLog::new();
    let h1 = recording("H1", "a", 0, &log);
    let h2 = recording("H2", "b", 0, &log);
    let resolver = Resolver::with_handlers([h1.clone(), h2.clone()]);

    assert!(resolver.resolve("a").unwrap().is(&h1));
    assert!(resolver.resolve("b").unwrap().is(&h2));

    let err = resolver.resolve("c").unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedType { .. }));
    assert!(err.to_string().contains("c"));
}

#[test]
fn test_priority_ordering() {
    let log = CallLog::new();
    let low = recording("low", "x", 10, &log);
    let high = recording("high", "x", 100, &log);
    let resolver = Resolver::with_handlers([low.clone(), high.clone()]);

    assert!(resolver.resolve("x").unwrap().is(&high));

    let all = resolver.resolve_all("x").unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].is(&high));
    assert!(all[1].is(&low));
}

#[test]
fn test_stable_tie_break() {
    let log = CallLog::new();
    let a = recording("A", "t", 0, &log);
    let b = recording("B", "t", 0, &log);
    let c = recording("C", "t", 0, &log);
    let resolver = Resolver::with_handlers([a.clone(), b.clone(), c.clone()]);

    let all = resolver.resolve_all("t").unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[0].is(&a));
    assert!(all[1].is(&b));
    assert!(all[2].is(&c));
}

#[test]
fn test_mixed_priorities_keep_insertion_order_within_a_level() {
    let log = CallLog::new();
    let a = recording("A", "t", 1, &log);
    let b = recording("B", "t", 5, &log);
    let c = recording("C", "t", 1, &log);
    let d = recording("D", "t", 5, &log);
    let resolver = Resolver::with_handlers([a.clone(), b.clone(), c.clone(), d.clone()]);

    let all = resolver.resolve_all("t").unwrap();
    assert!(all[0].is(&b));
    assert!(all[1].is(&d));
    assert!(all[2].is(&a));
    assert!(all[3].is(&c));
}

#[tokio::test]
async fn test_fallback_substitution() {
    let log = CallLog::new();
    let mut resolver = Resolver::with_handlers([recording("A", "a", 0, &log)]);
    resolver.set_fallback(|_: &()| async { Ok::<_, BoxError>("fallback".to_string()) });

    let resolved = resolver.resolve("unknown").unwrap();
    assert!(resolved.is_fallback());
    assert_eq!(resolved.handle(&()).await.unwrap(), "fallback");

    let all = resolver.resolve_all("unknown").unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_fallback());

    // The registered handler was never touched.
    assert!(log.is_empty());
}

#[test]
fn test_resolve_all_without_fallback_is_empty_not_an_error() {
    let log = CallLog::new();
    let resolver = Resolver::with_handlers([recording("A", "a", 0, &log)]);

    assert!(resolver.resolve_all("unknown").unwrap().is_empty());
    assert!(resolver.resolve("unknown").is_err());
}

#[derive(Serialize)]
struct Kind {
    mime: &'static str,
    version: u32,
}

#[test]
fn test_structured_token_rendering() {
    let never = HandlerFn::new(
        |_: &Structured<Kind>| false,
        |_: &()| async { Ok::<_, BoxError>(()) },
    );
    let mut resolver = Resolver::<Structured<Kind>, (), ()>::new();
    resolver.add(never);

    let err = resolver
        .resolve(&Structured(Kind {
            mime: "image/png",
            version: 3,
        }))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"unsupported type: {"mime":"image/png","version":3}"#
    );
}

#[test]
fn test_primitive_token_rendering() {
    let never = HandlerFn::new(|_: &u64| false, |_: &()| async { Ok::<_, BoxError>(()) });
    let mut numbers = Resolver::<u64, (), ()>::new();
    numbers.add(never);
    assert_eq!(
        numbers.resolve(&404).unwrap_err().to_string(),
        "unsupported type: 404"
    );

    let never = HandlerFn::new(
        |_: &serde_json::Value| false,
        |_: &()| async { Ok::<_, BoxError>(()) },
    );
    let mut values = Resolver::<serde_json::Value, (), ()>::new();
    values.add(never);
    assert_eq!(
        values.resolve(&json!("text/csv")).unwrap_err().to_string(),
        "unsupported type: text/csv"
    );
    assert_eq!(
        values
            .resolve(&json!({ "b": [1, 2], "a": null }))
            .unwrap_err()
            .to_string(),
        r#"unsupported type: {"a":null,"b":[1,2]}"#
    );
}

#[tokio::test]
async fn test_fluent_registration() {
    let mut resolver = Resolver::<str, Request, String>::new();
    resolver
        .add(PrefixHandler {
            prefix: "img/",
            priority: 0,
        })
        .set_fallback(|req: &Request| {
            let body = req.body.clone();
            async move { Ok::<_, BoxError>(format!("fallback:{body}")) }
        })
        .add(PrefixHandler {
            prefix: "txt/",
            priority: 0,
        });

    assert_eq!(resolver.len(), 2);
    assert!(resolver.has_fallback());

    let req = Request::new("hello");
    let img = resolver.resolve("img/png").unwrap();
    assert_eq!(img.handle(&req).await.unwrap(), "img/hello");

    let txt = resolver.resolve("txt/plain").unwrap();
    assert_eq!(txt.handle(&req).await.unwrap(), "txt/hello");

    let other = resolver.resolve("bin/blob").unwrap();
    assert_eq!(other.handle(&req).await.unwrap(), "fallback:hello");
}

#[test]
fn test_replace_all_and_append() {
    let log = CallLog::new();
    let a = recording("A", "t", 0, &log);
    let b = recording("B", "t", 0, &log);
    let c = recording("C", "t", 0, &log);

    let mut resolver: Resolver<str, (), String> = [a.clone()].into_iter().collect();
    resolver.append([b.clone(), c.clone()]);

    let all = resolver.resolve_all("t").unwrap();
    assert!(all[0].is(&a));
    assert!(all[1].is(&b));
    assert!(all[2].is(&c));

    resolver.replace_all([c.clone(), a.clone()]);
    let all = resolver.resolve_all("t").unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].is(&c));
    assert!(all[1].is(&a));
}
