//! Tests for session-scoped resolution.

use mediaref_core::{MetadataRecord, MimeClass, SampleSpec, TimeValue};
use mediaref_resolver::{Resolver, ResolverConfig};
use mediaref_source::InMemoryMetadataSource;
use std::sync::Arc;
use std::time::Duration;

fn audio(name: &str) -> MetadataRecord {
    MetadataRecord::default()
        .with_reference(name)
        .with_path(format!("Musik/{}.mp3", name))
}

fn image(name: &str) -> MetadataRecord {
    MetadataRecord::default()
        .with_reference(name)
        .with_path(format!("Bilder/{}.jpg", name))
}

fn resolver_for(source: &Arc<InMemoryMetadataSource>) -> Resolver {
    Resolver::new(source.clone())
}

fn keys(resolver: &Resolver) -> Vec<String> {
    resolver
        .export_assets()
        .iter()
        .map(|asset| asset.reference().canonical_key().to_string())
        .collect()
}

#[tokio::test]
async fn test_idempotent_caching() {
    let source = Arc::new(InMemoryMetadataSource::new().with_record(audio("Yesterday")));
    let resolver = resolver_for(&source);

    let first = resolver.resolve_asset("ref:Yesterday").await.unwrap();
    let second = resolver.resolve_asset("ref:Yesterday#complete").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(resolver.export_assets().len(), 1);
}

#[tokio::test]
async fn test_cycles_terminate() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("A").with_cover("ref:B"))
            .with_record(image("B").with_cover("ref:A#complete"))
            .with_record(image("Self").with_cover("ref:Self")),
    );
    let resolver = resolver_for(&source);

    let roots = resolver.resolve(["ref:A"]).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(keys(&resolver), vec!["ref:A", "ref:B"]);

    resolver.resolve(["ref:Self"]).await.unwrap();
    assert_eq!(keys(&resolver), vec!["ref:A", "ref:B", "ref:Self"]);
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn test_fragment_defaults_to_complete() {
    let source = Arc::new(InMemoryMetadataSource::new().with_record(audio("X")));
    let resolver = resolver_for(&source);

    let bare = resolver.resolve_sample("ref:X").await.unwrap();
    let explicit = resolver.resolve_sample("ref:X#complete").await.unwrap();

    assert!(Arc::ptr_eq(&bare, &explicit));
    assert_eq!(bare.reference(), "complete");
    assert_eq!(bare.start_time_sec(), 0.0);
    assert_eq!(bare.duration_sec(), None);
    assert_eq!(bare.uri(), "ref:X#complete");
    assert_eq!(bare.fade_in_sec(), 0.3);
    assert_eq!(bare.fade_out_sec(), 1.0);
}

#[tokio::test]
async fn test_conflicting_sample_spec_is_isolated() {
    let record = audio("X").with_samples(vec![
        SampleSpec::default()
            .with_reference("bad")
            .with_duration(10.0)
            .with_end_time(20.0),
        SampleSpec::default()
            .with_reference("good")
            .with_start_time("0:10")
            .with_end_time("0:25"),
    ]);
    let source = Arc::new(InMemoryMetadataSource::new().with_record(record));
    let resolver = resolver_for(&source);

    let asset = resolver.resolve_asset("ref:X").await.unwrap();
    assert_eq!(asset.samples().len(), 2);
    assert_eq!(asset.samples().rejected().len(), 1);

    let err = resolver.resolve_sample("ref:X#bad").await.unwrap_err();
    assert!(err.is_conflicting_time_spec());

    let good = resolver.resolve_sample("ref:X#good").await.unwrap();
    assert_eq!(good.start_time_sec(), 10.0);
    assert_eq!(good.duration_sec(), Some(15.0));
    assert_eq!(good.end_time_sec(), Some(25.0));
}

#[tokio::test]
async fn test_shortcut_sequencing() {
    let mut source = InMemoryMetadataSource::new();
    for n in 1..=11 {
        source = source.with_record(audio(&format!("Song{}", n)));
    }
    let source = Arc::new(source);
    let resolver = resolver_for(&source);

    let ids: Vec<String> = (1..=11).map(|n| format!("ref:Song{}", n)).collect();
    let assets = resolver.resolve(&ids).await.unwrap();

    let shortcuts: Vec<Option<&str>> = assets.iter().map(|asset| asset.shortcut()).collect();
    assert_eq!(
        shortcuts,
        vec![
            Some("a 1"),
            Some("a 2"),
            Some("a 3"),
            Some("a 4"),
            Some("a 5"),
            Some("a 6"),
            Some("a 7"),
            Some("a 8"),
            Some("a 9"),
            Some("a 0"),
            None,
        ]
    );

    // Re-resolving neither reassigns nor advances the counters.
    let again = resolver.resolve_asset("ref:Song1").await.unwrap();
    assert_eq!(again.shortcut(), Some("a 1"));
    let sample = resolver.resolve_sample("ref:Song10").await.unwrap();
    assert_eq!(sample.shortcut().as_deref(), Some("a 0"));
}

#[tokio::test]
async fn test_documents_get_no_shortcut() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(
                MetadataRecord::default()
                    .with_reference("Score")
                    .with_path("Noten/Score.pdf"),
            )
            .with_record(image("Photo")),
    );
    let resolver = resolver_for(&source);

    let assets = resolver.resolve(["ref:Score", "ref:Photo"]).await.unwrap();
    assert_eq!(assets[0].mime_class(), MimeClass::Document);
    assert_eq!(assets[0].shortcut(), None);
    assert_eq!(assets[1].shortcut(), Some("i 1"));
}

#[tokio::test]
async fn test_linked_cover_follows_root() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("Recording").with_cover("uuid:COVER-ID"))
            .with_record(
                MetadataRecord::default()
                    .with_uuid("COVER-ID")
                    .with_path("Cover.png"),
            ),
    );
    let resolver = resolver_for(&source);

    let roots = resolver.resolve(["ref:Recording"]).await.unwrap();
    assert_eq!(roots.len(), 1);

    let exported = resolver.export_assets();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].reference().canonical_key(), "ref:Recording");
    assert_eq!(exported[1].reference().canonical_key(), "uuid:COVER-ID");
    assert_eq!(exported[1].shortcut(), Some("i 1"));
}

#[tokio::test]
async fn test_follow_links_can_be_disabled() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("Recording").with_cover("ref:Cover"))
            .with_record(image("Cover")),
    );
    let resolver = Resolver::with_config(
        source.clone(),
        ResolverConfig::default().with_follow_links(false),
    );

    resolver.resolve(["ref:Recording"]).await.unwrap();
    assert_eq!(keys(&resolver), vec!["ref:Recording"]);
    assert_eq!(source.fetch_count_for("ref:Cover"), 0);
}

#[tokio::test]
async fn test_three_specs_make_four_samples() {
    let record = audio("X").with_samples(vec![
        SampleSpec::default().with_reference("intro").with_duration(12.0),
        SampleSpec::default().with_start_time("0:30").with_duration(10.0),
        SampleSpec::default()
            .with_title("Refrain")
            .with_start_time(TimeValue::from("1:00")),
    ]);
    let source = Arc::new(InMemoryMetadataSource::new().with_record(record));
    let resolver = resolver_for(&source);

    let asset = resolver.resolve_asset("ref:X").await.unwrap();
    let samples = asset.samples();
    assert_eq!(samples.len(), 4);

    let refs: Vec<&str> = samples.iter().map(|sample| sample.reference()).collect();
    assert_eq!(refs, vec!["complete", "intro", "sample1", "sample2"]);

    let titles: Vec<&str> = samples.iter().map(|sample| sample.title()).collect();
    assert_eq!(titles, vec!["komplett", "intro", "Ausschnitt 1", "Refrain"]);

    // Playable assets put every sample into the session cache.
    let uris: Vec<String> = resolver
        .export_samples()
        .iter()
        .map(|sample| sample.uri().to_string())
        .collect();
    assert_eq!(
        uris,
        vec!["ref:X#complete", "ref:X#intro", "ref:X#sample1", "ref:X#sample2"]
    );
    assert!(resolver.get_sample("ref:X#sample1").is_some());
}

#[tokio::test]
async fn test_reset_isolation() {
    let source = Arc::new(
        InMemoryMetadataSource::new().with_record(audio("Yesterday").with_title("Yesterday")),
    );
    let resolver = resolver_for(&source);

    let before = resolver.resolve_asset("ref:Yesterday").await.unwrap();
    let sample = resolver.resolve_sample("ref:Yesterday").await.unwrap();
    resolver.reset();

    assert!(resolver.export_assets().is_empty());
    assert!(resolver.export_samples().is_empty());
    assert!(resolver.get_asset("ref:Yesterday").is_none());
    assert!(resolver.get_sample("ref:Yesterday").is_none());

    assert_eq!(before.title_safe(), "Yesterday");
    assert_eq!(before.shortcut(), Some("a 1"));
    assert_eq!(sample.title_safe(), "Yesterday");

    let after = resolver.resolve_asset("ref:Yesterday").await.unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.shortcut(), Some("a 1"));
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_fetch() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("A").with_cover("ref:Cover"))
            .with_record(audio("B").with_cover("ref:Cover"))
            .with_record(image("Cover"))
            .with_latency(Duration::from_millis(20)),
    );
    let resolver = resolver_for(&source);

    let (first, second) = tokio::join!(
        resolver.resolve_asset("ref:A"),
        resolver.resolve_asset("ref:A#intro"),
    );
    assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
    assert_eq!(source.fetch_count_for("ref:A"), 1);

    let (b1, b2) = tokio::join!(resolver.resolve_asset("ref:B"), resolver.resolve_asset("ref:B"));
    assert!(Arc::ptr_eq(&b1.unwrap(), &b2.unwrap()));
    assert_eq!(source.fetch_count_for("ref:B"), 1);
    assert_eq!(source.fetch_count_for("ref:Cover"), 1);
    assert_eq!(keys(&resolver), vec!["ref:A", "ref:Cover", "ref:B"]);
}

#[tokio::test]
async fn test_siblings_sharing_a_cover_fetch_it_once() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("A").with_cover("ref:Cover"))
            .with_record(audio("B").with_cover("ref:Cover"))
            .with_record(image("Cover"))
            .with_latency(Duration::from_millis(20)),
    );
    let resolver = resolver_for(&source);

    let (a, b) = tokio::join!(resolver.resolve_asset("ref:A"), resolver.resolve_asset("ref:B"));
    a.unwrap();
    b.unwrap();

    assert_eq!(source.fetch_count_for("ref:Cover"), 1);
    assert_eq!(resolver.export_assets().len(), 3);
    let cover = resolver.get_asset("ref:Cover").unwrap();
    assert_eq!(cover.shortcut(), Some("i 1"));
}

#[tokio::test]
async fn test_fetch_failures_are_not_cached() {
    let source = Arc::new(InMemoryMetadataSource::new());
    let resolver = resolver_for(&source);

    let err = resolver.resolve_asset("ref:Later").await.unwrap_err();
    assert!(err.is_fetch_failed());
    assert!(resolver.export_assets().is_empty());

    source.insert(audio("Later"));
    let asset = resolver.resolve_asset("ref:Later").await.unwrap();
    assert_eq!(asset.reference().canonical_key(), "ref:Later");
    assert_eq!(source.fetch_count_for("ref:Later"), 2);
}

#[tokio::test]
async fn test_failing_link_keeps_earlier_assets() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("First"))
            .with_record(audio("Broken").with_cover("ref:Missing")),
    );
    let resolver = resolver_for(&source);

    let err = resolver
        .resolve(["ref:First", "ref:Broken"])
        .await
        .unwrap_err();
    assert!(err.is_fetch_failed());
    assert_eq!(keys(&resolver), vec!["ref:First", "ref:Broken"]);
}

#[tokio::test]
async fn test_failed_link_is_retried_by_next_resolve() {
    let source = Arc::new(
        InMemoryMetadataSource::new().with_record(audio("Broken").with_cover("ref:Missing")),
    );
    let resolver = resolver_for(&source);

    assert!(resolver.resolve(["ref:Broken"]).await.is_err());
    assert!(resolver.resolve_asset("ref:Broken").await.unwrap_err().is_fetch_failed());
    assert_eq!(keys(&resolver), vec!["ref:Broken"]);

    source.insert(image("Missing"));
    resolver.resolve(["ref:Broken"]).await.unwrap();
    assert_eq!(keys(&resolver), vec!["ref:Broken", "ref:Missing"]);
    assert_eq!(source.fetch_count_for("ref:Missing"), 3);
    assert_eq!(source.fetch_count_for("ref:Broken"), 1);

    resolver.resolve(["ref:Broken"]).await.unwrap();
    assert_eq!(source.fetch_count_for("ref:Missing"), 3);
}

#[tokio::test]
async fn test_concurrent_callers_both_see_link_failure() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("A").with_cover("ref:NoCover"))
            .with_latency(Duration::from_millis(20)),
    );
    let resolver = resolver_for(&source);

    let (first, second) = tokio::join!(
        resolver.resolve_asset("ref:A"),
        resolver.resolve_asset("ref:A"),
    );
    assert!(first.unwrap_err().is_fetch_failed());
    assert!(second.unwrap_err().is_fetch_failed());
    assert_eq!(source.fetch_count_for("ref:A"), 1);
}

#[tokio::test]
async fn test_unsupported_mime_type_aborts_only_that_asset() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("Good"))
            .with_record(
                MetadataRecord::default()
                    .with_reference("Odd")
                    .with_path("x.xyz"),
            ),
    );
    let resolver = resolver_for(&source);

    let err = resolver.resolve_asset("ref:Odd").await.unwrap_err();
    assert!(err.is_unsupported_mime_type());
    resolver.resolve_asset("ref:Good").await.unwrap();
    assert_eq!(keys(&resolver), vec!["ref:Good"]);
}

#[tokio::test]
async fn test_malformed_input_fails_before_fetching() {
    let source = Arc::new(InMemoryMetadataSource::new().with_record(audio("A")));
    let resolver = resolver_for(&source);

    let err = resolver.resolve(["ref:A", "not a reference"]).await.unwrap_err();
    assert!(err.is_malformed_reference());
    assert_eq!(source.fetch_count(), 0);

    assert!(resolver.resolve_sample("ref:A#").await.unwrap_err().is_malformed_reference());
    assert!(resolver.get_asset("garbage").is_none());
}

#[tokio::test]
async fn test_unknown_fragment_split() {
    let source = Arc::new(InMemoryMetadataSource::new().with_record(audio("X")));
    let resolver = resolver_for(&source);

    let asset = resolver.resolve_asset("ref:X#nope").await.unwrap();
    assert_eq!(asset.reference().canonical_key(), "ref:X");

    let err = resolver.resolve_sample("ref:X#nope").await.unwrap_err();
    assert!(err.is_sample_not_found());
}

#[tokio::test]
async fn test_ref_and_uuid_are_aliases() {
    let source = Arc::new(
        InMemoryMetadataSource::new().with_record(audio("Yesterday").with_uuid("c262fe9b")),
    );
    let resolver = resolver_for(&source);

    let by_ref = resolver.resolve_asset("ref:Yesterday").await.unwrap();
    let by_uuid = resolver.resolve_asset("uuid:c262fe9b").await.unwrap();
    assert!(Arc::ptr_eq(&by_ref, &by_uuid));
    assert_eq!(source.fetch_count(), 1);

    let sample = resolver.get_sample("uuid:c262fe9b#complete").unwrap();
    assert_eq!(sample.uri(), "ref:Yesterday#complete");

    let roots = resolver
        .resolve(["uuid:c262fe9b", "ref:Yesterday"])
        .await
        .unwrap();
    assert_eq!(roots.len(), 1);
}

#[tokio::test]
async fn test_alias_discovered_after_fetch() {
    let source = Arc::new(
        InMemoryMetadataSource::new().with_record(audio("Yesterday").with_uuid("c262fe9b")),
    );
    let resolver = resolver_for(&source);

    let (by_ref, by_uuid) = tokio::join!(
        resolver.resolve_asset("ref:Yesterday"),
        resolver.resolve_asset("uuid:c262fe9b"),
    );
    assert!(Arc::ptr_eq(&by_ref.unwrap(), &by_uuid.unwrap()));
    assert_eq!(resolver.export_assets().len(), 1);
}

#[tokio::test]
async fn test_fetch_finishing_after_reset_is_not_cached() {
    let source = Arc::new(
        InMemoryMetadataSource::new()
            .with_record(audio("Slow"))
            .with_latency(Duration::from_millis(50)),
    );
    let resolver = resolver_for(&source);

    let (resolved, ()) = tokio::join!(resolver.resolve_asset("ref:Slow"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        resolver.reset();
    });

    let asset = resolved.unwrap();
    assert_eq!(asset.reference().canonical_key(), "ref:Slow");
    assert!(resolver.export_assets().is_empty());
    assert!(resolver.get_asset("ref:Slow").is_none());
}

#[tokio::test]
async fn test_images_contribute_no_samples() {
    let source = Arc::new(InMemoryMetadataSource::new().with_record(image("Photo")));
    let resolver = resolver_for(&source);

    resolver.resolve_asset("ref:Photo").await.unwrap();
    assert!(resolver.export_samples().is_empty());

    let complete = resolver.resolve_sample("ref:Photo").await.unwrap();
    assert!(complete.is_complete());
    assert_eq!(resolver.export_samples().len(), 1);
}
