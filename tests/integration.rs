//! End-to-end tests over in-memory generated images.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use image_pipeline::{
    ImagePipeline, MetadataError, PipelineError, ProcessOptions, TransformError, resolve_profile,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([70, 140, 210, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn options(formats: &[&str], sizes: &[&str], quality: u8) -> ProcessOptions {
    ProcessOptions {
        formats: formats.iter().map(|s| s.to_string()).collect(),
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        quality,
    }
}

fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).unwrap();
    (img.width(), img.height())
}

#[tokio::test]
async fn property_profile_produces_all_size_variants() {
    init_tracing();
    let pipeline = ImagePipeline::new();
    let source = png_bytes(1000, 700);

    let outcome = pipeline
        .process_image(&source, &resolve_profile("property"))
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.metadata.width, 1000);
    assert_eq!(outcome.metadata.height, 700);
    assert_eq!(outcome.metadata.source_format, "png");

    // Single requested format, so keys are size names alone
    assert_eq!(outcome.variants.len(), 4);
    assert_eq!(decoded_dimensions(outcome.variant("thumbnail").unwrap()), (300, 200));
    assert_eq!(decoded_dimensions(outcome.variant("medium").unwrap()), (800, 600));
    assert_eq!(decoded_dimensions(outcome.variant("large").unwrap()), (1200, 900));
    // Width-only profile never enlarges beyond the source
    assert_eq!(decoded_dimensions(outcome.variant("original").unwrap()), (1000, 700));

    for bytes in outcome.variants.values() {
        assert!(!bytes.is_empty());
        assert_eq!(image::guess_format(bytes).unwrap(), ImageFormat::WebP);
    }
}

#[tokio::test]
async fn width_only_variant_preserves_aspect_ratio() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(3840, 2160);

    let outcome = pipeline
        .process_image(&source, &options(&["webp"], &["original"], 80))
        .await
        .unwrap();

    let (w, h) = decoded_dimensions(outcome.variant("original").unwrap());
    assert_eq!((w, h), (1920, 1080));
    assert!(w <= 3840 && w <= 1920);
}

#[tokio::test]
async fn multi_format_requests_suffix_their_keys() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(640, 480);

    let outcome = pipeline
        .process_image(&source, &options(&["webp", "jpeg"], &["thumbnail"], 80))
        .await
        .unwrap();

    let mut keys: Vec<_> = outcome.variants.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["thumbnail_jpeg", "thumbnail_webp"]);

    assert_eq!(
        image::guess_format(outcome.variant("thumbnail_jpeg").unwrap()).unwrap(),
        ImageFormat::Jpeg
    );
    assert_eq!(
        image::guess_format(outcome.variant("thumbnail_webp").unwrap()).unwrap(),
        ImageFormat::WebP
    );
}

#[tokio::test]
async fn document_profile_encodes_jpeg() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(900, 900);

    let outcome = pipeline
        .process_image(&source, &resolve_profile("document"))
        .await
        .unwrap();

    assert_eq!(outcome.variants.len(), 2);
    let bytes = outcome.variant("medium").unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn one_bad_format_spares_its_siblings() {
    init_tracing();
    let pipeline = ImagePipeline::new();
    let source = png_bytes(640, 480);

    let outcome = pipeline
        .process_image(&source, &options(&["webp", "gif"], &["thumbnail"], 80))
        .await
        .unwrap();

    // The supported format still rendered
    assert_eq!(outcome.variants.len(), 1);
    assert!(outcome.variant("thumbnail_webp").is_some());

    // Exactly one failure, naming the missing variant and the reason
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].key, "thumbnail_gif");
    assert!(matches!(
        outcome.failures[0].error,
        TransformError::UnsupportedFormat(_)
    ));
}

#[tokio::test]
async fn undecodable_bytes_fail_the_image() {
    let pipeline = ImagePipeline::new();

    let err = pipeline
        .process_image(b"these are not pixels", &resolve_profile("property"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Metadata(MetadataError::Decode(_))
    ));
}

#[tokio::test]
async fn oversized_image_is_rejected_before_decoding() {
    let pipeline = ImagePipeline::new();
    // 10001x1: crosses the dimension cap with a tiny fixture
    let source = png_bytes(10_001, 1);

    let err = pipeline
        .process_image(&source, &resolve_profile("property"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Metadata(MetadataError::TooLarge { width: 10_001, .. })
    ));
}

#[tokio::test]
async fn malformed_options_are_a_call_level_error() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(100, 100);

    let err = pipeline
        .process_image(&source, &options(&["webp"], &["thumbnail"], 0))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidOptions(_)));

    let err = pipeline
        .process_image(&source, &options(&["webp"], &["thumbnail"], 101))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidOptions(_)));

    let err = pipeline
        .process_batch(vec![source.clone()], &options(&[], &["thumbnail"], 80))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidOptions(_)));
}

#[tokio::test]
async fn batch_preserves_input_order_and_isolates_failures() {
    init_tracing();
    let pipeline = ImagePipeline::new();
    // Mixed sizes so completion order differs from input order
    let buffers = vec![
        png_bytes(1600, 1200),
        b"broken image".to_vec(),
        png_bytes(64, 48),
    ];

    let items = pipeline
        .process_batch(buffers, &options(&["webp"], &["thumbnail", "medium"], 80))
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    let indices: Vec<_> = items.iter().map(|item| item.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert!(items[0].success());
    assert!(!items[1].success());
    assert!(items[2].success());

    let first = items[0].outcome.as_ref().unwrap();
    assert_eq!(first.variants.len(), 2);
    let third = items[2].outcome.as_ref().unwrap();
    assert_eq!(third.variants.len(), 2);
}

#[tokio::test]
async fn repeated_runs_agree_on_dimensions_and_formats() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(777, 333);
    let opts = options(&["webp", "png"], &["thumbnail", "original"], 80);

    let first = pipeline.process_image(&source, &opts).await.unwrap();
    let second = pipeline.process_image(&source, &opts).await.unwrap();

    let mut first_keys: Vec<_> = first.variants.keys().cloned().collect();
    let mut second_keys: Vec<_> = second.variants.keys().cloned().collect();
    first_keys.sort();
    second_keys.sort();
    assert_eq!(first_keys, second_keys);

    for key in &first_keys {
        let a = first.variant(key).unwrap();
        let b = second.variant(key).unwrap();
        assert_eq!(decoded_dimensions(a), decoded_dimensions(b));
        assert_eq!(
            image::guess_format(a).unwrap(),
            image::guess_format(b).unwrap()
        );
    }
}

#[tokio::test]
async fn unknown_size_names_contribute_no_jobs() {
    let pipeline = ImagePipeline::new();
    let source = png_bytes(640, 480);

    let outcome = pipeline
        .process_image(&source, &options(&["webp"], &["poster", "thumbnail"], 80))
        .await
        .unwrap();

    assert_eq!(outcome.variants.len(), 1);
    assert!(outcome.variant("thumbnail").is_some());
    assert!(outcome.failures.is_empty());
}
