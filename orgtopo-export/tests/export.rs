//! End-to-end export of a sampled corpus.

use std::fs;

use orgtopo_core::{GraphFamily, SamplerBuilder};
use orgtopo_export::{DirStatus, DotRenderer, OutputLayout, bootstrap_dir, write_dataset};
use orgtopo_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn layout(root: &TempDir, stem: &str) -> OutputLayout {
    OutputLayout::new(
        root.path().join("data"),
        root.path().join("plots").join(stem),
        stem,
    )
}

#[rstest]
fn hierarchy_corpus_is_written_in_acceptance_order(workspace: TempDir) {
    let layout = layout(&workspace, "hierarchy");
    bootstrap_dir(layout.data_dir()).expect("data dir");
    bootstrap_dir(layout.plot_dir()).expect("plot dir");

    let sampler = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(2)
        .with_min_class_size(4)
        .with_max_nodes(4)
        .with_seed(31)
        .build()
        .expect("configuration is valid");
    let mut renderer = DotRenderer::new(layout.clone());
    let outcome = sampler
        .run_with_observer(&mut renderer)
        .expect("both four-node trees exist");
    assert_eq!(renderer.written(), 2);

    write_dataset(&layout.dataset_path(), &outcome.records().expect("records"))
        .expect("dataset written");
    let text = fs::read_to_string(layout.dataset_path()).expect("dataset readable");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "num,num_classes,num_clients,coupling_factor");
    assert_eq!(lines.len(), 3);
    for (index, line) in lines[1..].iter().enumerate() {
        let expected = format!("{},4,3,0.25", index + 1);
        assert_eq!(*line, expected);
    }

    for ordinal in outcome.corpus().samples().enumerate().map(|(i, _)| i + 1) {
        let path = layout.plot_dir().join(format!("hierarchy-{ordinal}.dot"));
        let dot = fs::read_to_string(&path).expect("graph rendered");
        assert!(dot.starts_with(&format!("digraph \"hierarchy-{ordinal}\" {{")));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}

#[rstest]
fn existing_directories_are_logged_and_tolerated(workspace: TempDir) {
    let dir = workspace.path().join("data");
    fs::create_dir(&dir).expect("pre-create");
    let (status, layer) = RecordingLayer::capture(|| bootstrap_dir(&dir));
    assert_eq!(status.expect("tolerated"), DirStatus::Existing);
    assert!(layer.has_event(Level::WARN, "directory already exists"));
}

#[rstest]
fn dataset_span_reports_row_count(workspace: TempDir) {
    let layout = layout(&workspace, "team");
    bootstrap_dir(layout.data_dir()).expect("data dir");
    let outcome = SamplerBuilder::new(GraphFamily::DirectedRandom)
        .with_target_size(3)
        .with_seed(4)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("three digraphs exist");
    let records = outcome.records().expect("records");
    let (written, layer) =
        RecordingLayer::capture(|| write_dataset(&layout.dataset_path(), &records));
    written.expect("dataset written");
    let span = layer
        .span("export.write_dataset")
        .expect("export.write_dataset span must exist");
    assert_eq!(span.field("rows"), Some("3"));
}

#[rstest]
fn missing_plot_directory_fails_the_run(workspace: TempDir) {
    let layout = layout(&workspace, "market");
    let err = SamplerBuilder::new(GraphFamily::BipartiteRandom)
        .with_target_size(1)
        .with_seed(2)
        .build()
        .expect("configuration is valid")
        .run_with_observer(DotRenderer::new(layout))
        .expect_err("plot directory was never created");
    assert_eq!(err.code().as_str(), "SAMPLER_OBSERVER_FAILURE");
}
