//! Integration tests for the CanvasBuilder API
//!
//! These tests drive the public API end to end: document parsing, port
//! layout, coordinate resolution and SVG output.

use float_cmp::assert_approx_eq;

use rosette::{
    CanvasBuilder, RosetteError,
    config::AppConfig,
    identifier::Id,
    layout::Port,
    model::{PortModel, Side},
};

const WORKFLOW: &str = r##"
[[nodes]]
kind = "input_parameter"
id = "fastq"
label = "Reads"
connection_id = "#fastq"
position = { x = 0.0, y = 0.0 }

[[nodes]]
kind = "step"
id = "align"
label = "Align"
connection_id = "#align"
position = { x = 200.0, y = 0.0 }

[[nodes.in]]
id = "reads"
connection_id = "#align/reads"

[[nodes.in]]
id = "index"
connection_id = "#align/index"

[[nodes.in]]
id = "threads"
connection_id = "#align/threads"
is_visible = false

[[nodes.out]]
id = "bam"
connection_id = "#align/bam"

[[nodes]]
kind = "output_parameter"
id = "aligned"
connection_id = "#aligned"
position = { x = 400.0, y = 0.0 }
"##;

#[test]
fn test_builder_api_exists() {
    let _builder = CanvasBuilder::default();
}

#[test]
fn test_parse_workflow() {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    assert_eq!(canvas.len(), 3);

    let align = canvas.node(Id::new("align")).unwrap();
    assert_eq!(align.label(), "Align");
    assert_eq!(align.ports().len(), 3);
    assert_eq!(align.visible_port_count(Side::Input), 2);

    // "reads" sorts above "index" and takes the lower input slot.
    let reads = align.placement_of(Id::new("reads")).unwrap();
    let index = align.placement_of(Id::new("index")).unwrap();
    assert_approx_eq!(f64, reads.angle().degrees(), 250.0 - 140.0 / 3.0, epsilon = 1e-9);
    assert_approx_eq!(f64, index.angle().degrees(), 250.0 - 280.0 / 3.0, epsilon = 1e-9);
    assert!(align.placement_of(Id::new("threads")).is_none());

    let fastq = canvas.node(Id::new("fastq")).unwrap();
    assert_eq!(fastq.visible_port_count(Side::Output), 1);
    assert_eq!(fastq.visible_port_count(Side::Input), 0);

    let aligned = canvas.node(Id::new("aligned")).unwrap();
    assert_eq!(aligned.visible_port_count(Side::Input), 1);
}

#[test]
fn test_render_workflow() {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");
    let svg = builder.render_svg(&canvas).expect("Failed to render canvas");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains(r#"class="node align step""#));
    assert!(svg.contains(r#"class="node fastq input""#));
    assert!(svg.contains(r#"class="node aligned output""#));
    assert!(svg.contains(r#"class="port input-port reads""#));
    assert!(!svg.contains("threads"), "Hidden ports are not rendered");
}

#[test]
fn test_port_anchors_connect_across_nodes() {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    let source = canvas
        .node(Id::new("fastq"))
        .unwrap()
        .port_position(Id::new("fastq"))
        .unwrap();
    let target = canvas
        .node(Id::new("align"))
        .unwrap()
        .port_position(Id::new("reads"))
        .unwrap();

    let scene = canvas.scene().expect("Failed to build scene");
    let from = scene.port(Id::new("fastq"), Id::new("fastq")).unwrap();
    let to = scene.port(Id::new("align"), Id::new("reads")).unwrap();

    // Resolving through the scene graph agrees with the node-level anchors.
    let offset = scene.graph().relative_offset(from, to).unwrap();
    assert_approx_eq!(f64, offset.e(), target.x() - source.x(), epsilon = 1e-9);
    assert_approx_eq!(f64, offset.f(), target.y() - source.y(), epsilon = 1e-9);

    let resolved = scene.graph().transform_to_element(from, to).unwrap();
    assert!(resolved.multiply(offset).is_identity());
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [layout]
        radius = 60.0
        port_arc = 90.0

        [style]
        title_offset = 10.0
        "#,
    )
    .expect("valid config");

    let builder = CanvasBuilder::new(config);
    let canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    let align = canvas.node(Id::new("align")).unwrap();
    assert_eq!(align.radius(), 60.0);
    let bam = align.placement_of(Id::new("bam")).unwrap();
    assert_eq!(bam.angle().degrees(), 0.0);
    let position = align.port_position(Id::new("bam")).unwrap();
    assert_approx_eq!(f64, position.x(), 260.0, epsilon = 1e-9);

    // Two inputs spread over a 90 degree arc centred on 180.
    let index = align.placement_of(Id::new("index")).unwrap();
    assert_approx_eq!(f64, index.angle().degrees(), 165.0, epsilon = 1e-9);
}

#[test]
fn test_deferred_config_requires_explicit_distribution() {
    let config = AppConfig::from_toml_str("[layout]\nredistribution = \"deferred\"\n")
        .expect("valid config");
    let builder = CanvasBuilder::new(config);
    let mut canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    let align = canvas.node_mut(Id::new("align")).unwrap();
    assert!(align.placement_of(Id::new("bam")).is_none());

    align.distribute_ports();
    assert_eq!(
        align.placement_of(Id::new("bam")).unwrap().angle().degrees(),
        0.0
    );
}

#[test]
fn test_adding_port_moves_siblings() {
    let builder = CanvasBuilder::default();
    let mut canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    let align = canvas.node_mut(Id::new("align")).unwrap();
    assert_eq!(align.placement_of(Id::new("bam")).unwrap().angle().degrees(), 0.0);

    align
        .add_port(Port::new(
            PortModel::new(Id::new("log"), "#align/log"),
            Side::Output,
        ))
        .expect("unique port");

    let bam = align.placement_of(Id::new("bam")).unwrap().angle().degrees();
    let log = align.placement_of(Id::new("log")).unwrap().angle().degrees();
    assert!(log < bam, "greater id takes the first slot");
    assert_approx_eq!(f64, bam, -70.0 + 280.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_duplicate_node_returns_error() {
    let source = r##"
        [[nodes]]
        kind = "input_parameter"
        id = "x"
        connection_id = "#x"

        [[nodes]]
        kind = "output_parameter"
        id = "x"
        connection_id = "#x"
    "##;

    let result = CanvasBuilder::default().parse(source);
    assert!(matches!(result, Err(RosetteError::DuplicateNode(_))));
}

#[test]
fn test_duplicate_port_returns_error() {
    let source = r##"
        [[nodes]]
        kind = "step"
        id = "s"
        connection_id = "#s"

        [[nodes.in]]
        id = "p"
        connection_id = "#s/p"

        [[nodes.out]]
        id = "p"
        connection_id = "#s/p"
    "##;

    let result = CanvasBuilder::default().parse(source);
    assert!(matches!(result, Err(RosetteError::DuplicatePort { .. })));
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let result = CanvasBuilder::default().parse("[[nodes]]\nkind = \"circle\"\n");
    assert!(matches!(result, Err(RosetteError::Parse(_))));
}

#[test]
fn test_empty_document() {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse("").expect("empty document is valid");
    assert!(canvas.is_empty());

    let svg = builder.render_svg(&canvas).expect("Failed to render");
    assert!(svg.contains("<svg"));
}

#[test]
fn test_ghost_port() {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse(WORKFLOW).expect("Failed to parse canvas");

    let ghost = canvas.node(Id::new("align")).unwrap().ghost_port();
    let svg = builder.render_ghost_port(&ghost);

    assert!(svg.contains("ghost-circle"));
    assert_approx_eq!(f64, ghost.radius(), 40.0 / 1.5);
}

#[test]
fn test_builder_reusability() {
    let builder = CanvasBuilder::default();

    let first = builder.parse(WORKFLOW).expect("Failed to parse first");
    let second = builder.parse(WORKFLOW).expect("Failed to parse second");

    let svg1 = builder.render_svg(&first).expect("Failed to render first");
    let svg2 = builder.render_svg(&second).expect("Failed to render second");

    assert_eq!(first.len(), second.len());
    assert!(svg1.contains("<svg"));
    assert!(svg2.contains("<svg"));
}
