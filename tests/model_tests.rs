// Host-side tests for glTF flattening. The documents are self-contained so
// nothing touches the filesystem or the GPU.

use scene_core::SetupError;
use valhalla::render::mesh::load_model_from_slice;

// One triangle at (0,0,0), (1,0,0), (0,1,0); no normals, indices or material.
const TRIANGLE_BUFFER: &str =
    "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA";

fn triangle_gltf(nodes: &str) -> String {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": {nodes},
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }} }}] }}],
  "buffers": [{{ "byteLength": 36, "uri": "{TRIANGLE_BUFFER}" }}],
  "bufferViews": [{{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }}],
  "accessors": [{{
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
  }}]
}}"#
    )
}

#[test]
fn flattens_a_translated_triangle() {
    let json = triangle_gltf(r#"[{ "mesh": 0, "translation": [1.0, 2.0, 3.0] }]"#);
    let model = load_model_from_slice(json.as_bytes()).expect("valid glTF");

    assert_eq!(model.submeshes.len(), 1);
    assert_eq!(model.indices, vec![0, 1, 2]);
    let sub = model.submeshes[0];
    assert_eq!((sub.first_index, sub.index_count, sub.base_vertex), (0, 3, 0));

    let positions: Vec<[f32; 3]> = model.vertices.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![[1.0, 2.0, 3.0], [2.0, 2.0, 3.0], [1.0, 3.0, 3.0]]);
    for v in &model.vertices {
        // generated normal faces +Z; default material is white
        assert!((v.normal[2] - 1.0).abs() < 1e-6);
        assert_eq!(v.color, [1.0, 1.0, 1.0]);
    }
}

#[test]
fn child_nodes_inherit_parent_transform() {
    let json = triangle_gltf(
        r#"[
    { "translation": [10.0, 0.0, 0.0], "children": [1] },
    { "mesh": 0, "translation": [0.0, 5.0, 0.0] }
  ]"#,
    );
    let model = load_model_from_slice(json.as_bytes()).expect("valid glTF");
    assert_eq!(model.vertices[0].position, [10.0, 5.0, 0.0]);
}

#[test]
fn mirrored_node_keeps_front_faces_counter_clockwise() {
    let json = triangle_gltf(r#"[{ "mesh": 0, "scale": [-1.0, 1.0, 1.0] }]"#);
    let model = load_model_from_slice(json.as_bytes()).expect("valid glTF");

    assert_eq!(model.indices, vec![0, 2, 1]);
    let p: Vec<[f32; 3]> = model.vertices.iter().map(|v| v.position).collect();
    assert_eq!(p[1], [-1.0, 0.0, 0.0]);
    // Counter-clockwise in index order, seen from +Z, matches the +Z normal.
    let [a, b, c] = [0, 2, 1].map(|i| model.vertices[i].position);
    let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
    assert!(cross_z > 0.0);
    for v in &model.vertices {
        assert!((v.normal[2] - 1.0).abs() < 1e-6);
    }
}

#[test]
fn rejects_garbage_and_meshless_documents() {
    assert!(matches!(
        load_model_from_slice(b"not a model"),
        Err(SetupError::Model { .. })
    ));

    let empty = r#"{ "asset": { "version": "2.0" }, "scenes": [{ "nodes": [] }] }"#;
    match load_model_from_slice(empty.as_bytes()) {
        Err(SetupError::Model { reason, .. }) => assert!(reason.contains("no triangle meshes")),
        other => panic!("expected a model error, got {other:?}"),
    }
}
