use quadtok::encoder::encode_tree;
use quadtok::{
    CharShift, Point, QuadKey, QuadTree, QuadTreeBuilder, QuadTreeError, SpatialEncoder,
    TemporalEncoder, TreeConfig,
};

#[test]
fn test_two_points_land_in_opposite_corners() {
    let mut tree = QuadTree::new(TreeConfig::new(1, 1.0)).unwrap();
    tree.add_point(Point::new(0.1, 0.1, "a")).unwrap();
    tree.add_point(Point::new(0.9, 0.9, "b")).unwrap();
    tree.subdivide().unwrap();

    let filled: Vec<_> = tree.leaves().into_iter().filter(|l| !l.is_empty()).collect();
    assert_eq!(filled.len(), 2);
    assert!(filled.iter().all(|leaf| leaf.len() == 1));

    let a: Vec<_> = tree.leaf_points("0").map(|p| *p.data()).collect();
    let b: Vec<_> = tree.leaf_points("3").map(|p| *p.data()).collect();
    assert_eq!(a, vec!["a"]);
    assert_eq!(b, vec!["b"]);
}

#[test]
fn test_quadkey_two_levels() {
    let key = QuadKey::new(2, 2, 1).unwrap();
    let code = key.encode();
    assert_eq!(code.len(), 2);
    assert_eq!(QuadKey::decode(&code).unwrap(), key);
}

#[test]
fn test_few_points_never_split() {
    for lod_threshold in [0, 3, 30] {
        let mut tree = QuadTree::with_params(5, 1.0, lod_threshold).unwrap();
        tree.add_point(Point::new(0.1, 0.2, 0)).unwrap();
        tree.add_point(Point::new(0.5, 0.5, 1)).unwrap();
        tree.add_point(Point::new(0.9, 0.3, 2)).unwrap();
        tree.subdivide().unwrap();

        assert!(tree.root().is_leaf());
        assert_eq!(tree.stats().nodes, 1);
    }
}

#[test]
fn test_decode_rejects_nine() {
    assert!(matches!(
        QuadKey::decode("9"),
        Err(QuadTreeError::InvalidEncoding { position: 0, found: '9', .. })
    ));
}

#[test]
fn test_leaf_keys_match_their_rectangles() {
    let tree = QuadTreeBuilder::new()
        .split_threshold(2)
        .rect_size(64.0)
        .lod_threshold(5)
        .points((0..200).map(|i| {
            let x = (i * 13 % 64) as f64 + 0.25;
            let y = (i * 29 % 64) as f64 + 0.75;
            Point::new(x, y, i)
        }))
        .build_subdivided()
        .unwrap();

    for leaf in tree.leaves() {
        let rect = leaf.rect();
        let side = 64.0 / f64::from(1u32 << leaf.lod());
        assert_eq!(rect.w(), side);
        assert_eq!(leaf.key().x(), (rect.x() / side) as u64);
        assert_eq!(leaf.key().y(), (rect.y() / side) as u64);
        assert_eq!(QuadKey::decode(&leaf.code()).unwrap(), leaf.key());
        for point in tree.node_points(leaf) {
            assert!(rect.contains(point));
        }
    }
}

#[test]
fn test_index_only_lists_non_empty_leaves() {
    let mut tree = QuadTree::with_params(0, 1.0, 3).unwrap();
    tree.add_point(Point::new(0.05, 0.05, ())).unwrap();
    tree.subdivide().unwrap();

    let stats = tree.stats();
    assert!(stats.leaves > tree.index().len());
    assert_eq!(tree.index().len(), stats.non_empty_leaves);
    assert_eq!(tree.index().len(), 1);
    assert_eq!(tree.index().keys().next().map(String::len), Some(4));
}

#[test]
fn test_spatial_and_temporal_vocabularies_are_disjoint() {
    let locations = [(2.0, 3.0), (40.0, 7.0), (12.0, 33.0), (38.0, 39.0), (20.0, 20.0)];
    let windows = [(0.0, 60.0), (30.0, 90.0), (300.0, 420.0), (600.0, 700.0), (0.0, 720.0)];

    let spatial = SpatialEncoder::evenly_spaced(TreeConfig::new(1, 1.0).with_lod_threshold(8), 3)
        .unwrap()
        .encode(&locations)
        .unwrap();
    let temporal = TemporalEncoder::new(TreeConfig::new(1, 1.0).with_lod_threshold(8))
        .unwrap()
        .with_shift(CharShift::offset(('a' as u32) - ('0' as u32)).unwrap())
        .encode(&windows)
        .unwrap();

    let spatial_vocab = spatial.vocabulary();
    let temporal_vocab = temporal.vocabulary();
    assert!(spatial_vocab.is_disjoint(&temporal_vocab));

    for entity in 0..locations.len() {
        assert_eq!(spatial.tokens(entity).len(), 3);
        assert_eq!(temporal.tokens(entity).len(), 1);
    }
}

#[test]
fn test_encode_tree_requires_matching_region() {
    let tree = QuadTreeBuilder::new()
        .rect_size(100.0)
        .point(Point::new(10.0, 10.0, 0usize))
        .build_subdivided()
        .unwrap();

    assert!(encode_tree(&tree, 100.0, &CharShift::Identity).is_ok());
    assert!(matches!(
        encode_tree(&tree, 1.0, &CharShift::Identity),
        Err(QuadTreeError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_config_json_drives_tree() {
    let config = TreeConfig::from_json(
        r#"{ "split_threshold": 1, "rect_size": 10.0, "lod_threshold": 2 }"#,
    )
    .unwrap();
    let mut tree = QuadTree::new(config).unwrap();
    for _ in 0..3 {
        tree.add_point(Point::new(1.0, 1.0, ())).unwrap();
    }
    tree.subdivide().unwrap();

    // depth limit stops the cluster one level below the threshold
    assert_eq!(tree.stats().max_lod, 3);
    assert_eq!(tree.index().len(), 1);
    assert_eq!(tree.index().values().next().map(Vec::len), Some(3));
}
