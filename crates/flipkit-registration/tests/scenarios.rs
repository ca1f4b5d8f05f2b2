use flipkit_core::{point, vector, BoundingBox, Transform, DEFAULT_TOLERANCE, MATRIX_TOLERANCE};
use flipkit_registration::{
    apply_transform, build_flip_transform, match_pins, resolve_candidate_axis, AxisSource,
    BodyCorrespondence, BodyId, ErrorKind, FlipDirection, FlipMode, Pin, PlacedBody,
    RegistrationError,
};

fn stock_axis() -> flipkit_registration::Axis {
    let bounds = BoundingBox::from_extents(0.0, 100.0, 0.0, 50.0, 0.0, 20.0);
    resolve_candidate_axis(&AxisSource::BoundingBox {
        bounds,
        direction: FlipDirection::AlongX,
    })
    .unwrap()
}

fn pin(x: f64, y: f64) -> Pin {
    Pin::new(point(x, y, 0.0), 3.0)
}

#[test]
fn test_axis_aligned_box_flip() {
    let axis = stock_axis();
    assert_eq!(axis.origin, point(0.0, 25.0, 10.0));
    assert_eq!(axis.normal, vector(1.0, 0.0, 0.0));

    let found = match_pins(&[pin(-5.0, 10.0), pin(5.0, 10.0)], &axis, DEFAULT_TOLERANCE).unwrap();
    assert_eq!(found.pairing.pairs.len(), 1);
    assert_eq!(found.pairing.pairs[0].first, pin(-5.0, 10.0));
    assert_eq!(found.pairing.pairs[0].second, pin(5.0, 10.0));
    assert!((found.midline - 10.0).abs() < DEFAULT_TOLERANCE);
}

#[test]
fn test_unmatched_pin() {
    let err = match_pins(
        &[pin(-5.0, 10.0), pin(5.0, 10.0), pin(5.0, 30.0)],
        &stock_axis(),
        DEFAULT_TOLERANCE,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnmatchedPin);
    match err {
        RegistrationError::UnmatchedPin { pins, tolerance } => {
            assert_eq!(pins, vec![pin(5.0, 30.0)]);
            assert_eq!(tolerance, DEFAULT_TOLERANCE);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_midline_mismatch() {
    // stations at x = ±7 agree on 10.0, stations at x = ±5 on 10.05
    let pins = [
        pin(-5.0, 0.0),
        pin(5.0, 0.0),
        pin(-5.0, 20.1),
        pin(5.0, 20.1),
        pin(-7.0, 0.0),
        pin(7.0, 0.0),
        pin(-7.0, 20.0),
        pin(7.0, 20.0),
    ];
    let err = match_pins(&pins, &stock_axis(), 1e-7).unwrap_err();
    match err {
        RegistrationError::MidlineMismatch {
            expected,
            found,
            tolerance,
        } => {
            assert!((expected - 10.0).abs() < 1e-12);
            assert!((found - 10.05).abs() < 1e-12);
            assert_eq!(tolerance, 1e-7);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_cardinality_guard_leaves_targets_untouched() {
    let sentinel = Transform::translation(&vector(-999.0, -999.0, -999.0));
    let sources = [
        PlacedBody::new(BodyId(1), Transform::identity()),
        PlacedBody::new(BodyId(2), Transform::identity()),
        PlacedBody::new(BodyId(3), Transform::identity()),
    ];
    let mut targets = [
        PlacedBody::new(BodyId(1), sentinel),
        PlacedBody::new(BodyId(2), sentinel),
    ];
    let stock_source = Transform::identity();
    let mut stock_target = sentinel;

    let transform = build_flip_transform(&stock_axis(), FlipMode::Reflect).unwrap();
    let err = apply_transform(
        &transform,
        BodyCorrespondence::new(&sources, &mut targets).with_stock(&stock_source, &mut stock_target),
    )
    .unwrap_err();

    assert_eq!(
        err,
        RegistrationError::CorrespondenceMismatch {
            sources: 3,
            targets: 2,
        }
    );
    assert!(targets.iter().all(|t| t.placement == sentinel));
    assert_eq!(stock_target, sentinel);
}

#[test]
fn test_full_pipeline_places_mirror_bodies() {
    let axis = stock_axis();
    // each station along X holds a symmetric pair about y = 25
    let pins = [pin(-5.0, 10.0), pin(5.0, 10.0), pin(-5.0, 40.0), pin(5.0, 40.0)];
    let found = match_pins(&pins, &axis, DEFAULT_TOLERANCE).unwrap();
    assert_eq!(found.pairing.pin_count(), pins.len());
    assert_eq!(found.pairing.pairs.len(), 2);
    assert!((found.midline - 25.0).abs() < DEFAULT_TOLERANCE);

    let transform = build_flip_transform(&axis, FlipMode::Reflect).unwrap();
    for pair in &found.pairing.pairs {
        let image = transform.apply_point(&pair.first.center);
        assert!((image - pair.second.center).norm() < DEFAULT_TOLERANCE);
    }

    let model_placement = Transform::translation(&vector(12.0, 3.0, 0.0));
    let stock_placement = Transform::translation(&vector(0.0, 0.0, 0.0));
    let sources = [PlacedBody::new(BodyId(7), model_placement)];
    let mut targets = [PlacedBody::new(BodyId(7), Transform::identity())];
    let mut stock_target = Transform::identity();

    let report = apply_transform(
        &transform,
        BodyCorrespondence::new(&sources, &mut targets)
            .with_stock(&stock_placement, &mut stock_target),
    )
    .unwrap();

    assert_eq!(report.written, vec![BodyId(7)]);
    assert!(report.stock_written);
    assert!(targets[0]
        .placement
        .approx_eq(&transform.compose(&model_placement), MATRIX_TOLERANCE));
    let origin_image = targets[0].placement.apply_point(&point(0.0, 0.0, 0.0));
    assert!((origin_image - point(-12.0, 3.0, 0.0)).norm() < 1e-12);
    assert!(stock_target.approx_eq(&transform, MATRIX_TOLERANCE));
}

#[test]
fn test_rotate_mode_reuses_pin_validation() {
    let axis = stock_axis();
    match_pins(&[pin(-5.0, 10.0), pin(5.0, 10.0)], &axis, DEFAULT_TOLERANCE).unwrap();

    let transform = build_flip_transform(&axis, FlipMode::Rotate180).unwrap();
    // turning over about the line y = 25, z = 10
    let image = transform.apply_point(&point(30.0, 0.0, 0.0));
    assert!((image - point(30.0, 50.0, 20.0)).norm() < 1e-12);
    assert!(transform.linear().determinant() > 0.0);
}
