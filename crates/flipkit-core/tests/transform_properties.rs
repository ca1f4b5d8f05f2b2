use flipkit_core::{point, vector, Transform, MATRIX_TOLERANCE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_translation_inverse_round_trip(
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0,
        dz in -1000.0f64..1000.0,
        px in -1000.0f64..1000.0,
        py in -1000.0f64..1000.0,
    ) {
        let t = Transform::translation(&vector(dx, dy, dz));
        let ti = t.inverse().unwrap();
        prop_assert!(t.compose(&ti).is_identity(MATRIX_TOLERANCE));

        let p = point(px, py, 0.0);
        let back = ti.apply_point(&t.apply_point(&p));
        prop_assert!((back - p).norm() < 1e-9);
    }
}

#[test]
fn test_default_is_identity() {
    assert!(Transform::default().is_identity(0.0));
}
