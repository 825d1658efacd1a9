//! Mapping between window, clip and world coordinates.
//!
//! The view spans `[-2, 2]` on both axes of the window before the aspect ratio
//! correction is applied.

use crate::math::{point, Point, Size, Transform};

/// The view transform compensating for the aspect ratio (`width / height`) of the
/// window.
pub fn aspect_ratio_transform(aspect_ratio: f32) -> Transform {
    if aspect_ratio < 1.0 {
        Transform::scale(1.0 / aspect_ratio, 1.0)
    } else {
        Transform::scale(1.0, aspect_ratio)
    }
}

/// Map a cursor position in window pixels (origin at the top left corner, y pointing
/// down) to world coordinates.
///
/// Returns `None` if the window has no area or the view transform can't be inverted.
pub fn pointer_to_world(cursor: Point, window_size: Size, view: &Transform) -> Option<Point> {
    if !(window_size.width > 0.0 && window_size.height > 0.0) {
        return None;
    }

    let view_position = point(
        cursor.x / window_size.width * 4.0 - 2.0,
        cursor.y / -window_size.height * 4.0 + 2.0,
    );

    Some(view.inverse()?.transform_point(view_position))
}

/// The columns of the 3x3 matrix of a transform, as expected by a GLSL `mat3`.
pub fn transform_columns(transform: &Transform) -> [[f32; 3]; 3] {
    [
        [transform.m11, transform.m12, 0.0],
        [transform.m21, transform.m22, 0.0],
        [transform.m31, transform.m32, 1.0],
    ]
}

#[cfg(test)]
use crate::math::{size, vector};

#[test]
fn aspect_ratio() {
    assert_eq!(aspect_ratio_transform(2.0), Transform::scale(1.0, 2.0));
    assert_eq!(aspect_ratio_transform(0.5), Transform::scale(2.0, 1.0));
    assert_eq!(aspect_ratio_transform(1.0), Transform::identity());
}

#[test]
fn pointer() {
    let window = size(800.0, 600.0);
    let identity = Transform::identity();

    assert_eq!(
        pointer_to_world(point(400.0, 300.0), window, &identity),
        Some(point(0.0, 0.0))
    );
    assert_eq!(
        pointer_to_world(point(0.0, 0.0), window, &identity),
        Some(point(-2.0, 2.0))
    );
    assert_eq!(
        pointer_to_world(point(800.0, 600.0), window, &identity),
        Some(point(2.0, -2.0))
    );

    let view = aspect_ratio_transform(0.5);
    let world = pointer_to_world(point(0.0, 600.0), window, &view).unwrap();
    assert!((world - point(-1.0, -2.0)).length() < 1e-6);
    assert!((view.transform_point(world) - point(-2.0, -2.0)).length() < 1e-6);

    assert_eq!(pointer_to_world(point(1.0, 1.0), size(0.0, 600.0), &identity), None);
    assert_eq!(
        pointer_to_world(point(1.0, 1.0), window, &Transform::scale(0.0, 1.0)),
        None
    );
}

#[test]
fn columns() {
    let t = Transform::scale(2.0, 3.0).then_translate(vector(5.0, 7.0));
    assert_eq!(
        transform_columns(&t),
        [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [5.0, 7.0, 1.0]]
    );
}
