use nalgebra as na;
use crate::types::*;

/// Rotation matrix around the Y axis (vertical, for turntable slew).
///
/// Positive angles turn +Z toward +X, so a right-hand slew is positive.
pub fn rotation_y(angle: Angle) -> na::Matrix3<f64> {
    let theta = angle.get::<radian>();
    let c = theta.cos();
    let s = theta.sin();

    na::Matrix3::new(
        c,  0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Create a 4x4 transformation matrix (rotation + translation)
pub fn transform_matrix(
    rotation: na::Matrix3<f64>,
    translation: na::Vector3<f64>,
) -> na::Matrix4<f64> {
    let mut mat = na::Matrix4::identity();
    mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
    mat
}

/// Apply a transformation to a point
pub fn transform_point(
    transform: &na::Matrix4<f64>,
    point: na::Point3<f64>,
) -> na::Point3<f64> {
    let homogeneous = na::Vector4::new(point.x, point.y, point.z, 1.0);
    let transformed = transform * homogeneous;
    na::Point3::new(transformed.x, transformed.y, transformed.z)
}

/// Map a point in the jib frame (turntable-local) to world space
pub fn jib_to_world(
    base: na::Point3<f64>,
    slew: Angle,
    local: na::Point3<f64>,
) -> na::Point3<f64> {
    let transform = transform_matrix(rotation_y(slew), base.coords);
    transform_point(&transform, local)
}
