use nalgebra::{Matrix4, Point2, Point3, Rotation3, Unit, Vector3};

/// Matrix factory over nalgebra's column-vector conventions.
///
/// View and projection are left-handed: the camera looks down its +Z axis and
/// +X is `up × forward`. A row-vector chain `world · view · projection` is
/// written here as `projection * view * world`; both apply world first.
pub struct TransformFactory;

impl TransformFactory {
    pub fn rotation(axis: &Vector3<f32>, angle_rad: f32) -> Matrix4<f32> {
        let axis_unit = Unit::new_normalize(*axis);
        Matrix4::from(Rotation3::from_axis_angle(&axis_unit, angle_rad))
    }

    /// Euler rotation applying roll (Z), then pitch (X), then yaw (Y).
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Matrix4<f32> {
        Self::rotation(&Vector3::y(), yaw)
            * Self::rotation(&Vector3::x(), pitch)
            * Self::rotation(&Vector3::z(), roll)
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    /// Left-handed lookAt.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::look_at_lh(eye, target, &Unit::new_normalize(*up).into_inner())
    }

    /// Left-handed perspective: clip w is the camera-space z, so points in front of the
    /// eye have positive w. Caller guarantees `aspect_ratio != 0` and `near != far`.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        // nalgebra builds the right-handed matrix; mirroring z turns it left-handed
        Matrix4::new_perspective(aspect_ratio, fov_y_rad, near, far)
            * Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, -1.0))
    }

    /// Rotation then translation, from a mesh's Euler angles (x = pitch, y = yaw, z = roll).
    pub fn world(rotation: &Vector3<f32>, position: &Vector3<f32>) -> Matrix4<f32> {
        Self::translation(position)
            * Self::rotation_yaw_pitch_roll(rotation.y, rotation.x, rotation.z)
    }

    /// Composes `world · view · projection` into a single model-to-device transform.
    pub fn compose(
        world: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * world
    }
}

/// Applies `transform` to a point including the perspective divide.
pub fn transform_coordinates(coordinate: &Point3<f32>, transform: &Matrix4<f32>) -> Point3<f32> {
    transform.transform_point(coordinate)
}

/// Maps a model-space coordinate to pixel space.
///
/// Device space is centered with Y up; pixel space has its origin top-left with Y down.
/// Both axes truncate toward zero, never round.
pub fn project(
    coordinate: &Point3<f32>,
    transform: &Matrix4<f32>,
    width: usize,
    height: usize,
) -> Point2<f32> {
    let point = transform_coordinates(coordinate, transform);
    let width = width as f32;
    let height = height as f32;
    let x = (point.x * width + width / 2.0).trunc();
    let y = (-point.y * height + height / 2.0).trunc();
    Point2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_chain(aspect: f32) -> (Matrix4<f32>, Matrix4<f32>) {
        let view = TransformFactory::view(
            &Point3::new(0.0, 0.0, 10.0),
            &Point3::origin(),
            &Vector3::y(),
        );
        let projection = TransformFactory::perspective(aspect, 0.8, 0.01, 1.0);
        (view, projection)
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let (view, projection) = camera_chain(640.0 / 480.0);
        let transform = TransformFactory::compose(&Matrix4::identity(), &view, &projection);
        let p = project(&Point3::origin(), &transform, 640, 480);
        assert_eq!(p, Point2::new(320.0, 240.0));

        let p = project(&Point3::origin(), &transform, 641, 479);
        assert_eq!(p, Point2::new(320.0, 239.0));
    }

    #[test]
    fn test_world_x_lands_left_of_center() {
        // Left-handed camera at +10z looking at the origin sees world +x on its left.
        let (view, projection) = camera_chain(640.0 / 480.0);
        let transform = TransformFactory::compose(&Matrix4::identity(), &view, &projection);
        let p = project(&Point3::new(1.0, 1.0, 1.0), &transform, 640, 480);
        assert_eq!(p, Point2::new(193.0, 113.0));

        let p = project(&Point3::new(-1.0, -1.0, 1.0), &transform, 640, 480);
        assert_eq!(p, Point2::new(446.0, 366.0));
    }

    #[test]
    fn test_project_truncates_toward_zero() {
        // Identity transform: device x = 0.0015 -> 0.0015 * 100 + 50 = 50.15 -> 50
        let p = project(&Point3::new(0.0015, 0.0, 0.0), &Matrix4::identity(), 100, 100);
        assert_eq!(p.x, 50.0);

        // Negative pixel values truncate toward zero, not toward -inf
        let p = project(&Point3::new(-0.505, 0.505, 0.0), &Matrix4::identity(), 100, 100);
        assert_eq!(p, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let p = project(&Point3::new(0.0, 0.25, 0.0), &Matrix4::identity(), 100, 100);
        assert_eq!(p.y, 25.0);
    }

    #[test]
    fn test_target_lies_in_front_of_camera() {
        let (view, projection) = camera_chain(1.0);
        let view_projection = projection * view;

        // Clip-space w is the distance along the view direction; positive means in front.
        let clip = view_projection * Point3::<f32>::origin().to_homogeneous();
        assert!(clip.w > 0.0);

        // Device depth grows monotonically with distance from the eye.
        let depths: Vec<f32> = [9.5f32, 9.0, 5.0, 0.0, -5.0]
            .iter()
            .map(|z| transform_coordinates(&Point3::new(0.0, 0.0, *z), &view_projection).z)
            .collect();
        assert!(depths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_world_applies_rotation_before_translation() {
        let world = TransformFactory::world(
            &Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            &Vector3::new(5.0, 0.0, 0.0),
        );
        let p = transform_coordinates(&Point3::new(1.0, 0.0, 0.0), &world);
        assert!((p - Point3::new(5.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_yaw_pitch_roll_order() {
        use std::f32::consts::FRAC_PI_2;
        // Roll first: x -> y, then pitch about X: y -> z, then yaw about Y: z -> x
        let m = TransformFactory::rotation_yaw_pitch_roll(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
        let p = transform_coordinates(&Point3::new(1.0, 0.0, 0.0), &m);
        assert!((p - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
    }
}
