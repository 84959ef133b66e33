//! CPU ray picking against axis-aligned boxes.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraState, Projection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit length
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from the camera eye through a point given in normalized device coordinates
    /// (x right, y up, both in [-1, 1] across the viewport).
    pub fn from_camera(camera: &CameraState, projection: &Projection, ndc: DVec2) -> Self {
        let inverse = projection.view_projection(camera).inverse();
        let through = inverse.project_point3(ndc.extend(0.5));
        Self::new(camera.position, through - camera.position)
    }

    pub fn at(&self, distance: f64) -> DVec3 {
        self.origin + self.direction * distance
    }
}

/// Identifier the collaborator attaches to pickable geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Cube of edge `size` centered on the origin.
    pub fn centered_cube(size: f64) -> Self {
        let half = DVec3::splat(size * 0.5);
        Self::new(-half, half)
    }

    /// Slab test. Returns the entry distance and the outward normal of the entry face.
    ///
    /// Only faces the ray enters through count, so a ray starting inside the box misses.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, DVec3)> {
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        let mut enter_axis = None;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - origin) / dir;
            let t2 = (hi - origin) / dir;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_enter {
                t_enter = near;
                enter_axis = Some(axis);
            }
            t_exit = t_exit.min(far);
        }

        let axis = enter_axis?;
        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }

        let mut normal = DVec3::ZERO;
        normal[axis] = if ray.direction[axis] > 0.0 { -1.0 } else { 1.0 };
        Some((t_enter, normal))
    }
}

/// Geometry that can be hit by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickTarget {
    pub id: ObjectId,
    pub bounds: Aabb,
}

impl PickTarget {
    pub fn new(id: ObjectId, bounds: Aabb) -> Self {
        Self { id, bounds }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let (distance, normal) = self.bounds.intersect(ray)?;
        Some(RayHit {
            object: self.id,
            distance,
            point: ray.at(distance),
            normal,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub object: ObjectId,
    pub distance: f64,
    pub point: DVec3,
    /// Outward normal of the face that was hit
    pub normal: DVec3,
}

/// Closest hit along `ray`; on equal distances the earlier target wins.
pub fn nearest_hit<'a>(
    ray: &Ray,
    targets: impl IntoIterator<Item = &'a PickTarget>,
) -> Option<RayHit> {
    targets
        .into_iter()
        .filter_map(|target| target.intersect(ray))
        .fold(None, |best: Option<RayHit>, hit| match best {
            Some(current) if current.distance <= hit.distance => Some(current),
            _ => Some(hit),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_hits_facing_side() {
        let cube = Aabb::centered_cube(1.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 3.2), DVec3::NEG_Z);

        let (distance, normal) = cube.intersect(&ray).unwrap();
        assert_relative_eq!(distance, 2.7, epsilon = 1e-12);
        assert_eq!(normal, DVec3::Z);
    }

    #[test]
    fn entry_face_normal_matches_approach_axis() {
        let cube = Aabb::centered_cube(1.0);
        let cases = [
            (DVec3::new(5.0, 0.1, -0.2), DVec3::X),
            (DVec3::new(-5.0, 0.1, 0.2), DVec3::NEG_X),
            (DVec3::new(0.2, 5.0, 0.0), DVec3::Y),
            (DVec3::new(0.0, -5.0, 0.3), DVec3::NEG_Y),
            (DVec3::new(0.1, 0.1, -5.0), DVec3::NEG_Z),
        ];
        for (origin, expected) in cases {
            let ray = Ray::new(origin, -origin);
            let (_, normal) = cube.intersect(&ray).unwrap();
            assert_eq!(normal, expected, "from {origin:?}");
        }
    }

    #[test]
    fn misses_and_inside_rays() {
        let cube = Aabb::centered_cube(1.0);
        assert!(cube
            .intersect(&Ray::new(DVec3::new(0.0, 2.0, 3.0), DVec3::NEG_Z))
            .is_none());
        assert!(cube
            .intersect(&Ray::new(DVec3::new(0.0, 0.0, 3.0), DVec3::Z))
            .is_none());
        assert!(cube
            .intersect(&Ray::new(DVec3::ZERO, DVec3::X))
            .is_none());
    }

    #[test]
    fn nearest_target_wins() {
        let near = PickTarget::new(
            ObjectId(1),
            Aabb::new(DVec3::new(-1.0, -1.0, 2.0), DVec3::new(1.0, 1.0, 3.0)),
        );
        let far = PickTarget::new(ObjectId(2), Aabb::centered_cube(1.0));
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);

        let hit = nearest_hit(&ray, [&far, &near]).unwrap();
        assert_eq!(hit.object, ObjectId(1));
        assert_relative_eq!(hit.point.z, 3.0, epsilon = 1e-12);
        assert_eq!(hit.normal, DVec3::Z);
    }

    #[test]
    fn ties_go_to_first_target() {
        let a = PickTarget::new(ObjectId(7), Aabb::centered_cube(1.0));
        let b = PickTarget::new(ObjectId(8), Aabb::centered_cube(1.0));
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z);

        assert_eq!(nearest_hit(&ray, [&a, &b]).unwrap().object, ObjectId(7));
        assert_eq!(nearest_hit(&ray, [&b, &a]).unwrap().object, ObjectId(8));
        assert!(nearest_hit(&ray, std::iter::empty()).is_none());
    }

    #[test]
    fn center_ray_from_camera_points_at_origin() {
        let camera = CameraState::new(DVec3::new(2.0, 2.0, 6.0));
        let projection = Projection::new(50.0, 16.0 / 9.0, 0.1, 1000.0);

        let ray = Ray::from_camera(&camera, &projection, DVec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!(ray.direction.abs_diff_eq(-camera.direction(), 1e-9));
    }

    #[test]
    fn off_center_ray_leans_toward_screen_edge() {
        let camera = CameraState::new(DVec3::new(0.0, 0.0, 5.0));
        let projection = Projection::new(90.0, 1.0, 0.1, 100.0);

        // Top-right corner of a 90° square frustum: 45° off axis in both x and y.
        let ray = Ray::from_camera(&camera, &projection, DVec2::new(1.0, 1.0));
        let expected = DVec3::new(1.0, 1.0, -1.0).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-9), "{:?}", ray.direction);
    }
}
