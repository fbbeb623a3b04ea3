use foundation::bounds::Aabb2;
use foundation::math::{Vec2, Vec3, unit_vector};

use crate::rotation::Rotation;

/// Orthographic projector: parallel projection of the unit sphere onto the
/// screen plane. Scale and translate are derived once by [`Orthographic::fit_width`]
/// and immutable thereafter; the rotation is owned by the caller and passed
/// in per projection, since only the interaction loop may mutate it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    scale: f64,
    translate: Vec2,
    clip_tolerance: f64,
}

impl Orthographic {
    /// Fit the projected sphere disk into a square pixel budget.
    ///
    /// The raw fit puts a disk of radius `target_px / 2` at the box center;
    /// the integer shrink `scale * (l - 1) / l` then pulls the silhouette one
    /// pixel inside the box so the rim stroke never clips, leaving at most
    /// 1px of fitting slack.
    pub fn fit_width(target_px: f64, clip_tolerance: f64) -> Self {
        let mut scale = target_px / 2.0;
        let translate = Vec2::new(target_px / 2.0, target_px / 2.0);

        let disk = Aabb2::of_disk([translate.x, translate.y], scale);
        let dy = disk.height().ceil();
        let l = disk.width().ceil().min(dy);
        if l > 1.0 {
            scale = scale * (l - 1.0) / l;
        }

        Self {
            scale,
            translate,
            clip_tolerance,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    pub fn clip_tolerance(&self) -> f64 {
        self.clip_tolerance
    }

    /// Rotated-frame unit vector for a surface point in degrees.
    pub fn rotate(&self, rotation: &Rotation, lon_deg: f64, lat_deg: f64) -> Vec3 {
        rotation.apply(unit_vector(lon_deg, lat_deg))
    }

    /// Front-hemisphere test in the rotated frame.
    ///
    /// The forward component of a rotated unit vector is the cosine of its
    /// angular distance from the view direction; the tolerance keeps points
    /// sitting exactly on the silhouette from flickering between hemispheres
    /// as the rotation moves under them.
    pub fn is_front(&self, rotated: Vec3) -> bool {
        rotated.x >= -self.clip_tolerance
    }

    /// Screen coordinates for a rotated-frame unit vector, with no
    /// visibility test. Used for clip-inserted silhouette vertices, which sit
    /// on the boundary by construction.
    pub fn plane_point(&self, rotated: Vec3) -> Vec2 {
        Vec2::new(
            self.translate.x + self.scale * rotated.y,
            self.translate.y - self.scale * rotated.z,
        )
    }

    /// Project a surface point to screen coordinates, or `None` when it lies
    /// on the far hemisphere (or is not finite).
    pub fn project(&self, rotation: &Rotation, lon_deg: f64, lat_deg: f64) -> Option<Vec2> {
        let rotated = self.rotate(rotation, lon_deg, lat_deg);
        if !rotated.is_finite() {
            return None;
        }
        if self.is_front(rotated) {
            Some(self.plane_point(rotated))
        } else {
            None
        }
    }
}
