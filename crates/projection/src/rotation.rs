use foundation::math::Vec3;

/// Orientation of the sphere as yaw/pitch angles in degrees.
///
/// Yaw is a longitude offset (rotation about the earth axis), pitch tilts the
/// globe about the screen-horizontal axis. Pitch is unclamped: full free
/// rotation through the poles is valid. The rotation applied to a surface
/// point is always recomputed from the two angles, never integrated from
/// increments, so long drag sequences cannot accumulate visible error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    pub fn new(yaw_deg: f64, pitch_deg: f64) -> Self {
        Self { yaw_deg, pitch_deg }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Apply one drag sample of pixel deltas, pre-scaled by
    /// `sensitivity / scale` so rotation speed is resolution-independent.
    /// Non-finite deltas are ignored rather than corrupting the state.
    pub fn drag_by(&mut self, dx: f64, dy: f64, k: f64) {
        if !dx.is_finite() || !dy.is_finite() || !k.is_finite() {
            return;
        }
        self.yaw_deg += dx * k;
        self.pitch_deg -= dy * k;
    }

    /// Set absolute orientation. Non-finite angles are ignored.
    pub fn set(&mut self, yaw_deg: f64, pitch_deg: f64) {
        if !yaw_deg.is_finite() || !pitch_deg.is_finite() {
            return;
        }
        self.yaw_deg = yaw_deg;
        self.pitch_deg = pitch_deg;
    }

    /// Orient the globe so the given surface point faces the viewer.
    pub fn center_on(&mut self, lon_deg: f64, lat_deg: f64) {
        self.set(-lon_deg, -lat_deg);
    }

    /// Rotate a surface unit vector into the viewing frame.
    ///
    /// In the viewing frame +x points at the viewer, +y right, +z up; the
    /// screen center is the point the +x axis pierces.
    pub fn apply(self, v: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw_deg.to_radians().sin_cos();
        let x1 = v.x * cos_yaw - v.y * sin_yaw;
        let y1 = v.x * sin_yaw + v.y * cos_yaw;
        let z1 = v.z;

        let (sin_pitch, cos_pitch) = self.pitch_deg.to_radians().sin_cos();
        Vec3::new(
            x1 * cos_pitch - z1 * sin_pitch,
            y1,
            z1 * cos_pitch + x1 * sin_pitch,
        )
    }
}
