//! Occlusion geometry.

use libc::{c_int, c_void};

use crate::error::{Error, Result};
use crate::ffi::tables::GeometryFns;
use crate::ffi::{self, fmod_call, from_bool, to_bool, FMOD_GEOMETRY, FMOD_VECTOR};
use crate::structures::{count, vectors_to_raw, Vector};
use crate::util::handle;

handle! {
    /// A polygon mesh that occludes sound between listener and source.
    Geometry => FMOD_GEOMETRY
}

fn fns() -> Result<&'static GeometryFns> {
    Ok(&ffi::api()?.geometry)
}

/// How much a polygon attenuates sound passing through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonAttributes {
    /// 0.0 (transparent) to 1.0 (fully blocks the direct path).
    pub direct_occlusion: f32,
    pub reverb_occlusion: f32,
    pub double_sided: bool,
}

/// Orientation of a geometry object; both vectors must be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub forward: Vector,
    pub up: Vector,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation {
            forward: Vector::FORWARD,
            up: Vector::UP,
        }
    }
}

impl Geometry {
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    /// Add a convex, planar polygon and return its index.
    pub fn add_polygon(&self, attributes: PolygonAttributes, vertices: &[Vector]) -> Result<i32> {
        if vertices.len() < 3 {
            return Err(Error::InvalidArgument(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let raw = vectors_to_raw(vertices);
        let num = count(raw.len())?;
        let mut index = 0;
        fmod_call!(
            fns()?,
            add_polygon(
                self.raw,
                attributes.direct_occlusion,
                attributes.reverb_occlusion,
                to_bool(attributes.double_sided),
                num,
                raw.as_ptr(),
                &mut index
            )
        )?;
        Ok(index)
    }

    pub fn num_polygons(&self) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_num_polygons(self.raw, &mut num))?;
        Ok(num)
    }

    /// `(max_polygons, max_vertices)` given at creation.
    pub fn max_polygons(&self) -> Result<(i32, i32)> {
        let (mut polygons, mut vertices) = (0, 0);
        fmod_call!(fns()?, get_max_polygons(self.raw, &mut polygons, &mut vertices))?;
        Ok((polygons, vertices))
    }

    pub fn polygon_num_vertices(&self, polygon: i32) -> Result<i32> {
        let mut num = 0;
        fmod_call!(fns()?, get_polygon_num_vertices(self.raw, polygon, &mut num))?;
        Ok(num)
    }

    pub fn set_polygon_vertex(&self, polygon: i32, vertex: i32, position: Vector) -> Result<()> {
        let raw = position.to_raw();
        fmod_call!(fns()?, set_polygon_vertex(self.raw, polygon, vertex, &raw))
    }

    pub fn polygon_vertex(&self, polygon: i32, vertex: i32) -> Result<Vector> {
        let mut raw = FMOD_VECTOR::default();
        fmod_call!(fns()?, get_polygon_vertex(self.raw, polygon, vertex, &mut raw))?;
        Ok(raw.into())
    }

    pub fn set_polygon_attributes(&self, polygon: i32, attributes: PolygonAttributes) -> Result<()> {
        fmod_call!(
            fns()?,
            set_polygon_attributes(
                self.raw,
                polygon,
                attributes.direct_occlusion,
                attributes.reverb_occlusion,
                to_bool(attributes.double_sided)
            )
        )
    }

    pub fn polygon_attributes(&self, polygon: i32) -> Result<PolygonAttributes> {
        let (mut direct, mut reverb, mut double_sided) = (0.0, 0.0, 0);
        fmod_call!(
            fns()?,
            get_polygon_attributes(self.raw, polygon, &mut direct, &mut reverb, &mut double_sided)
        )?;
        Ok(PolygonAttributes {
            direct_occlusion: direct,
            reverb_occlusion: reverb,
            double_sided: from_bool(double_sided),
        })
    }

    pub fn set_active(&self, active: bool) -> Result<()> {
        fmod_call!(fns()?, set_active(self.raw, to_bool(active)))
    }

    pub fn active(&self) -> Result<bool> {
        let mut active = 0;
        fmod_call!(fns()?, get_active(self.raw, &mut active))?;
        Ok(from_bool(active))
    }

    pub fn set_rotation(&self, rotation: Rotation) -> Result<()> {
        let (forward, up) = (rotation.forward.to_raw(), rotation.up.to_raw());
        fmod_call!(fns()?, set_rotation(self.raw, &forward, &up))
    }

    pub fn rotation(&self) -> Result<Rotation> {
        let (mut forward, mut up) = (FMOD_VECTOR::default(), FMOD_VECTOR::default());
        fmod_call!(fns()?, get_rotation(self.raw, &mut forward, &mut up))?;
        Ok(Rotation {
            forward: forward.into(),
            up: up.into(),
        })
    }

    pub fn set_position(&self, position: Vector) -> Result<()> {
        let raw = position.to_raw();
        fmod_call!(fns()?, set_position(self.raw, &raw))
    }

    pub fn position(&self) -> Result<Vector> {
        let mut raw = FMOD_VECTOR::default();
        fmod_call!(fns()?, get_position(self.raw, &mut raw))?;
        Ok(raw.into())
    }

    pub fn set_scale(&self, scale: Vector) -> Result<()> {
        let raw = scale.to_raw();
        fmod_call!(fns()?, set_scale(self.raw, &raw))
    }

    pub fn scale(&self) -> Result<Vector> {
        let mut raw = FMOD_VECTOR::default();
        fmod_call!(fns()?, get_scale(self.raw, &mut raw))?;
        Ok(raw.into())
    }

    /// Serialise the mesh for `System::load_geometry`.
    pub fn save(&self) -> Result<Vec<u8>> {
        let fns = fns()?;
        let mut size: c_int = 0;
        fmod_call!(fns, save(self.raw, std::ptr::null_mut(), &mut size))?;
        if size <= 0 {
            return Ok(Vec::new());
        }
        let mut data = vec![0u8; size as usize];
        fmod_call!(fns, save(self.raw, data.as_mut_ptr() as *mut c_void, &mut size))?;
        data.truncate(size.max(0) as usize);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_default_is_identity() {
        let rotation = Rotation::default();
        assert_eq!(rotation.forward, Vector::new(0.0, 0.0, 1.0));
        assert_eq!(rotation.up, Vector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_add_polygon_needs_three_vertices() {
        let geometry = unsafe { Geometry::from_raw(0x80usize as *mut FMOD_GEOMETRY) };
        let attributes = PolygonAttributes {
            direct_occlusion: 1.0,
            reverb_occlusion: 1.0,
            double_sided: true,
        };
        let result = geometry.add_polygon(attributes, &[Vector::ZERO, Vector::UP]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
