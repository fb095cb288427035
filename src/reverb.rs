//! Positional reverb zones.

use crate::error::{Error, Result};
use crate::ffi::tables::Reverb3dFns;
use crate::ffi::{self, fmod_call, from_bool, to_bool, FMOD_REVERB3D, FMOD_REVERB_PROPERTIES, FMOD_VECTOR};
use crate::structures::{ReverbProperties, Vector};
use crate::util::{handle, non_negative};

handle! {
    /// A sphere of reverb blended in by listener distance.
    Reverb3D => FMOD_REVERB3D
}

fn fns() -> Result<&'static Reverb3dFns> {
    Ok(&ffi::api()?.reverb3d)
}

/// Placement of a reverb zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbZone {
    pub position: Vector,
    /// Full reverb inside this radius.
    pub min_distance: f32,
    /// No reverb outside this radius.
    pub max_distance: f32,
}

impl ReverbZone {
    pub fn new(position: Vector, min_distance: f32, max_distance: f32) -> Result<Self> {
        let zone = ReverbZone {
            position,
            min_distance,
            max_distance,
        };
        zone.check()?;
        Ok(zone)
    }

    /// Both radii finite and not negative, with `min_distance <= max_distance`.
    fn check(&self) -> Result<()> {
        non_negative(self.min_distance, "reverb min distance")?;
        non_negative(self.max_distance, "reverb max distance")?;
        if self.min_distance > self.max_distance {
            return Err(Error::InvalidArgument(format!(
                "reverb min distance {} exceeds max distance {}",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }
}

impl From<ReverbZone> for (FMOD_VECTOR, f32, f32) {
    fn from(zone: ReverbZone) -> Self {
        (zone.position.to_raw(), zone.min_distance, zone.max_distance)
    }
}

impl From<(FMOD_VECTOR, f32, f32)> for ReverbZone {
    fn from((position, min_distance, max_distance): (FMOD_VECTOR, f32, f32)) -> Self {
        ReverbZone {
            position: position.into(),
            min_distance,
            max_distance,
        }
    }
}

impl Reverb3D {
    pub fn release(self) -> Result<()> {
        fmod_call!(fns()?, release(self.raw))
    }

    pub fn set_three_d_attributes(&self, zone: ReverbZone) -> Result<()> {
        zone.check()?;
        let (position, min_distance, max_distance): (FMOD_VECTOR, f32, f32) = zone.into();
        fmod_call!(
            fns()?,
            set_3d_attributes(self.raw, &position, min_distance, max_distance)
        )
    }

    pub fn three_d_attributes(&self) -> Result<ReverbZone> {
        let mut position = FMOD_VECTOR::default();
        let (mut min_distance, mut max_distance) = (0.0, 0.0);
        fmod_call!(
            fns()?,
            get_3d_attributes(self.raw, &mut position, &mut min_distance, &mut max_distance)
        )?;
        Ok((position, min_distance, max_distance).into())
    }

    pub fn set_properties(&self, properties: &ReverbProperties) -> Result<()> {
        let raw: FMOD_REVERB_PROPERTIES = (*properties).into();
        fmod_call!(fns()?, set_properties(self.raw, &raw))
    }

    pub fn properties(&self) -> Result<ReverbProperties> {
        let mut raw = FMOD_REVERB_PROPERTIES::default();
        fmod_call!(fns()?, get_properties(self.raw, &mut raw))?;
        Ok(raw.into())
    }

    pub fn set_active(&self, active: bool) -> Result<()> {
        fmod_call!(fns()?, set_active(self.raw, to_bool(active)))
    }

    pub fn active(&self) -> Result<bool> {
        let mut active = 0;
        fmod_call!(fns()?, get_active(self.raw, &mut active))?;
        Ok(from_bool(active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_converts_both_ways() {
        let zone = ReverbZone::new(Vector::new(1.0, 2.0, 3.0), 5.0, 20.0).unwrap();
        let raw: (FMOD_VECTOR, f32, f32) = zone.into();
        assert_eq!((raw.0.x, raw.0.y, raw.0.z), (1.0, 2.0, 3.0));
        assert_eq!((raw.1, raw.2), (5.0, 20.0));
        assert_eq!(ReverbZone::from(raw), zone);
    }

    #[test]
    fn test_zone_radii_are_checked() {
        assert!(ReverbZone::new(Vector::ZERO, 0.0, 0.0).is_ok());
        assert!(matches!(
            ReverbZone::new(Vector::ZERO, 10.0, 5.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(ReverbZone::new(Vector::ZERO, -1.0, 5.0).is_err());
        assert!(ReverbZone::new(Vector::ZERO, 1.0, f32::NAN).is_err());
    }

    #[test]
    fn test_set_attributes_rejects_inverted_zone() {
        let reverb = unsafe { Reverb3D::from_raw(0x80usize as *mut FMOD_REVERB3D) };
        let zone = ReverbZone {
            position: Vector::ZERO,
            min_distance: 30.0,
            max_distance: 10.0,
        };
        assert!(matches!(reverb.set_three_d_attributes(zone), Err(Error::InvalidArgument(_))));
    }
}
