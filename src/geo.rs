use crate::{Error, Result};
use std::f64::consts::PI;

/// Half the Web Mercator world extent divided by 180 degrees. Multiplying
/// a longitude by this constant yields EPSG:3857 meters.
const EQUATOR_FACTOR: f64 = 20_037_508.34 / 180.0;

/// A WGS84 point. Latitude is restricted to the open interval (-90, 90)
/// since the Mercator projection blows up at the poles. Longitude is
/// accepted as-is and never normalized to +-180.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<GeoPoint> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(Error::InvalidCoordinate(format!(
                "Coordinates must be finite, got lat={lat}, lng={lng}"
            )));
        }
        if lat <= -90.0 || lat >= 90.0 {
            return Err(Error::InvalidCoordinate(format!(
                "Latitude must be strictly between -90 and 90, got {lat}"
            )));
        }
        Ok(GeoPoint { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// A point in EPSG:3857 meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned box in EPSG:3857 meters, `x_min <= x_max` and
/// `y_min <= y_max` (strict when built with a positive buffer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Renders the box as a WMS `BBOX` query parameter value.
    pub fn to_bbox_param(&self) -> String {
        format!("{},{},{},{}", self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// Spherical Web Mercator projection (EPSG:4326 -> EPSG:3857).
pub fn project(point: &GeoPoint) -> MercatorPoint {
    let x = point.lng * EQUATOR_FACTOR;
    let y = ((90.0 + point.lat) * PI / 360.0).tan().ln() / (PI / 180.0) * EQUATOR_FACTOR;
    MercatorPoint { x, y }
}

/// Projects a point and applies a symmetric buffer on both axes. The
/// upstream zoning map service takes the result as a spatial filter, so
/// the buffer must be large enough to cover its query window at any zoom.
pub fn point_to_buffered_bbox(point: &GeoPoint, buffer_meters: f64) -> Result<BoundingBox> {
    if !buffer_meters.is_finite() || buffer_meters < 0.0 {
        return Err(Error::InvalidInput(format!(
            "Buffer must be a non-negative number of meters, got {buffer_meters}"
        )));
    }
    let center = project(point);
    Ok(BoundingBox {
        x_min: center.x - buffer_meters,
        y_min: center.y - buffer_meters,
        x_max: center.x + buffer_meters,
        y_max: center.y + buffer_meters,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Error, Result};

    #[test]
    fn project_origin() -> Result<()> {
        let res = project(&GeoPoint::new(0.0, 0.0)?);
        assert!(res.x.abs() < 1e-6);
        assert!(res.y.abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn project_tokyo_station() -> Result<()> {
        let res = project(&GeoPoint::new(35.6814, 139.7671)?);
        assert!((res.x - 15_558_802.40).abs() < 1.0);
        assert!((res.y - 4_256_870.60).abs() < 1.0);
        Ok(())
    }

    #[test]
    fn bbox_widths_equal_twice_the_buffer() -> Result<()> {
        for (lat, lng, buffer) in [
            (35.6814, 139.7671, 500.0),
            (-45.0, 170.5, 1.0),
            (80.0, -120.0, 12_345.678),
        ] {
            let bbox = point_to_buffered_bbox(&GeoPoint::new(lat, lng)?, buffer)?;
            assert!((bbox.x_max - bbox.x_min - 2.0 * buffer).abs() < 1e-6);
            assert!((bbox.y_max - bbox.y_min - 2.0 * buffer).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn zero_buffer_degenerates_to_a_point() -> Result<()> {
        let bbox = point_to_buffered_bbox(&GeoPoint::new(51.5, -0.12)?, 0.0)?;
        assert_eq!(bbox.x_min, bbox.x_max);
        assert_eq!(bbox.y_min, bbox.y_max);
        Ok(())
    }

    #[test]
    fn tokyo_station_bbox() -> Result<()> {
        let point = GeoPoint::new(35.6814, 139.7671)?;
        let center = project(&point);
        let bbox = point_to_buffered_bbox(&point, 500.0)?;
        assert_eq!(bbox.x_min, center.x - 500.0);
        assert_eq!(bbox.y_min, center.y - 500.0);
        assert_eq!(bbox.x_max, center.x + 500.0);
        assert_eq!(bbox.y_max, center.y + 500.0);
        Ok(())
    }

    #[test]
    fn latitude_out_of_range() {
        for lat in [90.0, -90.0, 91.0, -123.4] {
            assert!(matches!(
                GeoPoint::new(lat, 0.0),
                Err(Error::InvalidCoordinate(_))
            ));
        }
    }

    #[test]
    fn non_finite_coordinates() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(Error::InvalidCoordinate(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(Error::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn longitude_is_not_normalized() -> Result<()> {
        // Values past the antimeridian pass through untouched
        let res = project(&GeoPoint::new(0.0, 200.0)?);
        assert!((res.x - 200.0 * (20_037_508.34 / 180.0)).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn invalid_buffer() -> Result<()> {
        let point = GeoPoint::new(35.0, 139.0)?;
        assert!(matches!(
            point_to_buffered_bbox(&point, -1.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            point_to_buffered_bbox(&point, f64::NAN),
            Err(Error::InvalidInput(_))
        ));
        Ok(())
    }

    #[test]
    fn bbox_param_format() {
        let bbox = BoundingBox {
            x_min: 1.5,
            y_min: -2.0,
            x_max: 3.5,
            y_max: 4.0,
        };
        assert_eq!(bbox.to_bbox_param(), "1.5,-2,3.5,4");
    }
}
