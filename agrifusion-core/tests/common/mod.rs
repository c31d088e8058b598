//! Shared fixtures for agrifusion-core integration tests
//!
//! Scenario builders return complete raw maps for recognisable field
//! conditions so tests read as agronomy rather than struct literals.

#![allow(dead_code)]

use agrifusion_core::records::{
    EvapotranspirationRecord, GroundwaterRecord, LandSurfaceTemperatureRecord,
    MultispectralRecord, PrecipitationRecord, SoilMoistureRecord, VegetationRecord,
};
use agrifusion_core::{
    DateRange, FusionRequest, GeoLocation, QualityFlag, RawDataMap, RawRecord,
};
use chrono::{DateTime, Utc};

/// Reference point used throughout: New York City
pub const NYC: (f64, f64) = (40.7128, -74.0060);

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-31T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn january_request() -> FusionRequest {
    let range = DateRange::new(
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        DateTime::parse_from_rfc3339("2024-01-31T23:59:59Z").unwrap(),
    )
    .unwrap();
    FusionRequest::new(GeoLocation::new(NYC.0, NYC.1).unwrap(), range)
}

/// SMAP pair at the documented fallback moistures, both flagged good
pub fn reference_smap() -> RawDataMap {
    RawDataMap::new()
        .with(RawRecord::SmapL3(SoilMoistureRecord {
            surface_moisture: Some(0.25),
            quality_flag: Some(QualityFlag::Good),
            uncertainty: Some(0.08),
            ..Default::default()
        }))
        .with(RawRecord::SmapL4(SoilMoistureRecord {
            root_zone_moisture: Some(0.30),
            surface_moisture: Some(0.22),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
}

/// Well-watered field in mild weather; every dataset present and flagged good
pub fn well_watered() -> RawDataMap {
    RawDataMap::new()
        .with(RawRecord::SmapL3(SoilMoistureRecord {
            surface_moisture: Some(0.45),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::SmapL4(SoilMoistureRecord {
            root_zone_moisture: Some(0.45),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::ModisVegetation(VegetationRecord {
            ndvi: Some(0.7),
            evi: Some(0.5),
            pixel_reliability: Some(0),
            aerosol_optical_depth: Some(0.05),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::ModisLst(LandSurfaceTemperatureRecord {
            day_lst: Some(28.0),
            night_lst: Some(22.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Gpm(PrecipitationRecord {
            precipitation_rate: Some(1.0),
            precipitation_cal: Some(50.0),
            probability_of_precipitation: Some(0.05),
            wind_speed: Some(1.0),
            quality_flag: Some(QualityFlag::Good),
        }))
        .with(RawRecord::Ecostress(EvapotranspirationRecord {
            et_actual: Some(7.0),
            et_potential: Some(7.5),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Grace(GroundwaterRecord {
            groundwater_anomaly: Some(8.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Landsat(MultispectralRecord {
            ndwi: Some(0.6),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
}

/// Hot, dry field with depleted groundwater and sparse canopy
pub fn drought() -> RawDataMap {
    RawDataMap::new()
        .with(RawRecord::SmapL3(SoilMoistureRecord {
            surface_moisture: Some(0.02),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::SmapL4(SoilMoistureRecord {
            root_zone_moisture: Some(0.03),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::ModisVegetation(VegetationRecord {
            ndvi: Some(0.15),
            pixel_reliability: Some(2),
            aerosol_optical_depth: Some(0.6),
            ..Default::default()
        }))
        .with(RawRecord::ModisLst(LandSurfaceTemperatureRecord {
            day_lst: Some(50.0),
            night_lst: Some(30.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Gpm(PrecipitationRecord {
            precipitation_rate: Some(0.0),
            precipitation_cal: Some(0.0),
            probability_of_precipitation: Some(0.0),
            wind_speed: Some(9.0),
            quality_flag: Some(QualityFlag::Good),
        }))
        .with(RawRecord::Ecostress(EvapotranspirationRecord {
            et_actual: Some(0.5),
            et_potential: Some(11.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Grace(GroundwaterRecord {
            groundwater_anomaly: Some(-10.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
        .with(RawRecord::Landsat(MultispectralRecord {
            ndwi: Some(0.0),
            quality_flag: Some(QualityFlag::Good),
            ..Default::default()
        }))
}
