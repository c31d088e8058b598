//! Index Component Weights
//!
//! Fixed fusion weights. The weights of each index sum to 1.0, so an index
//! whose components are all 1.0 (and, for USMI, fully trusted) scores 1.0.

// ===== USMI =====

/// SMAP L3 surface soil moisture.
pub const USMI_SURFACE_MOISTURE: f64 = 0.35;
/// SMAP L4 root-zone soil moisture.
pub const USMI_ROOT_ZONE_MOISTURE: f64 = 0.25;
/// GPM precipitation factor.
pub const USMI_PRECIPITATION_FACTOR: f64 = 0.20;
/// MODIS LST temperature stress.
pub const USMI_TEMPERATURE_STRESS: f64 = 0.15;
/// ECOSTRESS evapotranspiration deficit.
pub const USMI_ET_DEFICIT: f64 = 0.05;

// ===== AWLI =====

/// GRACE groundwater anomaly.
pub const AWLI_GROUNDWATER_ANOMALY: f64 = 0.30;
/// GPM precipitation anomaly against climatology.
pub const AWLI_PRECIPITATION_ANOMALY: f64 = 0.25;
/// MODIS vegetation water stress.
pub const AWLI_VEGETATION_WATER_STRESS: f64 = 0.20;
/// Actual over potential evapotranspiration.
pub const AWLI_ET_RATIO: f64 = 0.15;
/// Landsat surface water availability.
pub const AWLI_SURFACE_WATER_AVAILABILITY: f64 = 0.10;

// ===== PAOI =====

/// Vegetation stress from MODIS NDVI and pixel reliability.
pub const PAOI_VEGETATION_STRESS: f64 = 0.30;
/// Pest-favorable temperature and humidity.
pub const PAOI_PEST_FAVORABLE_CONDITIONS: f64 = 0.25;
/// Wind, rain and temperature suitability for spraying.
pub const PAOI_WEATHER_SUITABILITY: f64 = 0.20;
/// Crop growth stage versus pest timing.
pub const PAOI_PHENOLOGY_TIMING: f64 = 0.15;
/// Inverse spray drift risk.
pub const PAOI_SPRAY_DRIFT_SAFETY: f64 = 0.10;

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn each_index_sums_to_one() {
        assert!(close(
            USMI_SURFACE_MOISTURE + USMI_ROOT_ZONE_MOISTURE + USMI_PRECIPITATION_FACTOR
                + USMI_TEMPERATURE_STRESS + USMI_ET_DEFICIT,
            1.0
        ));
        assert!(close(
            AWLI_GROUNDWATER_ANOMALY + AWLI_PRECIPITATION_ANOMALY + AWLI_VEGETATION_WATER_STRESS
                + AWLI_ET_RATIO + AWLI_SURFACE_WATER_AVAILABILITY,
            1.0
        ));
        assert!(close(
            PAOI_VEGETATION_STRESS + PAOI_PEST_FAVORABLE_CONDITIONS + PAOI_WEATHER_SUITABILITY
                + PAOI_PHENOLOGY_TIMING + PAOI_SPRAY_DRIFT_SAFETY,
            1.0
        ));
    }
}
