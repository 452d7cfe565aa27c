//! Template recommendation from plant characteristics.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    CENTRAL_MCC_DISTRIBUTED_IO, CENTRALIZED, FULLY_DISTRIBUTED, HYBRID_SAFETY,
    VENDOR_PACKAGE_INTEGRATION,
};

/// Coarse plant characteristics used to pick a starting template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantProfile {
    pub io_count: u32,
    pub vfd_count: u32,
    pub max_distance_m: u32,
    #[serde(default)]
    pub has_safety: bool,
    #[serde(default)]
    pub has_vendor_packages: bool,
}

/// Recommend a catalog template name.
///
/// Safety requirements take precedence over vendor packages, which take
/// precedence over plant size.
pub fn select_template_for_plant(profile: &PlantProfile) -> &'static str {
    if profile.has_safety {
        return HYBRID_SAFETY;
    }
    if profile.has_vendor_packages {
        return VENDOR_PACKAGE_INTEGRATION;
    }
    let fits = |io, vfd, distance| {
        profile.io_count <= io && profile.vfd_count <= vfd && profile.max_distance_m <= distance
    };
    if fits(200, 20, 100) {
        CENTRALIZED
    } else if fits(1000, 50, 500) {
        CENTRAL_MCC_DISTRIBUTED_IO
    } else {
        FULLY_DISTRIBUTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(io_count: u32, vfd_count: u32, max_distance_m: u32) -> PlantProfile {
        PlantProfile {
            io_count,
            vfd_count,
            max_distance_m,
            ..Default::default()
        }
    }

    #[test]
    fn size_bands() {
        assert_eq!(select_template_for_plant(&plant(150, 10, 80)), CENTRALIZED);
        assert_eq!(select_template_for_plant(&plant(200, 20, 100)), CENTRALIZED);
        assert_eq!(
            select_template_for_plant(&plant(201, 10, 80)),
            CENTRAL_MCC_DISTRIBUTED_IO
        );
        assert_eq!(
            select_template_for_plant(&plant(800, 40, 600)),
            FULLY_DISTRIBUTED
        );
    }

    #[test]
    fn safety_beats_vendor_packages() {
        let profile = PlantProfile {
            has_safety: true,
            has_vendor_packages: true,
            ..plant(50, 2, 20)
        };
        assert_eq!(select_template_for_plant(&profile), HYBRID_SAFETY);

        let profile = PlantProfile {
            has_vendor_packages: true,
            ..plant(50, 2, 20)
        };
        assert_eq!(select_template_for_plant(&profile), VENDOR_PACKAGE_INTEGRATION);
    }
}
