//! Built-in example projections.

use serde::Serialize;

use crate::domain::SamplingDomain;

/// A named projection definition with a domain to sample it over.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionExample {
    pub label: &'static str,
    pub definition: &'static str,
    pub domain: SamplingDomain,
}

/// The catalog of example projections, all sampled over the whole globe.
pub fn projection_examples() -> Vec<ProjectionExample> {
    let globe = SamplingDomain::full_globe(1.0);
    vec![
        ProjectionExample {
            label: "Longitude/Latitude (WGS84)",
            definition: "+proj=longlat +datum=WGS84 +no_defs",
            domain: globe,
        },
        ProjectionExample {
            label: "Web Mercator",
            definition: "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs",
            domain: SamplingDomain::new(-85.0, 85.0, -180.0, 180.0, 1.0),
        },
        ProjectionExample {
            label: "UTM Zone 32",
            definition: "+proj=utm +zone=32",
            domain: globe,
        },
        ProjectionExample {
            label: "Geostationary Orbit",
            definition: "+proj=geos +h=35785831.0 +lon_0=-60 +sweep=y",
            domain: globe,
        },
        ProjectionExample {
            label: "EPSG:27700 - British National Grid",
            definition: "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs",
            domain: globe,
        },
    ]
}

/// Find an example by case-insensitive label prefix.
pub fn find_example(name: &str) -> Option<ProjectionExample> {
    let needle = name.to_lowercase();
    projection_examples()
        .into_iter()
        .find(|example| example.label.to_lowercase().starts_with(&needle))
}
