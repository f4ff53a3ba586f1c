//! Fluent builder for constructing a [`Simulation`].

use relief_core::{DistanceMetric, GeoPoint, Haversine, SimConfig};

use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<M>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                          |
/// |---------------------------|----------------------------------|
/// | `.metric(m)`              | [`Haversine`] (metres)           |
/// | `.shelter(p)`             | no shelters                      |
/// | `.shelter_with_need(p, n)`| —                                |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::new(SimConfig::wiggle())
///     .shelter(GeoPoint::new(-33.87, 151.21))
///     .shelter_with_need(GeoPoint::new(-33.86, 151.20), 8)
///     .build()?;
/// ```
pub struct SimulationBuilder<M: DistanceMetric = Haversine> {
    config:   SimConfig,
    metric:   M,
    shelters: Vec<(GeoPoint, Option<u32>)>,
}

impl SimulationBuilder<Haversine> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            metric:   Haversine,
            shelters: Vec::new(),
        }
    }
}

impl<M: DistanceMetric> SimulationBuilder<M> {
    /// Measure arrival distance with `metric` instead.  The configured
    /// `arrival_threshold` is interpreted in the new metric's unit.
    pub fn metric<N: DistanceMetric>(self, metric: N) -> SimulationBuilder<N> {
        SimulationBuilder {
            config:   self.config,
            metric,
            shelters: self.shelters,
        }
    }

    /// Pre-place a shelter with the configured default need.
    pub fn shelter(mut self, location: GeoPoint) -> Self {
        self.shelters.push((location, None));
        self
    }

    /// Pre-place a shelter with an explicit need.
    pub fn shelter_with_need(mut self, location: GeoPoint, needed: u32) -> Self {
        self.shelters.push((location, Some(needed)));
        self
    }

    /// Validate the configuration and every shelter location, and return a
    /// simulation with the shelters placed in the order they were added.
    pub fn build(self) -> SimResult<Simulation<M>> {
        let mut sim = Simulation::with_metric(self.config, self.metric)?;
        for (location, needed) in self.shelters {
            match needed {
                Some(n) => sim.add_shelter_with_need(location, n)?,
                None => sim.add_shelter(location)?,
            };
        }
        Ok(sim)
    }
}
