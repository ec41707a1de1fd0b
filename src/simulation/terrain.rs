use super::{Segment, Vec2};

mod defaults {
    pub const MAX_X: f64 = 7000.;
    pub const MAX_Y: f64 = 3000.;
    pub const MARGIN: f64 = 1.;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TerrainError {
    #[error("Terrain needs at least 2 points, got {0}")]
    NotEnoughPoints(usize),
    #[error("Terrain has no flat landing site")]
    NoLandingSite,
    #[error("Terrain has {0} flat segments, expected exactly one landing site")]
    MultipleLandingSites(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLimits {
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for WorldLimits {
    fn default() -> Self {
        Self {
            max_x: defaults::MAX_X,
            max_y: defaults::MAX_Y,
        }
    }
}

impl WorldLimits {
    pub fn diagonal(&self) -> f64 {
        Vec2::new(self.max_x, self.max_y).length()
    }

    // left wall, ceiling, right wall
    fn bounds(&self) -> [Segment; 3] {
        let left = -defaults::MARGIN;
        let bottom = -defaults::MARGIN;
        [
            Segment::new(Vec2::new(left, bottom), Vec2::new(left, self.max_y)),
            Segment::new(Vec2::new(left, self.max_y), Vec2::new(self.max_x, self.max_y)),
            Segment::new(
                Vec2::new(self.max_x, self.max_y),
                Vec2::new(self.max_x, bottom),
            ),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Terrain {
    surface: Vec<Segment>,
    landing_site: Segment,
    bounds: [Segment; 3],
    limits: WorldLimits,
}

impl Terrain {
    pub fn try_new(points: &[Vec2], limits: WorldLimits) -> Result<Self, TerrainError> {
        if points.len() < 2 {
            return Err(TerrainError::NotEnoughPoints(points.len()));
        }
        let surface: Vec<_> = points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();

        let mut flat = surface.iter().filter(|s| s.is_flat());
        let landing_site = *flat.next().ok_or(TerrainError::NoLandingSite)?;
        let extra = flat.count();
        if extra > 0 {
            return Err(TerrainError::MultipleLandingSites(extra + 1));
        }

        Ok(Self {
            surface,
            landing_site,
            bounds: limits.bounds(),
            limits,
        })
    }

    pub fn try_with_default_limits(points: &[Vec2]) -> Result<Self, TerrainError> {
        Self::try_new(points, WorldLimits::default())
    }

    pub fn landing_site(&self) -> &Segment {
        &self.landing_site
    }

    pub fn surface(&self) -> &[Segment] {
        &self.surface
    }

    pub fn limits(&self) -> &WorldLimits {
        &self.limits
    }

    pub fn world_diagonal(&self) -> f64 {
        self.limits.diagonal()
    }

    pub fn has_collision_with(&self, segment: &Segment) -> bool {
        self.surface.iter().any(|s| s.intersects(segment))
    }

    // first crossed segment in surface order
    pub fn collision_point_with(&self, segment: &Segment) -> Option<Vec2> {
        self.surface
            .iter()
            .find_map(|surface| surface.intersection_with(segment))
    }

    pub fn is_on_landing_site(&self, segment: &Segment) -> bool {
        self.landing_site.intersects(segment)
    }

    pub fn is_moving_out_of_bounds(&self, segment: &Segment) -> bool {
        self.bounds.iter().any(|bound| bound.intersects(segment))
    }

    pub fn distance_from_landing_site(&self, point: Vec2) -> f64 {
        self.landing_site.distance_to(point)
    }
}
