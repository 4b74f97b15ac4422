//! Catalog of spawnable object templates, partitioned into size tiers.
//!
//! Templates are loaded once at startup from the scenario file. Loading is
//! tolerant per entry: a template with bad data is logged and dropped, and
//! the spawner only ever draws from entries that made it in.

use log::warn;
use thiserror::Error;

use crate::configuration::config::{RegistryConfig, TemplateConfig};

use super::bounds::Aabb;
use super::states::NVec3;

/// Planet mass above which spawns draw primarily from the Medium tier.
pub const TIER_THRESHOLD_MEDIUM: f64 = 25.0;
/// Planet mass above which spawns draw primarily from the Large tier.
pub const TIER_THRESHOLD_LARGE: f64 = 5000.0;
/// Planet mass above which spawns draw primarily from the ExtraLarge tier.
pub const TIER_THRESHOLD_EXTRA_LARGE: f64 = 100_000.0;

/// Size class of a template. Ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Tier {
    pub fn index(self) -> usize {
        match self {
            Tier::Small => 0,
            Tier::Medium => 1,
            Tier::Large => 2,
            Tier::ExtraLarge => 3,
        }
    }

    /// The next tier down, `None` below Small.
    pub fn lower(self) -> Option<Tier> {
        match self {
            Tier::Small => None,
            Tier::Medium => Some(Tier::Small),
            Tier::Large => Some(Tier::Medium),
            Tier::ExtraLarge => Some(Tier::Large),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Small => "small",
            Tier::Medium => "medium",
            Tier::Large => "large",
            Tier::ExtraLarge => "extra-large",
        }
    }
}

/// Tier a new spawn is drawn from, given the current planet mass, plus the
/// tier that gets blended in for variety (two extra picks, see the spawner).
///
/// Thresholds are exclusive: a planet of mass exactly 25 still draws only
/// from the Small tier.
pub fn spawn_tier_for_mass(mass: f64) -> (Tier, Option<Tier>) {
    if mass > TIER_THRESHOLD_EXTRA_LARGE {
        (Tier::ExtraLarge, Some(Tier::Large))
    } else if mass > TIER_THRESHOLD_LARGE {
        (Tier::Large, Some(Tier::Medium))
    } else if mass > TIER_THRESHOLD_MEDIUM {
        (Tier::Medium, Some(Tier::Small))
    } else {
        (Tier::Small, None)
    }
}

/// Immutable spawnable template. `bounds` is the model-space box of the
/// source asset; `scale` is the normalized visual scale applied on clone.
#[derive(Debug, Clone)]
pub struct BodyTemplate {
    pub id: String,
    pub path: String, // source asset path, kept for diagnostics
    pub mass: f64,
    pub scale: NVec3,
    pub bounds: Aabb,
    pub tier: Tier,
}

/// Reason a template was dropped at load time.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("mass must be finite and positive, got {0}")]
    BadMass(f64),
    #[error("{0} must have exactly 3 components")]
    BadVector(&'static str),
    #[error("scale components must be finite and positive")]
    BadScale,
    #[error("bounds are degenerate or non-finite")]
    BadBounds,
}

/// The usable template catalog: four tier lists of successfully loaded
/// templates.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    tiers: [Vec<BodyTemplate>; 4],
}

impl BodyRegistry {
    /// Build the registry from configuration. Entries that fail to load are
    /// warned about and omitted; the failure is not fatal to the rest.
    pub fn from_config(cfg: &RegistryConfig) -> BodyRegistry {
        let mut tiers: [Vec<BodyTemplate>; 4] = Default::default();
        let groups = [
            (Tier::Small, &cfg.small),
            (Tier::Medium, &cfg.medium),
            (Tier::Large, &cfg.large),
            (Tier::ExtraLarge, &cfg.extra_large),
        ];
        for (tier, entries) in groups {
            for entry in entries {
                match load_template(entry, tier) {
                    Ok(template) => tiers[tier.index()].push(template),
                    Err(e) => warn!(
                        "dropping template '{}' ({}) from the {} tier: {}",
                        entry.id,
                        entry.path,
                        tier.name(),
                        e
                    ),
                }
            }
        }
        BodyRegistry { tiers }
    }

    pub fn tier(&self, tier: Tier) -> &[BodyTemplate] {
        &self.tiers[tier.index()]
    }

    /// Look up a template by id across all tiers.
    pub fn find(&self, id: &str) -> Option<&BodyTemplate> {
        self.tiers.iter().flatten().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }
}

fn vec3(components: &[f64]) -> Option<NVec3> {
    match components {
        [x, y, z] => Some(NVec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn load_template(cfg: &TemplateConfig, tier: Tier) -> Result<BodyTemplate, TemplateError> {
    if !cfg.mass.is_finite() || cfg.mass <= 0.0 {
        return Err(TemplateError::BadMass(cfg.mass));
    }
    let scale = vec3(&cfg.scale).ok_or(TemplateError::BadVector("scale"))?;
    if !scale.iter().all(|c| c.is_finite() && *c > 0.0) {
        return Err(TemplateError::BadScale);
    }
    let min = vec3(&cfg.bounds.min).ok_or(TemplateError::BadVector("bounds.min"))?;
    let max = vec3(&cfg.bounds.max).ok_or(TemplateError::BadVector("bounds.max"))?;
    if !min.iter().chain(max.iter()).all(|c| c.is_finite())
        || min.x >= max.x
        || min.y >= max.y
        || min.z >= max.z
    {
        return Err(TemplateError::BadBounds);
    }
    Ok(BodyTemplate {
        id: cfg.id.clone(),
        path: cfg.path.clone(),
        mass: cfg.mass,
        scale,
        bounds: Aabb::new(min, max),
        tier,
    })
}
