use serde::{Deserialize, Serialize};

use bossbar_types::{GroupDimension, PhysicalGroup, Region, SolidKey};

use crate::config::{Clearance, GroupTags, Tolerance};
use crate::error::GeometryError;

pub(crate) fn require_finite(parameter: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::invalid(parameter, value, "must be finite"))
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64, GeometryError> {
    require_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::invalid(parameter, value, "must be positive"))
    }
}

/// Reject a feature of size `length` that would be lost to rounding at
/// coordinates of magnitude `reach`, or that lands outside the finite range.
pub(crate) fn require_resolvable(
    parameter: &'static str,
    length: f64,
    reach: f64,
) -> Result<f64, GeometryError> {
    if !reach.is_finite() || !length.is_finite() {
        return Err(GeometryError::invalid(
            parameter,
            length,
            "places geometry outside the finite range",
        ));
    }
    if !Tolerance::default().resolves(length, reach) {
        return Err(GeometryError::invalid(
            parameter,
            length,
            format!("is too small to resolve at coordinates of magnitude {reach:e}"),
        ));
    }
    Ok(length)
}

fn require_name(field: &'static str, name: &str) -> Result<(), GeometryError> {
    if name.trim().is_empty() {
        Err(GeometryError::InvalidName { field })
    } else {
        Ok(())
    }
}

/// Names for the optional cap surface groups: `base` tags the source faces,
/// `top` their translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapSurfaceNames {
    pub base: String,
    pub top: String,
}

/// Full parameter set of the boss/bar assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyParams {
    pub radius: f64,
    pub thickness: f64,
    pub bar_length: f64,
    pub element_size: f64,
    pub surface_name: String,
    pub volume_name: String,
    pub tags: GroupTags,
    pub clearance: Clearance,
    /// Tag the lateral faces of all solids with `surface_name`.
    pub lateral_surface_group: bool,
    pub cap_surfaces: Option<CapSurfaceNames>,
}

impl AssemblyParams {
    pub fn new(
        radius: f64,
        thickness: f64,
        bar_length: f64,
        element_size: f64,
        surface_name: impl Into<String>,
        volume_name: impl Into<String>,
    ) -> Self {
        Self {
            radius,
            thickness,
            bar_length,
            element_size,
            surface_name: surface_name.into(),
            volume_name: volume_name.into(),
            tags: GroupTags::default(),
            clearance: Clearance::default(),
            lateral_surface_group: true,
            cap_surfaces: None,
        }
    }

    pub fn with_tags(mut self, tags: GroupTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_clearance(mut self, clearance: Clearance) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_cap_surfaces(mut self, base: impl Into<String>, top: impl Into<String>) -> Self {
        self.cap_surfaces = Some(CapSurfaceNames {
            base: base.into(),
            top: top.into(),
        });
        self
    }

    pub fn without_lateral_surface_group(mut self) -> Self {
        self.lateral_surface_group = false;
        self
    }

    /// Check every scalar and name. Runs before any coordinate exists.
    pub fn validate(&self) -> Result<(), GeometryError> {
        require_positive("radius", self.radius)?;
        require_positive("thickness", self.thickness)?;
        require_positive("bar_length", self.bar_length)?;
        require_positive("element_size", self.element_size)?;

        if self.clearance == Clearance::Disjoint && self.bar_length <= 2.0 * self.radius {
            return Err(GeometryError::invalid(
                "bar_length",
                self.bar_length,
                format!(
                    "must exceed twice the radius ({}) so the bosses stay disjoint",
                    2.0 * self.radius
                ),
            ));
        }

        // Boss B reaches furthest from the origin, at x = r + L + r.
        let far = self.radius + self.bar_length + self.radius;
        require_resolvable("bar_length", self.bar_length, far)?;
        require_resolvable("radius", self.radius, far)?;

        require_name("surface_name", &self.surface_name)?;
        require_name("volume_name", &self.volume_name)?;
        if let Some(caps) = &self.cap_surfaces {
            require_name("cap_surfaces.base", &caps.base)?;
            require_name("cap_surfaces.top", &caps.top)?;
        }

        self.physical_groups().map(|_| ())
    }

    /// Physical groups implied by the tag configuration, checked for
    /// positive and per-dimension unique tags.
    pub fn physical_groups(&self) -> Result<Vec<PhysicalGroup>, GeometryError> {
        let tags = &self.tags;
        let mut groups = vec![
            PhysicalGroup::volume(tags.boss_a, &self.volume_name, SolidKey::BossA),
            PhysicalGroup::volume(tags.boss_b, &self.volume_name, SolidKey::BossB),
        ];
        if let Some(bar_tag) = tags.bar {
            groups.push(PhysicalGroup::volume(bar_tag, &self.volume_name, SolidKey::Bar));
        }
        if self.lateral_surface_group {
            groups.push(PhysicalGroup::surface(
                tags.lateral,
                &self.surface_name,
                Region::Lateral,
                &SolidKey::ALL,
            ));
        }
        if let Some(caps) = &self.cap_surfaces {
            groups.push(PhysicalGroup::surface(
                tags.base_cap,
                &caps.base,
                Region::BaseCap,
                &SolidKey::ALL,
            ));
            groups.push(PhysicalGroup::surface(
                tags.top_cap,
                &caps.top,
                Region::TopCap,
                &SolidKey::ALL,
            ));
        }

        for (i, group) in groups.iter().enumerate() {
            if group.tag <= 0 {
                return Err(GeometryError::invalid(
                    "tag",
                    f64::from(group.tag),
                    format!("physical group `{}` needs a positive tag", group.name),
                ));
            }
            let clash = groups[..i]
                .iter()
                .any(|g| g.dimension == group.dimension && g.tag == group.tag);
            if clash {
                return Err(GeometryError::DuplicateTag {
                    tag: group.tag,
                    dimension: group.dimension,
                });
            }
        }
        Ok(groups)
    }

    /// Center of boss B, `bar_length` to the right of boss A.
    pub fn boss_b_center(&self) -> (f64, f64) {
        (self.radius + self.bar_length, self.radius)
    }
}
