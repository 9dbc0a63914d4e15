use serde::{Deserialize, Serialize};

use crate::group::{GroupDimension, PhysicalGroup, SolidKey};
use crate::solid::ExtrudedSolid;

/// The complete boundary description handed to a mesher: two bosses, the
/// connecting bar, and the physical groups naming them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub boss_a: ExtrudedSolid,
    pub bar: ExtrudedSolid,
    pub boss_b: ExtrudedSolid,
    pub groups: Vec<PhysicalGroup>,
}

impl Assembly {
    pub fn solid(&self, key: SolidKey) -> &ExtrudedSolid {
        match key {
            SolidKey::BossA => &self.boss_a,
            SolidKey::Bar => &self.bar,
            SolidKey::BossB => &self.boss_b,
        }
    }

    /// Solids in submission order.
    pub fn solids(&self) -> [(SolidKey, &ExtrudedSolid); 3] {
        [
            (SolidKey::BossA, &self.boss_a),
            (SolidKey::BossB, &self.boss_b),
            (SolidKey::Bar, &self.bar),
        ]
    }

    pub fn volume_groups(&self) -> impl Iterator<Item = &PhysicalGroup> {
        self.groups
            .iter()
            .filter(|g| g.dimension == GroupDimension::Volume)
    }

    pub fn surface_groups(&self) -> impl Iterator<Item = &PhysicalGroup> {
        self.groups
            .iter()
            .filter(|g| g.dimension == GroupDimension::Surface)
    }

    /// The volume group tagging `solid`, if any.
    pub fn volume_group_of(&self, solid: SolidKey) -> Option<&PhysicalGroup> {
        self.volume_groups().find(|g| g.contains(solid))
    }
}
