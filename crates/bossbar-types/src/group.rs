use serde::{Deserialize, Serialize};

/// Identifies one of the three solids of the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SolidKey {
    BossA,
    Bar,
    BossB,
}

impl SolidKey {
    pub const ALL: [SolidKey; 3] = [SolidKey::BossA, SolidKey::Bar, SolidKey::BossB];

    pub fn label(&self) -> &'static str {
        match self {
            SolidKey::BossA => "boss_a",
            SolidKey::Bar => "bar",
            SolidKey::BossB => "boss_b",
        }
    }
}

/// Which part of a solid a group member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Region {
    /// The enclosed volume.
    Volume,
    /// The source face at the start of the extrusion.
    BaseCap,
    /// The translated face at the end of the extrusion.
    TopCap,
    /// Every face swept by a profile curve.
    Lateral,
}

impl Region {
    pub fn dimension(&self) -> GroupDimension {
        match self {
            Region::Volume => GroupDimension::Volume,
            _ => GroupDimension::Surface,
        }
    }
}

/// Topological dimension of the entities a group tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GroupDimension {
    Surface,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupMember {
    pub solid: SolidKey,
    pub region: Region,
}

/// Named, numbered tag attached to regions of the assembly, used downstream
/// for material or boundary-condition lookup. Carries no geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalGroup {
    pub tag: i32,
    pub name: String,
    pub dimension: GroupDimension,
    pub members: Vec<GroupMember>,
}

impl PhysicalGroup {
    pub fn volume(tag: i32, name: impl Into<String>, solid: SolidKey) -> Self {
        Self {
            tag,
            name: name.into(),
            dimension: GroupDimension::Volume,
            members: vec![GroupMember {
                solid,
                region: Region::Volume,
            }],
        }
    }

    /// A surface group over the same region of several solids.
    pub fn surface(tag: i32, name: impl Into<String>, region: Region, solids: &[SolidKey]) -> Self {
        Self {
            tag,
            name: name.into(),
            dimension: GroupDimension::Surface,
            members: solids
                .iter()
                .map(|&solid| GroupMember { solid, region })
                .collect(),
        }
    }

    pub fn contains(&self, solid: SolidKey) -> bool {
        self.members.iter().any(|m| m.solid == solid)
    }
}
