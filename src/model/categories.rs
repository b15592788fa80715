use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneQuality {
    Good,
    Medium,
    Poor,
}

impl BoneQuality {
    pub const ALL: [BoneQuality; 3] = [BoneQuality::Good, BoneQuality::Medium, BoneQuality::Poor];

    /// Day-0 prevalence.
    pub const INITIAL_WEIGHTS: [(BoneQuality, f64); 3] = [
        (BoneQuality::Good, 0.3),
        (BoneQuality::Medium, 0.5),
        (BoneQuality::Poor, 0.2),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuscleStrength {
    Strong,
    Medium,
    Weak,
}

impl MuscleStrength {
    pub const ALL: [MuscleStrength; 3] = [
        MuscleStrength::Strong,
        MuscleStrength::Medium,
        MuscleStrength::Weak,
    ];

    pub const INITIAL_WEIGHTS: [(MuscleStrength, f64); 3] = [
        (MuscleStrength::Strong, 0.3),
        (MuscleStrength::Medium, 0.5),
        (MuscleStrength::Weak, 0.2),
    ];
}

/// Metastatic disease stage. Progression only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiseaseStage {
    I,
    II,
    III,
    IV,
}

impl DiseaseStage {
    pub const COUNT: usize = 4;

    pub const INITIAL_WEIGHTS: [(DiseaseStage, f64); 4] = [
        (DiseaseStage::I, 0.4),
        (DiseaseStage::II, 0.3),
        (DiseaseStage::III, 0.2),
        (DiseaseStage::IV, 0.1),
    ];

    /// The following stage, or `None` once terminal.
    pub fn next(self) -> Option<DiseaseStage> {
        match self {
            DiseaseStage::I => Some(DiseaseStage::II),
            DiseaseStage::II => Some(DiseaseStage::III),
            DiseaseStage::III => Some(DiseaseStage::IV),
            DiseaseStage::IV => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Zero-based position, I = 0 through IV = 3.
    pub fn ordinal(self) -> usize {
        match self {
            DiseaseStage::I => 0,
            DiseaseStage::II => 1,
            DiseaseStage::III => 2,
            DiseaseStage::IV => 3,
        }
    }

    /// Position scaled into [0, 1], terminal stage = 1.
    pub fn severity(self) -> f64 {
        self.ordinal() as f64 / (Self::COUNT - 1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complications {
    #[default]
    No,
    Yes,
}

impl Complications {
    /// Post-operative daily odds.
    pub const DAILY_WEIGHTS: [(Complications, f64); 2] =
        [(Complications::No, 0.85), (Complications::Yes, 0.15)];

    pub fn is_present(self) -> bool {
        self == Complications::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    #[default]
    Wait,
    Surgery,
}

impl fmt::Display for BoneQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BoneQuality::Good => "Good",
            BoneQuality::Medium => "Medium",
            BoneQuality::Poor => "Poor",
        };
        f.write_str(label)
    }
}

impl fmt::Display for MuscleStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MuscleStrength::Strong => "Strong",
            MuscleStrength::Medium => "Medium",
            MuscleStrength::Weak => "Weak",
        };
        f.write_str(label)
    }
}

impl fmt::Display for DiseaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiseaseStage::I => "I",
            DiseaseStage::II => "II",
            DiseaseStage::III => "III",
            DiseaseStage::IV => "IV",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Complications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(yes_no(self.is_present()))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Wait => "Wait",
            Decision::Surgery => "Surgery",
        };
        f.write_str(label)
    }
}

/// Tabular rendering of boolean flags.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
