//! Channel definitions and the fixed column layout of a rig sensor export.

use serde::{Deserialize, Serialize};

/// Header of the date component column. Values are `MM/DD/YYYY` despite the name.
pub const DATE_COLUMN: &str = "YYYY/MM/DD";

/// Header of the time component column.
pub const TIME_COLUMN: &str = "HH:MM:SS";

/// Header written for the combined index column on export.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// `chrono` format used to parse `date + " " + time`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// `chrono` format used when writing timestamps back out.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name offered for the processed export.
pub const DEFAULT_EXPORT_FILE: &str = "processed_data.csv";

/// A numeric sensor channel of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Rate of penetration, ft/hr.
    RateOfPenetration,
    /// ROP as reported by the PLC, ft/hr.
    PlcRop,
    /// Hook load, klbs.
    HookLoad,
    /// Standpipe pressure, psi.
    StandpipePressure,
    /// Mud pump 1 stroke rate, SPM.
    Pump1Spm,
    /// Mud pump 2 stroke rate, SPM.
    Pump2Spm,
    /// Lateral vibration maximum, g.
    LateralVibeMax,
    /// Axial vibration maximum, g.
    AxialVibeMax,
    /// AutoDriller limiting indicator, unitless.
    AutoDrillerLimiting,
    /// Weight-on-bit reduction applied by vibration mitigation, percent.
    WobReduce,
    /// RPM reduction applied by vibration mitigation, percent.
    RpmReduce,
}

impl Channel {
    /// Number of channels.
    pub const COUNT: usize = 11;

    /// Every channel, in the canonical export order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::RateOfPenetration,
        Self::PlcRop,
        Self::HookLoad,
        Self::StandpipePressure,
        Self::Pump1Spm,
        Self::Pump2Spm,
        Self::LateralVibeMax,
        Self::AxialVibeMax,
        Self::AutoDrillerLimiting,
        Self::WobReduce,
        Self::RpmReduce,
    ];

    /// The exact CSV header for this channel, unit suffix included.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::RateOfPenetration => "Rate Of Penetration (ft_per_hr)",
            Self::PlcRop => "PLC ROP (ft_per_hr)",
            Self::HookLoad => "Hook Load (klbs)",
            Self::StandpipePressure => "Standpipe Pressure (psi)",
            Self::Pump1Spm => "Pump 1 strokes/min (SPM)",
            Self::Pump2Spm => "Pump 2 strokes/min (SPM)",
            Self::LateralVibeMax => "DAS Vibe Lateral Max (g_force)",
            Self::AxialVibeMax => "DAS Vibe Axial Max (g_force)",
            Self::AutoDrillerLimiting => "AutoDriller Limiting (unitless)",
            Self::WobReduce => "DAS Vibe WOB Reduce (percent)",
            Self::RpmReduce => "DAS Vibe RPM Reduce (percent)",
        }
    }

    /// Looks a channel up by its exact header.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }

    /// Position of this channel in [`Channel::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// All 13 headers a well-formed export must carry.
#[must_use]
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![DATE_COLUMN, TIME_COLUMN];
    columns.extend(Channel::ALL.iter().map(|c| c.header()));
    columns
}
