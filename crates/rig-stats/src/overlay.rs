//! Mock shaker and screen performance metrics derived from existing channels.
//!
//! The scalings are fixed and linear; every output is clipped to `[0, 100]`.

use rig_series::{Channel, NormalizedSeries, Result};
use serde::Serialize;
use tracing::debug;

/// Header of the shaker load column.
pub const SHAKER_LOAD_COLUMN: &str = "Shaker Load (percent)";
/// Header of the screen occupancy column.
pub const SCREEN_OCCUPANCY_COLUMN: &str = "Screen Occupancy (percent)";
/// Header of the overload risk column.
pub const OVERLOAD_RISK_COLUMN: &str = "Overload Risk (percent)";

const SHAKER_PER_SPM: f64 = 0.25;
const SCREEN_PER_ROP: f64 = 0.4;
const RISK_SHAKER_WEIGHT: f64 = 0.6;
const RISK_SCREEN_WEIGHT: f64 = 0.4;

fn clip_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Overlay metrics for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayRow {
    /// Shaker load from combined pump stroke rate.
    pub shaker_load: f64,
    /// Screen occupancy from rate of penetration.
    pub screen_occupancy: f64,
    /// Weighted blend of the two.
    pub overload_risk: f64,
}

impl OverlayRow {
    /// Computes the overlay from raw channel readings.
    #[must_use]
    pub fn compute(pump1_spm: f64, pump2_spm: f64, rop: f64) -> Self {
        let shaker_load = clip_percent(SHAKER_PER_SPM * (pump1_spm + pump2_spm));
        let screen_occupancy = clip_percent(SCREEN_PER_ROP * rop);
        let overload_risk = clip_percent(
            RISK_SHAKER_WEIGHT * shaker_load + RISK_SCREEN_WEIGHT * screen_occupancy,
        );
        Self {
            shaker_load,
            screen_occupancy,
            overload_risk,
        }
    }
}

/// Overlay metrics for every row of `series`.
#[must_use]
pub fn overlay_rows(series: &NormalizedSeries) -> Vec<OverlayRow> {
    let pump1 = series.channel(Channel::Pump1Spm);
    let pump2 = series.channel(Channel::Pump2Spm);
    let rop = series.channel(Channel::RateOfPenetration);
    pump1
        .iter()
        .zip(pump2)
        .zip(rop)
        .map(|((p1, p2), r)| OverlayRow::compute(*p1, *p2, *r))
        .collect()
}

/// Appends the overlay metrics to `series` as derived columns.
///
/// # Errors
///
/// Propagates [`NormalizedSeries::push_derived`] errors, which cannot occur
/// for a well-formed series.
pub fn apply_overlay(series: &mut NormalizedSeries) -> Result<Vec<OverlayRow>> {
    let rows = overlay_rows(series);
    series.push_derived(
        SHAKER_LOAD_COLUMN,
        rows.iter().map(|r| Some(r.shaker_load)).collect(),
    )?;
    series.push_derived(
        SCREEN_OCCUPANCY_COLUMN,
        rows.iter().map(|r| Some(r.screen_occupancy)).collect(),
    )?;
    series.push_derived(
        OVERLOAD_RISK_COLUMN,
        rows.iter().map(|r| Some(r.overload_risk)).collect(),
    )?;
    debug!(rows = rows.len(), "applied shaker overlay");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_series::normalize_str;
    use test_case::test_case;

    #[test_case(90.0, 90.0, 50.0, 45.0, 20.0, 35.0 ; "typical drilling")]
    #[test_case(300.0, 300.0, 0.0, 100.0, 0.0, 60.0 ; "shaker clipped at 100")]
    #[test_case(0.0, 0.0, 400.0, 0.0, 100.0, 40.0 ; "screen clipped at 100")]
    #[test_case(-10.0, 0.0, -5.0, 0.0, 0.0, 0.0 ; "negative clipped at 0")]
    fn overlay_scalings(p1: f64, p2: f64, rop: f64, shaker: f64, screen: f64, risk: f64) {
        let row = OverlayRow::compute(p1, p2, rop);
        assert!((row.shaker_load - shaker).abs() < 1e-9);
        assert!((row.screen_occupancy - screen).abs() < 1e-9);
        assert!((row.overload_risk - risk).abs() < 1e-9);
    }

    #[test]
    fn apply_overlay_adds_three_columns() {
        let text = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),PLC ROP (ft_per_hr),\
Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),Pump 2 strokes/min (SPM),\
DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),AutoDriller Limiting (unitless),\
DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)\n\
01/15/2024,10:00:00,50,50,30,2500,90,90,10,2,0,0,0\n";
        let mut series = normalize_str(text).expect("normalize");
        let before = series.column_count();
        let rows = apply_overlay(&mut series).expect("overlay");

        assert_eq!(rows.len(), 1);
        assert_eq!(series.column_count(), before + 3);
        let names = series.column_names();
        assert_eq!(
            &names[before..],
            &[SHAKER_LOAD_COLUMN, SCREEN_OCCUPANCY_COLUMN, OVERLOAD_RISK_COLUMN]
        );
        assert_eq!(
            series.column(SHAKER_LOAD_COLUMN).and_then(|c| c.data.get(0)),
            Some(45.0)
        );
    }
}
