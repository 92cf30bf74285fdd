//! Index command: run one location's record through the full chain.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use palmer_balance::{
    CalibrationPeriod, SlotClimatology, WaterBalance, cafec_precip, climatic_characteristics,
    moisture_departure, water_balance, z_index,
};
use palmer_spell::{DroughtCategory, SpellTransition, advance};

use crate::cli::IndexArgs;
use crate::config::{PalmerConfig, PeriodToml, SeriesToml};
use crate::convert::{self, SlotParams};

/// Output record for one period.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRecord {
    pub index: usize,
    pub slot: usize,
    pub precip: f64,
    pub pet: f64,
    pub z_index: f64,
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
    pub uaccum: f64,
    pub prob_spell_end: f64,
    pub pmdi: f64,
    pub category: Option<DroughtCategory>,
    pub transition: SpellTransition,
}

/// Run the index pipeline and write the JSON records.
pub fn run(args: IndexArgs) -> Result<()> {
    let _cmd = info_span!("index").entered();

    // 1. Load site config
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PalmerConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Load input series
    let series_str = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input series: {}", args.input.display()))?;
    let series: SeriesToml =
        toml::from_str(&series_str).context("failed to parse TOML input series")?;
    info!(
        path = %args.input.display(),
        n_periods = series.period.len(),
        "input series loaded"
    );

    // 3. Compute
    let records = compute_series(&config, &series.period)?;

    // 4. Write
    let json = serde_json::to_string_pretty(&records).context("failed to serialize records")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "records written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Computes the per-period records for a location.
///
/// A period with missing data produces a NaN record; the soil moisture and
/// spell state of the last valid period carry over to the next one.
pub fn compute_series(config: &PalmerConfig, periods: &[PeriodToml]) -> Result<Vec<PeriodRecord>> {
    if periods.is_empty() {
        bail!("input series contains no periods");
    }
    if config.period.is_provisional() {
        warn!(
            period = %config.period,
            "zewt for this period type is an unverified placeholder"
        );
    }

    let profile = convert::build_profile(&config.site)?;
    let configured = config
        .climatology
        .as_ref()
        .map(convert::build_slot_params)
        .transpose()?;
    let n_slots = match &configured {
        Some(params) => params.len(),
        None => periods.iter().map(|p| p.slot).max().unwrap_or(0),
    };
    for (i, p) in periods.iter().enumerate() {
        if p.slot == 0 || p.slot > n_slots {
            bail!("period {i} has slot {} outside 1..={n_slots}", p.slot);
        }
    }

    // Water balance is independent of the climatology, so run it first.
    let mut soil = convert::initial_soil(&config.site, &profile);
    let balances: Vec<WaterBalance> = periods
        .iter()
        .map(|p| {
            let wb = water_balance(&profile, p.pet, p.precip, &soil);
            if wb.is_finite() {
                soil = wb.soil;
            }
            wb
        })
        .collect();

    let params = match configured {
        Some(params) => params,
        None => calibrate(periods, &balances, n_slots)?,
    };

    let mut state = convert::initial_state(&config.initial);
    let mut records = Vec::with_capacity(periods.len());
    for (i, (p, wb)) in periods.iter().zip(&balances).enumerate() {
        let slot = &params[p.slot - 1];
        let d = moisture_departure(p.precip, cafec_precip(wb, p.pet, &slot.coefficients));
        let z = z_index(d, slot.k);

        let result = advance(config.period, z, &state);
        if result.is_missing() {
            debug!(index = i, "missing period, carrying state forward");
        } else {
            state = result.state;
        }
        let pmdi = result.pmdi();
        records.push(PeriodRecord {
            index: i,
            slot: p.slot,
            precip: p.precip,
            pet: p.pet,
            z_index: z,
            x1: result.x1(),
            x2: result.x2(),
            x3: result.x3(),
            uaccum: result.uaccum(),
            prob_spell_end: result.prob_spell_end,
            pmdi,
            category: DroughtCategory::from_index(pmdi),
            transition: result.transition,
        });
    }

    let n_missing = records.iter().filter(|r| r.pmdi.is_nan()).count();
    let n_drought = records
        .iter()
        .filter(|r| r.category.is_some_and(DroughtCategory::is_drought))
        .count();
    let final_class = records
        .last()
        .and_then(|r| r.category)
        .map_or("missing", DroughtCategory::label);
    info!(
        n_periods = records.len(),
        n_missing,
        n_drought,
        final_class,
        final_x3 = state.x3,
        "spell accounting complete"
    );
    Ok(records)
}

/// Calibrates every slot from the input record itself.
fn calibrate(
    periods: &[PeriodToml],
    balances: &[WaterBalance],
    n_slots: usize,
) -> Result<Vec<SlotParams>> {
    let mut by_slot: BTreeMap<usize, Vec<CalibrationPeriod>> = BTreeMap::new();
    for (p, wb) in periods.iter().zip(balances) {
        by_slot.entry(p.slot).or_default().push(CalibrationPeriod {
            precip: p.precip,
            pet: p.pet,
            balance: *wb,
        });
    }

    let mut climatology = Vec::with_capacity(n_slots);
    for slot in 1..=n_slots {
        let slot_periods = by_slot.get(&slot).map(Vec::as_slice).unwrap_or_default();
        let c = SlotClimatology::calibrate(slot_periods)
            .with_context(|| format!("failed to calibrate slot {slot}"))?;
        climatology.push(c);
    }
    let ks = climatic_characteristics(&climatology).context("failed to derive K")?;
    info!(n_slots, "calibrated climatology from input record");

    Ok(climatology
        .iter()
        .zip(ks)
        .map(|(c, k)| SlotParams {
            coefficients: *c.coefficients(),
            k,
        })
        .collect())
}
