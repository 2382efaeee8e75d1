//! Report presenters for ranked thruster evaluations.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Human-readable mission analysis report.
pub mod text {
    use std::io::{self, Write};

    use select_propulsion::MissionConstraints;
    use select_ranking::{Evaluation, Exclusion, ExclusionReason};

    const RULE_WIDTH: usize = 80;

    /// Notice printed in place of the table when nothing survives the filters.
    pub const NO_FEASIBLE: &str = "No feasible thrusters found for these constraints.";

    #[derive(Debug, Clone, Copy, Default)]
    pub struct ReportOptions {
        /// Append a section listing thrusters dropped from the ranking and why.
        pub show_excluded: bool,
    }

    /// Write the mass breakdown followed by the ranked recommendation table.
    pub fn write_report(
        writer: &mut dyn Write,
        constraints: &MissionConstraints,
        evaluation: &Evaluation,
        options: ReportOptions,
    ) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "--- MISSION ANALYSIS ---")?;
        writeln!(
            writer,
            "Target Delta-V: {} m/s | Satellite Dry Mass: {} kg | Power Limit: {} W",
            constraints.required_dv, constraints.dry_mass_kg, constraints.max_power_w
        )?;
        writeln!(writer)?;

        if evaluation.ranked.is_empty() {
            writeln!(writer, "{NO_FEASIBLE}")?;
        } else {
            writeln!(writer, "Detailed Mass Calculations:")?;
            for thruster in &evaluation.ranked {
                writeln!(
                    writer,
                    "- The {} needs {:.3} kg of fuel.",
                    thruster.name, thruster.fuel_kg
                )?;
                writeln!(
                    writer,
                    "  Calculation: {} kg (Sat) + {} kg (Thruster) + {:.3} kg (Fuel) = {:.2} kg",
                    constraints.dry_mass_kg,
                    thruster.thruster_mass_kg,
                    thruster.fuel_kg,
                    thruster.total_mass_kg
                )?;
            }

            writeln!(writer)?;
            writeln!(writer, "--- RANKED RECOMMENDATIONS ---")?;
            writeln!(
                writer,
                "{:<30} | {:<15} | {:<10} | {}",
                "NAME", "TYPE", "POWER(W)", "TOTAL MASS(kg)"
            )?;
            writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;
            for thruster in &evaluation.ranked {
                writeln!(
                    writer,
                    "{:<30} | {:<15} | {:<10} | {:.2}",
                    thruster.name, thruster.kind, thruster.power_w, thruster.total_mass_kg
                )?;
            }
        }

        if options.show_excluded && !evaluation.excluded.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "--- EXCLUDED ---")?;
            for exclusion in &evaluation.excluded {
                writeln!(writer, "- {}", describe(exclusion))?;
            }
        }
        Ok(())
    }

    fn describe(exclusion: &Exclusion) -> String {
        match exclusion.reason {
            ExclusionReason::PowerExceeded {
                power_w,
                max_power_w,
            } => format!(
                "{}: draws {} W, above the {} W limit",
                exclusion.name, power_w, max_power_w
            ),
            ExclusionReason::InfeasiblePropulsion { isp_s } => format!(
                "{}: non-positive Isp ({} s) cannot deliver the maneuver",
                exclusion.name, isp_s
            ),
        }
    }
}

/// JSON document carrying the inputs, ranking and exclusion ledger.
pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    use select_propulsion::MissionConstraints;
    use select_ranking::{EvaluatedThruster, Evaluation, Exclusion};

    #[derive(Serialize)]
    struct Report<'a> {
        constraints: &'a MissionConstraints,
        ranked: &'a [EvaluatedThruster],
        excluded: &'a [Exclusion],
    }

    pub fn write_report(
        writer: &mut dyn Write,
        constraints: &MissionConstraints,
        evaluation: &Evaluation,
    ) -> io::Result<()> {
        let report = Report {
            constraints,
            ranked: &evaluation.ranked,
            excluded: &evaluation.excluded,
        };
        to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)
    }
}

/// CSV export of the ranked table.
pub mod table {
    use serde::Serialize;
    use std::io::{self, Write};

    use select_ranking::EvaluatedThruster;

    const HEADER: [&str; 6] = [
        "name",
        "type",
        "power_w",
        "thruster_mass_kg",
        "fuel_kg",
        "total_mass_kg",
    ];

    #[derive(Serialize)]
    struct Row<'a> {
        name: &'a str,
        kind: &'a str,
        power_w: f64,
        thruster_mass_kg: f64,
        fuel_kg: f64,
        total_mass_kg: f64,
    }

    /// Write the header and one row per ranked thruster. The header is always emitted.
    pub fn write_table(writer: &mut dyn Write, ranked: &[EvaluatedThruster]) -> io::Result<()> {
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        out.write_record(HEADER)?;
        for thruster in ranked {
            out.serialize(Row {
                name: &thruster.name,
                kind: &thruster.kind,
                power_w: thruster.power_w,
                thruster_mass_kg: thruster.thruster_mass_kg,
                fuel_kg: thruster.fuel_kg,
                total_mass_kg: thruster.total_mass_kg,
            })?;
        }
        out.flush()
    }
}
